use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppResult;

/// A document type stored in its own collection and addressed by a string key.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;
    const ID_FIELD: &'static str = "id";
    /// Human readable name used in error messages.
    const LABEL: &'static str;

    fn resource_id(&self) -> &str;
}

/// CRUD storage for one resource type. Every entity of the admin surface goes
/// through this one trait instead of a hand-written repository per entity.
#[async_trait]
pub trait ResourceRepository<T: Resource>: Send + Sync {
    async fn create(&self, item: T) -> AppResult<T>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<T>>;
    async fn find_all(&self) -> AppResult<Vec<T>>;
    /// Exact match on a top-level string field.
    async fn find_by_field(&self, field: &str, value: &str) -> AppResult<Vec<T>>;
    async fn update(&self, item: T) -> AppResult<T>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn count(&self) -> AppResult<u64>;
}
