use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    repositories::resource::{Resource, ResourceRepository},
};

/// Process-local store used for `STORAGE_BACKEND=memory` and in tests.
/// Keeps insertion order, which is the order lists come back in.
pub struct InMemoryRepository<T: Resource> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T: Resource> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }
}

fn field_matches<T: Resource>(item: &T, field: &str, value: &str) -> bool {
    if field == T::ID_FIELD {
        return item.resource_id() == value;
    }

    serde_json::to_value(item)
        .ok()
        .and_then(|json| json.get(field).and_then(|v| v.as_str()).map(|v| v == value))
        .unwrap_or(false)
}

#[async_trait]
impl<T: Resource> ResourceRepository<T> for InMemoryRepository<T> {
    async fn create(&self, item: T) -> AppResult<T> {
        let mut items = self.items.write().await;
        if items.iter().any(|i| i.resource_id() == item.resource_id()) {
            return Err(AppError::AlreadyExists(format!(
                "{} with {} '{}' already exists",
                T::LABEL,
                T::ID_FIELD,
                item.resource_id()
            )));
        }

        items.push(item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|i| i.resource_id() == id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        let items = self.items.read().await;
        Ok(items.clone())
    }

    async fn find_by_field(&self, field: &str, value: &str) -> AppResult<Vec<T>> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|i| field_matches(*i, field, value))
            .cloned()
            .collect())
    }

    async fn update(&self, item: T) -> AppResult<T> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|i| i.resource_id() == item.resource_id())
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} with {} '{}' not found",
                    T::LABEL,
                    T::ID_FIELD,
                    item.resource_id()
                ))
            })?;

        *slot = item.clone();
        Ok(item)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.resource_id() != id);

        if items.len() == before {
            return Err(AppError::NotFound(format!(
                "{} with {} '{}' not found",
                T::LABEL,
                T::ID_FIELD,
                id
            )));
        }

        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        let items = self.items.read().await;
        Ok(items.len() as u64)
    }
}
