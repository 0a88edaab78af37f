use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    repositories::resource::{Resource, ResourceRepository},
};

const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct MongoRepository<T: Resource> {
    collection: Collection<T>,
}

impl<T: Resource> MongoRepository<T> {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<T>();
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for {} collection", T::COLLECTION);

        let mut keys = Document::new();
        keys.insert(T::ID_FIELD, 1);

        let id_index = IndexModel::builder()
            .keys(keys)
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(format!("{}_unique", T::ID_FIELD))
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for {} collection", T::COLLECTION);
        Ok(())
    }
}

fn by_field(field: &str, value: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(field, value);
    filter
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl<T: Resource> ResourceRepository<T> for MongoRepository<T> {
    async fn create(&self, item: T) -> AppResult<T> {
        match self.collection.insert_one(&item).await {
            Ok(_) => Ok(item),
            Err(err) if is_duplicate_key(&err) => Err(AppError::AlreadyExists(format!(
                "{} with {} '{}' already exists",
                T::LABEL,
                T::ID_FIELD,
                item.resource_id()
            ))),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        let item = self.collection.find_one(by_field(T::ID_FIELD, id)).await?;
        Ok(item)
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        let items = self.collection.find(doc! {}).await?.try_collect().await?;
        Ok(items)
    }

    async fn find_by_field(&self, field: &str, value: &str) -> AppResult<Vec<T>> {
        let items = self
            .collection
            .find(by_field(field, value))
            .await?
            .try_collect()
            .await?;
        Ok(items)
    }

    async fn update(&self, item: T) -> AppResult<T> {
        let result = self
            .collection
            .replace_one(by_field(T::ID_FIELD, item.resource_id()), &item)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "{} with {} '{}' not found",
                T::LABEL,
                T::ID_FIELD,
                item.resource_id()
            )));
        }

        Ok(item)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(by_field(T::ID_FIELD, id)).await?;

        if result.deleted_count == 0 {
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
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}
