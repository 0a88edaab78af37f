pub mod in_memory_repository;
pub mod mongo_repository;
pub mod resource;

use std::sync::Arc;

pub use in_memory_repository::InMemoryRepository;
pub use mongo_repository::MongoRepository;
pub use resource::{Resource, ResourceRepository};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{
        Achievement, AppSetting, Category, Question, Quiz, QuizResult, UserProfile,
    },
};

/// One repository per collection, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub quizzes: Arc<dyn ResourceRepository<Quiz>>,
    pub questions: Arc<dyn ResourceRepository<Question>>,
    pub results: Arc<dyn ResourceRepository<QuizResult>>,
    pub categories: Arc<dyn ResourceRepository<Category>>,
    pub achievements: Arc<dyn ResourceRepository<Achievement>>,
    pub users: Arc<dyn ResourceRepository<UserProfile>>,
    pub settings: Arc<dyn ResourceRepository<AppSetting>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            quizzes: Arc::new(InMemoryRepository::<Quiz>::new()),
            questions: Arc::new(InMemoryRepository::<Question>::new()),
            results: Arc::new(InMemoryRepository::<QuizResult>::new()),
            categories: Arc::new(InMemoryRepository::<Category>::new()),
            achievements: Arc::new(InMemoryRepository::<Achievement>::new()),
            users: Arc::new(InMemoryRepository::<UserProfile>::new()),
            settings: Arc::new(InMemoryRepository::<AppSetting>::new()),
        }
    }

    pub async fn mongo(db: &Database) -> AppResult<Self> {
        Ok(Self {
            quizzes: Arc::new(indexed::<Quiz>(db).await?),
            questions: Arc::new(indexed::<Question>(db).await?),
            results: Arc::new(indexed::<QuizResult>(db).await?),
            categories: Arc::new(indexed::<Category>(db).await?),
            achievements: Arc::new(indexed::<Achievement>(db).await?),
            users: Arc::new(indexed::<UserProfile>(db).await?),
            settings: Arc::new(indexed::<AppSetting>(db).await?),
        })
    }
}

async fn indexed<T: Resource>(db: &Database) -> AppResult<MongoRepository<T>> {
    let repository = MongoRepository::<T>::new(db);
    repository.ensure_indexes().await?;
    Ok(repository)
}
