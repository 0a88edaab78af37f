use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Category, dto::request::CategoryRequest},
    repositories::ResourceRepository,
};

pub struct CategoryService {
    repository: Arc<dyn ResourceRepository<Category>>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn ResourceRepository<Category>>) -> Self {
        Self { repository }
    }

    /// All categories sorted by name.
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let mut categories = self.repository.find_all().await?;
        categories.sort_by_key(|c| c.name.to_lowercase());
        Ok(categories)
    }

    pub async fn get_category(&self, id: &str) -> AppResult<Category> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id '{}' not found", id)))
    }

    pub async fn create_category(&self, request: CategoryRequest) -> AppResult<Category> {
        request.validate()?;
        let name = request.name.trim();
        self.ensure_unique_name(name, None).await?;

        let mut category = Category::new(name, &request.description, &request.icon);
        if let Some(active) = request.active {
            category.active = active;
        }

        self.repository.create(category).await
    }

    pub async fn update_category(&self, id: &str, request: CategoryRequest) -> AppResult<Category> {
        request.validate()?;
        let mut category = self.get_category(id).await?;
        let name = request.name.trim();
        self.ensure_unique_name(name, Some(id)).await?;

        category.name = name.to_string();
        category.description = request.description;
        category.icon = request.icon;
        if let Some(active) = request.active {
            category.active = active;
        }

        self.repository.update(category).await
    }

    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await
    }

    /// Names are unique ignoring case.
    async fn ensure_unique_name(&self, name: &str, except_id: Option<&str>) -> AppResult<()> {
        let wanted = name.to_lowercase();
        let taken = self
            .repository
            .find_all()
            .await?
            .iter()
            .any(|c| c.name.to_lowercase() == wanted && Some(c.id.as_str()) != except_id);

        if taken {
            return Err(AppError::AlreadyExists(format!(
                "Category '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}
