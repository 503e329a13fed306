use std::sync::Arc;

use async_trait::async_trait;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;

/// Service for managing categories.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn create_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category> {
        self.repository.create(user_id, new_category).await
    }

    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category> {
        self.repository.get_for_user(user_id, category_id)
    }

    fn get_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.repository.list(user_id)
    }
}
