use async_trait::async_trait;

use super::categories_model::{Category, NewCategory};
use crate::errors::Result;

/// Trait defining the contract for category repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    async fn create(&self, user_id: &str, new_category: NewCategory) -> Result<Category>;

    /// Resolves a category only when it belongs to `user_id`; the failure
    /// message does not reveal whether the id exists at all.
    fn get_for_user(&self, user_id: &str, category_id: &str) -> Result<Category>;

    fn list(&self, user_id: &str) -> Result<Vec<Category>>;
}

/// Trait defining the contract for category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    async fn create_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category>;
    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category>;
    fn get_categories(&self, user_id: &str) -> Result<Vec<Category>>;
}
