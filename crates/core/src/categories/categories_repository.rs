use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::CategoryRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::schema::categories;

/// Repository for managing category data in the database.
pub struct CategoryRepository {
    pool: Arc<DbPool>,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create(&self, user_id: &str, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;

        let mut conn = get_connection(&self.pool)?;
        let now = chrono::Utc::now().naive_utc();

        let category = Category {
            id: new_category
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            name: new_category.name,
            category_type: new_category.category_type,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(categories::table)
            .values(&category)
            .execute(&mut conn)?;

        Ok(category)
    }

    fn get_for_user(&self, user_id: &str, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;

        categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::user_id.eq(user_id))
            .first::<Category>(&mut conn)
            .optional()?
            .ok_or_else(|| {
                Error::AccessDenied("Category not found or access denied".to_string())
            })
    }

    fn list(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        categories::table
            .filter(categories::user_id.eq(user_id))
            .order(categories::name.asc())
            .load::<Category>(&mut conn)
            .map_err(Error::from)
    }
}
