use async_trait::async_trait;

use crate::errors::Result;
use crate::users::users_model::{NewUser, User};

/// Trait for user repository operations.
///
/// Email uniqueness is enforced by a unique index; a duplicate insert
/// surfaces as `DatabaseError::UniqueViolation`.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn insert_user(&self, new_user: NewUser) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;
}

/// Trait for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn get_user(&self, user_id: &str) -> Result<Option<User>>;
}
