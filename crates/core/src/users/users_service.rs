use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{Error, Result, ValidationError};

use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { repository }
    }

    fn validate(new_user: &NewUser) -> Result<()> {
        if new_user.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        let email = new_user.email.trim();
        if email.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "email".to_string(),
            )));
        }
        if !email.contains('@') {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "'{}' is not an email address",
                email
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        Self::validate(&new_user)?;
        let normalized = NewUser {
            name: new_user.name.trim().to_string(),
            email: new_user.email.trim().to_ascii_lowercase(),
            password_hash: new_user.password_hash,
        };
        self.repository.insert_user(normalized).await
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository
            .find_by_email(&email.trim().to_ascii_lowercase())
    }

    fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.repository.get_user(user_id)
    }
}
