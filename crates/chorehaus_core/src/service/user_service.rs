//! Household member use-case service.

use crate::model::user::User;
use crate::repo::household_repo::RepoResult;
use crate::repo::user_repo::UserRepository;
use crate::service::error::{ServiceError, ServiceResult};
use log::info;

/// User service facade over repository implementations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a member under a trimmed, non-blank, unused name.
    pub fn register_user(&self, name: &str) -> ServiceResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidUserName);
        }

        let user = User::new(name);
        self.repo.create_user(&user)?;
        info!("event=user_register module=service status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Lists all members ordered by id.
    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.repo.list_users()
    }

    pub fn find_user(&self, name: &str) -> RepoResult<Option<User>> {
        self.repo.get_user_by_name(name.trim())
    }
}
