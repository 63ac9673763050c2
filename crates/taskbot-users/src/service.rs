//! User service: registration and lookup keyed by external chat identity.

use chrono::Utc;
use tracing::{debug, instrument, warn};

use taskbot_core::errors::{RepositoryError, ServiceError};
use taskbot_core::models::User;
use taskbot_core::repository::UserRepository;

use crate::params::CreateParams;
use crate::validate;

/// User service over abstract user storage.
pub struct UserService<U> {
    users: U,
}

impl<U: UserRepository> UserService<U> {
    /// Create a service over the given repository.
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Register a user for the given chat identity.
    ///
    /// A repository `AlreadyExists` is swallowed and reported as success,
    /// making registration an idempotent create-or-noop. Note this also
    /// hides any genuine conflict where two logical users race onto one
    /// `telegram_id`; the behavior is kept as designed pending product
    /// input.
    #[instrument(skip(self, params), fields(telegram_id = params.telegram_id))]
    pub fn create(&self, params: CreateParams) -> Result<(), ServiceError> {
        validate::create(&params)?;

        let draft = User {
            id: 0,
            telegram_id: params.telegram_id,
            // storage stamps the real value
            created_at: Utc::now(),
        };
        match self.users.create(draft) {
            Ok(_) => Ok(()),
            Err(RepositoryError::AlreadyExists) => {
                debug!(telegram_id = params.telegram_id, "user already registered");
                Ok(())
            }
            Err(err) => {
                warn!(telegram_id = params.telegram_id, error = %err, "user create failed");
                Err(err.into())
            }
        }
    }

    /// Load one user by chat identity.
    #[instrument(skip(self))]
    pub fn find_by_telegram_id(&self, telegram_id: i64) -> Result<User, ServiceError> {
        self.users.find_by_telegram_id(telegram_id).map_err(|err| {
            warn!(telegram_id, error = %err, "user lookup failed");
            ServiceError::from(err)
        })
    }

    /// Delete one user by chat identity.
    #[instrument(skip(self))]
    pub fn delete_by_telegram_id(&self, telegram_id: i64) -> Result<(), ServiceError> {
        self.users.delete_by_telegram_id(telegram_id).map_err(|err| {
            warn!(telegram_id, error = %err, "user delete failed");
            ServiceError::from(err)
        })
    }
}
