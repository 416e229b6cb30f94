//! User service
//!
//! Login-or-register, logout, and resolving the current session to a user.

use crate::audit::EntityType;
use crate::error::{GroupSplitError, GroupSplitResult};
use crate::models::user::{validate_email, validate_name};
use crate::models::User;
use crate::storage::Storage;

/// Service for user identity
pub struct UserService<'a> {
    storage: &'a Storage,
}

/// Result of a login attempt
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    /// True if this login registered a new user
    pub registered: bool,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Log in by e-mail, registering the user on first sight
    ///
    /// An existing user keeps their stored name; `name` is only used when
    /// registering, but it is validated either way.
    pub fn login(&self, email: &str, name: &str) -> GroupSplitResult<LoginOutcome> {
        let email = email.trim();
        let name = name.trim();
        validate_email(email)?;
        validate_name(name)?;

        let (user, registered) = match self.storage.users.get_by_email(email)? {
            Some(user) => (user, false),
            None => {
                let user = User::new(name, email);
                user.validate()?;
                self.storage.users.upsert(user.clone())?;
                self.storage.users.save()?;
                (user, true)
            }
        };

        self.storage.session.start(user.id)?;

        if registered {
            self.storage.log_create(
                EntityType::User,
                user.id.to_string(),
                Some(user.name.clone()),
                &user,
            )?;
            tracing::info!(user = %user.id, "registered new user");
        } else {
            tracing::info!(user = %user.id, "user logged in");
        }

        Ok(LoginOutcome { user, registered })
    }

    /// End the session, returning who was logged in
    pub fn logout(&self) -> GroupSplitResult<Option<User>> {
        let previous = match self.storage.session.end()? {
            Some(user_id) => self.storage.users.get(user_id)?,
            None => None,
        };

        if let Some(user) = &previous {
            tracing::info!(user = %user.id, "user logged out");
        }
        Ok(previous)
    }

    /// The logged-in user, if any
    ///
    /// A session pointing at a user that no longer exists counts as
    /// logged out.
    pub fn current_user(&self) -> GroupSplitResult<Option<User>> {
        match self.storage.session.current_user_id()? {
            Some(user_id) => {
                let user = self.storage.users.get(user_id)?;
                if user.is_none() {
                    tracing::warn!(user = %user_id, "session refers to an unknown user");
                }
                Ok(user)
            }
            None => Ok(None),
        }
    }

    /// The logged-in user, or an authentication error
    pub fn require_user(&self) -> GroupSplitResult<User> {
        self.current_user()?
            .ok_or_else(|| GroupSplitError::Unauthenticated("Authentication required.".into()))
    }

    /// Like [`Self::require_user`], naming the action in the error
    pub fn require_user_to(&self, action: &str) -> GroupSplitResult<User> {
        self.current_user()?.ok_or_else(|| {
            GroupSplitError::Unauthenticated(format!("You must be logged in to {}.", action))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::GroupSplitPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroupSplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_login_registers_then_reuses() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let first = service.login("asha@example.com", "Asha").unwrap();
        assert!(first.registered);

        let second = service.login("ASHA@example.com", "Someone Else").unwrap();
        assert!(!second.registered);
        assert_eq!(second.user.id, first.user.id);
        assert_eq!(second.user.name, "Asha");
        assert_eq!(storage.users.count().unwrap(), 1);
    }

    #[test]
    fn test_login_validates_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        let err = service.login("not-an-email", "Asha").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address.");

        let err = service.login("asha@example.com", "A").unwrap_err();
        assert_eq!(err.to_string(), "Name must be at least 2 characters.");
        assert!(service.current_user().unwrap().is_none());
    }

    #[test]
    fn test_session_and_logout() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);

        assert!(matches!(
            service.require_user(),
            Err(GroupSplitError::Unauthenticated(_))
        ));

        let outcome = service.login("ravi@example.com", "Ravi").unwrap();
        assert_eq!(service.require_user().unwrap().id, outcome.user.id);

        let previous = service.logout().unwrap().unwrap();
        assert_eq!(previous.id, outcome.user.id);

        let err = service.require_user_to("create a group").unwrap_err();
        assert_eq!(err.to_string(), "You must be logged in to create a group.");
    }
}
