//! Session lifecycle
//!
//! The session is an explicit value threaded through calls, not ambient
//! process state: whoever owns the `SessionContext` decides its scope and
//! teardown. Logging out clears the session but never the like record,
//! which is device-scoped rather than session-scoped.

use std::sync::Arc;

use tracing::info;
use validator::ValidateEmail;

use crate::error::{HubError, Result};
use crate::models::UserProfile;
use crate::services::AuthProvider;

/// Current authenticated user, plus the auth provider it came from
pub struct SessionContext {
    auth: Arc<dyn AuthProvider>,
    current: Option<UserProfile>,
}

impl SessionContext {
    /// Start with no user signed in
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            auth,
            current: None,
        }
    }

    /// Sign in with existing credentials
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        let profile = self.auth.sign_in(email, password).await?;
        info!("Signed in as {}", profile.email);
        self.current = Some(profile.clone());
        Ok(profile)
    }

    /// Create an account, optionally setting a display name, and sign in
    pub async fn signup(
        &mut self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<UserProfile> {
        if !email.validate_email() {
            return Err(HubError::Validation(format!(
                "'{email}' is not a valid email address"
            )));
        }

        let mut profile = self.auth.sign_up(email, password).await?;
        if let Some(name) = display_name.map(str::trim).filter(|name| !name.is_empty()) {
            profile = self.auth.update_profile(&profile.uid, name).await?;
        }

        info!("Created account for {}", profile.email);
        self.current = Some(profile.clone());
        Ok(profile)
    }

    /// End the session and clear session-scoped state
    pub async fn logout(&mut self) -> Result<()> {
        self.auth.sign_out().await?;
        if let Some(user) = self.current.take() {
            info!("Signed out {}", user.email);
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
