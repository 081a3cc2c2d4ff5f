//! Injected collaborator traits for the monitor's outward surfaces.
//!
//! The monitor never touches storage, navigation, or the UI directly;
//! the embedding application implements these seams.

use async_trait::async_trait;

use super::entities::WarningKind;

/// Yes/no warning dialog abstraction.
///
/// Both warning paths use this; the returned boolean is the user's answer,
/// `true` meaning "stay active". The future may stay pending indefinitely
/// (dialog never answered); callers race it against their own countdown.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Present the warning dialog and resolve with the user's decision.
    async fn confirm_stay_active(&self, kind: WarningKind) -> bool;
}

/// Client-side credential storage.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Current access token, if any.
    fn access_token(&self) -> Option<String>;

    /// Remove the token and every role-specific profile blob cached
    /// alongside it.
    fn clear_session(&self);
}

/// Post-teardown navigation.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Redirect to the application's public entry route.
    fn redirect_to_entry(&self);
}
