//! Actions returned by screen event handlers.

use crate::intake::Payload;
use crate::model::{Activity, ActivityDraft};

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to update global state, call the intake and
/// backend, and navigate between screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Deliver a registration snapshot in the background.
    SubmitRegistration(Payload),
    /// Sign in with email and password.
    SignIn { email: String, password: String },
    /// End the current admin session.
    SignOut,
    /// Reload the activities list from the backend.
    RefreshActivities,
    /// Open an empty activity form.
    NewActivity,
    /// Open the form for an existing activity.
    EditActivity(Activity),
    /// Create (`id == None`) or update an activity.
    SaveActivity {
        id: Option<String>,
        draft: ActivityDraft,
    },
    /// Show or hide an activity on the public page.
    TogglePublished { id: String, published: bool },
    /// Delete the activity with the given ID.
    DeleteActivity(String),
    /// Quit the application.
    Quit,
}
