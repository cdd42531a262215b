//! TUI screen implementations.

pub mod activities;
pub mod activity_form;
pub mod help;
pub mod home;
pub mod login;
pub mod registration;

pub use activities::{ActivitiesState, DELETE_DENIED, draw_activities};
pub use activity_form::{ActivityFormState, draw_activity_form};
pub use help::{HelpState, draw_help};
pub use home::{HomeState, draw_home};
pub use login::{LoginState, draw_login};
pub use registration::{RegistrationState, draw_registration};
