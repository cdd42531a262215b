//! The registration wizard controller.
//!
//! A [`WizardSession`] owns the form state of one registration and gates
//! forward navigation on the validity of the current step's fields.

mod error;
mod session;

pub use error::WizardError;
pub use session::{Navigation, Position, WizardSession};
