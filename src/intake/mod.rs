//! Registration submission: wire mapping and delivery.
//!
//! [`build_payload`] is a pure mapping from a [`FormState`](crate::model::FormState)
//! snapshot to the flat JSON object the spreadsheet intake expects.
//! [`HttpIntake`] posts it and fans it out to webhooks.

mod client;
mod error;
mod payload;

pub use client::{HttpIntake, Intake};
pub use error::{IntakeError, PayloadError};
pub use payload::{PLACEHOLDER, Payload, TIMESTAMP_KEY, build_payload};
