//! Hosted content store and auth provider.
//!
//! The admin screens only see [`ContentBackend`]; [`RestBackend`] speaks the
//! PostgREST/GoTrue dialect of the hosted database.

mod error;
mod rest;

use std::future::Future;

pub use error::BackendError;
pub use rest::RestBackend;

use crate::model::{Activity, ActivityDraft, UserSession};

/// Activities CRUD and password auth.
///
/// Every content call takes the signed-in session; role checks happen before
/// the call is made.
pub trait ContentBackend: Clone + Send + Sync + 'static {
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserSession, BackendError>> + Send;

    fn sign_out(&self, session: &UserSession) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// All activities, published or not, newest first.
    fn list_activities(
        &self,
        session: &UserSession,
    ) -> impl Future<Output = Result<Vec<Activity>, BackendError>> + Send;

    fn create_activity(
        &self,
        session: &UserSession,
        draft: &ActivityDraft,
    ) -> impl Future<Output = Result<Activity, BackendError>> + Send;

    fn update_activity(
        &self,
        session: &UserSession,
        id: &str,
        draft: &ActivityDraft,
    ) -> impl Future<Output = Result<Activity, BackendError>> + Send;

    fn set_published(
        &self,
        session: &UserSession,
        id: &str,
        published: bool,
    ) -> impl Future<Output = Result<Activity, BackendError>> + Send;

    fn delete_activity(
        &self,
        session: &UserSession,
        id: &str,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}
