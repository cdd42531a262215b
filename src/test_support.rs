//! Test-only helpers shared across modules.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::backend::{BackendError, ContentBackend};
use crate::intake::{Intake, IntakeError, Payload};
use crate::model::{Activity, ActivityDraft, Field, FormState, Role, UserSession};

/// An intake that records payloads instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct FakeIntake {
    delivered: Arc<Mutex<Vec<Payload>>>,
    fail: bool,
    delay: Option<Duration>,
}

impl FakeIntake {
    /// An intake whose every delivery fails at transport level.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// An intake that answers successfully after `delay`.
    pub fn delayed(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Number of delivery attempts, failed ones included.
    pub fn calls(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }

    pub fn delivered(&self) -> Vec<Payload> {
        self.delivered.lock().unwrap().clone()
    }
}

impl Intake for FakeIntake {
    async fn deliver(&self, payload: &Payload) -> Result<(), IntakeError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.delivered.lock().unwrap().push(payload.clone());
        if self.fail {
            Err(IntakeError::Aborted("connection reset by peer".into()))
        } else {
            Ok(())
        }
    }
}

/// A form with every required field filled and every optional field blank.
pub fn filled_form() -> FormState {
    let mut state = FormState::new();
    state.set_text(Field::FullName, "Ahmad");
    state.set_text(Field::Gender, "male");
    state.set_text(Field::PlaceOfBirth, "Kediri");
    state.set_date(Field::DateOfBirth, NaiveDate::from_ymd_opt(2012, 3, 14));
    state.set_text(Field::Phone, "081298765432");
    state.set_text(Field::Address, "Jl. Pesantren No. 1");
    state.set_text(Field::City, "Kediri");
    state.set_text(Field::Province, "Jawa Timur");
    state.set_text(Field::FatherName, "Abdullah");
    state.set_text(Field::MotherName, "Aminah");
    state.set_text(Field::ParentPhone, "081234567890");
    state.set_text(Field::PreviousSchool, "MI Al-Hikmah");
    state.set_text(Field::LastEducation, "sd");
    state.set_text(Field::Program, "tahfidz");
    state.set_text(Field::Boarding, "mukim");
    state.set_flag(Field::AgreeTerms, true);
    state
}

/// Serves exactly one HTTP request on a local port.
///
/// Returns the base URL and a handle resolving to the raw request text.
pub async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move { answer(&listener, status_line, body).await });
    (url, handle)
}

/// Serves one request per response, in order, each on a fresh connection.
pub async fn serve_sequence(
    responses: Vec<(&'static str, &'static str)>,
) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status_line, body) in responses {
            requests.push(answer(&listener, status_line, body).await);
        }
        requests
    });
    (url, handle)
}

async fn answer(listener: &TcpListener, status_line: &str, body: &str) -> String {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut request = Vec::new();
    let mut chunk = [0_u8; 4096];
    while !request_complete(&request) {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        request.extend_from_slice(&chunk[..n]);
    }

    let response = format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    let _ = socket.shutdown().await;
    String::from_utf8_lossy(&request).into_owned()
}

/// Returns a URL on which nothing is listening.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}

/// Returns the body of a raw HTTP request.
pub fn request_body(request: &str) -> &str {
    request
        .split_once("\r\n\r\n")
        .map_or("", |(_, body)| body)
}

/// Password accepted by [`FakeBackend`] for every account.
pub const FAKE_PASSWORD: &str = "rahasia";

/// An in-memory content backend.
///
/// Accounts: `admin@pesantren.id` (admin), `editor@pesantren.id` (editor),
/// `wali@pesantren.id` (no roles).
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    activities: Arc<Mutex<Vec<Activity>>>,
    next_id: Arc<Mutex<u32>>,
}

impl FakeBackend {
    pub fn with_activities(activities: Vec<Activity>) -> Self {
        let backend = Self::default();
        *backend.activities.lock().unwrap() = activities;
        backend
    }

    pub fn activities(&self) -> Vec<Activity> {
        self.activities.lock().unwrap().clone()
    }

    fn stored(&self, id: &str, draft: &ActivityDraft) -> Activity {
        Activity {
            id: id.to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            date: draft.date,
            image_url: draft.image_url.clone(),
            published: draft.published,
            created_at: None,
        }
    }
}

/// A signed-in session holding `roles`.
pub fn session_with(roles: &[Role]) -> UserSession {
    UserSession {
        user_id: "u-1".into(),
        email: "admin@pesantren.id".into(),
        access_token: "tok".into(),
        roles: roles.to_vec(),
    }
}

/// An activity dated in March 2026.
pub fn make_activity(id: &str, day: u32, published: bool) -> Activity {
    Activity {
        id: id.to_string(),
        title: format!("Kegiatan {id}"),
        description: String::new(),
        date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
        image_url: None,
        published,
        created_at: None,
    }
}

impl ContentBackend for FakeBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession, BackendError> {
        let roles = match email {
            "admin@pesantren.id" => vec![Role::Admin],
            "editor@pesantren.id" => vec![Role::Editor],
            "wali@pesantren.id" => vec![],
            _ => return Err(BackendError::InvalidCredentials),
        };
        if password != FAKE_PASSWORD {
            return Err(BackendError::InvalidCredentials);
        }
        Ok(UserSession {
            email: email.to_string(),
            ..session_with(&roles)
        })
    }

    async fn sign_out(&self, _session: &UserSession) -> Result<(), BackendError> {
        Ok(())
    }

    async fn list_activities(&self, _session: &UserSession) -> Result<Vec<Activity>, BackendError> {
        let mut activities = self.activities();
        activities.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(activities)
    }

    async fn create_activity(
        &self,
        _session: &UserSession,
        draft: &ActivityDraft,
    ) -> Result<Activity, BackendError> {
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("new-{next}")
        };
        let activity = self.stored(&id, draft);
        self.activities.lock().unwrap().push(activity.clone());
        Ok(activity)
    }

    async fn update_activity(
        &self,
        _session: &UserSession,
        id: &str,
        draft: &ActivityDraft,
    ) -> Result<Activity, BackendError> {
        let updated = self.stored(id, draft);
        let mut activities = self.activities.lock().unwrap();
        let slot = activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(BackendError::EmptyResponse)?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn set_published(
        &self,
        _session: &UserSession,
        id: &str,
        published: bool,
    ) -> Result<Activity, BackendError> {
        let mut activities = self.activities.lock().unwrap();
        let slot = activities
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(BackendError::EmptyResponse)?;
        slot.published = published;
        Ok(slot.clone())
    }

    async fn delete_activity(&self, _session: &UserSession, id: &str) -> Result<(), BackendError> {
        self.activities.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }
}
