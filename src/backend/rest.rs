use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use super::error::BackendError;
use super::ContentBackend;
use crate::model::{Activity, ActivityDraft, Role, UserSession};

const ACTIVITIES_PATH: &str = "/rest/v1/activities";
const ROLES_PATH: &str = "/rest/v1/user_roles";
const TOKEN_PATH: &str = "/auth/v1/token";
const LOGOUT_PATH: &str = "/auth/v1/logout";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    role: String,
}

/// REST client for the hosted database.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: Option<String>,
    anon_key: String,
}

impl RestBackend {
    /// An empty `base_url` leaves the backend unconfigured; every call then
    /// fails with [`BackendError::NotConfigured`].
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.trim().trim_end_matches('/');
        Ok(Self {
            client,
            base_url: (!base_url.is_empty()).then(|| base_url.to_string()),
            anon_key: anon_key.to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        session: Option<&UserSession>,
    ) -> Result<RequestBuilder, BackendError> {
        let base = self.base_url.as_deref().ok_or(BackendError::NotConfigured)?;
        let mut request = self
            .client
            .request(method, format!("{base}{path}"))
            .header("apikey", &self.anon_key);
        if let Some(session) = session {
            request = request.bearer_auth(&session.access_token);
        }
        Ok(request)
    }

    /// A write on one activity row that echoes the stored record back.
    async fn write_one(
        &self,
        method: Method,
        session: &UserSession,
        id: Option<&str>,
        body: serde_json::Value,
    ) -> Result<Activity, BackendError> {
        let mut request = self
            .request(method, ACTIVITIES_PATH, Some(session))?
            .header("Prefer", HeaderValue::from_static("return=representation"))
            .json(&body);
        if let Some(id) = id {
            request = request.query(&[("id", format!("eq.{id}"))]);
        }
        let rows: Vec<Activity> = read_json(request.send().await?).await?;
        rows.into_iter().next().ok_or(BackendError::EmptyResponse)
    }

    async fn fetch_roles(&self, session: &UserSession) -> Result<Vec<Role>, BackendError> {
        let response = self
            .request(Method::GET, ROLES_PATH, Some(session))?
            .query(&[
                ("user_id", format!("eq.{}", session.user_id)),
                ("select", "role".to_string()),
            ])
            .send()
            .await?;
        let rows: Vec<RoleRow> = read_json(response).await?;
        Ok(rows
            .iter()
            .filter_map(|row| Role::from_name(&row.role))
            .collect())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;
    check_status(status, &body)?;
    Ok(serde_json::from_str(&body)?)
}

fn check_status(status: StatusCode, body: &str) -> Result<(), BackendError> {
    debug!(%status, "backend responded");
    if status == StatusCode::UNAUTHORIZED {
        return Err(BackendError::Unauthorized);
    }
    if !status.is_success() {
        return Err(BackendError::Status {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }
    Ok(())
}

impl ContentBackend for RestBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession, BackendError> {
        let response = self
            .request(Method::POST, TOKEN_PATH, None)?
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::InvalidCredentials);
        }
        let token: TokenResponse = read_json(response).await?;

        let mut session = UserSession {
            user_id: token.user.id,
            email: token.user.email.unwrap_or_else(|| email.to_string()),
            access_token: token.access_token,
            roles: Vec::new(),
        };
        session.roles = self.fetch_roles(&session).await?;
        info!(email = %session.email, roles = ?session.roles, "signed in");
        Ok(session)
    }

    async fn sign_out(&self, session: &UserSession) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, LOGOUT_PATH, Some(session))?
            .send()
            .await?;
        let status = response.status();
        check_status(status, &response.text().await?)?;
        info!(email = %session.email, "signed out");
        Ok(())
    }

    async fn list_activities(&self, session: &UserSession) -> Result<Vec<Activity>, BackendError> {
        let response = self
            .request(Method::GET, ACTIVITIES_PATH, Some(session))?
            .query(&[("select", "*"), ("order", "date.desc")])
            .send()
            .await?;
        let activities: Vec<Activity> = read_json(response).await?;
        debug!(count = activities.len(), "activities loaded");
        Ok(activities)
    }

    async fn create_activity(
        &self,
        session: &UserSession,
        draft: &ActivityDraft,
    ) -> Result<Activity, BackendError> {
        let created = self
            .write_one(Method::POST, session, None, serde_json::to_value(draft)?)
            .await?;
        info!(id = %created.id, title = %created.title, "activity created");
        Ok(created)
    }

    async fn update_activity(
        &self,
        session: &UserSession,
        id: &str,
        draft: &ActivityDraft,
    ) -> Result<Activity, BackendError> {
        let updated = self
            .write_one(Method::PATCH, session, Some(id), serde_json::to_value(draft)?)
            .await?;
        info!(%id, "activity updated");
        Ok(updated)
    }

    async fn set_published(
        &self,
        session: &UserSession,
        id: &str,
        published: bool,
    ) -> Result<Activity, BackendError> {
        let updated = self
            .write_one(
                Method::PATCH,
                session,
                Some(id),
                json!({ "published": published }),
            )
            .await?;
        info!(%id, published, "activity visibility changed");
        Ok(updated)
    }

    async fn delete_activity(&self, session: &UserSession, id: &str) -> Result<(), BackendError> {
        let response = self
            .request(Method::DELETE, ACTIVITIES_PATH, Some(session))?
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        let status = response.status();
        check_status(status, &response.text().await?)?;
        info!(%id, "activity deleted");
        Ok(())
    }
}
