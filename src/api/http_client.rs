use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::backend::*;
use crate::config::Config;
use crate::error::{PlannerError, PlannerResult};
use crate::model::{Member, MemberEntry};

/// Blocking HTTP implementation of [`PlannerApi`].
pub struct HttpApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_url, config.request_timeout)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/deluser/{name}` with the name escaped as one path segment.
    fn delete_url(&self, name: &str) -> PlannerResult<Url> {
        let mut url = Url::parse(&self.url(DELETE_MEMBER_PATH))
            .map_err(|e| PlannerError::Transport(format!("invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| PlannerError::Transport(format!("API URL cannot take a path: {}", self.base_url)))?
            .push(name);
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> PlannerResult<T> {
        tracing::debug!(path, "GET");
        let response = self
            .agent
            .get(&self.url(path))
            .call()
            .map_err(map_request_error)?;
        read_json(response)
    }
}

impl PlannerApi for HttpApi {
    fn list_members(&self) -> PlannerResult<Vec<MemberEntry>> {
        MemberEntry::decode_roster(self.get_json(MEMBERS_PATH)?)
    }

    fn add_member(&self, member: &Member) -> PlannerResult<()> {
        tracing::debug!(path = ADD_MEMBER_PATH, name = %member.name, "POST");
        let body = serde_json::to_value(member)?;
        self.agent
            .post(&self.url(ADD_MEMBER_PATH))
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(map_request_error)?;
        Ok(())
    }

    fn delete_member(&self, name: &str) -> PlannerResult<()> {
        let url = self.delete_url(name)?;
        tracing::debug!(path = url.path(), "DELETE");
        self.agent
            .delete(url.as_str())
            .call()
            .map_err(map_request_error)?;
        Ok(())
    }

    fn list_cities(&self) -> PlannerResult<Vec<String>> {
        self.get_json(CITIES_PATH)
    }

    fn plan_trip(&self) -> PlannerResult<Value> {
        self.get_json(PLAN_TRIP_PATH)
    }

    fn verify_google_token(&self, token: &str) -> PlannerResult<AuthResponse> {
        tracing::debug!(path = GOOGLE_AUTH_PATH, "POST");
        let response = self
            .agent
            .post(&self.url(GOOGLE_AUTH_PATH))
            .set("Content-Type", "application/json")
            .send_json(serde_json::json!({ "token": token }))
            .map_err(map_request_error)?;
        read_json(response)
    }
}

fn read_json<T: DeserializeOwned>(response: ureq::Response) -> PlannerResult<T> {
    let text = response
        .into_string()
        .map_err(|e| PlannerError::Transport(format!("failed to read response body: {}", e)))?;
    serde_json::from_str(&text).map_err(|e| PlannerError::Decode(e.to_string()))
}

fn map_request_error(e: ureq::Error) -> PlannerError {
    match e {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            PlannerError::Server {
                status,
                message: server_message(&body),
            }
        }
        ureq::Error::Transport(t) => PlannerError::Transport(t.to_string()),
    }
}

/// Pulls `error` (or `message`) out of a JSON error body, falling back to
/// the start of the raw text.
fn server_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".into()
    } else {
        trimmed.chars().take(200).collect()
    }
}
