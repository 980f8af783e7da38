use crate::error::{ApiError, ApiResult};
use crate::types::{AuthorizationRequest, Credential, JobRequest, StartReply, StopReply};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for the four job/control endpoints. The remote service is the sole
/// authority on whether the job is running; every reply body is taken at face
/// value, including the ones delivered with a conflict status.
#[derive(Clone)]
pub struct JobServiceApi {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExchangeOutcome {
    Granted(Credential),
    Rejected { error: String },
}

impl JobServiceApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .user_agent("linkbot/0.1")
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn start_oauth(&self) -> ApiResult<AuthorizationRequest> {
        let response = self
            .http
            .get(format!("{}/start_oauth", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Api(format!(
                "start_oauth returned {}",
                response.status()
            )));
        }

        let request: AuthorizationRequest = response.json().await?;
        info!("Obtained authorization URL");
        Ok(request)
    }

    /// Redeems the callback `code`/`state` pair. Callers are responsible for
    /// invoking this at most once per session; the latch lives upstream.
    pub async fn exchange_token(&self, code: &str, state: &str) -> ApiResult<Credential> {
        let response = self
            .http
            .post(format!("{}/exchange_token", self.base_url))
            .json(&serde_json::json!({ "code": code, "state": state }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_exchange(status, &body)
    }

    pub async fn start_bot(&self, request: &JobRequest) -> ApiResult<StartReply> {
        let response = self
            .http
            .post(format!("{}/start_bot", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "start_bot reply");
        parse_start(status, &body)
    }

    pub async fn stop_bot(&self) -> ApiResult<StopReply> {
        let response = self
            .http
            .post(format!("{}/stop_bot", self.base_url))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "stop_bot reply");
        parse_stop(status, &body)
    }
}

fn parse_exchange(status: StatusCode, body: &str) -> ApiResult<Credential> {
    match serde_json::from_str::<ExchangeOutcome>(body) {
        Ok(ExchangeOutcome::Rejected { error }) => Err(ApiError::Exchange(error)),
        Ok(ExchangeOutcome::Granted(credential)) if status.is_success() => Ok(credential),
        _ => Err(ApiError::Api(format!("exchange_token returned {status}"))),
    }
}

// The original backend answers an already-running start with 409 and a
// `{"started": false}` body; the body is still the verdict that matters.
fn parse_start(status: StatusCode, body: &str) -> ApiResult<StartReply> {
    serde_json::from_str(body)
        .map_err(|_| ApiError::Api(format!("start_bot returned {status}")))
}

fn parse_stop(status: StatusCode, body: &str) -> ApiResult<StopReply> {
    serde_json::from_str(body)
        .map_err(|_| ApiError::Api(format!("stop_bot returned {status}")))
}
