use chrono::{DateTime, Utc};
use linkbot_service::types::Credential;

/// Replies from spawned request tasks. Every event carries the controller
/// epoch it was spawned under; replies from a previous lifetime are dropped
/// on arrival instead of being applied to the recreated controller.
#[derive(Debug)]
pub enum ControlEvent {
    LoginInitiated {
        epoch: u64,
        auth_url: Option<String>,
        error: Option<String>,
    },
    ExchangeFinished {
        epoch: u64,
        credential: Option<Credential>,
        error: Option<String>,
    },
    StartFinished {
        epoch: u64,
        started: Option<bool>,
        error: Option<String>,
    },
    StopFinished {
        epoch: u64,
        stopped: Option<bool>,
        error: Option<String>,
    },
}

impl ControlEvent {
    pub fn epoch(&self) -> u64 {
        match self {
            ControlEvent::LoginInitiated { epoch, .. }
            | ControlEvent::ExchangeFinished { epoch, .. }
            | ControlEvent::StartFinished { epoch, .. }
            | ControlEvent::StopFinished { epoch, .. } => *epoch,
        }
    }
}

/// Non-fatal, operator-facing message. Transient failures land here; they
/// never move the state machines.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Operator-entered job parameters. Combined with the live access token into
/// a fresh request on every start attempt.
#[derive(Debug, Clone, Default)]
pub struct JobForm {
    pub keyword: String,
    pub email: String,
    pub password: String,
}
