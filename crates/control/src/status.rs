use crate::session::{AuthSession, BotView};

/// The single value any presentation layer renders. Always derived, never a
/// source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Starting,
    Exchanging,
    Done,
    Running,
    Stopped,
    Error(String),
}

impl SessionStatus {
    pub fn label(&self) -> &str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Starting => "starting",
            SessionStatus::Exchanging => "exchanging",
            SessionStatus::Done => "done",
            SessionStatus::Running => "running",
            SessionStatus::Stopped => "stopped",
            SessionStatus::Error(_) => "error",
        }
    }
}

/// Error dominates; otherwise the most recently completed transition wins.
pub fn derive(auth: &AuthSession, login_in_flight: bool, bot: BotView) -> SessionStatus {
    match auth {
        AuthSession::Error(message) => SessionStatus::Error(message.clone()),
        AuthSession::Exchanging => SessionStatus::Exchanging,
        AuthSession::Done(_) => match bot {
            BotView::Running => SessionStatus::Running,
            BotView::Stopped => SessionStatus::Stopped,
            BotView::Untouched => SessionStatus::Done,
        },
        AuthSession::Idle => {
            if login_in_flight {
                SessionStatus::Starting
            } else {
                SessionStatus::Idle
            }
        }
    }
}
