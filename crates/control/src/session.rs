use linkbot_service::types::Credential;

/// Outcome of the OAuth handshake for this controller lifetime. The
/// credential exists exactly when the session is `Done`, the message exactly
/// when it is `Error`; both terminal states hold until a fresh login resets
/// the whole controller.
#[derive(Debug, Clone, Default)]
pub enum AuthSession {
    #[default]
    Idle,
    Exchanging,
    Done(Credential),
    Error(String),
}

impl AuthSession {
    pub fn credential(&self) -> Option<&Credential> {
        match self {
            AuthSession::Done(credential) => Some(credential),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AuthSession::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthSession::Done(_))
    }
}

/// The client's picture of the server-owned job. Only a service verdict moves
/// it; local intent never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotView {
    #[default]
    Untouched,
    Running,
    Stopped,
}
