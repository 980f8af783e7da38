use crate::config::Config;
use crate::guard::{CallbackOutcome, ExchangeGuard};
use crate::session::{AuthSession, BotView};
use crate::status::{self, SessionStatus};
use linkbot_service::api::JobServiceApi;
use linkbot_service::error::ApiError;
use linkbot_service::types::JobRequest;
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::mpsc;
use url::Url;

mod actions;
mod effects;
mod state;
mod types;

pub use state::App;
pub use types::{ControlEvent, JobForm, Notice};

const MAX_NOTICES: usize = 50;

impl App {
    pub fn status(&self) -> SessionStatus {
        status::derive(&self.auth, self.login_in_flight, self.bot)
    }

    // Affordance gates. A caller that invokes anyway is still forwarded to
    // the service, which has the last word.
    pub fn can_login(&self) -> bool {
        !self.login_in_flight && self.bot != BotView::Running
    }

    pub fn can_start(&self) -> bool {
        self.auth.is_authorized() && !self.request_in_flight && self.bot != BotView::Running
    }

    pub fn can_stop(&self) -> bool {
        self.bot == BotView::Running && !self.request_in_flight
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub(super) fn report_notice(&mut self, message: impl Into<String>) {
        let message = self.redact(message.into());
        tracing::info!("{message}");
        self.notices.push_back(Notice::new(message));
        if self.notices.len() > MAX_NOTICES {
            self.notices.pop_front();
        }
    }

    fn redact(&self, input: String) -> String {
        let mut output = input;
        if let Some(credential) = self.auth.credential() {
            if !credential.access_token.is_empty() {
                output = output.replace(&credential.access_token, "[REDACTED]");
            }
        }
        if !self.form.password.is_empty() {
            output = output.replace(&self.form.password, "[REDACTED]");
        }
        output
    }

    pub(super) fn spawn_task<F>(&self, future: F)
    where
        F: Future<Output = ControlEvent> + Send + 'static,
    {
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(future.await);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkbot_service::types::{Credential, Profile};

    fn app() -> App {
        App::new(Config::default())
    }

    fn credential(token: &str) -> Credential {
        Credential {
            access_token: token.to_string(),
            profile: Profile {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                ..Profile::default()
            },
        }
    }

    fn authorized_app() -> App {
        let mut app = app();
        app.auth = AuthSession::Done(credential("t1"));
        app.form = JobForm {
            keyword: "web development".to_string(),
            email: "op@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        app
    }

    fn callback(query: &str) -> Url {
        Url::parse(&format!("https://app.example.com/linkedin-callback{query}"))
            .expect("test url")
    }

    #[tokio::test]
    async fn callback_with_params_starts_exactly_one_exchange() {
        let mut app = app();
        let location = callback("?code=c1&state=s1");

        app.navigate(&location);
        assert_eq!(app.status(), SessionStatus::Exchanging);
        assert!(app.guard.is_consumed());

        // Redundant re-observations of the same lifetime change nothing.
        app.observe_location(&location);
        app.observe_location(&location);
        assert_eq!(app.status(), SessionStatus::Exchanging);
    }

    #[test]
    fn callback_missing_state_is_terminal_without_exchange() {
        let mut app = app();
        app.navigate(&callback("?code=c1"));

        assert_eq!(
            app.status(),
            SessionStatus::Error("Missing code or state".to_string())
        );
        assert!(app.guard.is_consumed());
    }

    #[test]
    fn non_callback_location_changes_nothing() {
        let mut app = app();
        app.navigate(&Url::parse("https://app.example.com/").expect("test url"));

        assert_eq!(app.status(), SessionStatus::Idle);
        assert!(!app.guard.is_consumed());
    }

    #[test]
    fn exchange_success_stores_credential() {
        let mut app = app();
        app.auth = AuthSession::Exchanging;
        let epoch = app.epoch;
        app.event_tx
            .send(ControlEvent::ExchangeFinished {
                epoch,
                credential: Some(credential("t1")),
                error: None,
            })
            .expect("send event");

        app.process_events();

        assert_eq!(app.status(), SessionStatus::Done);
        let stored = app.auth.credential().expect("credential");
        assert_eq!(stored.access_token, "t1");
        assert_eq!(stored.profile.display_name(), "A B");
    }

    #[test]
    fn exchange_failure_stores_remote_message() {
        let mut app = app();
        app.auth = AuthSession::Exchanging;
        let epoch = app.epoch;
        app.event_tx
            .send(ControlEvent::ExchangeFinished {
                epoch,
                credential: None,
                error: Some("bad_code".to_string()),
            })
            .expect("send event");

        app.process_events();

        assert_eq!(app.status(), SessionStatus::Error("bad_code".to_string()));
        assert!(app.auth.credential().is_none());
    }

    #[test]
    fn start_without_login_is_rejected_locally() {
        let mut app = app();
        app.form = JobForm {
            keyword: "k".to_string(),
            email: "e".to_string(),
            password: "p".to_string(),
        };

        app.start_bot();

        assert!(!app.request_in_flight);
        assert_eq!(app.notices.len(), 1);
    }

    #[test]
    fn start_with_empty_field_is_rejected_locally() {
        let mut app = authorized_app();
        app.form.password.clear();

        app.start_bot();

        assert!(!app.request_in_flight);
        assert_eq!(app.notices.len(), 1);
        assert_eq!(app.status(), SessionStatus::Done);
    }

    #[test]
    fn start_confirmation_moves_view_to_running() {
        let mut app = authorized_app();
        let epoch = app.epoch;
        app.event_tx
            .send(ControlEvent::StartFinished {
                epoch,
                started: Some(true),
                error: None,
            })
            .expect("send event");

        app.process_events();

        assert_eq!(app.bot, BotView::Running);
        assert_eq!(app.status(), SessionStatus::Running);
    }

    #[test]
    fn start_refusal_leaves_view_unchanged() {
        let mut app = authorized_app();
        let epoch = app.epoch;
        app.event_tx
            .send(ControlEvent::StartFinished {
                epoch,
                started: Some(false),
                error: None,
            })
            .expect("send event");

        app.process_events();

        assert_eq!(app.bot, BotView::Untouched);
        assert_eq!(app.status(), SessionStatus::Done);
        assert!(app.notices[0].message.contains("already running"));
    }

    #[test]
    fn start_failure_leaves_view_unchanged() {
        let mut app = authorized_app();
        app.bot = BotView::Stopped;
        let epoch = app.epoch;
        app.event_tx
            .send(ControlEvent::StartFinished {
                epoch,
                started: None,
                error: Some("Failed to start bot: Service unreachable.".to_string()),
            })
            .expect("send event");

        app.process_events();

        assert_eq!(app.bot, BotView::Stopped);
        assert!(!app.request_in_flight);
    }

    #[test]
    fn stop_confirmation_moves_view_to_stopped() {
        let mut app = authorized_app();
        app.bot = BotView::Running;
        let epoch = app.epoch;
        app.event_tx
            .send(ControlEvent::StopFinished {
                epoch,
                stopped: Some(true),
                error: None,
            })
            .expect("send event");

        app.process_events();

        assert_eq!(app.bot, BotView::Stopped);
        assert_eq!(app.status(), SessionStatus::Stopped);
    }

    #[test]
    fn stop_refusal_and_failure_leave_view_unchanged() {
        let mut app = authorized_app();
        app.bot = BotView::Running;
        let epoch = app.epoch;
        app.event_tx
            .send(ControlEvent::StopFinished {
                epoch,
                stopped: Some(false),
                error: None,
            })
            .expect("send event");
        app.event_tx
            .send(ControlEvent::StopFinished {
                epoch,
                stopped: None,
                error: Some("Failed to stop bot: Service unreachable.".to_string()),
            })
            .expect("send event");

        app.process_events();

        assert_eq!(app.bot, BotView::Running);
        assert_eq!(app.notices.len(), 2);
    }

    #[test]
    fn stale_epoch_reply_is_discarded() {
        let mut app = app();
        let old_epoch = app.epoch;
        app.event_tx
            .send(ControlEvent::ExchangeFinished {
                epoch: old_epoch,
                credential: Some(credential("t1")),
                error: None,
            })
            .expect("send event");

        app.reset();
        app.process_events();

        assert_eq!(app.status(), SessionStatus::Idle);
        assert!(app.auth.credential().is_none());
    }

    #[test]
    fn login_failure_sets_fixed_message() {
        let mut app = app();
        app.login_in_flight = true;
        let epoch = app.epoch;
        app.event_tx
            .send(ControlEvent::LoginInitiated {
                epoch,
                auth_url: None,
                error: Some("Failed to initiate login".to_string()),
            })
            .expect("send event");

        app.process_events();

        assert!(!app.login_in_flight);
        assert_eq!(
            app.status(),
            SessionStatus::Error("Failed to initiate login".to_string())
        );
    }

    #[test]
    fn login_url_surfaces_while_still_starting() {
        let mut app = app();
        app.login_in_flight = true;
        let epoch = app.epoch;
        app.event_tx
            .send(ControlEvent::LoginInitiated {
                epoch,
                auth_url: Some("https://provider.example.com/authorize?x=1".to_string()),
                error: None,
            })
            .expect("send event");

        app.process_events();

        assert_eq!(app.status(), SessionStatus::Starting);
        assert!(app.pending_auth_url.is_some());
        assert!(app.notices[0].message.contains("authorize"));
    }

    #[tokio::test]
    async fn initiate_login_marks_attempt_in_flight() {
        let mut app = app();
        app.initiate_login();

        assert!(app.login_in_flight);
        assert_eq!(app.status(), SessionStatus::Starting);

        // A second click while in flight is ignored by the gate.
        app.initiate_login();
        assert!(app.login_in_flight);
    }

    #[test]
    fn affordance_gates_follow_views() {
        let mut app = authorized_app();
        assert!(app.can_start());
        assert!(!app.can_stop());

        app.bot = BotView::Running;
        assert!(!app.can_start());
        assert!(app.can_stop());
        assert!(!app.can_login());

        app.request_in_flight = true;
        assert!(!app.can_stop());
    }

    #[test]
    fn notices_redact_live_secrets() {
        let mut app = authorized_app();
        app.report_notice("service echoed t1 and hunter2");

        let message = &app.notices[0].message;
        assert!(!message.contains("t1"));
        assert!(!message.contains("hunter2"));
        assert!(message.contains("[REDACTED]"));
    }

    #[test]
    fn reset_rearms_the_exchange_latch() {
        let mut app = app();
        app.navigate(&callback("?code=c1"));
        assert!(app.guard.is_consumed());

        app.reset();
        assert!(!app.guard.is_consumed());
        assert_eq!(app.status(), SessionStatus::Idle);
    }
}
