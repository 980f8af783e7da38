use super::*;

impl App {
    /// Drains replies from spawned request tasks and applies them to the
    /// state machines. Called from the controller loop; never blocks.
    pub fn process_events(&mut self) {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }

        for event in events {
            if event.epoch() != self.epoch {
                tracing::debug!(
                    event_epoch = event.epoch(),
                    current_epoch = self.epoch,
                    "Discarding reply from a previous controller lifetime"
                );
                continue;
            }

            match event {
                ControlEvent::LoginInitiated {
                    auth_url, error, ..
                } => {
                    if let Some(err) = error {
                        self.login_in_flight = false;
                        self.auth = AuthSession::Error(err);
                    } else if let Some(url) = auth_url {
                        // Still in flight: the operator's browser owns the
                        // next step until the callback lands.
                        self.pending_auth_url = Some(url.clone());
                        self.report_notice(format!(
                            "Open this URL in a browser to authorize: {url}"
                        ));
                    }
                }
                ControlEvent::ExchangeFinished {
                    credential, error, ..
                } => {
                    if let Some(err) = error {
                        self.auth = AuthSession::Error(err);
                    } else if let Some(credential) = credential {
                        self.report_notice(format!(
                            "Welcome, {}",
                            credential.profile.display_name()
                        ));
                        self.auth = AuthSession::Done(credential);
                    }
                }
                ControlEvent::StartFinished {
                    started, error, ..
                } => {
                    self.request_in_flight = false;
                    if let Some(err) = error {
                        self.report_notice(err);
                    } else if started == Some(true) {
                        self.bot = BotView::Running;
                    } else {
                        self.report_notice("Bot is already running.");
                    }
                }
                ControlEvent::StopFinished {
                    stopped, error, ..
                } => {
                    self.request_in_flight = false;
                    if let Some(err) = error {
                        self.report_notice(err);
                    } else if stopped == Some(true) {
                        self.bot = BotView::Stopped;
                    } else {
                        self.report_notice("Bot was not running.");
                    }
                }
            }
        }
    }
}
