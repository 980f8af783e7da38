use super::*;

impl App {
    /// Requests an authorization URL and hands it to the operator. The real
    /// navigation happens in their browser; this controller stays in its
    /// login-in-flight state until the callback arrives as a fresh lifetime.
    pub fn initiate_login(&mut self) {
        if !self.can_login() {
            tracing::debug!("Login request ignored while unavailable");
            return;
        }
        self.login_in_flight = true;

        let api = self.api.clone();
        let epoch = self.epoch;
        self.spawn_task(async move {
            match api.start_oauth().await {
                Ok(request) => ControlEvent::LoginInitiated {
                    epoch,
                    auth_url: Some(request.auth_url),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!("OAuth initiation failed: {e}");
                    ControlEvent::LoginInitiated {
                        epoch,
                        auth_url: None,
                        error: Some("Failed to initiate login".to_string()),
                    }
                }
            }
        });
    }

    /// A full navigation destroys the page-scoped machine and recreates it;
    /// the fresh instance then observes where it landed.
    pub fn navigate(&mut self, location: &Url) {
        self.reset();
        self.observe_location(location);
    }

    /// Drops every page-scoped piece of state and re-arms the exchange latch.
    /// Bumping the epoch makes replies still in flight land stale.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.guard = ExchangeGuard::new(self.config.service.callback_path.clone());
        self.auth = AuthSession::Idle;
        self.bot = BotView::Untouched;
        self.login_in_flight = false;
        self.request_in_flight = false;
        self.pending_auth_url = None;
        self.form = JobForm::default();
    }

    /// Runs the current location through the exchange latch. At most one
    /// observation per lifetime starts an exchange, no matter how often this
    /// is called; a callback without both params is terminal and not retried.
    pub fn observe_location(&mut self, location: &Url) {
        match self.guard.observe(location) {
            None => {}
            Some(CallbackOutcome::Missing) => {
                self.auth = AuthSession::Error("Missing code or state".to_string());
            }
            Some(CallbackOutcome::Params(params)) => {
                self.auth = AuthSession::Exchanging;

                let api = self.api.clone();
                let epoch = self.epoch;
                self.spawn_task(async move {
                    match api.exchange_token(&params.code, &params.state).await {
                        Ok(credential) => ControlEvent::ExchangeFinished {
                            epoch,
                            credential: Some(credential),
                            error: None,
                        },
                        Err(ApiError::Exchange(message)) => ControlEvent::ExchangeFinished {
                            epoch,
                            credential: None,
                            error: Some(message),
                        },
                        Err(e) => {
                            tracing::warn!("Token exchange failed: {e}");
                            ControlEvent::ExchangeFinished {
                                epoch,
                                credential: None,
                                error: Some("Exchange failed".to_string()),
                            }
                        }
                    }
                });
            }
        }
    }

    /// Asks the service to start the job. Local validation failures never
    /// reach the network; everything else is forwarded and resolved by the
    /// service's verdict, even if our own view says the job already runs.
    pub fn start_bot(&mut self) {
        let access_token = match self.auth.credential() {
            Some(credential) => credential.access_token.clone(),
            None => {
                self.report_notice("Please login before starting the bot.");
                return;
            }
        };

        let request = JobRequest {
            access_token,
            keyword: self.form.keyword.clone(),
            email: self.form.email.clone(),
            password: self.form.password.clone(),
        };
        if let Err(e) = request.validate() {
            tracing::debug!("Start rejected locally: {e}");
            self.report_notice("Please login and enter a keyword, email, and password.");
            return;
        }
        if self.request_in_flight {
            self.report_notice("A start/stop request is already outstanding.");
            return;
        }
        self.request_in_flight = true;

        let api = self.api.clone();
        let epoch = self.epoch;
        self.spawn_task(async move {
            match api.start_bot(&request).await {
                Ok(reply) => ControlEvent::StartFinished {
                    epoch,
                    started: Some(reply.started),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!("Start request failed: {e}");
                    ControlEvent::StartFinished {
                        epoch,
                        started: None,
                        error: Some(format!("Failed to start bot: {}", e.user_message())),
                    }
                }
            }
        });
    }

    /// Asks the service to stop the job. Deliberately independent of the auth
    /// state so a stale credential never blocks shutdown.
    pub fn stop_bot(&mut self) {
        if self.request_in_flight {
            self.report_notice("A start/stop request is already outstanding.");
            return;
        }
        self.request_in_flight = true;

        let api = self.api.clone();
        let epoch = self.epoch;
        self.spawn_task(async move {
            match api.stop_bot().await {
                Ok(reply) => ControlEvent::StopFinished {
                    epoch,
                    stopped: Some(reply.stopped),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!("Stop request failed: {e}");
                    ControlEvent::StopFinished {
                        epoch,
                        stopped: None,
                        error: Some(format!("Failed to stop bot: {}", e.user_message())),
                    }
                }
            }
        });
    }
}
