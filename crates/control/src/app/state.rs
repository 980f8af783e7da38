use super::*;

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub auth: AuthSession,
    pub bot: BotView,
    pub guard: ExchangeGuard,
    pub login_in_flight: bool,
    pub request_in_flight: bool,
    pub pending_auth_url: Option<String>,
    pub form: JobForm,
    pub notices: VecDeque<Notice>,
    pub epoch: u64,
    pub api: JobServiceApi,
    pub event_tx: mpsc::UnboundedSender<ControlEvent>,
    pub event_rx: mpsc::UnboundedReceiver<ControlEvent>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl App {
    pub fn new(config: Config) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let api = JobServiceApi::new(config.service.base_url.clone());
        let guard = ExchangeGuard::new(config.service.callback_path.clone());

        Self {
            should_quit: false,
            config,
            auth: AuthSession::Idle,
            bot: BotView::Untouched,
            guard,
            login_in_flight: false,
            request_in_flight: false,
            pending_auth_url: None,
            form: JobForm::default(),
            notices: VecDeque::new(),
            epoch: 0,
            api,
            event_tx,
            event_rx,
        }
    }
}
