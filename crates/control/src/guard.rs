use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Params(CallbackParams),
    /// Callback path reached without both `code` and `state`. Terminal for
    /// this session; the latch is consumed so nothing retries it.
    Missing,
}

/// One-shot latch over the token exchange. However many times the location is
/// re-observed, at most one observation ever yields an outcome; the latch is
/// consumed before any asynchronous work begins, so two racing observers can
/// never both see "not yet exchanged".
#[derive(Debug)]
pub struct ExchangeGuard {
    callback_path: String,
    consumed: bool,
}

impl ExchangeGuard {
    pub fn new(callback_path: impl Into<String>) -> Self {
        Self {
            callback_path: callback_path.into(),
            consumed: false,
        }
    }

    pub fn observe(&mut self, location: &Url) -> Option<CallbackOutcome> {
        if self.consumed || location.path() != self.callback_path {
            return None;
        }
        self.consumed = true;

        let mut code = None;
        let mut state = None;
        for (key, value) in location.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                _ => {}
            }
        }

        match (code, state) {
            (Some(code), Some(state)) if !code.is_empty() && !state.is_empty() => {
                Some(CallbackOutcome::Params(CallbackParams { code, state }))
            }
            _ => Some(CallbackOutcome::Missing),
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}
