#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState<P> {
    Loading,
    Unauthorized,
    Failed(String),
    Ready(P),
}

/// Settled outcome of a fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<P> {
    Ready(P),
    Unauthorized,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent<P> {
    Mount,
    Retry,
    Resolved(Resolution<P>),
    ActionSucceeded,
    ActionFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Issue exactly one fetch for the screen.
    Fetch,
}

impl<P> ScreenState<P> {
    pub fn reduce(self, event: ScreenEvent<P>) -> (Self, Effect) {
        match (self, event) {
            (_, ScreenEvent::Mount) => (Self::Loading, Effect::Fetch),
            (Self::Loading, ScreenEvent::Retry) => (Self::Loading, Effect::None),
            (_, ScreenEvent::Retry) => (Self::Loading, Effect::Fetch),
            (Self::Loading, ScreenEvent::Resolved(resolution)) => {
                (Self::from(resolution), Effect::None)
            }
            // A resolution outside Loading belongs to a call that was superseded.
            (state, ScreenEvent::Resolved(_)) => (state, Effect::None),
            (Self::Loading, ScreenEvent::ActionSucceeded | ScreenEvent::ActionFailed(_)) => {
                (Self::Loading, Effect::None)
            }
            (_, ScreenEvent::ActionSucceeded) => (Self::Loading, Effect::Fetch),
            (_, ScreenEvent::ActionFailed(message)) => (Self::Failed(message), Effect::None),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<&P> {
        match self {
            Self::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Unauthorized => "unauthorized",
            Self::Failed(_) => "failed",
            Self::Ready(_) => "ready",
        }
    }
}

impl<P> From<Resolution<P>> for ScreenState<P> {
    fn from(value: Resolution<P>) -> Self {
        match value {
            Resolution::Ready(payload) => Self::Ready(payload),
            Resolution::Unauthorized => Self::Unauthorized,
            Resolution::Failed(message) => Self::Failed(message),
        }
    }
}

impl<P> Resolution<P> {
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Resolution<Q> {
        match self {
            Self::Ready(payload) => Resolution::Ready(f(payload)),
            Self::Unauthorized => Resolution::Unauthorized,
            Self::Failed(message) => Resolution::Failed(message),
        }
    }
}

impl<P> ScreenEvent<P> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Retry => "retry",
            Self::Resolved(_) => "resolved",
            Self::ActionSucceeded => "action_succeeded",
            Self::ActionFailed(_) => "action_failed",
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
