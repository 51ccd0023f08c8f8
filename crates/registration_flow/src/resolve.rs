//! Classification of raw call results into screen outcomes.

use client_core::{ApiResult, TransportError};
use shared::{error::NOT_REGISTERED, protocol::Reply};

use crate::state::{Resolution, ScreenEvent};

pub const NO_DATA_MESSAGE: &str = "No data returned";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvePolicy {
    /// Show a transport-level auth rejection as `Unauthorized` rather than
    /// as a plain failure.
    pub surface_unauthorized: bool,
    /// Application error codes that mean "nothing here" rather than a fault.
    pub benign_codes: Vec<String>,
}

impl ResolvePolicy {
    pub fn event_details() -> Self {
        Self {
            surface_unauthorized: true,
            benign_codes: Vec::new(),
        }
    }

    pub fn event_registration() -> Self {
        Self {
            surface_unauthorized: false,
            benign_codes: vec![NOT_REGISTERED.to_string()],
        }
    }

    pub fn surface_unauthorized(mut self, surface: bool) -> Self {
        self.surface_unauthorized = surface;
        self
    }

    fn is_benign(&self, code: Option<&str>) -> bool {
        code.is_some_and(|code| self.benign_codes.iter().any(|benign| benign == code))
    }
}

/// `Ready(None)` only comes out of a benign application error.
pub fn resolve<T>(result: ApiResult<T>, policy: &ResolvePolicy) -> Resolution<Option<T>> {
    let envelope = match result {
        Ok(envelope) => envelope,
        Err(TransportError::Unauthorized { .. }) if policy.surface_unauthorized => {
            return Resolution::Unauthorized;
        }
        Err(err) => return Resolution::Failed(err.message().to_string()),
    };

    match envelope.into_reply() {
        Reply::Data(data) => Resolution::Ready(Some(data)),
        Reply::Error(error) if policy.is_benign(error.code.as_deref()) => Resolution::Ready(None),
        Reply::Error(error) => Resolution::Failed(error.message),
        Reply::Empty => Resolution::Failed(NO_DATA_MESSAGE.to_string()),
    }
}

/// For screens where a benign absence still means there is nothing to show.
pub fn require_data<T>(resolution: Resolution<Option<T>>) -> Resolution<T> {
    match resolution {
        Resolution::Ready(Some(data)) => Resolution::Ready(data),
        Resolution::Ready(None) => Resolution::Failed(NO_DATA_MESSAGE.to_string()),
        Resolution::Unauthorized => Resolution::Unauthorized,
        Resolution::Failed(message) => Resolution::Failed(message),
    }
}

/// Outcome of a mutating call. Any envelope without an error counts as success.
pub fn action_outcome<T, P>(result: ApiResult<T>) -> ScreenEvent<P> {
    match result {
        Ok(envelope) => match envelope.error {
            Some(error) => ScreenEvent::ActionFailed(error.message),
            None => ScreenEvent::ActionSucceeded,
        },
        Err(err) => ScreenEvent::ActionFailed(err.message().to_string()),
    }
}
