use async_trait::async_trait;
use shared::{
    domain::EventId,
    protocol::{CancelledData, Envelope, EventDetails, RegisteredData, RegistrationRecord},
};

pub mod error;
pub mod http;

pub use error::{ClientConfigError, TransportError};
pub use http::{ClientConfig, Function, HttpEventClient};

pub type ApiResult<T> = Result<Envelope<T>, TransportError>;

/// The four backend functions the registration flow depends on.
///
/// Every call is a single round trip with no retry. An `Ok` envelope may still
/// carry an application error; an `Err` means the transport itself failed.
#[async_trait]
pub trait EventApi: Send + Sync {
    async fn fetch_event_details(&self, event_id: EventId) -> ApiResult<EventDetails>;
    async fn register(&self, event_id: EventId) -> ApiResult<RegisteredData>;
    async fn fetch_registration(&self, event_id: EventId) -> ApiResult<RegistrationRecord>;
    async fn cancel_registration(&self, event_id: EventId) -> ApiResult<CancelledData>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
