use std::sync::Arc;

use client_core::EventApi;
use futures::FutureExt;
use shared::{domain::EventId, protocol::RegistrationRecord};

use crate::{
    controller::{ActionRejected, CallKind, ScreenDriver},
    resolve::{action_outcome, resolve, ResolvePolicy},
    state::ScreenState,
};

/// What the registration screen shows once loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegistrationView<'a> {
    Confirmed(&'a RegistrationRecord),
    Cancelled(&'a RegistrationRecord),
    /// No record, or a status that is neither confirmed nor cancelled.
    Unregistered,
}

pub fn registration_view(record: Option<&RegistrationRecord>) -> RegistrationView<'_> {
    match record {
        Some(record) if record.is_confirmed() => RegistrationView::Confirmed(record),
        Some(record) if record.is_cancelled() => RegistrationView::Cancelled(record),
        _ => RegistrationView::Unregistered,
    }
}

/// Registration screen. `Ready(None)` means the user has no registration.
///
/// `register` and `cancel` are accepted only from `Ready` with nothing in
/// flight. Success refreshes the record; failure replaces the screen with the
/// error.
pub struct EventRegistrationController {
    api: Arc<dyn EventApi>,
    event_id: EventId,
    driver: ScreenDriver<Option<RegistrationRecord>>,
}

impl EventRegistrationController {
    pub fn new(api: Arc<dyn EventApi>, event_id: EventId) -> Self {
        Self::with_policy(api, event_id, ResolvePolicy::event_registration())
    }

    pub fn with_policy(api: Arc<dyn EventApi>, event_id: EventId, policy: ResolvePolicy) -> Self {
        let policy = Arc::new(policy);
        let fetch_api = Arc::clone(&api);
        let fetch = Box::new(move || {
            let api = Arc::clone(&fetch_api);
            let policy = Arc::clone(&policy);
            async move {
                let result = api.fetch_registration(event_id).await;
                resolve(result, &policy)
            }
            .boxed()
        });

        Self {
            api,
            event_id,
            driver: ScreenDriver::new("event_registration", fetch),
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn state(&self) -> &ScreenState<Option<RegistrationRecord>> {
        self.driver.state()
    }

    pub fn view(&self) -> Option<RegistrationView<'_>> {
        self.state()
            .ready()
            .map(|record| registration_view(record.as_ref()))
    }

    pub fn is_busy(&self) -> bool {
        self.driver.is_busy()
    }

    pub fn calls_issued(&self) -> u64 {
        self.driver.calls_issued()
    }

    /// Must run inside a tokio runtime.
    pub fn mount(&mut self) {
        self.driver.mount();
    }

    pub fn retry(&mut self) -> Result<(), ActionRejected> {
        self.driver.retry()
    }

    pub fn register(&mut self) -> Result<(), ActionRejected> {
        let api = Arc::clone(&self.api);
        let event_id = self.event_id;
        self.driver.run_action(CallKind::Register, async move {
            action_outcome(api.register(event_id).await)
        })
    }

    pub fn cancel(&mut self) -> Result<(), ActionRejected> {
        let api = Arc::clone(&self.api);
        let event_id = self.event_id;
        self.driver.run_action(CallKind::Cancel, async move {
            action_outcome(api.cancel_registration(event_id).await)
        })
    }

    pub async fn settle(&mut self) -> &ScreenState<Option<RegistrationRecord>> {
        self.driver.settle().await
    }

    /// Drops the screen, aborting any call still in flight.
    pub fn unmount(self) {}
}
