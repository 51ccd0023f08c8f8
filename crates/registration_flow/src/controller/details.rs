use std::sync::Arc;

use client_core::EventApi;
use futures::FutureExt;
use shared::{domain::EventId, protocol::EventDetails};

use crate::{
    controller::{ActionRejected, ScreenDriver},
    navigator::Screen,
    resolve::{require_data, resolve, ResolvePolicy},
    state::ScreenState,
};

/// Event details screen: one fetch per mount or retry.
pub struct EventDetailsController {
    event_id: EventId,
    driver: ScreenDriver<EventDetails>,
}

impl EventDetailsController {
    pub fn new(api: Arc<dyn EventApi>, event_id: EventId) -> Self {
        Self::with_policy(api, event_id, ResolvePolicy::event_details())
    }

    pub fn with_policy(api: Arc<dyn EventApi>, event_id: EventId, policy: ResolvePolicy) -> Self {
        let policy = Arc::new(policy);
        let fetch = Box::new(move || {
            let api = Arc::clone(&api);
            let policy = Arc::clone(&policy);
            async move {
                let result = api.fetch_event_details(event_id).await;
                require_data(resolve(result, &policy))
            }
            .boxed()
        });

        Self {
            event_id,
            driver: ScreenDriver::new("event_details", fetch),
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn state(&self) -> &ScreenState<EventDetails> {
        self.driver.state()
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

    pub async fn settle(&mut self) -> &ScreenState<EventDetails> {
        self.driver.settle().await
    }

    /// Pure UI transition, offered once the details are shown.
    pub fn go_to_registration(&self) -> Option<Screen> {
        self.state().is_ready().then_some(Screen::EventRegistration)
    }

    /// Drops the screen, aborting any call still in flight.
    pub fn unmount(self) {}
}
