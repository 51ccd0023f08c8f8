//! Top-level switch between the two screens.

use std::sync::Arc;

use client_core::EventApi;
use shared::domain::EventId;
use tracing::info;

use crate::{
    controller::{details::EventDetailsController, registration::EventRegistrationController},
    resolve::ResolvePolicy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    EventDetails,
    EventRegistration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowOptions {
    /// Surface auth rejections as `Unauthorized` on the registration screen
    /// too, instead of only on the details screen.
    pub unify_unauthorized: bool,
}

pub enum ActiveScreen {
    Details(EventDetailsController),
    Registration(EventRegistrationController),
}

impl ActiveScreen {
    pub fn screen(&self) -> Screen {
        match self {
            ActiveScreen::Details(_) => Screen::EventDetails,
            ActiveScreen::Registration(_) => Screen::EventRegistration,
        }
    }
}

/// Shows one screen at a time. Switching screens drops the old controller,
/// which aborts its call, and mounts a fresh one.
pub struct Navigator {
    api: Arc<dyn EventApi>,
    event_id: EventId,
    options: FlowOptions,
    active: ActiveScreen,
}

impl Navigator {
    /// Mounts the details screen. Must run inside a tokio runtime.
    pub fn new(api: Arc<dyn EventApi>, event_id: EventId, options: FlowOptions) -> Self {
        let active = Self::mount_screen(&api, event_id, options, Screen::EventDetails);
        Self {
            api,
            event_id,
            options,
            active,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn screen(&self) -> Screen {
        self.active.screen()
    }

    pub fn active(&self) -> &ActiveScreen {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ActiveScreen {
        &mut self.active
    }

    pub fn navigate(&mut self, screen: Screen) {
        info!(from = ?self.screen(), to = ?screen, "flow: navigating");
        self.active = Self::mount_screen(&self.api, self.event_id, self.options, screen);
    }

    pub async fn settle(&mut self) {
        match &mut self.active {
            ActiveScreen::Details(controller) => {
                controller.settle().await;
            }
            ActiveScreen::Registration(controller) => {
                controller.settle().await;
            }
        }
    }

    fn mount_screen(
        api: &Arc<dyn EventApi>,
        event_id: EventId,
        options: FlowOptions,
        screen: Screen,
    ) -> ActiveScreen {
        match screen {
            Screen::EventDetails => {
                let mut controller = EventDetailsController::new(Arc::clone(api), event_id);
                controller.mount();
                ActiveScreen::Details(controller)
            }
            Screen::EventRegistration => {
                let policy = ResolvePolicy::event_registration()
                    .surface_unauthorized(options.unify_unauthorized);
                let mut controller =
                    EventRegistrationController::with_policy(Arc::clone(api), event_id, policy);
                controller.mount();
                ActiveScreen::Registration(controller)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/navigator_tests.rs"]
mod tests;
