//! Screen state orchestration for the event registration flow.
//!
//! Each screen owns a [`ScreenState`] that only changes through
//! [`ScreenState::reduce`]. Controllers run the backend calls as tokio tasks
//! bound to the screen's lifetime and feed the outcomes back through the
//! reducer.

pub mod controller;
pub mod navigator;
pub mod resolve;
pub mod state;

pub use controller::{
    details::EventDetailsController,
    registration::{registration_view, EventRegistrationController, RegistrationView},
    ActionRejected,
};
pub use navigator::{ActiveScreen, FlowOptions, Navigator, Screen};
pub use resolve::{action_outcome, require_data, resolve, ResolvePolicy, NO_DATA_MESSAGE};
pub use state::{Effect, Resolution, ScreenEvent, ScreenState};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
