//! Screen controllers and the task driver they share.

use std::future::Future;

use futures::{future::BoxFuture, FutureExt};
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::state::{Effect, Resolution, ScreenEvent, ScreenState};

pub mod details;
pub mod registration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("another call is still in flight")]
    Busy,
    #[error("the screen has not loaded yet")]
    NotReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    Fetch,
    Register,
    Cancel,
}

impl CallKind {
    fn name(self) -> &'static str {
        match self {
            CallKind::Fetch => "fetch",
            CallKind::Register => "register",
            CallKind::Cancel => "cancel",
        }
    }

    fn failed<P>(self, err: JoinError) -> ScreenEvent<P> {
        let message = format!("{} call did not complete: {err}", self.name());
        match self {
            CallKind::Fetch => ScreenEvent::Resolved(Resolution::Failed(message)),
            CallKind::Register | CallKind::Cancel => ScreenEvent::ActionFailed(message),
        }
    }
}

type FetchFn<P> = Box<dyn Fn() -> BoxFuture<'static, Resolution<P>> + Send + Sync>;

struct InFlight<P> {
    seq: u64,
    kind: CallKind,
    handle: JoinHandle<ScreenEvent<P>>,
}

/// Owns one screen's state plus the single call it may have in flight.
///
/// Calls are spawned on the ambient tokio runtime. Dropping the driver aborts
/// whatever is still running, so a late result never reaches a dead screen.
pub(crate) struct ScreenDriver<P> {
    screen: &'static str,
    state: ScreenState<P>,
    fetch: FetchFn<P>,
    in_flight: Option<InFlight<P>>,
    calls: u64,
    mounted: bool,
}

impl<P: Send + 'static> ScreenDriver<P> {
    pub(crate) fn new(screen: &'static str, fetch: FetchFn<P>) -> Self {
        Self {
            screen,
            state: ScreenState::Loading,
            fetch,
            in_flight: None,
            calls: 0,
            mounted: false,
        }
    }

    pub(crate) fn state(&self) -> &ScreenState<P> {
        &self.state
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn calls_issued(&self) -> u64 {
        self.calls
    }

    pub(crate) fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.dispatch(ScreenEvent::Mount);
    }

    pub(crate) fn retry(&mut self) -> Result<(), ActionRejected> {
        if !self.mounted {
            self.mount();
            return Ok(());
        }
        if self.is_busy() {
            return Err(ActionRejected::Busy);
        }
        self.dispatch(ScreenEvent::Retry);
        Ok(())
    }

    /// Starts a mutating call. The visible state stays as it is until the
    /// call settles.
    pub(crate) fn run_action<F>(&mut self, kind: CallKind, call: F) -> Result<(), ActionRejected>
    where
        F: Future<Output = ScreenEvent<P>> + Send + 'static,
    {
        if self.is_busy() {
            return Err(ActionRejected::Busy);
        }
        if !self.state.is_ready() {
            return Err(ActionRejected::NotReady);
        }
        self.spawn(kind, call);
        Ok(())
    }

    /// Waits for the in-flight call, and any refresh it triggers, to settle.
    pub(crate) async fn settle(&mut self) -> &ScreenState<P> {
        while let Some(in_flight) = self.in_flight.as_mut() {
            let joined = (&mut in_flight.handle).await;
            let Some(in_flight) = self.in_flight.take() else {
                break;
            };
            let event = match joined {
                Ok(event) => event,
                Err(err) => {
                    warn!(
                        screen = self.screen,
                        call = in_flight.kind.name(),
                        error = %err,
                        "flow: call task failed"
                    );
                    in_flight.kind.failed(err)
                }
            };
            debug!(
                screen = self.screen,
                call = in_flight.kind.name(),
                seq = in_flight.seq,
                "flow: call settled"
            );
            self.dispatch(event);
        }
        &self.state
    }

    fn dispatch(&mut self, event: ScreenEvent<P>) {
        let label = event.label();
        let previous = std::mem::replace(&mut self.state, ScreenState::Loading);
        let from = previous.label();
        let (next, effect) = previous.reduce(event);
        debug!(
            screen = self.screen,
            event = label,
            from,
            to = next.label(),
            "flow: transition"
        );
        self.state = next;

        if effect == Effect::Fetch {
            let fetch = (self.fetch)();
            self.spawn(CallKind::Fetch, fetch.map(ScreenEvent::Resolved));
        }
    }

    fn spawn<F>(&mut self, kind: CallKind, call: F)
    where
        F: Future<Output = ScreenEvent<P>> + Send + 'static,
    {
        if let Some(stale) = self.in_flight.take() {
            warn!(
                screen = self.screen,
                seq = stale.seq,
                "flow: aborting superseded call"
            );
            stale.handle.abort();
        }
        self.calls += 1;
        debug!(
            screen = self.screen,
            call = kind.name(),
            seq = self.calls,
            "flow: call issued"
        );
        self.in_flight = Some(InFlight {
            seq: self.calls,
            kind,
            handle: tokio::spawn(call),
        });
    }
}

impl<P> Drop for ScreenDriver<P> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(
                screen = self.screen,
                seq = in_flight.seq,
                "flow: screen unmounted, aborting call"
            );
            in_flight.handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
