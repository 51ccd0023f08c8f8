use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use client_core::{ApiResult, EventApi, Function, TransportError};
use shared::{
    domain::EventId,
    error::GenericError,
    protocol::{CancelledData, Envelope, EventDetails, RegisteredData, RegistrationRecord},
};

/// `EventApi` fake that replays queued replies and records every call.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    details: Mutex<VecDeque<ApiResult<EventDetails>>>,
    registration: Mutex<VecDeque<ApiResult<RegistrationRecord>>>,
    register: Mutex<VecDeque<ApiResult<RegisteredData>>>,
    cancel: Mutex<VecDeque<ApiResult<CancelledData>>>,
    calls: Mutex<Vec<(Function, EventId)>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_details(&self, reply: ApiResult<EventDetails>) {
        self.details.lock().expect("lock").push_back(reply);
    }

    pub(crate) fn push_registration(&self, reply: ApiResult<RegistrationRecord>) {
        self.registration.lock().expect("lock").push_back(reply);
    }

    pub(crate) fn push_register(&self, reply: ApiResult<RegisteredData>) {
        self.register.lock().expect("lock").push_back(reply);
    }

    pub(crate) fn push_cancel(&self, reply: ApiResult<CancelledData>) {
        self.cancel.lock().expect("lock").push_back(reply);
    }

    pub(crate) fn calls(&self) -> Vec<Function> {
        self.calls
            .lock()
            .expect("lock")
            .iter()
            .map(|(function, _)| *function)
            .collect()
    }

    pub(crate) fn event_ids(&self) -> Vec<EventId> {
        self.calls
            .lock()
            .expect("lock")
            .iter()
            .map(|(_, event_id)| *event_id)
            .collect()
    }

    fn next<T>(
        &self,
        function: Function,
        event_id: EventId,
        queue: &Mutex<VecDeque<ApiResult<T>>>,
    ) -> ApiResult<T> {
        self.calls.lock().expect("lock").push((function, event_id));
        queue
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Network(format!(
                    "no reply scripted for {function}"
                )))
            })
    }
}

#[async_trait]
impl EventApi for ScriptedApi {
    async fn fetch_event_details(&self, event_id: EventId) -> ApiResult<EventDetails> {
        self.next(Function::EventDetails, event_id, &self.details)
    }

    async fn register(&self, event_id: EventId) -> ApiResult<RegisteredData> {
        self.next(Function::RegisterForEvent, event_id, &self.register)
    }

    async fn fetch_registration(&self, event_id: EventId) -> ApiResult<RegistrationRecord> {
        self.next(Function::EventRegistrationDetails, event_id, &self.registration)
    }

    async fn cancel_registration(&self, event_id: EventId) -> ApiResult<CancelledData> {
        self.next(Function::CancelEventRegistration, event_id, &self.cancel)
    }
}

pub(crate) fn event_id() -> EventId {
    EventId::new(1).expect("event id")
}

pub(crate) fn devfest() -> EventDetails {
    EventDetails {
        event_name: "DevFest".into(),
        registrations_open: true,
        description: "Talks, codelabs and coffee".into(),
        date: "2025-11-29".into(),
        title: "DevFest Bengaluru".into(),
    }
}

pub(crate) fn record(status: &str) -> ApiResult<RegistrationRecord> {
    Ok(Envelope::data(RegistrationRecord::new(status)))
}

pub(crate) fn app_error<T>(code: Option<&str>, message: &str) -> ApiResult<T> {
    Ok(Envelope::error(GenericError {
        code: code.map(str::to_string),
        message: message.to_string(),
    }))
}

pub(crate) fn unauthorized<T>() -> ApiResult<T> {
    Err(TransportError::Unauthorized {
        message: "Invalid JWT".into(),
    })
}
