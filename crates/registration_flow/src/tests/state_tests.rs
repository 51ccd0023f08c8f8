use super::*;

use client_core::TransportError;
use shared::{
    error::{GenericError, NOT_REGISTERED},
    protocol::{Envelope, RegistrationRecord},
};

use crate::resolve::{action_outcome, require_data, resolve, ResolvePolicy, NO_DATA_MESSAGE};

type State = ScreenState<Option<RegistrationRecord>>;

#[test]
fn mount_enters_loading_and_fetches_once() {
    let (state, effect) = State::Loading.reduce(ScreenEvent::Mount);
    assert_eq!(state, ScreenState::Loading);
    assert_eq!(effect, Effect::Fetch);
}

#[test]
fn retry_while_loading_issues_no_second_fetch() {
    let (state, effect) = State::Loading.reduce(ScreenEvent::Retry);
    assert_eq!(state, ScreenState::Loading);
    assert_eq!(effect, Effect::None);
}

#[test]
fn retry_from_settled_states_refetches() {
    for state in [
        State::Unauthorized,
        State::Failed("boom".into()),
        State::Ready(None),
    ] {
        let (next, effect) = state.reduce(ScreenEvent::Retry);
        assert_eq!(next, ScreenState::Loading);
        assert_eq!(effect, Effect::Fetch);
    }
}

#[test]
fn resolution_settles_loading_into_one_state() {
    let (state, effect) = State::Loading.reduce(ScreenEvent::Resolved(Resolution::Ready(None)));
    assert_eq!(state, ScreenState::Ready(None));
    assert_eq!(effect, Effect::None);

    let (state, _) = State::Loading.reduce(ScreenEvent::Resolved(Resolution::Unauthorized));
    assert_eq!(state, ScreenState::Unauthorized);

    let (state, _) = State::Loading.reduce(ScreenEvent::Resolved(Resolution::Failed("x".into())));
    assert_eq!(state, ScreenState::Failed("x".into()));
}

#[test]
fn stale_resolution_is_ignored_outside_loading() {
    let (state, effect) = State::Failed("first".into())
        .reduce(ScreenEvent::Resolved(Resolution::Ready(None)));
    assert_eq!(state, ScreenState::Failed("first".into()));
    assert_eq!(effect, Effect::None);
}

#[test]
fn action_success_forces_refresh() {
    let ready = State::Ready(Some(RegistrationRecord::new("CONFIRMED")));
    let (state, effect) = ready.reduce(ScreenEvent::ActionSucceeded);
    assert_eq!(state, ScreenState::Loading);
    assert_eq!(effect, Effect::Fetch);
}

#[test]
fn action_failure_replaces_content_with_message() {
    let ready = State::Ready(Some(RegistrationRecord::new("CONFIRMED")));
    let (state, effect) = ready.reduce(ScreenEvent::ActionFailed("closed".into()));
    assert_eq!(state, ScreenState::Failed("closed".into()));
    assert_eq!(effect, Effect::None);
}

#[test]
fn not_registered_code_resolves_to_empty_ready() {
    let result = Ok::<_, TransportError>(Envelope::<RegistrationRecord>::error(
        GenericError::with_code(NOT_REGISTERED, "not registered"),
    ));
    assert_eq!(
        resolve(result, &ResolvePolicy::event_registration()),
        Resolution::Ready(None)
    );
}

#[test]
fn not_registered_wire_body_without_message_is_absence() {
    let envelope: Envelope<RegistrationRecord> =
        serde_json::from_str(r#"{"error":{"code":"NOT_REGISTERED"}}"#).expect("decode");
    assert_eq!(
        resolve(Ok(envelope), &ResolvePolicy::event_registration()),
        Resolution::Ready(None)
    );
}

#[test]
fn other_application_error_fails_with_server_message() {
    let result = Ok::<_, TransportError>(Envelope::<RegistrationRecord>::error(
        GenericError::with_code("OTHER", "x"),
    ));
    assert_eq!(
        resolve(result, &ResolvePolicy::event_registration()),
        Resolution::Failed("x".into())
    );
}

#[test]
fn benign_code_is_a_failure_where_not_listed() {
    let result = Ok::<_, TransportError>(Envelope::<RegistrationRecord>::error(
        GenericError::with_code(NOT_REGISTERED, "not registered"),
    ));
    assert_eq!(
        resolve(result, &ResolvePolicy::event_details()),
        Resolution::Failed("not registered".into())
    );
}

#[test]
fn empty_success_is_no_data_on_every_screen() {
    for policy in [
        ResolvePolicy::event_details(),
        ResolvePolicy::event_registration(),
    ] {
        let result = Ok::<_, TransportError>(Envelope::<RegistrationRecord>::empty());
        assert_eq!(
            resolve(result, &policy),
            Resolution::Failed(NO_DATA_MESSAGE.into())
        );
    }
}

#[test]
fn unauthorized_is_distinct_only_when_policy_surfaces_it() {
    let rejected = || {
        Err::<Envelope<RegistrationRecord>, _>(TransportError::Unauthorized {
            message: "Invalid JWT".into(),
        })
    };

    assert_eq!(
        resolve(rejected(), &ResolvePolicy::event_details()),
        Resolution::Unauthorized
    );
    assert_eq!(
        resolve(rejected(), &ResolvePolicy::event_registration()),
        Resolution::Failed("Invalid JWT".into())
    );
    assert_eq!(
        resolve(
            rejected(),
            &ResolvePolicy::event_registration().surface_unauthorized(true)
        ),
        Resolution::Unauthorized
    );
}

#[test]
fn transport_failure_keeps_raw_message() {
    let result = Err::<Envelope<RegistrationRecord>, _>(TransportError::Network(
        "connection refused".into(),
    ));
    assert_eq!(
        resolve(result, &ResolvePolicy::event_details()),
        Resolution::Failed("connection refused".into())
    );

    let result = Err::<Envelope<RegistrationRecord>, _>(TransportError::Status {
        status: 500,
        message: "database unavailable".into(),
    });
    assert_eq!(
        resolve(result, &ResolvePolicy::event_registration()),
        Resolution::Failed("database unavailable".into())
    );
}

#[test]
fn require_data_turns_absence_into_no_data() {
    assert_eq!(
        require_data::<RegistrationRecord>(Resolution::Ready(None)),
        Resolution::Failed(NO_DATA_MESSAGE.into())
    );
    assert_eq!(
        require_data(Resolution::Ready(Some(3))),
        Resolution::Ready(3)
    );
}

#[test]
fn action_outcome_treats_missing_error_as_success() {
    let empty: ScreenEvent<()> =
        action_outcome(Ok::<_, TransportError>(Envelope::<()>::empty()));
    assert_eq!(empty, ScreenEvent::ActionSucceeded);

    let failed: ScreenEvent<()> = action_outcome(Ok::<_, TransportError>(Envelope::<()>::error(
        GenericError::new("registrations closed"),
    )));
    assert_eq!(failed, ScreenEvent::ActionFailed("registrations closed".into()));

    let transport: ScreenEvent<()> =
        action_outcome(Err::<Envelope<()>, _>(TransportError::NotFound {
            message: "Not Found".into(),
        }));
    assert_eq!(transport, ScreenEvent::ActionFailed("Not Found".into()));
}
