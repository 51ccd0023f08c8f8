//! Edge-function client over HTTP.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use shared::{
    domain::EventId,
    protocol::{
        CancelledData, Envelope, EventDetails, EventIdRequest, RegisteredData, RegistrationRecord,
    },
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    error::{ClientConfigError, TransportError},
    ApiResult, EventApi,
};

const FUNCTIONS_PATH: &str = "functions/v1/";
const AUTHORIZE_PATH: &str = "auth/v1/authorize";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    EventDetails,
    RegisterForEvent,
    EventRegistrationDetails,
    CancelEventRegistration,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::EventDetails => "event-details",
            Function::RegisterForEvent => "register-for-event",
            Function::EventRegistrationDetails => "event-registration-details",
            Function::CancelEventRegistration => "cancel-event-registration",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub access_token: Option<String>,
}

/// Bare `{ "message": ... }` bodies returned by the gateway on auth failures.
#[derive(Deserialize)]
struct BareMessage {
    message: String,
}

pub struct HttpEventClient {
    http: Client,
    base_url: Url,
    api_key: String,
    access_token: RwLock<Option<String>>,
}

impl HttpEventClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientConfigError> {
        let base_url = parse_base_url(&config.base_url)?;
        if config.api_key.trim().is_empty() {
            return Err(ClientConfigError::MissingApiKey);
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            api_key: config.api_key,
            access_token: RwLock::new(config.access_token.filter(|t| !t.trim().is_empty())),
        })
    }

    /// Installs the user token handed back by the external sign-in flow.
    pub async fn sign_in_with_token(&self, token: impl Into<String>) {
        *self.access_token.write().await = Some(token.into());
        info!("api: session token installed");
    }

    pub async fn sign_out(&self) {
        *self.access_token.write().await = None;
        info!("api: session token cleared");
    }

    pub async fn is_signed_in(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    /// Authorize URL for the hosted OAuth sign-in with `provider`.
    pub fn sign_in_url(&self, provider: &str) -> Option<Url> {
        let mut url = self.base_url.join(AUTHORIZE_PATH).ok()?;
        url.query_pairs_mut().append_pair("provider", provider);
        Some(url)
    }

    pub(crate) fn function_url(&self, function: Function) -> Result<Url, TransportError> {
        self.base_url
            .join(FUNCTIONS_PATH)
            .and_then(|base| base.join(function.name()))
            .map_err(|e| TransportError::Network(format!("invalid url for {function}: {e}")))
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        function: Function,
        event_id: EventId,
    ) -> ApiResult<T> {
        let url = self.function_url(function)?;
        let bearer = self
            .access_token
            .read()
            .await
            .clone()
            .unwrap_or_else(|| self.api_key.clone());

        debug!(function = function.name(), event_id = event_id.get(), "api: invoking function");
        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
            .json(&EventIdRequest { event_id })
            .send()
            .await
            .map_err(|e| {
                warn!(function = function.name(), error = %e, "api: request failed");
                TransportError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(function = function.name(), error = %e, "api: failed to read response body");
            TransportError::Network(e.to_string())
        })?;

        if !status.is_success() {
            let error = status_error(status, &body);
            warn!(
                function = function.name(),
                event_id = event_id.get(),
                status = status.as_u16(),
                error = %error,
                "api: function call rejected"
            );
            return Err(error);
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            warn!(function = function.name(), error = %e, "api: undecodable response");
            TransportError::Decode(e.to_string())
        })?;
        info!(
            function = function.name(),
            event_id = event_id.get(),
            status = status.as_u16(),
            has_error = envelope.error.is_some(),
            "api: function call completed"
        );
        Ok(envelope)
    }
}

#[async_trait]
impl EventApi for HttpEventClient {
    async fn fetch_event_details(&self, event_id: EventId) -> ApiResult<EventDetails> {
        self.invoke(Function::EventDetails, event_id).await
    }

    async fn register(&self, event_id: EventId) -> ApiResult<RegisteredData> {
        self.invoke(Function::RegisterForEvent, event_id).await
    }

    async fn fetch_registration(&self, event_id: EventId) -> ApiResult<RegistrationRecord> {
        self.invoke(Function::EventRegistrationDetails, event_id).await
    }

    async fn cancel_registration(&self, event_id: EventId) -> ApiResult<CancelledData> {
        self.invoke(Function::CancelEventRegistration, event_id).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientConfigError> {
    let invalid = |reason: String| ClientConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    // Relative joins drop the last segment unless the path ends with '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn status_error(status: StatusCode, body: &str) -> TransportError {
    let message = failure_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            TransportError::Unauthorized { message }
        }
        StatusCode::NOT_FOUND => TransportError::NotFound { message },
        _ => TransportError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(Envelope {
        error: Some(error), ..
    }) = serde_json::from_str::<Envelope<serde_json::Value>>(body)
    {
        return error.message;
    }
    if let Ok(bare) = serde_json::from_str::<BareMessage>(body) {
        return bare.message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
