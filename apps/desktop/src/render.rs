//! Plain-text rendering of the two screens.

use registration_flow::{registration_view, ActiveScreen, RegistrationView, ScreenState};
use shared::protocol::{EventDetails, RegistrationRecord};

pub const LOADING: &str = "Loading...";

pub fn render_active(active: &ActiveScreen, sign_in_url: Option<&str>) -> String {
    match active {
        ActiveScreen::Details(controller) => render_details(controller.state(), sign_in_url),
        ActiveScreen::Registration(controller) => render_registration(controller.state()),
    }
}

pub fn render_details(state: &ScreenState<EventDetails>, sign_in_url: Option<&str>) -> String {
    match state {
        ScreenState::Loading => LOADING.to_string(),
        ScreenState::Unauthorized => render_login_required(sign_in_url),
        ScreenState::Failed(message) => render_error(message),
        ScreenState::Ready(details) => {
            let registrations = if details.registrations_open {
                "Registrations are open"
            } else {
                "Registrations are closed"
            };
            [
                details.title.as_str(),
                details.event_name.as_str(),
                details.date.as_str(),
                "",
                details.description.as_str(),
                "",
                registrations,
                "  [next] Registration and more",
            ]
            .join("\n")
        }
    }
}

pub fn render_registration(state: &ScreenState<Option<RegistrationRecord>>) -> String {
    match state {
        ScreenState::Loading => LOADING.to_string(),
        // Only reachable when auth rejections are unified across screens.
        ScreenState::Unauthorized => render_login_required(None),
        ScreenState::Failed(message) => render_error(message),
        ScreenState::Ready(record) => match registration_view(record.as_ref()) {
            RegistrationView::Confirmed(record) => {
                let mut lines = vec!["You're going!".to_string()];
                if let Some(at) = record.checked_in_at() {
                    lines.push(format!("Checked in at {}", at.format("%Y-%m-%d %H:%M UTC")));
                }
                lines.push("  [cancel] Cancel".to_string());
                lines.join("\n")
            }
            RegistrationView::Cancelled(_) => "Registration cancelled.".to_string(),
            RegistrationView::Unregistered => {
                "You're not registered yet.\n  [register] Click to register".to_string()
            }
        },
    }
}

fn render_error(message: &str) -> String {
    format!("{message}\n  [retry] Retry")
}

fn render_login_required(sign_in_url: Option<&str>) -> String {
    let mut lines = vec!["Please log in to continue".to_string()];
    if let Some(url) = sign_in_url {
        lines.push(format!("Sign in with GitHub: {url}"));
    }
    lines.push("  [login <token>] Use the access token from the sign-in page".to_string());
    lines.push("  [retry] Retry loading event".to_string());
    lines.join("\n")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
