//! Drives the screens from the prompt or from a one-shot command.

use std::{io::Write, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use client_core::{EventApi, HttpEventClient};
use registration_flow::{
    ActionRejected, ActiveScreen, EventDetailsController, EventRegistrationController, FlowOptions,
    Navigator, RegistrationView, ResolvePolicy, Screen, ScreenState,
};
use shared::domain::EventId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::{
    commands::{parse_command, UserCommand, HELP},
    render::{render_active, render_details, render_registration, LOADING},
};

pub const SIGN_IN_PROVIDER: &str = "github";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneShot {
    Details,
    Status,
    Register,
    Cancel,
}

/// How a one-shot run ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Shown,
    Failed,
    Unauthorized,
}

impl Outcome {
    fn of<P>(state: &ScreenState<P>) -> Self {
        match state {
            ScreenState::Unauthorized => Outcome::Unauthorized,
            ScreenState::Failed(_) | ScreenState::Loading => Outcome::Failed,
            ScreenState::Ready(_) => Outcome::Shown,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Shown => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::from(1),
            Outcome::Unauthorized => ExitCode::from(2),
        }
    }
}

pub async fn run_once<W: Write>(
    client: Arc<HttpEventClient>,
    event_id: EventId,
    options: FlowOptions,
    command: OneShot,
    out: &mut W,
) -> Result<Outcome> {
    let api: Arc<dyn EventApi> = client.clone();
    info!(event_id = event_id.get(), command = ?command, "session: one-shot run");

    if command == OneShot::Details {
        let mut screen = EventDetailsController::new(api, event_id);
        screen.mount();
        let state = screen.settle().await;
        let sign_in = sign_in_url(&client);
        writeln!(out, "{}", render_details(state, sign_in.as_deref()))?;
        return Ok(Outcome::of(state));
    }

    let policy =
        ResolvePolicy::event_registration().surface_unauthorized(options.unify_unauthorized);
    let mut screen = EventRegistrationController::with_policy(api, event_id, policy);
    screen.mount();
    screen.settle().await;

    let action = match (command, screen.view()) {
        (OneShot::Register, Some(RegistrationView::Unregistered)) => Some(OneShot::Register),
        (OneShot::Cancel, Some(RegistrationView::Confirmed(_))) => Some(OneShot::Cancel),
        (OneShot::Register | OneShot::Cancel, Some(_)) => {
            writeln!(out, "Nothing to do for the current registration status.")?;
            None
        }
        _ => None,
    };

    if let Some(action) = action {
        let started = match action {
            OneShot::Cancel => screen.cancel(),
            _ => screen.register(),
        };
        started.context("registration screen refused the action")?;
        screen.settle().await;
    }

    let state = screen.state();
    writeln!(out, "{}", render_registration(state))?;
    Ok(Outcome::of(state))
}

/// Interactive loop: one command per line until `quit` or end of input.
pub async fn browse<R, W>(
    client: Arc<HttpEventClient>,
    event_id: EventId,
    options: FlowOptions,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let api: Arc<dyn EventApi> = client.clone();
    let mut nav = Navigator::new(api, event_id, options);
    show(&mut nav, &client, out).await?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        debug!(command = ?command, screen = ?nav.screen(), "session: command");

        match apply(&mut nav, &client, command).await {
            Step::Redraw => show(&mut nav, &client, out).await?,
            Step::Say(message) => writeln!(out, "{message}")?,
            Step::Quit => break,
        }
    }
    Ok(())
}

enum Step {
    Redraw,
    Say(String),
    Quit,
}

async fn apply(nav: &mut Navigator, client: &HttpEventClient, command: UserCommand) -> Step {
    match command {
        UserCommand::Retry => {
            let retried = match nav.active_mut() {
                ActiveScreen::Details(screen) => screen.retry(),
                ActiveScreen::Registration(screen) => screen.retry(),
            };
            rejected_or_redraw(retried)
        }
        UserCommand::Next => {
            let target = match nav.active() {
                ActiveScreen::Details(screen) => screen.go_to_registration(),
                ActiveScreen::Registration(_) => {
                    return Step::Say("Already on the registration screen.".into());
                }
            };
            match target {
                Some(screen) => {
                    nav.navigate(screen);
                    Step::Redraw
                }
                None => Step::Say("Registration opens once the event details have loaded.".into()),
            }
        }
        UserCommand::Back => {
            if nav.screen() == Screen::EventDetails {
                return Step::Say("Already on the event details.".into());
            }
            nav.navigate(Screen::EventDetails);
            Step::Redraw
        }
        UserCommand::Register | UserCommand::Cancel => {
            let ActiveScreen::Registration(screen) = nav.active_mut() else {
                return Step::Say("Open the registration screen first ('next').".into());
            };
            let offered = matches!(
                (&command, screen.view()),
                (UserCommand::Register, Some(RegistrationView::Unregistered))
                    | (UserCommand::Cancel, Some(RegistrationView::Confirmed(_)))
            );
            if !offered {
                return Step::Say("That action is not offered right now.".into());
            }
            let started = if command == UserCommand::Register {
                screen.register()
            } else {
                screen.cancel()
            };
            rejected_or_redraw(started)
        }
        UserCommand::Login { token } => {
            client.sign_in_with_token(token).await;
            Step::Say("Signed in. Type 'retry' to reload.".into())
        }
        UserCommand::Logout => {
            client.sign_out().await;
            Step::Say("Signed out.".into())
        }
        UserCommand::Help => Step::Say(HELP.into()),
        UserCommand::Quit => Step::Quit,
    }
}

fn rejected_or_redraw(result: Result<(), ActionRejected>) -> Step {
    match result {
        Ok(()) => Step::Redraw,
        Err(err) => Step::Say(format!("Not now: {err}.")),
    }
}

async fn show<W: Write>(nav: &mut Navigator, client: &HttpEventClient, out: &mut W) -> Result<()> {
    let busy = match nav.active() {
        ActiveScreen::Details(screen) => screen.is_busy(),
        ActiveScreen::Registration(screen) => screen.is_busy(),
    };
    if busy {
        writeln!(out, "{LOADING}")?;
        nav.settle().await;
    }
    let sign_in = sign_in_url(client);
    writeln!(out, "{}", render_active(nav.active(), sign_in.as_deref()))?;
    Ok(())
}

fn sign_in_url(client: &HttpEventClient) -> Option<String> {
    client.sign_in_url(SIGN_IN_PROVIDER).map(|url| url.to_string())
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
