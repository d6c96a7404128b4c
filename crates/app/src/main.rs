//! Console shell entry point.
//!
//! Reads one command per line from stdin:
//! - `/path?query` or `#/path?query` navigates
//! - `login <email> <password>`, `register <name> <email> <password>`
//! - `delete <id>` (students or payments, depending on the screen)
//! - `set <field> <value>` edits the current form, `save` submits it
//! - `logout`, `ack`, `quit`

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use crudops_app::{Action, AppContext, Dispatcher, ViewKind};
use crudops_auth::{FileSlot, MemorySlot, NewPrincipal, SESSION_KEY, SessionStore};
use crudops_client::{ApiClient, ClientConfig};
use crudops_core::EntityId;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    crudops_observability::init();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "starting crudops shell");
    let api = Arc::new(ApiClient::from_config(&config));

    let mut session = match FileSlot::in_data_dir(SESSION_KEY) {
        Ok(slot) => SessionStore::new(slot),
        Err(e) => {
            tracing::warn!(error = %e, "session will not survive restarts");
            SessionStore::new(MemorySlot::new())
        }
    };
    session.init();

    let mut ctx = AppContext::new(api, session);
    ctx.auth.revalidate().await;

    let mut dispatcher = Dispatcher::new(ctx);
    if let Err(e) = dispatcher.navigate("/").await {
        println!("! {e}");
    }
    print_state(&dispatcher);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }

        let outcome = if line == "ack" {
            dispatcher.acknowledge();
            Ok(())
        } else if line.starts_with('/') || line.starts_with('#') {
            dispatcher.navigate(line).await.map(drop)
        } else if line == "save" {
            dispatcher.save().await.map(drop)
        } else if let Some(rest) = line.strip_prefix("set ") {
            match rest.trim_start().split_once(' ') {
                Some((field, value)) => dispatcher.set_field(field, value.trim()),
                None => dispatcher.set_field(rest.trim(), ""),
            }
        } else {
            match parse_action(line, &dispatcher) {
                Some(action) => dispatcher.submit(action).await.map(drop),
                None => {
                    println!("! unknown command: {line}");
                    Ok(())
                }
            }
        };
        if let Err(e) = outcome {
            println!("! {e}");
        }
        print_state(&dispatcher);
    }

    Ok(())
}

fn parse_action<A>(line: &str, dispatcher: &Dispatcher<A>) -> Option<Action>
where
    A: crudops_client::RestApi,
{
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["login", email, password] => Some(Action::Login {
            email: (*email).to_string(),
            password: (*password).to_string(),
        }),
        ["register", name, email, password] => {
            Some(Action::Register(NewPrincipal::user(*name, *email, *password)))
        }
        ["logout"] => Some(Action::Logout),
        ["delete", id] => {
            let id: EntityId = id.parse().ok()?;
            match dispatcher.screen().map(|s| s.view) {
                Some(ViewKind::Payments) => Some(Action::DeletePayment(id)),
                _ => Some(Action::DeleteStudent(id)),
            }
        }
        _ => None,
    }
}

fn print_state<A: crudops_client::RestApi>(dispatcher: &Dispatcher<A>) {
    println!("\n@ {}", dispatcher.location());
    if let Some(screen) = dispatcher.screen() {
        print!("{}", screen.render_text());
        if let Some(form) = &screen.form {
            println!("form: {form}");
        }
    }
    if let Some(alert) = dispatcher.pending_alert() {
        println!("!! {} (type 'ack' to dismiss)", alert.message);
    }
}
