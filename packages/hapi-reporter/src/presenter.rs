//! Where the form sends user-facing output.

use serde::Serialize;
use tracing::error;

use crate::contract::REPORT_METHOD;
use crate::notification::Notification;

/// User-facing output of the report form.
pub trait Presenter: Send + Sync {
    /// Blocking message the user has to acknowledge.
    fn alert(&self, message: &str);

    fn show_notification(&self, notification: &Notification);

    fn hide_notification(&self);
}

/// Prints to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPresenter;

impl Presenter for TerminalPresenter {
    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn show_notification(&self, notification: &Notification) {
        println!("{notification}");
    }

    fn hide_notification(&self) {}
}

/// Envelope of every `--json` document on stdout.
#[derive(Debug, Serialize)]
pub struct JsonOut<T> {
    pub ok: bool,
    pub data: T,
}

pub fn render_json<T: Serialize>(data: T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonOut { ok: true, data })
}

/// Print `data` as a JSON document, or as `row(&data)` in text mode.
pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> serde_json::Result<()> {
    if json {
        println!("{}", render_json(data)?);
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Same as [`print_one`] for a list, one row per element.
pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> serde_json::Result<()> {
    if json {
        println!("{}", render_json(data)?);
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct NotificationOut<'a> {
    method: &'a str,
    account_id: &'a str,
    contract_id: &'a str,
    network_id: &'a str,
    account_url: String,
    contract_url: String,
}

impl<'a> From<&'a Notification> for NotificationOut<'a> {
    fn from(n: &'a Notification) -> Self {
        Self {
            method: REPORT_METHOD,
            account_id: &n.account_id,
            contract_id: &n.contract_id,
            network_id: &n.network_id,
            account_url: n.account_url(),
            contract_url: n.contract_url(),
        }
    }
}

/// Machine-readable output: notifications go to stdout as JSON, alerts to
/// stderr so stdout stays parseable.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPresenter;

impl Presenter for JsonPresenter {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn show_notification(&self, notification: &Notification) {
        match render_json(NotificationOut::from(notification)) {
            Ok(json) => println!("{json}"),
            Err(e) => error!(error = %e, "Failed to serialize notification"),
        }
    }

    fn hide_notification(&self) {}
}
