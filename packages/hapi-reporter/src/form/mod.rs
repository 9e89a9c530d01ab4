//! Report form controller.
//!
//! Gates on the session, submits `(account, category)` reports to the
//! contract, looks stored categories up, and shows a success notification
//! that hides itself after [`DISMISS_AFTER`].
//!
//! Per submission: `Idle -> Submitting -> (Success -> NotificationVisible ->
//! Idle | Failure -> Idle)`. While submitting the form is disabled and any
//! further submit or load fails with [`Error::Busy`] without touching the
//! contract.

mod timer;

use hapi_types::{AccountAddress, Category, Report};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::contract::ContractHandle;
use crate::notification::Notification;
use crate::presenter::Presenter;
use crate::session::Session;
use crate::Error;
use timer::DismissTimer;

/// How long the success notification stays up.
pub const DISMISS_AFTER: Duration = Duration::from_secs(11);

pub const FAILURE_ALERT: &str = "Something went wrong! \
    Maybe you need to sign out and back in? \
    Check the logs for more info.";

/// Collaborators injected into the form.
#[derive(Clone)]
pub struct FormContext {
    pub session: Arc<dyn Session>,
    pub contract: Arc<dyn ContractHandle>,
    pub presenter: Arc<dyn Presenter>,
    pub network_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    NotificationVisible,
}

#[derive(Debug, Default)]
struct FormState {
    disabled: bool,
    category: Option<Category>,
    show_notification: bool,
    /// Bumped each time the notification is shown; a dismissal only hides
    /// the notification it was scheduled for.
    notification_seq: u64,
}

impl FormState {
    fn phase(&self) -> FormPhase {
        if self.disabled {
            FormPhase::Submitting
        } else if self.show_notification {
            FormPhase::NotificationVisible
        } else {
            FormPhase::Idle
        }
    }
}

/// What the form currently renders.
pub enum View<'a> {
    SignIn(SignInPrompt<'a>),
    Form(FormSnapshot),
}

/// Shown instead of the form while signed out.
pub struct SignInPrompt<'a> {
    session: &'a dyn Session,
}

impl SignInPrompt<'_> {
    pub async fn initiate_login(&self) -> Result<(), Error> {
        self.session.login().await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub account_id: String,
    /// Last successfully submitted category.
    pub category: Option<Category>,
    pub disabled: bool,
    pub notification_visible: bool,
    pub phase: FormPhase,
}

pub struct ReportForm {
    ctx: FormContext,
    state: Arc<Mutex<FormState>>,
    timer: DismissTimer,
}

impl ReportForm {
    pub fn new(ctx: FormContext) -> Self {
        Self {
            ctx,
            state: Arc::new(Mutex::new(FormState::default())),
            timer: DismissTimer::default(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn render(&self) -> View<'_> {
        match self.render_auth_gate() {
            Some(prompt) => View::SignIn(prompt),
            None => View::Form(self.snapshot()),
        }
    }

    /// `Some` iff the session is signed out.
    pub fn render_auth_gate(&self) -> Option<SignInPrompt<'_>> {
        if self.ctx.session.is_signed_in() {
            None
        } else {
            Some(SignInPrompt {
                session: &*self.ctx.session,
            })
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let state = self.lock();
        FormSnapshot {
            account_id: self.ctx.session.account_id().unwrap_or_default(),
            category: state.category,
            disabled: state.disabled,
            notification_visible: state.show_notification,
            phase: state.phase(),
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.lock().phase()
    }

    pub fn is_disabled(&self) -> bool {
        self.lock().disabled
    }

    pub fn is_notification_visible(&self) -> bool {
        self.lock().show_notification
    }

    pub async fn sign_out(&self) -> Result<(), Error> {
        self.ctx.session.logout().await
    }

    /// Persist `category` for `account_id` on the contract.
    ///
    /// On failure the user is alerted and the error is returned. On success
    /// the notification is shown and its dismissal scheduled.
    pub async fn submit_report(&self, account_id: &str, category: Category) -> Result<(), Error> {
        let account = AccountAddress::parse(account_id)?;
        if !self.ctx.session.is_signed_in() {
            return Err(Error::NotSignedIn);
        }

        let guard = SubmitGuard::acquire(&self.state)?;
        if guard.hid_notification {
            self.timer.cancel();
            self.ctx.presenter.hide_notification();
        }

        let report = Report::new(account, category);
        info!(account = %report.account_id, category = %category, "Submitting report");
        let result = self.ctx.contract.report_address(&report).await;
        drop(guard);

        if let Err(e) = result {
            error!(account = %report.account_id, error = %e, "Report failed");
            self.ctx.presenter.alert(FAILURE_ALERT);
            return Err(e);
        }

        let seq = {
            let mut state = self.lock();
            state.category = Some(category);
            state.show_notification = true;
            state.notification_seq += 1;
            state.notification_seq
        };
        info!(account = %report.account_id, category = %category, "Report submitted");

        let notification = Notification::new(
            self.ctx.session.account_id().unwrap_or_default(),
            self.ctx.contract.contract_id(),
            self.ctx.network_id.clone(),
        );
        self.ctx.presenter.show_notification(&notification);
        self.schedule_dismissal(seq);
        Ok(())
    }

    /// Read the stored category of `account_id` and present it.
    pub async fn load_category(&self, account_id: &str) -> Result<Option<Category>, Error> {
        let account = AccountAddress::parse(account_id)?;
        if self.is_disabled() {
            warn!(account = %account, "Load ignored while a report is in flight");
            return Err(Error::Busy);
        }

        match self.ctx.contract.get_address_category(&account).await {
            Ok(category) => {
                info!(account = %account, category = ?category, "Category loaded");
                self.ctx.presenter.alert(&describe_category(&account, category));
                Ok(category)
            }
            Err(e) => {
                error!(account = %account, error = %e, "Category lookup failed");
                self.ctx.presenter.alert(FAILURE_ALERT);
                Err(e)
            }
        }
    }

    /// Cancel a pending dismissal. Also done on drop.
    pub fn close(&self) {
        self.timer.cancel();
    }

    fn schedule_dismissal(&self, seq: u64) {
        let state = Arc::clone(&self.state);
        let presenter = Arc::clone(&self.ctx.presenter);
        self.timer.schedule(DISMISS_AFTER, move || {
            let hidden = {
                let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
                if state.notification_seq == seq && state.show_notification {
                    state.show_notification = false;
                    true
                } else {
                    false
                }
            };
            if hidden {
                presenter.hide_notification();
            }
        });
    }
}

fn describe_category(account: &AccountAddress, category: Option<Category>) -> String {
    match category {
        Some(category) => category.to_string(),
        None => format!("No category reported for {account}"),
    }
}

/// Holds the form disabled for the duration of a submission, including when
/// the submitting future is dropped.
struct SubmitGuard<'a> {
    state: &'a Mutex<FormState>,
    hid_notification: bool,
}

impl<'a> SubmitGuard<'a> {
    fn acquire(state: &'a Mutex<FormState>) -> Result<Self, Error> {
        let mut s = state.lock().unwrap_or_else(|e| e.into_inner());
        if s.disabled {
            return Err(Error::Busy);
        }
        s.disabled = true;
        let hid_notification = std::mem::replace(&mut s.show_notification, false);
        Ok(Self {
            state,
            hid_notification,
        })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).disabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_prefers_submitting() {
        let mut state = FormState::default();
        assert_eq!(state.phase(), FormPhase::Idle);
        state.show_notification = true;
        assert_eq!(state.phase(), FormPhase::NotificationVisible);
        state.disabled = true;
        assert_eq!(state.phase(), FormPhase::Submitting);
    }

    #[test]
    fn guard_rejects_second_submission_and_restores_on_drop() {
        let state = Mutex::new(FormState {
            show_notification: true,
            ..FormState::default()
        });
        let guard = SubmitGuard::acquire(&state).unwrap();
        assert!(guard.hid_notification);
        assert!(matches!(SubmitGuard::acquire(&state), Err(Error::Busy)));
        drop(guard);

        let s = state.lock().unwrap();
        assert!(!s.disabled);
        assert!(!s.show_notification);
    }

    #[test]
    fn describes_missing_report() {
        let account = AccountAddress::parse("bob.testnet").unwrap();
        assert_eq!(describe_category(&account, Some(Category::Scam)), "Scam");
        assert_eq!(
            describe_category(&account, None),
            "No category reported for bob.testnet"
        );
    }
}
