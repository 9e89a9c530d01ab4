//! Test doubles for driving `ReportForm` without a network.

#![allow(dead_code)]

use async_trait::async_trait;
use hapi_reporter::contract::ContractHandle;
use hapi_reporter::form::{FormContext, ReportForm};
use hapi_reporter::notification::Notification;
use hapi_reporter::presenter::Presenter;
use hapi_reporter::session::Session;
use hapi_reporter::{AccountAddress, Category, Error, Report};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const CONTRACT_ID: &str = "hapi.testnet";

/// Session whose signed-in flag the test flips directly.
pub struct FakeSession {
    signed_in: AtomicBool,
    account_id: String,
}

impl FakeSession {
    pub fn signed_in(account_id: &str) -> Arc<Self> {
        Arc::new(Self {
            signed_in: AtomicBool::new(true),
            account_id: account_id.to_string(),
        })
    }

    pub fn signed_out(account_id: &str) -> Arc<Self> {
        Arc::new(Self {
            signed_in: AtomicBool::new(false),
            account_id: account_id.to_string(),
        })
    }

    pub fn set_signed_in(&self, value: bool) {
        self.signed_in.store(value, Ordering::SeqCst);
    }
}

#[async_trait]
impl Session for FakeSession {
    fn is_signed_in(&self) -> bool {
        self.signed_in.load(Ordering::SeqCst)
    }

    fn account_id(&self) -> Option<String> {
        self.is_signed_in().then(|| self.account_id.clone())
    }

    async fn login(&self) -> Result<(), Error> {
        self.set_signed_in(true);
        Ok(())
    }

    async fn logout(&self) -> Result<(), Error> {
        self.set_signed_in(false);
        Ok(())
    }
}

/// Pauses `report_address` until released.
pub struct Hold {
    pub entered: Notify,
    pub release: Notify,
}

/// Contract double that records every call.
#[derive(Default)]
pub struct RecordingContract {
    pub reports: Mutex<Vec<Report>>,
    pub queries: Mutex<Vec<AccountAddress>>,
    pub stored: Mutex<HashMap<AccountAddress, Category>>,
    pub fail_with: Mutex<Option<Error>>,
    pub hold: Option<Hold>,
}

impl RecordingContract {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(error: Error) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Mutex::new(Some(error)),
            ..Self::default()
        })
    }

    pub fn holding() -> Arc<Self> {
        Arc::new(Self {
            hold: Some(Hold {
                entered: Notify::new(),
                release: Notify::new(),
            }),
            ..Self::default()
        })
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<AccountAddress> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractHandle for RecordingContract {
    fn contract_id(&self) -> &str {
        CONTRACT_ID
    }

    async fn report_address(&self, report: &Report) -> Result<(), Error> {
        self.reports.lock().unwrap().push(report.clone());
        if let Some(hold) = &self.hold {
            hold.entered.notify_one();
            hold.release.notified().await;
        }
        if let Some(e) = self.fail_with.lock().unwrap().clone() {
            return Err(e);
        }
        self.stored
            .lock()
            .unwrap()
            .insert(report.account_id.clone(), report.category);
        Ok(())
    }

    async fn get_address_category(
        &self,
        account_id: &AccountAddress,
    ) -> Result<Option<Category>, Error> {
        self.queries.lock().unwrap().push(account_id.clone());
        if let Some(e) = self.fail_with.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.stored.lock().unwrap().get(account_id).copied())
    }
}

/// Presenter that keeps everything it was asked to show.
#[derive(Default)]
pub struct RecordingPresenter {
    pub alerts: Mutex<Vec<String>>,
    pub shown: Mutex<Vec<Notification>>,
    pub hidden: Mutex<u32>,
}

impl RecordingPresenter {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap().clone()
    }

    pub fn hidden(&self) -> u32 {
        *self.hidden.lock().unwrap()
    }
}

impl Presenter for RecordingPresenter {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn show_notification(&self, notification: &Notification) {
        self.shown.lock().unwrap().push(notification.clone());
    }

    fn hide_notification(&self) {
        *self.hidden.lock().unwrap() += 1;
    }
}

pub fn build_form(
    session: Arc<dyn Session>,
    contract: Arc<dyn ContractHandle>,
) -> (ReportForm, Arc<RecordingPresenter>) {
    let presenter = Arc::new(RecordingPresenter::default());
    let form = ReportForm::new(FormContext {
        session,
        contract,
        presenter: presenter.clone(),
        network_id: "testnet".into(),
    });
    (form, presenter)
}
