//! Top-level view selection.
//!
//! Each [`ViewState`] variant carries the UI state of its view, so navigating replaces the
//! whole state: leaving the table forgets its query and page, leaving the form forgets
//! its buffer.

use crate::config::CoreConfig;
use crate::form::{FormController, FormState, SubmitOutcome};
use crate::store::PatientStore;
use crate::table::PatientTable;
use crate::{PatientError, PatientResult};
use chrono::NaiveDate;
use rawat_catalog::HospitalCatalog;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Which view is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Landing,
    Table,
    Form,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            View::Landing => "landing",
            View::Table => "table",
            View::Form => "form",
        })
    }
}

/// User intents that move between views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouterAction {
    /// "Lihat daftar pasien" on the landing page.
    ShowList,
    /// "Tambah pasien" on the landing page or the table.
    AddPatient,
    /// The form admitted a patient.
    Submitted,
    Cancelled,
}

impl fmt::Display for RouterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RouterAction::ShowList => "show the patient list",
            RouterAction::AddPatient => "add a patient",
            RouterAction::Submitted => "finish a submission",
            RouterAction::Cancelled => "cancel",
        })
    }
}

#[derive(Clone, Debug)]
pub enum ViewState {
    Landing,
    Table(PatientTable),
    Form(FormController),
}

impl ViewState {
    pub fn view(&self) -> View {
        match self {
            ViewState::Landing => View::Landing,
            ViewState::Table(_) => View::Table,
            ViewState::Form(_) => View::Form,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewRouter {
    state: ViewState,
    cfg: Arc<CoreConfig>,
    catalog: HospitalCatalog,
}

impl ViewRouter {
    /// Starts on the landing page.
    pub fn new(cfg: Arc<CoreConfig>, catalog: HospitalCatalog) -> Self {
        Self {
            state: ViewState::Landing,
            cfg,
            catalog,
        }
    }

    pub fn view(&self) -> View {
        self.state.view()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn table_mut(&mut self) -> Option<&mut PatientTable> {
        match &mut self.state {
            ViewState::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormController> {
        match &mut self.state {
            ViewState::Form(form) => Some(form),
            _ => None,
        }
    }

    fn fresh_table(&self) -> ViewState {
        ViewState::Table(PatientTable::new(self.cfg.page_size()))
    }

    fn fresh_form(&self) -> ViewState {
        ViewState::Form(FormController::new(&self.catalog, self.cfg.submit_delay()))
    }

    /// Apply a navigation action.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidTransition` when `action` is not available from the
    /// current view, when `Submitted` arrives before the form has admitted a patient, or
    /// when `Cancelled` arrives while a submission is in flight. The current view is
    /// left unchanged.
    pub fn dispatch(&mut self, action: RouterAction) -> PatientResult<View> {
        let from = self.view();
        let next = match (&self.state, action) {
            (ViewState::Landing, RouterAction::ShowList) => self.fresh_table(),
            (ViewState::Landing | ViewState::Table(_), RouterAction::AddPatient) => {
                self.fresh_form()
            }
            (ViewState::Form(form), RouterAction::Submitted)
                if matches!(form.state(), FormState::Success(_)) =>
            {
                self.fresh_table()
            }
            (ViewState::Form(form), RouterAction::Cancelled) if !form.is_submitting() => {
                self.fresh_table()
            }
            _ => return Err(PatientError::InvalidTransition { from, action }),
        };

        self.state = next;
        let to = self.view();
        tracing::debug!(%from, %to, "navigated");
        Ok(to)
    }

    /// Submit the open form to `store`, returning to the table once the patient is admitted.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidTransition` if the form is not open.
    pub async fn submit_form(
        &mut self,
        store: &PatientStore,
        today: NaiveDate,
    ) -> PatientResult<SubmitOutcome> {
        let from = self.view();
        let form = self.form_mut().ok_or(PatientError::InvalidTransition {
            from,
            action: RouterAction::Submitted,
        })?;

        let outcome = form.submit(store, today).await;
        if matches!(outcome, SubmitOutcome::Admitted(_)) {
            self.dispatch(RouterAction::Submitted)?;
        }
        Ok(outcome)
    }
}
