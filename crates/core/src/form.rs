//! Patient registration form controller.
//!
//! The controller owns the form buffer and its per-field error and touched state. It moves
//! through three states:
//!
//! ```text
//! Editing --submit(valid)--> Submitting --admitted--> Success
//!    ^                            |
//!    +-------- refused -----------+
//! ```
//!
//! An invalid submit never leaves `Editing`. While `Submitting`, edits and cancel are
//! ignored; an in-flight submission cannot be aborted. If the [`FormController::submit`]
//! future is dropped before the register answers, the form returns to `Editing` with its
//! data intact and nothing is admitted.

use crate::constants::SUBMISSION_FAILED_MESSAGE;
use crate::patient::{FormField, Patient, PatientFormData};
use crate::validation::{is_form_valid, validate_field, validate_patient_form, FormErrors};
use crate::PatientResult;
use chrono::NaiveDate;
use rawat_catalog::{HospitalCatalog, SelectOption};
use std::collections::BTreeSet;
use std::time::Duration;

/// Something that can admit a validated patient.
pub trait AdmissionTarget {
    fn admit(&self, data: PatientFormData) -> PatientResult<Patient>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    /// The register accepted the patient. The buffer has been cleared.
    Success(Patient),
}

/// Result of one submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent to the register.
    Invalid { error_count: usize },
    /// A submission is already in flight.
    Busy,
    Admitted(Patient),
    /// The register refused the patient. The buffer is kept for a retry.
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct FormController {
    data: PatientFormData,
    errors: FormErrors,
    touched: BTreeSet<FormField>,
    state: FormState,
    notice: Option<String>,
    doctor_options: Vec<SelectOption>,
    room_options: Vec<SelectOption>,
    submit_delay: Duration,
}

impl FormController {
    pub fn new(catalog: &HospitalCatalog, submit_delay: Duration) -> Self {
        Self {
            data: PatientFormData::default(),
            errors: FormErrors::new(),
            touched: BTreeSet::new(),
            state: FormState::Editing,
            notice: None,
            doctor_options: catalog.doctor_options(),
            room_options: catalog.room_options(),
            submit_delay,
        }
    }

    pub fn data(&self) -> &PatientFormData {
        &self.data
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// The error to show next to `field`, if it has been touched.
    pub fn visible_error(&self, field: FormField) -> Option<&str> {
        if self.touched.contains(&field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Form-level notice (error count or submission failure).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn doctor_options(&self) -> &[SelectOption] {
        &self.doctor_options
    }

    pub fn room_options(&self) -> &[SelectOption] {
        &self.room_options
    }

    /// Update one field. A prior error on that field is cleared straight away.
    ///
    /// Returns `false` when the edit was ignored because a submission is in flight.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if self.is_submitting() {
            return false;
        }
        if matches!(self.state, FormState::Success(_)) {
            self.state = FormState::Editing;
        }

        self.data.set(field, value);
        self.errors.clear_field(field);
        true
    }

    /// Field lost focus: mark it touched and re-validate it.
    pub fn blur(&mut self, field: FormField, today: NaiveDate) {
        if self.is_submitting() {
            return;
        }
        self.touched.insert(field);
        let message = validate_field(field, &self.data, today);
        self.errors.set_field(field, message);
    }

    /// Validate the whole form and, if it passes, enter `Submitting`.
    ///
    /// On success returns the data to hand to the register; otherwise the outcome to
    /// report.
    pub fn begin_submit(&mut self, today: NaiveDate) -> Result<PatientFormData, SubmitOutcome> {
        if self.is_submitting() {
            return Err(SubmitOutcome::Busy);
        }

        self.errors = validate_patient_form(&self.data, today);
        if !is_form_valid(&self.errors) {
            let error_count = self.errors.len();
            self.touched.extend(FormField::ALL);
            self.state = FormState::Editing;
            self.notice = Some(format!(
                "Terdapat {} kesalahan pada formulir. Silakan periksa kembali.",
                error_count
            ));
            tracing::debug!(error_count, "form submission rejected by validation");
            return Err(SubmitOutcome::Invalid { error_count });
        }

        self.notice = None;
        self.state = FormState::Submitting;
        Ok(self.data.clone())
    }

    /// Record what the register did with the submitted data.
    pub fn complete_submit(&mut self, result: PatientResult<Patient>) -> SubmitOutcome {
        match result {
            Ok(patient) => {
                self.data = PatientFormData::default();
                self.errors = FormErrors::new();
                self.touched.clear();
                self.notice = None;
                self.state = FormState::Success(patient.clone());
                SubmitOutcome::Admitted(patient)
            }
            Err(e) => {
                tracing::warn!(error = %e, "patient submission failed");
                self.notice = Some(SUBMISSION_FAILED_MESSAGE.to_string());
                self.state = FormState::Editing;
                SubmitOutcome::Failed(SUBMISSION_FAILED_MESSAGE.to_string())
            }
        }
    }

    /// Validate, wait out the submit latency, then admit through `target`.
    pub async fn submit<T>(&mut self, target: &T, today: NaiveDate) -> SubmitOutcome
    where
        T: AdmissionTarget + ?Sized,
    {
        let data = match self.begin_submit(today) {
            Ok(data) => data,
            Err(outcome) => return outcome,
        };

        let delay = self.submit_delay;
        let in_flight = InFlight {
            form: self,
            settled: false,
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let result = target.admit(data);
        in_flight.settle(result)
    }

    /// Discard the buffer. Refused while a submission is in flight.
    pub fn cancel(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.reset();
        true
    }

    pub fn reset(&mut self) {
        self.data = PatientFormData::default();
        self.errors = FormErrors::new();
        self.touched.clear();
        self.notice = None;
        self.state = FormState::Editing;
    }
}

/// A submission between `begin_submit` and `complete_submit`.
struct InFlight<'a> {
    form: &'a mut FormController,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, result: PatientResult<Patient>) -> SubmitOutcome {
        self.settled = true;
        self.form.complete_submit(result)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled && self.form.is_submitting() {
            tracing::warn!("patient submission abandoned before completion");
            self.form.state = FormState::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatientError;
    use chrono::Utc;
    use rawat_ids::PatientId;
    use std::cell::RefCell;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn controller() -> FormController {
        FormController::new(&HospitalCatalog::standard(), Duration::ZERO)
    }

    fn fill(form: &mut FormController) {
        form.edit(FormField::Name, "Ahmad");
        form.edit(FormField::Nik, "1234567890123456");
        form.edit(FormField::Diagnosis, "Flu berat");
        form.edit(FormField::AdmissionDate, "2026-10-16");
        form.edit(FormField::Doctor, "Dr. X");
        form.edit(FormField::Room, "VIP-101");
    }

    #[derive(Default)]
    struct Recorder {
        admitted: RefCell<Vec<PatientFormData>>,
    }

    impl AdmissionTarget for Recorder {
        fn admit(&self, data: PatientFormData) -> PatientResult<Patient> {
            self.admitted.borrow_mut().push(data.clone());
            Ok(Patient::from_form(PatientId::new("99")?, data, Utc::now()))
        }
    }

    struct Refusing;

    impl AdmissionTarget for Refusing {
        fn admit(&self, _data: PatientFormData) -> PatientResult<Patient> {
            Err(PatientError::SubmissionFailed("register unavailable".into()))
        }
    }

    #[test]
    fn options_come_from_the_catalog() {
        let form = controller();
        assert_eq!(form.doctor_options().len(), 10);
        assert_eq!(form.room_options().len(), 15);
    }

    #[test]
    fn edit_clears_the_field_error_optimistically() {
        let mut form = controller();
        form.blur(FormField::Nik, today());
        assert!(form.errors().contains(FormField::Nik));

        form.edit(FormField::Nik, "12");
        assert!(!form.errors().contains(FormField::Nik));

        form.blur(FormField::Nik, today());
        assert_eq!(form.visible_error(FormField::Nik), Some("NIK harus berupa 16 digit angka"));
    }

    #[test]
    fn errors_are_hidden_until_touched() {
        let mut form = controller();
        assert!(matches!(
            form.begin_submit(today()),
            Err(SubmitOutcome::Invalid { error_count: 6 })
        ));
        assert!(FormField::ALL.iter().all(|f| form.is_touched(*f)));
        assert!(form.visible_error(FormField::Room).is_some());

        form.reset();
        form.errors = validate_patient_form(form.data(), today());
        assert!(form.visible_error(FormField::Room).is_none());
    }

    #[tokio::test]
    async fn invalid_submit_reports_count_and_never_admits() {
        let mut form = controller();
        fill(&mut form);
        form.edit(FormField::Nik, "123");
        form.edit(FormField::Diagnosis, "abc");
        let target = Recorder::default();

        let outcome = form.submit(&target, today()).await;

        assert_eq!(outcome, SubmitOutcome::Invalid { error_count: 2 });
        assert_eq!(form.state(), &FormState::Editing);
        assert_eq!(
            form.notice(),
            Some("Terdapat 2 kesalahan pada formulir. Silakan periksa kembali.")
        );
        assert!(target.admitted.borrow().is_empty());
    }

    #[tokio::test]
    async fn valid_submit_admits_and_clears_the_buffer() {
        let mut form = controller();
        fill(&mut form);
        let target = Recorder::default();

        let outcome = form.submit(&target, today()).await;

        let SubmitOutcome::Admitted(patient) = outcome else {
            panic!("expected admission, got {outcome:?}");
        };
        assert_eq!(patient.name, "Ahmad");
        assert_eq!(target.admitted.borrow().len(), 1);
        assert_eq!(form.state(), &FormState::Success(patient));
        assert_eq!(form.data(), &PatientFormData::default());
        assert!(form.notice().is_none());
    }

    #[tokio::test]
    async fn refused_submit_keeps_entered_data() {
        let mut form = controller();
        fill(&mut form);
        let before = form.data().clone();

        let outcome = form.submit(&Refusing, today()).await;

        assert_eq!(outcome, SubmitOutcome::Failed(SUBMISSION_FAILED_MESSAGE.to_string()));
        assert_eq!(form.state(), &FormState::Editing);
        assert_eq!(form.data(), &before);
        assert_eq!(form.notice(), Some(SUBMISSION_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn submit_waits_out_the_configured_delay() {
        let mut form =
            FormController::new(&HospitalCatalog::standard(), Duration::from_millis(40));
        fill(&mut form);
        let target = Recorder::default();

        let started = std::time::Instant::now();
        let outcome = form.submit(&target, today()).await;

        assert!(started.elapsed() >= Duration::from_millis(40));
        assert!(matches!(outcome, SubmitOutcome::Admitted(_)));
        assert_eq!(target.admitted.borrow().len(), 1);
    }

    #[tokio::test]
    async fn dropped_submission_returns_to_editing() {
        let mut form =
            FormController::new(&HospitalCatalog::standard(), Duration::from_millis(200));
        fill(&mut form);
        let before = form.data().clone();
        let target = Recorder::default();

        let timed_out =
            tokio::time::timeout(Duration::from_millis(10), form.submit(&target, today())).await;

        assert!(timed_out.is_err());
        assert_eq!(form.state(), &FormState::Editing);
        assert_eq!(form.data(), &before);
        assert!(target.admitted.borrow().is_empty());

        assert!(form.edit(FormField::Diagnosis, "Flu berat sekali"));
        form.submit_delay = Duration::ZERO;
        let outcome = form.submit(&target, today()).await;
        assert!(matches!(outcome, SubmitOutcome::Admitted(_)));
        assert_eq!(target.admitted.borrow().len(), 1);
    }

    #[tokio::test]
    async fn dropped_submission_can_be_cancelled() {
        let mut form =
            FormController::new(&HospitalCatalog::standard(), Duration::from_millis(200));
        fill(&mut form);

        let timed_out =
            tokio::time::timeout(Duration::from_millis(10), form.submit(&Refusing, today())).await;

        assert!(timed_out.is_err());
        assert!(form.cancel());
        assert_eq!(form.data(), &PatientFormData::default());
    }

    #[test]
    fn submitting_blocks_edits_resubmits_and_cancel() {
        let mut form = controller();
        fill(&mut form);

        let data = form.begin_submit(today()).expect("form is valid");
        assert!(form.is_submitting());

        assert!(!form.edit(FormField::Name, "Budi"));
        assert_eq!(form.data().name, "Ahmad");
        assert_eq!(form.begin_submit(today()), Err(SubmitOutcome::Busy));
        assert!(!form.cancel());

        let outcome = form.complete_submit(Recorder::default().admit(data));
        assert!(matches!(outcome, SubmitOutcome::Admitted(_)));
    }

    #[test]
    fn editing_after_success_returns_to_editing() {
        let mut form = controller();
        fill(&mut form);
        let data = form.begin_submit(today()).unwrap();
        form.complete_submit(Recorder::default().admit(data));

        assert!(form.edit(FormField::Name, "Siti"));
        assert_eq!(form.state(), &FormState::Editing);
    }

    #[test]
    fn cancel_discards_everything() {
        let mut form = controller();
        fill(&mut form);
        form.blur(FormField::Name, today());

        assert!(form.cancel());
        assert_eq!(form.data(), &PatientFormData::default());
        assert!(form.errors().is_empty());
        assert!(!form.is_touched(FormField::Name));
    }
}
