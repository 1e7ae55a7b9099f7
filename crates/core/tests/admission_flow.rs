use rawat_catalog::HospitalCatalog;
use rawat_core::{
    format_date_for_input, local_today, CoreConfig, FormField, FormState, PatientStore,
    RouterAction, SortField, SubmitOutcome, TableStatus, View, ViewRouter,
};
use std::sync::Arc;

fn fill_ahmad(router: &mut ViewRouter, admission_date: &str) {
    let form = router.form_mut().expect("form is open");
    form.edit(FormField::Name, "Ahmad");
    form.edit(FormField::Nik, "1234567890123456");
    form.edit(FormField::Diagnosis, "Flu berat");
    form.edit(FormField::AdmissionDate, admission_date);
    form.edit(FormField::Doctor, "Dr. X");
    form.edit(FormField::Room, "VIP-101");
}

#[tokio::test]
async fn admitting_a_patient_from_the_table() {
    let cfg = Arc::new(CoreConfig::immediate());
    let store = PatientStore::new(cfg.clone()).unwrap();
    store.fetch_patients().await.unwrap();
    let before: Vec<_> = store.patients().into_iter().map(|p| p.id).collect();

    let mut router = ViewRouter::new(cfg, HospitalCatalog::standard());
    router.dispatch(RouterAction::ShowList).unwrap();
    router.dispatch(RouterAction::AddPatient).unwrap();

    let today = local_today();
    fill_ahmad(&mut router, &format_date_for_input(today));
    let outcome = router.submit_form(&store, today).await.unwrap();

    let SubmitOutcome::Admitted(patient) = outcome else {
        panic!("expected admission, got {outcome:?}");
    };
    assert_eq!(router.view(), View::Table);

    assert_eq!(store.len(), before.len() + 1);
    assert!(!before.contains(&patient.id));
    assert_eq!(patient.name, "Ahmad");
    assert_eq!(patient.nik, "1234567890123456");
    assert_eq!(patient.diagnosis, "Flu berat");
    assert_eq!(patient.admission_date, format_date_for_input(today));
    assert_eq!(patient.doctor, "Dr. X");
    assert_eq!(patient.room, "VIP-101");
    assert!(store.search_patients("").contains(&patient));

    let table = router.table_mut().expect("back on the table");
    assert_eq!(table.query(), "");
    table.toggle_sort(SortField::Name);
    let page = table.render(&store);
    assert_eq!(page.status, TableStatus::Rows);
    assert_eq!(page.rows[0], patient);
    assert_eq!(page.total_matches, 6);
    assert_eq!(page.pagination.total_pages, 2);
}

#[tokio::test]
async fn form_reaches_success_before_navigation() {
    let cfg = Arc::new(CoreConfig::immediate());
    let store = PatientStore::with_patients(cfg.clone(), Vec::new());

    let mut router = ViewRouter::new(cfg, HospitalCatalog::standard());
    router.dispatch(RouterAction::AddPatient).unwrap();

    let today = local_today();
    fill_ahmad(&mut router, &format_date_for_input(today));
    let form = router.form_mut().unwrap();
    let outcome = form.submit(&store, today).await;

    assert!(matches!(form.state(), FormState::Success(_)));
    assert!(matches!(outcome, SubmitOutcome::Admitted(_)));
    assert_eq!(router.dispatch(RouterAction::Submitted).unwrap(), View::Table);

    let page = router.table_mut().unwrap().render(&store);
    let names: Vec<&str> = page.rows.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ahmad"]);
}

#[tokio::test]
async fn invalid_submission_leaves_the_register_untouched() {
    let cfg = Arc::new(CoreConfig::immediate());
    let store = PatientStore::new(cfg.clone()).unwrap();

    let mut router = ViewRouter::new(cfg, HospitalCatalog::standard());
    router.dispatch(RouterAction::AddPatient).unwrap();
    fill_ahmad(&mut router, "2000-01-01");
    router
        .form_mut()
        .unwrap()
        .edit(FormField::Nik, "12345678901234567");

    let outcome = router.submit_form(&store, local_today()).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Invalid { error_count: 2 });
    assert_eq!(router.view(), View::Form);
    assert_eq!(store.len(), 5);

    let form = router.form_mut().unwrap();
    assert!(form.visible_error(FormField::Nik).is_some());
    assert!(form.visible_error(FormField::AdmissionDate).is_some());
    assert_eq!(form.data().name, "Ahmad");

    assert_eq!(router.dispatch(RouterAction::Cancelled).unwrap(), View::Table);
    assert_eq!(store.len(), 5);
}
