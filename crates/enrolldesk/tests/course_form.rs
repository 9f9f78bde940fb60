mod support;

use std::sync::Arc;

use serde_json::json;

use enrolldesk::catalog::Catalogs;
use enrolldesk::domain::{CatalogEntry, Course, CourseInstitution, Institution};
use enrolldesk::forms::{CourseForm, SaveError};
use support::{MockApi, Reply};

fn entry(id: i64, label: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        name: None,
        description: Some(label.to_string()),
    }
}

fn institution(id: i64, name: &str) -> Institution {
    Institution {
        id,
        name: name.to_string(),
        institution_type: None,
    }
}

fn catalogs() -> Catalogs {
    Catalogs {
        course_types: vec![entry(1, "Diploma"), entry(2, "Specialization")],
        modalities: vec![entry(3, "Remote"), entry(4, "On site")],
        institutions: vec![
            institution(7, "Acme University"),
            institution(8, "Andes Institute"),
        ],
        ..Catalogs::default()
    }
}

fn filled_form(api: &Arc<MockApi>) -> CourseForm<MockApi> {
    let mut form = CourseForm::new(Arc::clone(api), catalogs());
    form.set_name("Data Engineering");
    form.set_course_type(Some(1));
    form.set_modality(Some(3));
    form
}

#[tokio::test]
async fn a_course_needs_at_least_one_institution() {
    let api = Arc::new(MockApi::new());
    let mut form = filled_form(&api);

    let err = form.submit().await.expect_err("no institutions picked");
    match err {
        SaveError::Validation(message) => {
            assert_eq!(message, "Select at least one institution.");
        }
        other => panic!("expected validation, got {other:?}"),
    }
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn create_sends_offers_in_pick_order() {
    let api = Arc::new(MockApi::new());
    api.stub("POST", "/courses", Reply::Json(json!({"id": 30})));
    let mut form = filled_form(&api);

    form.picker.toggle(8);
    form.picker.set_price(8, "950.50");
    form.picker.set_duration(8, "6");
    form.picker.toggle(7);
    form.picker.set_price(7, "1200");
    form.picker.set_duration(7, "12");

    form.submit().await.expect("save succeeds");

    let calls = api.calls();
    assert_eq!((calls[0].0.as_str(), calls[0].1.as_str()), ("POST", "/courses"));
    let body = calls[0].2.as_ref().expect("course body");
    assert_eq!(body["name"], "Data Engineering");
    assert_eq!(body["idCourseType"], 1);
    assert_eq!(body["idModality"], 3);
    let offers = body["institutions"].as_array().expect("offers array");
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0]["institution"]["id"], 8);
    assert_eq!(offers[0]["price"], 950.5);
    assert_eq!(offers[0]["durationInMonths"], 6);
    assert_eq!(offers[1]["institution"]["id"], 7);
}

#[tokio::test]
async fn blank_terms_default_to_zero() {
    let api = Arc::new(MockApi::new());
    api.stub("POST", "/courses", Reply::Json(json!({"id": 30})));
    let mut form = filled_form(&api);
    form.picker.toggle(7);

    form.submit().await.expect("save succeeds");

    let body = api.calls()[0].2.clone().expect("course body");
    assert_eq!(body["institutions"][0]["price"], 0.0);
    assert_eq!(body["institutions"][0]["durationInMonths"], 0);
}

#[tokio::test]
async fn editing_an_existing_course_updates_in_place() {
    let api = Arc::new(MockApi::new());
    api.stub("PUT", "/courses/30", Reply::Json(json!({"success": true})));
    let mut form = CourseForm::new(Arc::clone(&api), catalogs());

    form.edit(&Course {
        id: 30,
        name: "Data Engineering".to_string(),
        course_type: entry(1, "Diploma"),
        modality: entry(3, "Remote"),
        institutions: vec![CourseInstitution {
            institution: institution(7, "Acme University"),
            price: 1200.0,
            duration_in_months: 12,
        }],
    });

    form.submit().await.expect("update succeeds");

    let calls = api.calls();
    assert_eq!((calls[0].0.as_str(), calls[0].1.as_str()), ("PUT", "/courses/30"));
    let body = calls[0].2.as_ref().expect("course body");
    assert_eq!(body["institutions"][0]["price"], 1200.0);
    assert_eq!(body["institutions"][0]["durationInMonths"], 12);
}

#[tokio::test]
async fn duplicate_name_conflict_is_presentable() {
    let api = Arc::new(MockApi::new());
    api.stub("POST", "/courses", Reply::Error(409, "duplicate"));
    let mut form = filled_form(&api);
    form.picker.toggle(7);

    let err = form.submit().await.expect_err("conflict");
    match err {
        SaveError::Conflict(message) => {
            assert_eq!(message, "A course with this name already exists.");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}
