mod support;

use std::sync::Arc;

use serde_json::json;

use enrolldesk::catalog::Catalogs;
use enrolldesk::domain::{CatalogEntry, Course, CourseInstitution, Institution};
use enrolldesk::forms::{EnrollmentForm, PaymentForm, SaveError, ScheduleAction, ScheduleBoard};
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

fn offer(id: i64, name: &str, price: f64) -> CourseInstitution {
    CourseInstitution {
        institution: institution(id, name),
        price,
        duration_in_months: 12,
    }
}

fn catalogs() -> Catalogs {
    Catalogs {
        courses: vec![
            Course {
                id: 30,
                name: "Data Engineering".to_string(),
                course_type: entry(1, "Diploma"),
                modality: entry(3, "Remote"),
                institutions: vec![offer(7, "Acme University", 1200.0)],
            },
            Course {
                id: 31,
                name: "Public Health".to_string(),
                course_type: entry(2, "Specialization"),
                modality: entry(4, "On site"),
                institutions: vec![
                    offer(8, "Andes Institute", 950.0),
                    offer(9, "Pacific Business School", 1100.0),
                ],
            },
        ],
        ..Catalogs::default()
    }
}

fn schedule_item(id: i64, enrollment_id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "enrollmentId": enrollment_id,
        "conceptType": { "id": 1, "description": "Installment" },
        "installmentAmount": 250.0,
        "installmentDueDate": "2026-09-01T00:00:00Z",
        "installmentStatus": { "id": 1, "status": status },
    })
}

#[tokio::test]
async fn institution_choices_follow_the_selected_course() {
    let api = Arc::new(MockApi::new());
    let mut form = EnrollmentForm::new(Arc::clone(&api), catalogs());

    assert!(form.available_institutions().is_empty());

    form.set_course(Some(31));
    let names: Vec<&str> = form
        .available_institutions()
        .iter()
        .map(|offer| offer.institution.name.as_str())
        .collect();
    assert_eq!(names, vec!["Andes Institute", "Pacific Business School"]);
}

#[tokio::test]
async fn changing_the_course_resets_the_institution() {
    let api = Arc::new(MockApi::new());
    let mut form = EnrollmentForm::new(Arc::clone(&api), catalogs());

    form.set_course(Some(31));
    form.set_institution(Some(8));
    form.set_course(Some(30));
    assert_eq!(form.institution(), None);

    // Re-selecting the same course keeps the pick.
    form.set_institution(Some(7));
    form.set_course(Some(30));
    assert_eq!(form.institution(), Some(7));
}

#[tokio::test]
async fn create_sends_every_selection_and_both_amounts() {
    let api = Arc::new(MockApi::new());
    api.stub("POST", "/enrollment", Reply::Json(json!({"id": 77})));
    let mut form = EnrollmentForm::new(Arc::clone(&api), catalogs());

    form.set_student(Some(11));
    form.set_agent(Some(5));
    form.set_course(Some(30));
    form.set_institution(Some(7));
    form.set_enrollment_fee("350.00");
    form.set_final_rights("120.50");

    form.submit().await.expect("save succeeds");

    let calls = api.calls();
    assert_eq!(
        (calls[0].0.as_str(), calls[0].1.as_str()),
        ("POST", "/enrollment")
    );
    let body = calls[0].2.as_ref().expect("enrollment body");
    assert_eq!(body["idStudent"], 11);
    assert_eq!(body["idAgent"], 5);
    assert_eq!(body["idCourse"], 30);
    assert_eq!(body["idInstitution"], 7);
    assert_eq!(body["enrollmentFeeAmount"], 350.0);
    assert_eq!(body["finalRightsAmount"], 120.5);
    assert!(body["enrollmentDate"].is_string());
}

#[tokio::test]
async fn non_numeric_amount_is_rejected_without_network() {
    let api = Arc::new(MockApi::new());
    let mut form = EnrollmentForm::new(Arc::clone(&api), catalogs());

    form.set_student(Some(11));
    form.set_agent(Some(5));
    form.set_course(Some(30));
    form.set_institution(Some(7));
    form.set_enrollment_fee("three hundred");
    form.set_final_rights("120.50");

    let err = form.submit().await.expect_err("bad amount");
    assert!(matches!(err, SaveError::Validation(_)));
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn schedule_board_keeps_only_its_enrollment() {
    let api = Arc::new(MockApi::new());
    api.stub(
        "GET",
        "/payments-schedules",
        Reply::Json(json!([
            schedule_item(1, 77, "Pendiente"),
            schedule_item(2, 78, "Pendiente"),
            schedule_item(3, 77, "Pagado"),
        ])),
    );
    let mut board = ScheduleBoard::new(Arc::clone(&api), 77);

    board.reload().await.expect("reload succeeds");

    let ids: Vec<i64> = board.items().iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(
        board.action_for(&board.items()[0]),
        ScheduleAction::RegisterPayment
    );
    assert_eq!(
        board.action_for(&board.items()[1]),
        ScheduleAction::ViewDetails
    );
}

#[tokio::test]
async fn paid_installment_details_resolve_to_its_payment() {
    let api = Arc::new(MockApi::new());
    let payments = json!([
        {
            "id": 5,
            "paymentDate": "2026-08-01T10:00:00Z",
            "paymentType": { "id": 2, "description": "Cash" },
            "idPaymentSchedule": 3,
        },
        {
            "id": 6,
            "paymentDate": "2026-08-02T10:00:00Z",
            "paymentType": { "id": 2, "description": "Cash" },
            "idPaymentSchedule": 9,
        },
    ]);
    api.stub("GET", "/payments", Reply::Json(payments.clone()));
    api.stub("GET", "/payments", Reply::Json(payments));
    let board = ScheduleBoard::new(Arc::clone(&api), 77);

    let payment = board
        .payment_details(3)
        .await
        .expect("payments load")
        .expect("payment found");
    assert_eq!(payment.id, 5);
    assert_eq!(payment.payment_type.label(), "Cash");

    // An installment nothing was paid against has no details to show.
    let missing = board.payment_details(4).await.expect("payments load");
    assert!(missing.is_none());
}

#[tokio::test]
async fn registering_a_payment_targets_the_installment() {
    let api = Arc::new(MockApi::new());
    api.stub("POST", "/payments", Reply::Json(json!({"id": 5})));
    let mut form = PaymentForm::new(Arc::clone(&api), vec![entry(2, "Cash")], 3);

    form.set_payment_type(Some(2));
    form.register().await.expect("payment registers");

    let calls = api.calls();
    assert_eq!(
        (calls[0].0.as_str(), calls[0].1.as_str()),
        ("POST", "/payments")
    );
    let body = calls[0].2.as_ref().expect("payment body");
    assert_eq!(body["idPaymentType"], 2);
    assert_eq!(body["idPaymentSchedule"], 3);
    assert!(body["paymentDate"].is_string());
}

#[tokio::test]
async fn payment_without_a_type_is_rejected() {
    let api = Arc::new(MockApi::new());
    let mut form = PaymentForm::new(Arc::clone(&api), vec![entry(2, "Cash")], 3);

    let err = form.register().await.expect_err("no type selected");
    assert!(matches!(err, SaveError::Validation(_)));
    assert_eq!(api.call_count(), 0);
}
