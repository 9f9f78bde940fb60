mod support;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;

use enrolldesk::catalog::admin::{spec_for, CatalogAdmin};
use support::{MockApi, Reply};

fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[tokio::test]
async fn save_creates_without_an_id_and_updates_with_one() {
    let api = Arc::new(MockApi::new());
    api.stub("POST", "/profession", Reply::Json(json!({"id": 4})));
    api.stub(
        "PUT",
        "/profession/4",
        Reply::Json(json!({"success": true})),
    );
    let admin = CatalogAdmin::new(Arc::clone(&api));
    let spec = spec_for("profession").expect("profession spec");

    admin
        .save(spec, None, &values(&[("name", "Economist")]))
        .await
        .expect("create succeeds");
    admin
        .save(spec, Some(4), &values(&[("name", "Economist")]))
        .await
        .expect("update succeeds");

    let calls = api.calls();
    assert_eq!(
        (calls[0].0.as_str(), calls[0].1.as_str()),
        ("POST", "/profession")
    );
    assert_eq!(
        (calls[1].0.as_str(), calls[1].1.as_str()),
        ("PUT", "/profession/4")
    );
    assert_eq!(calls[0].2.as_ref().expect("body")["name"], "Economist");
}

#[tokio::test]
async fn select_fields_load_their_options() {
    let api = Arc::new(MockApi::new());
    api.stub(
        "GET",
        "/institution-type",
        Reply::Json(json!([
            { "id": 1, "description": "Public" },
            { "id": 2, "description": "Private" },
        ])),
    );
    let admin = CatalogAdmin::new(Arc::clone(&api));
    let spec = spec_for("institution").expect("institution spec");

    let options = admin.options_for(spec).await.expect("options load");
    let labels: Vec<&str> = options["idInstitutionType"]
        .iter()
        .map(|entry| entry.label())
        .collect();
    assert_eq!(labels, vec!["Public", "Private"]);
}

#[tokio::test]
async fn delete_targets_the_item_path() {
    let api = Arc::new(MockApi::new());
    api.stub(
        "DELETE",
        "/modality/6",
        Reply::Json(json!({"success": true})),
    );
    let admin = CatalogAdmin::new(Arc::clone(&api));
    let spec = spec_for("modality").expect("modality spec");

    admin.delete(spec, 6).await.expect("delete succeeds");

    assert_eq!(api.calls()[0].1, "/modality/6");
}
