mod common;

use common::TestApp;
use http::{Method, StatusCode};
use serde_json::{Value, json};

fn pinot_grigio() -> Value {
    json!({
        "name": "Pinot Grigio",
        "origin": "Italie",
        "type": "VINS BLANC",
        "variants": [{"volume": "75cl", "container": "Bouteille", "price": 28.0}]
    })
}

async fn create(app: &TestApp, body: Value) -> Value {
    let (status, wine) = app.admin(Method::POST, "/api/admin/wines", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{wine}");
    wine
}

#[tokio::test]
async fn test_create_get_and_replace_round_trip() {
    let app = TestApp::new().await;
    let created = create(&app, pinot_grigio()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, wine) = app.get("/api/wines/Pinot%20Grigio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wine["name"], "Pinot Grigio");
    assert_eq!(wine["origin"], "Italie");
    assert_eq!(wine["type"], "VINS BLANC");
    assert_eq!(wine["available"], true);
    assert_eq!(wine["variants"].as_array().unwrap().len(), 1);
    assert_eq!(wine["variants"][0]["volume"], "75cl");
    assert_eq!(wine["variants"][0]["container"], "Bouteille");
    assert_eq!(wine["variants"][0]["price"], 28.0);

    let mut replacement = pinot_grigio();
    replacement["origin"] = json!("France");
    let (status, _) = app
        .admin(Method::PUT, &format!("/api/admin/wines/{id}"), Some(replacement))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, wine) = app.get("/api/wines/Pinot%20Grigio").await;
    assert_eq!(wine["origin"], "France");
}

#[tokio::test]
async fn test_variants_keep_submitted_order() {
    let app = TestApp::new().await;
    create(
        &app,
        json!({
            "name": "Chablis",
            "origin": "France",
            "type": "VINS BLANC",
            "variants": [
                {"volume": "75cl", "container": "Bouteille", "price": 42},
                {"volume": "12cl", "container": "Verre", "price": 8.5},
                {"volume": "50cl", "container": "Carafe", "price": 24}
            ]
        }),
    )
    .await;

    let (status, wines) = app.get("/api/wines").await;
    assert_eq!(status, StatusCode::OK);
    let volumes: Vec<&str> = wines[0]["variants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["volume"].as_str().unwrap())
        .collect();
    assert_eq!(volumes, vec!["75cl", "12cl", "50cl"]);
    assert_eq!(wines[0]["variants"][1]["price"], 8.5);
}

#[tokio::test]
async fn test_full_update_replaces_variant_set() {
    let app = TestApp::new().await;
    let created = create(&app, pinot_grigio()).await;
    let id = created["id"].as_i64().unwrap();
    let old_variant_id = created["variants"][0]["id"].as_i64().unwrap();

    let mut body = pinot_grigio();
    body["variants"] = json!([
        {"volume": "12cl", "container": "Verre", "price": 7},
        {"volume": "50cl", "container": "Carafe", "price": 19.5}
    ]);
    let (status, wine) = app
        .admin(Method::PUT, &format!("/api/admin/wines/{id}"), Some(body))
        .await;
    assert_eq!(status, StatusCode::OK);

    let variants = wine["variants"].as_array().unwrap();
    assert_eq!(variants.len(), 2);
    assert!(variants.iter().all(|v| v["id"].as_i64() != Some(old_variant_id)));
    assert!(variants.iter().all(|v| v["volume"] != "75cl"));
    assert_eq!(app.count("wine_variant").await, 2);
}

#[tokio::test]
async fn test_patch_only_touches_supplied_fields() {
    let app = TestApp::new().await;
    let created = create(&app, pinot_grigio()).await;
    let id = created["id"].as_i64().unwrap();
    let variant_id = created["variants"][0]["id"].clone();

    let (status, wine) = app
        .admin(
            Method::PATCH,
            &format!("/api/admin/wines/{id}"),
            Some(json!({"description": "Sec et fruité", "available": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wine["description"], "Sec et fruité");
    assert_eq!(wine["available"], false);
    assert_eq!(wine["origin"], "Italie");
    assert_eq!(wine["variants"][0]["id"], variant_id);

    let (status, wine) = app
        .admin(
            Method::PATCH,
            &format!("/api/admin/wines/{id}"),
            Some(json!({"variants": [{"volume": "14cl", "container": "Verre", "price": 9}]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wine["description"], "Sec et fruité");
    assert_eq!(wine["variants"].as_array().unwrap().len(), 1);
    assert_eq!(wine["variants"][0]["volume"], "14cl");
}

#[tokio::test]
async fn test_delete_cascades_variants() {
    let app = TestApp::new().await;
    let created = create(&app, pinot_grigio()).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(app.count("wine_variant").await, 1);

    let (status, body) = app
        .admin(Method::DELETE, &format!("/api/admin/wines/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);

    assert_eq!(app.count("wine_variant").await, 0);
    let (status, body) = app.get("/api/wines/Pinot%20Grigio").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    let (status, _) = app
        .admin(Method::DELETE, &format!("/api/admin/wines/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_required_fields_and_canonical_enums() {
    let app = TestApp::new().await;

    let mut body = pinot_grigio();
    body.as_object_mut().unwrap().remove("origin");
    let (status, err) = app.admin(Method::POST, "/api/admin/wines", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["details"]["field"], "origin");

    let mut body = pinot_grigio();
    body.as_object_mut().unwrap().remove("type");
    let (status, err) = app.admin(Method::POST, "/api/admin/wines", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["details"]["field"], "type");

    for (field, value) in [("origin", ""), ("type", ""), ("origin", "Italy")] {
        let mut body = pinot_grigio();
        body[field] = json!(value);
        let (status, _) = app.admin(Method::POST, "/api/admin/wines", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{field} = {value:?}");
    }

    let mut body = pinot_grigio();
    body["name"] = json!("  ");
    let (status, _) = app.admin(Method::POST, "/api/admin/wines", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(app.count("wine").await, 0);
}

#[tokio::test]
async fn test_rose_accent_alias_is_stored_canonically() {
    let app = TestApp::new().await;
    let mut body = pinot_grigio();
    body["name"] = json!("Tavel");
    body["type"] = json!("VINS ROSÉ");
    let wine = create(&app, body).await;
    assert_eq!(wine["type"], "VINS ROSE");
}

#[tokio::test]
async fn test_invalid_variants_write_nothing() {
    let app = TestApp::new().await;

    let mut body = pinot_grigio();
    body["variants"] = json!([
        {"volume": "75cl", "container": "Bouteille", "price": 28},
        {"volume": "75cl", "container": "Bouteille", "price": 30}
    ]);
    let (status, err) = app.admin(Method::POST, "/api/admin/wines", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 6003);

    let mut body = pinot_grigio();
    body["variants"][0]["price"] = json!(-3);
    let (status, err) = app.admin(Method::POST, "/api/admin/wines", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["details"]["field"], "variants[0].price");

    assert_eq!(app.count("wine").await, 0);
    assert_eq!(app.count("wine_variant").await, 0);
}

#[tokio::test]
async fn test_duplicate_name_conflicts_and_rolls_back() {
    let app = TestApp::new().await;
    create(&app, pinot_grigio()).await;

    let (status, err) = app
        .admin(Method::POST, "/api/admin/wines", Some(pinot_grigio()))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], 6002);

    let mut other = pinot_grigio();
    other["name"] = json!("Barolo");
    let barolo = create(&app, other).await;
    let barolo_id = barolo["id"].as_i64().unwrap();

    // renaming onto an existing name fails as a whole, variants included
    let mut body = pinot_grigio();
    body["variants"] = json!([{"volume": "12cl", "container": "Verre", "price": 11}]);
    let (status, _) = app
        .admin(Method::PUT, &format!("/api/admin/wines/{barolo_id}"), Some(body))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, wine) = app.get("/api/wines/Barolo").await;
    assert_eq!(wine["variants"], barolo["variants"]);
}

#[tokio::test]
async fn test_unknown_category_and_unknown_wine() {
    let app = TestApp::new().await;

    let mut body = pinot_grigio();
    body["categoryId"] = json!(999);
    let (status, err) = app.admin(Method::POST, "/api/admin/wines", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["details"]["field"], "categoryId");

    let (status, _) = app
        .admin(Method::PUT, "/api/admin/wines/42", Some(pinot_grigio()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .admin(Method::PATCH, "/api/admin/wines/42", Some(json!({"available": false})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/wines/Inconnu").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wine_in_category() {
    let app = TestApp::new().await;
    let (status, category) = app
        .admin(
            Method::POST,
            "/api/admin/categories",
            Some(json!({"name": "Vins d'Italie", "kind": "wine"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let mut body = pinot_grigio();
    body["categoryId"] = category["id"].clone();
    let wine = create(&app, body).await;
    assert_eq!(wine["categoryId"], category["id"]);
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = TestApp::new().await;

    let (status, err) = app
        .request(Method::POST, "/api/admin/wines", Some(pinot_grigio()), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(err["code"], 1001);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/admin/wines",
            Some(pinot_grigio()),
            Some("not-a-jwt"),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let editor = app.token(shared::models::Role::Editor);
    let (status, _) = app
        .request(Method::POST, "/api/admin/wines", Some(pinot_grigio()), Some(&editor))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.admin_token();
    let request = http::Request::builder()
        .method(Method::POST)
        .uri("/api/admin/wines")
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.app.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
