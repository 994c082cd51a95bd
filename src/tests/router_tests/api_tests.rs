// src/tests/router_tests/api_tests.rs
use crate::domain::LatLng;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    add_case, add_site, case_status, now_unix, read_body, request, signed_in_user, test_app,
};
use http::Method;
use serde_json::Value;

fn listed_ids(body: &str) -> Vec<String> {
    let json: Value = serde_json::from_str(body).expect("Response is not JSON");
    json.as_array()
        .expect("Expected an array")
        .iter()
        .map(|c| c["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn open_cases_are_ordered_and_owner_scoped() {
    let app = test_app();
    let now = now_unix();
    let (user_id, token) = signed_in_user(&app.db, "owner@example.com");
    let (other_id, _) = signed_in_user(&app.db, "other@example.com");

    add_site(&app.db, "S1", "Hotel Alpha", Some(LatLng::new(45.76, 4.83)));
    add_site(&app.db, "S2", "Hotel Nowhere", None);
    add_case(&app.db, "C1", user_id, "S1", Some(5.0), now - 300);
    add_case(&app.db, "C2", user_id, "S1", None, now);
    add_case(&app.db, "C3", user_id, "S1", Some(1.0), now - 200);
    add_case(&app.db, "C4", user_id, "S1", Some(1.0), now - 100);
    add_case(&app.db, "C5", user_id, "S2", Some(7.0), now);
    add_case(&app.db, "F1", other_id, "S1", Some(9.0), now);

    let resp = handle(request(Method::GET, "/api/cases", Some(&token), ""), &app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let body = read_body(resp);
    assert_eq!(listed_ids(&body), vec!["C1", "C4", "C3", "C2"]);

    let json: Value = serde_json::from_str(&body).unwrap();
    let first = &json[0];
    assert_eq!(first["hotelName"], "Hotel Alpha");
    assert_eq!(first["estimatedDelay"], 5.0);
    assert_eq!(first["lat"], 45.76);
    assert_eq!(json[3]["estimatedDelay"], 0.0);
}

#[test]
fn open_cases_are_capped_at_fifty() {
    let app = test_app();
    let now = now_unix();
    let (user_id, token) = signed_in_user(&app.db, "busy@example.com");
    add_site(&app.db, "S1", "Hotel Alpha", Some(LatLng::new(45.76, 4.83)));
    for i in 0..55 {
        add_case(&app.db, &format!("C{i:02}"), user_id, "S1", Some(i as f64), now);
    }

    let body = read_body(
        handle(request(Method::GET, "/api/cases", Some(&token), ""), &app)
            .expect("Handler failed"),
    );
    let ids = listed_ids(&body);
    assert_eq!(ids.len(), 50);
    assert_eq!(ids[0], "C54");
    assert_eq!(ids[49], "C05");
}

#[test]
fn status_endpoint_closes_own_cases_only() {
    let app = test_app();
    let now = now_unix();
    let (user_id, token) = signed_in_user(&app.db, "owner@example.com");
    let (other_id, _) = signed_in_user(&app.db, "other@example.com");
    add_site(&app.db, "S1", "Hotel Alpha", Some(LatLng::new(45.76, 4.83)));
    add_case(&app.db, "C1", user_id, "S1", Some(2.0), now);
    add_case(&app.db, "F1", other_id, "S1", Some(2.0), now);

    let resp = handle(
        request(Method::POST, "/api/cases/C1/status", Some(&token), "status=Closed"),
        &app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 204);
    assert_eq!(case_status(&app.db, "C1"), "Closed");

    let resp = handle(
        request(Method::POST, "/api/cases/F1/status", Some(&token), "status=Closed"),
        &app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 404);
    assert!(read_body(resp).contains("not its owner"));
    assert_eq!(case_status(&app.db, "F1"), "New");

    let resp = handle(
        request(Method::POST, "/api/cases/MISSING/status", Some(&token), "status=Closed"),
        &app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 404);
}

#[test]
fn status_endpoint_rejects_other_statuses() {
    let app = test_app();
    let (user_id, token) = signed_in_user(&app.db, "owner@example.com");
    add_site(&app.db, "S1", "Hotel Alpha", Some(LatLng::new(45.76, 4.83)));
    add_case(&app.db, "C1", user_id, "S1", Some(2.0), now_unix());

    let resp = handle(
        request(Method::POST, "/api/cases/C1/status", Some(&token), "status=On+Hold"),
        &app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 400);
    assert_eq!(case_status(&app.db, "C1"), "New");

    let resp = handle(
        request(Method::POST, "/api/cases/C1/status", Some(&token), "status=Bogus"),
        &app,
    );
    assert!(matches!(resp, Err(ServerError::BadRequest(_))));

    let resp = handle(request(Method::POST, "/api/cases/C1/status", Some(&token), ""), &app);
    assert!(matches!(resp, Err(ServerError::BadRequest(_))));
}
