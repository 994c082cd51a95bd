// src/tests/router_tests/resolve_tests.rs
use crate::domain::LatLng;
use crate::router::handle;
use crate::tests::utils::{
    add_case, add_site, case_status, now_unix, read_body, request, signed_in_user, test_app,
};
use http::Method;

#[test]
fn resolving_closes_the_case_and_redraws_without_it() {
    let app = test_app();
    let now = now_unix();
    let (user_id, token) = signed_in_user(&app.db, "owner@example.com");
    add_site(&app.db, "S1", "Hotel Alpha", Some(LatLng::new(45.76, 4.83)));
    add_case(&app.db, "C1", user_id, "S1", Some(4.0), now);
    add_case(&app.db, "C2", user_id, "S1", Some(1.0), now);

    let resp = handle(request(Method::POST, "/cases/C1/resolve", Some(&token), ""), &app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = read_body(resp);
    assert!(body.contains("Case resolved"));
    assert!(body.contains("Case N-C1 is now closed."));
    assert!(body.contains("toast--success"));
    assert!(body.contains("cm.layers[\"cases\"].clearLayers();"));
    assert_eq!(body.matches("L.marker(").count(), 1);
    assert_eq!(case_status(&app.db, "C1"), "Closed");

    let listed = read_body(
        handle(request(Method::GET, "/api/cases", Some(&token), ""), &app)
            .expect("Handler failed"),
    );
    assert!(!listed.contains("\"C1\""));
    assert!(listed.contains("\"C2\""));
}

#[test]
fn resolving_a_foreign_case_changes_nothing_but_still_refreshes() {
    let app = test_app();
    let now = now_unix();
    let (user_id, token) = signed_in_user(&app.db, "owner@example.com");
    let (other_id, _) = signed_in_user(&app.db, "other@example.com");
    add_site(&app.db, "S1", "Hotel Alpha", Some(LatLng::new(45.76, 4.83)));
    add_case(&app.db, "C1", user_id, "S1", Some(4.0), now);
    add_case(&app.db, "F1", other_id, "S1", Some(4.0), now);

    let resp = handle(request(Method::POST, "/cases/F1/resolve", Some(&token), ""), &app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = read_body(resp);
    assert!(body.contains("Could not resolve case"));
    assert!(body.contains("Case not found, or you are not its owner."));
    assert!(body.contains("clearLayers();"));
    assert_eq!(body.matches("L.marker(").count(), 1);
    assert_eq!(case_status(&app.db, "F1"), "New");
    assert_eq!(case_status(&app.db, "C1"), "New");
}

#[test]
fn resolving_twice_reports_the_second_attempt() {
    let app = test_app();
    let (user_id, token) = signed_in_user(&app.db, "owner@example.com");
    add_site(&app.db, "S1", "Hotel Alpha", Some(LatLng::new(45.76, 4.83)));
    add_case(&app.db, "C1", user_id, "S1", Some(4.0), now_unix());

    let first = read_body(
        handle(request(Method::POST, "/cases/C1/resolve", Some(&token), ""), &app)
            .expect("Handler failed"),
    );
    assert!(first.contains("Case resolved"));
    assert!(first.contains("No open construction cases."));

    // Closing an already closed case is allowed and leaves it closed.
    let second = read_body(
        handle(request(Method::POST, "/cases/C1/resolve", Some(&token), ""), &app)
            .expect("Handler failed"),
    );
    assert!(second.contains("toast"));
    assert_eq!(case_status(&app.db, "C1"), "Closed");
}

#[test]
fn ids_with_spaces_resolve_through_the_encoded_path() {
    let app = test_app();
    let now = now_unix();
    let (user_id, token) = signed_in_user(&app.db, "owner@example.com");
    add_site(&app.db, "S1", "Hotel Alpha", Some(LatLng::new(45.76, 4.83)));
    add_case(&app.db, "C 1", user_id, "S1", Some(4.0), now);
    add_case(&app.db, "C 2", user_id, "S1", Some(2.0), now);

    let page = read_body(
        handle(request(Method::GET, "/", Some(&token), ""), &app).expect("Handler failed"),
    );
    assert!(page.contains("/cases/C%201/resolve"));
    assert!(!page.contains("/cases/C 1/resolve"));

    let body = read_body(
        handle(request(Method::POST, "/cases/C%201/resolve", Some(&token), ""), &app)
            .expect("Handler failed"),
    );
    assert!(body.contains("Case N-C 1 is now closed."));
    assert_eq!(case_status(&app.db, "C 1"), "Closed");

    let resp = handle(
        request(Method::POST, "/api/cases/C%202/status", Some(&token), "status=Closed"),
        &app,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 204);
    assert_eq!(case_status(&app.db, "C 2"), "Closed");
}
