// src/tests/router_tests/dashboard_tests.rs
use crate::config::AppConfig;
use crate::domain::LatLng;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    add_case, add_site, app_with, now_unix, read_body, request, signed_in_user, temp_db_path,
    test_app, OfflineStylesheet,
};
use http::Method;

#[test]
fn dashboard_requires_a_session() {
    let app = test_app();

    let resp = handle(request(Method::GET, "/", None, ""), &app);
    assert!(matches!(resp, Err(ServerError::Unauthorized(_))));

    let resp = handle(request(Method::GET, "/", Some("not-a-real-token"), ""), &app);
    assert!(matches!(resp, Err(ServerError::Unauthorized(_))));
}

#[test]
fn dashboard_draws_home_and_located_cases() {
    let app = test_app();
    let now = now_unix();
    let (user_id, token) = signed_in_user(&app.db, "dash@example.com");
    add_site(&app.db, "S1", "Hotel Alpha", Some(LatLng::new(48.85, 2.35)));
    add_site(&app.db, "S2", "Hotel Nowhere", None);
    add_case(&app.db, "C1", user_id, "S1", Some(5.0), now);
    add_case(&app.db, "C2", user_id, "S2", Some(9.0), now);

    let resp = handle(request(Method::GET, "/", Some(&token), ""), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = read_body(resp);
    assert!(body.contains("dash@example.com"));
    assert!(body.contains("leaflet@1.9.4/dist/leaflet.css"));
    assert!(body.contains("root.caseMap = cm;"));
    assert!(body.contains("cm.layers[\"home\"]"));
    assert!(body.contains("cm.layers[\"cases\"]"));
    assert!(body.contains("Hotel Alpha"));
    assert!(body.contains("N-C1"));
    assert!(!body.contains("N-C2"), "unlocated case must not be drawn");
    assert!(body.contains("#FF0000"));
    // home marker plus one case marker
    assert_eq!(body.matches("L.marker(").count(), 2);
}

#[test]
fn dashboard_with_no_cases_still_shows_the_map() {
    let app = test_app();
    let (_, token) = signed_in_user(&app.db, "empty@example.com");

    let resp = handle(request(Method::GET, "/", Some(&token), ""), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = read_body(resp);
    assert!(body.contains("No open construction cases."));
    assert_eq!(body.matches("L.marker(").count(), 1);
}

#[test]
fn missing_map_library_blocks_the_dashboard() {
    let app = app_with(
        AppConfig {
            db_path: temp_db_path(),
            ..AppConfig::default()
        },
        Box::new(OfflineStylesheet),
    );
    let (_, token) = signed_in_user(&app.db, "offline@example.com");

    let resp = handle(request(Method::GET, "/", Some(&token), ""), &app).expect("Handler failed");
    assert_eq!(resp.status(), 503);

    let body = read_body(resp);
    assert!(body.contains("The map is unavailable"));
    assert!(body.contains("leaflet.css: offline"));
    assert!(!body.contains("L.map("));
}

#[test]
fn refreshing_twice_gives_the_same_layer() {
    let app = test_app();
    let now = now_unix();
    let (user_id, token) = signed_in_user(&app.db, "refresh@example.com");
    add_site(&app.db, "S1", "Hotel Alpha", Some(LatLng::new(48.85, 2.35)));
    add_case(&app.db, "C1", user_id, "S1", Some(2.0), now);
    add_case(&app.db, "C2", user_id, "S1", Some(0.5), now);

    let first = handle(
        request(Method::GET, "/dashboard/cases-layer", Some(&token), ""),
        &app,
    )
    .expect("Handler failed");
    assert_eq!(first.status(), 200);
    let first = read_body(first);

    let second = read_body(
        handle(
            request(Method::GET, "/dashboard/cases-layer", Some(&token), ""),
            &app,
        )
        .expect("Handler failed"),
    );

    assert_eq!(first, second);
    assert!(first.contains("cm.layers[\"cases\"].clearLayers();"));
    assert!(!first.contains("L.map("));
    assert_eq!(first.matches("L.marker(").count(), 2);
    assert!(first.contains("hx-swap-oob=\"true\""));
}
