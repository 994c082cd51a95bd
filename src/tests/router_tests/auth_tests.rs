// src/tests/router_tests/auth_tests.rs
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{read_body, request, signed_in_user, test_app};
use http::Method;

#[test]
fn every_case_route_needs_a_session() {
    let app = test_app();

    for (method, uri) in [
        (Method::GET, "/"),
        (Method::GET, "/dashboard/cases-layer"),
        (Method::GET, "/api/cases"),
        (Method::POST, "/cases/C1/resolve"),
        (Method::POST, "/api/cases/C1/status"),
    ] {
        let resp = handle(request(method.clone(), uri, None, ""), &app);
        assert!(
            matches!(resp, Err(ServerError::Unauthorized(_))),
            "{method} {uri} should need a session"
        );
    }
}

#[test]
fn logout_revokes_the_session() {
    let app = test_app();
    let (_, token) = signed_in_user(&app.db, "leaving@example.com");

    let resp = handle(request(Method::POST, "/logout", Some(&token), ""), &app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers().get("Location").unwrap().to_str().unwrap(), "/");
    assert!(resp
        .headers()
        .get("Set-Cookie")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    let resp = handle(request(Method::GET, "/api/cases", Some(&token), ""), &app);
    assert!(matches!(resp, Err(ServerError::Unauthorized(_))));
}

#[test]
fn static_files_are_served_without_a_session() {
    let app = test_app();

    let resp = handle(request(Method::GET, "/static/main.css", None, ""), &app)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "text/css; charset=utf-8"
    );
    assert!(read_body(resp).contains(".case-map"));

    let resp = handle(request(Method::GET, "/static/../Cargo.toml", None, ""), &app);
    assert!(matches!(resp, Err(ServerError::NotFound)));
}

#[test]
fn unknown_routes_are_not_found() {
    let app = test_app();
    let (_, token) = signed_in_user(&app.db, "lost@example.com");

    let resp = handle(request(Method::GET, "/nowhere", Some(&token), ""), &app);
    assert!(matches!(resp, Err(ServerError::NotFound)));

    let resp = handle(request(Method::DELETE, "/api/cases", Some(&token), ""), &app);
    assert!(matches!(resp, Err(ServerError::NotFound)));
}
