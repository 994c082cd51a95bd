mod api_tests;
mod auth_tests;
mod dashboard_tests;
mod resolve_tests;
