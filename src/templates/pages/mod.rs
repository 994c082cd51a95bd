pub mod dashboard;

pub use dashboard::{dashboard_page, map_update, DashboardVm};
