pub mod case;
pub mod severity;

pub use case::{CaseRecord, CaseStatus, LatLng, OpenCaseRow, SiteLocation, CONSTRUCTION_PROBLEM};
pub use severity::Severity;
