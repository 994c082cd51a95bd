//! Query/shape service for open cases, and the gateway the map talks to.

mod error;
mod shape;

pub use error::{CaseErrorKind, CaseServiceError};
pub use shape::{shape_open_cases, CASE_CAP};

use crate::db::cases::{close_case, load_open_case_rows};
use crate::db::connection::Database;
use crate::domain::{CaseRecord, CaseStatus};

/// Up to `CASE_CAP` open, located construction cases owned by `user_id`.
pub fn fetch_open_cases(db: &Database, user_id: i64) -> Result<Vec<CaseRecord>, CaseServiceError> {
    let rows = db
        .with_conn(|conn| load_open_case_rows(conn, user_id, CASE_CAP))
        .map_err(|e| CaseServiceError::from_server("load open cases", e))?;
    Ok(shape_open_cases(rows))
}

/// Closes a case owned by `user_id`. Fails without writing anything otherwise.
pub fn resolve_case(db: &Database, case_id: &str, user_id: i64) -> Result<(), CaseServiceError> {
    db.with_conn(|conn| close_case(conn, case_id, user_id))
        .map_err(|e| CaseServiceError::from_server("resolve the case", e))?;
    log::info!("case {case_id} closed by user {user_id}");
    Ok(())
}

/// The two calls the map makes. Identity is bound into the implementation.
pub trait CaseGateway {
    fn fetch_open_cases(&self) -> Result<Vec<CaseRecord>, CaseServiceError>;

    fn update_case_status(
        &self,
        case_id: &str,
        new_status: CaseStatus,
    ) -> Result<(), CaseServiceError>;
}

/// Gateway for the user of the current session.
pub struct SessionCases<'a> {
    db: &'a Database,
    user_id: i64,
}

impl<'a> SessionCases<'a> {
    pub fn new(db: &'a Database, user_id: i64) -> Self {
        Self { db, user_id }
    }
}

impl CaseGateway for SessionCases<'_> {
    fn fetch_open_cases(&self) -> Result<Vec<CaseRecord>, CaseServiceError> {
        fetch_open_cases(self.db, self.user_id)
    }

    fn update_case_status(
        &self,
        case_id: &str,
        new_status: CaseStatus,
    ) -> Result<(), CaseServiceError> {
        if !new_status.is_closed() {
            return Err(CaseServiceError::new(
                CaseErrorKind::Rejected,
                format!("Cases can only be moved to Closed, not {new_status}."),
            ));
        }
        resolve_case(self.db, case_id, self.user_id)
    }
}
