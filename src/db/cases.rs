// src/db/cases.rs
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{CaseStatus, LatLng, OpenCaseRow, SiteLocation, CONSTRUCTION_PROBLEM};
use crate::errors::ServerError;

pub struct NewCase<'a> {
    pub id: &'a str,
    pub case_number: &'a str,
    pub owner_id: i64,
    pub site_id: Option<&'a str>,
    pub construction_id: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: CaseStatus,
    pub priority: Option<&'a str>,
    pub estimated_delay: Option<f64>,
    pub issue_category: &'a str,
    pub created_at: i64,
}

pub fn insert_case(conn: &Connection, case: &NewCase<'_>) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into cases (
            id, case_number, owner_id, site_id, construction_id, subject, description,
            status, priority, estimated_delay, issue_category, created_at
        )
        values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            case.id,
            case.case_number,
            case.owner_id,
            case.site_id,
            case.construction_id,
            case.subject,
            case.description,
            case.status.as_str(),
            case.priority,
            case.estimated_delay,
            case.issue_category,
            case.created_at,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert case failed: {e}")))?;
    Ok(())
}

/// Open construction-problem cases owned by `owner_id` on a located site,
/// most delayed first (missing delays last), then newest, at most `limit`.
pub fn load_open_case_rows(
    conn: &Connection,
    owner_id: i64,
    limit: usize,
) -> Result<Vec<OpenCaseRow>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select
                c.id, c.case_number, c.subject, c.description, c.status, c.priority,
                c.estimated_delay, c.issue_category, c.created_at,
                s.id, s.name, s.phone, s.address, s.latitude, s.longitude,
                k.phase, k.progress_pct
            from cases c
            join sites s on s.id = c.site_id
            left join constructions k on k.id = c.construction_id
            where c.owner_id = ?
              and c.issue_category = ?
              and c.status <> ?
              and s.latitude is not null
              and s.longitude is not null
            order by c.estimated_delay is null, c.estimated_delay desc, c.created_at desc
            limit ?
            "#,
        )
        .map_err(|e| ServerError::DbError(format!("prepare open cases failed: {e}")))?;

    let rows = stmt
        .query_map(
            params![
                owner_id,
                CONSTRUCTION_PROBLEM,
                CaseStatus::Closed.as_str(),
                limit as i64
            ],
            map_open_case_row,
        )
        .map_err(|e| ServerError::DbError(format!("query open cases failed: {e}")))?;

    let mut cases = Vec::new();
    for r in rows {
        cases.push(r.map_err(|e| ServerError::DbError(format!("read open case failed: {e}")))?);
    }
    Ok(cases)
}

fn map_open_case_row(row: &Row<'_>) -> rusqlite::Result<OpenCaseRow> {
    let status: String = row.get(4)?;
    let status = status.parse::<CaseStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(ServerError::DbError(e)))
    })?;

    let created_at: i64 = row.get(8)?;
    let created_at = DateTime::<Utc>::from_timestamp(created_at, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            8,
            Type::Integer,
            Box::new(ServerError::DbError(format!("bad timestamp {created_at}"))),
        )
    })?;

    let latitude: Option<f64> = row.get(13)?;
    let longitude: Option<f64> = row.get(14)?;

    Ok(OpenCaseRow {
        id: row.get(0)?,
        case_number: row.get(1)?,
        subject: row.get(2)?,
        description: row.get(3)?,
        status,
        priority: row.get(5)?,
        estimated_delay: row.get(6)?,
        issue_category: row.get(7)?,
        created_at,
        site: SiteLocation {
            id: row.get(9)?,
            name: row.get(10)?,
            phone: row.get(11)?,
            address: row.get(12)?,
            coordinate: latitude.zip(longitude).map(|(lat, lng)| LatLng::new(lat, lng)),
        },
        construction_phase: row.get(15)?,
        construction_progress: row.get(16)?,
    })
}

/// Closes the case if, and only if, it belongs to `owner_id`.
///
/// Lookup and update share one transaction. `NotFound` covers both a bad id
/// and a case owned by someone else.
pub fn close_case(conn: &mut Connection, case_id: &str, owner_id: i64) -> Result<(), ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin resolve failed: {e}")))?;

    let found: Option<String> = tx
        .query_row(
            "select id from cases where id = ? and owner_id = ?",
            params![case_id, owner_id],
            |r| r.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("load case failed: {e}")))?;

    if found.is_none() {
        return Err(ServerError::NotFound);
    }

    tx.execute(
        "update cases set status = ? where id = ? and owner_id = ?",
        params![CaseStatus::Closed.as_str(), case_id, owner_id],
    )
    .map_err(|e| ServerError::DbError(format!("update case status failed: {e}")))?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit resolve failed: {e}")))
}
