// src/domain/case.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The only issue category shown on the map.
pub const CONSTRUCTION_PROBLEM: &str = "Construction Problem";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaseStatus {
    New,
    Working,
    Escalated,
    #[serde(rename = "On Hold")]
    OnHold,
    Closed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::New => "New",
            CaseStatus::Working => "Working",
            CaseStatus::Escalated => "Escalated",
            CaseStatus::OnHold => "On Hold",
            CaseStatus::Closed => "Closed",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, CaseStatus::Closed)
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "New" => Ok(CaseStatus::New),
            "Working" => Ok(CaseStatus::Working),
            "Escalated" => Ok(CaseStatus::Escalated),
            "On Hold" => Ok(CaseStatus::OnHold),
            "Closed" => Ok(CaseStatus::Closed),
            other => Err(format!("unknown case status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A hotel site. A site without coordinate hides every case that points at it.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteLocation {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub coordinate: Option<LatLng>,
}

/// One open case as read from the store, before shaping.
///
/// The construction is already flattened to `phase` / `progress`.
#[derive(Debug, Clone)]
pub struct OpenCaseRow {
    pub id: String,
    pub case_number: String,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: CaseStatus,
    pub priority: Option<String>,
    pub estimated_delay: Option<f64>,
    pub issue_category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub site: SiteLocation,
    pub construction_phase: Option<String>,
    pub construction_progress: Option<f64>,
}

/// The flat record handed to the presentation layer and to `/api/cases`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: String,
    pub case_number: String,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: CaseStatus,
    pub priority: Option<String>,
    pub estimated_delay: f64,
    pub issue_category: Option<String>,
    pub created_date: DateTime<Utc>,
    pub lat: f64,
    pub lng: f64,
    pub hotel_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub construction_phase: Option<String>,
    pub construction_progress: f64,
}

impl CaseRecord {
    /// Flattens a row. Returns `None` when the site has no coordinate.
    pub fn from_row(row: OpenCaseRow) -> Option<Self> {
        let coordinate = row.site.coordinate?;
        Some(Self {
            id: row.id,
            case_number: row.case_number,
            subject: row.subject,
            description: row.description,
            status: row.status,
            priority: row.priority,
            estimated_delay: row.estimated_delay.unwrap_or(0.0),
            issue_category: row.issue_category,
            created_date: row.created_at,
            lat: coordinate.lat,
            lng: coordinate.lng,
            hotel_name: row.site.name,
            phone: row.site.phone,
            address: row.site.address,
            construction_phase: row.construction_phase,
            construction_progress: row.construction_progress.unwrap_or(0.0),
        })
    }

    pub fn coordinate(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}
