// src/db/sites.rs
use crate::domain::LatLng;
use crate::errors::ServerError;
use rusqlite::{params, Connection};

pub struct NewSite<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub coordinate: Option<LatLng>,
}

pub fn insert_site(conn: &Connection, site: &NewSite<'_>) -> Result<(), ServerError> {
    conn.execute(
        "insert into sites (id, name, phone, address, latitude, longitude) values (?, ?, ?, ?, ?, ?)",
        params![
            site.id,
            site.name,
            site.phone,
            site.address,
            site.coordinate.map(|c| c.lat),
            site.coordinate.map(|c| c.lng),
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert site failed: {e}")))?;
    Ok(())
}

pub fn insert_construction(
    conn: &Connection,
    id: &str,
    site_id: &str,
    phase: Option<&str>,
    progress_pct: Option<f64>,
) -> Result<(), ServerError> {
    conn.execute(
        "insert into constructions (id, site_id, phase, progress_pct) values (?, ?, ?, ?)",
        params![id, site_id, phase, progress_pct],
    )
    .map_err(|e| ServerError::DbError(format!("insert construction failed: {e}")))?;
    Ok(())
}
