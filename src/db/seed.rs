// src/db/seed.rs
use rusqlite::Connection;

use crate::auth::sessions::create_session;
use crate::db::cases::{insert_case, NewCase};
use crate::db::sites::{insert_construction, insert_site, NewSite};
use crate::db::users::create_user;
use crate::domain::{CaseStatus, LatLng, CONSTRUCTION_PROBLEM};
use crate::errors::ServerError;

pub const DEMO_EMAIL: &str = "site.manager@example.com";

pub struct SeedSummary {
    pub user_id: i64,
    pub session_token: String,
    pub cases: usize,
}

/// Demo data: a handful of hotels, one of them without coordinate, and
/// cases across every severity tier. Runs in one transaction.
pub fn seed_demo(conn: &mut Connection, now: i64) -> Result<SeedSummary, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin seed failed: {e}")))?;

    let user_id = create_user(&tx, DEMO_EMAIL, now)?;

    let sites = [
        NewSite {
            id: "H-PAR-01",
            name: "Hôtel des Arts",
            phone: Some("+33 1 42 00 00 01"),
            address: Some("12 Rue de Seine, 75006 Paris"),
            coordinate: Some(LatLng::new(48.8546, 2.3370)),
        },
        NewSite {
            id: "H-LYO-01",
            name: "Hôtel Presqu'île",
            phone: None,
            address: Some("4 Place Bellecour, 69002 Lyon"),
            coordinate: Some(LatLng::new(45.7578, 4.8320)),
        },
        NewSite {
            id: "H-BOR-01",
            name: "Hôtel des Quais",
            phone: Some("+33 5 56 00 00 03"),
            address: None,
            coordinate: Some(LatLng::new(44.8412, -0.5700)),
        },
        NewSite {
            id: "H-NAN-01",
            name: "Hôtel Sans Repère",
            phone: None,
            address: Some("1 Quai de la Fosse, 44000 Nantes"),
            coordinate: None,
        },
    ];
    for site in &sites {
        insert_site(&tx, site)?;
    }

    insert_construction(&tx, "K-PAR-01", "H-PAR-01", Some("Structural work"), Some(35.0))?;
    insert_construction(&tx, "K-LYO-01", "H-LYO-01", Some("Finishing"), Some(80.0))?;
    insert_construction(&tx, "K-NAN-01", "H-NAN-01", Some("Foundations"), None)?;

    let day = 24 * 60 * 60;
    let cases = [
        ("CASE-1001", "00001001", "H-PAR-01", Some("K-PAR-01"), "Load-bearing wall cracked", Some(5.0), now - 6 * day),
        ("CASE-1002", "00001002", "H-LYO-01", Some("K-LYO-01"), "Tiles delivered in wrong colour", Some(1.5), now - 3 * day),
        ("CASE-1003", "00001003", "H-BOR-01", None, "Scaffolding permit pending", Some(0.0), now - day),
        ("CASE-1004", "00001004", "H-PAR-01", Some("K-PAR-01"), "Elevator shaft flooded", None, now - 2 * day),
        ("CASE-1005", "00001005", "H-NAN-01", Some("K-NAN-01"), "Soil survey missing", Some(4.0), now - 4 * day),
    ];
    for (id, number, site_id, construction_id, subject, delay, created_at) in cases {
        insert_case(
            &tx,
            &NewCase {
                id,
                case_number: number,
                owner_id: user_id,
                site_id: Some(site_id),
                construction_id,
                subject: Some(subject),
                description: None,
                status: CaseStatus::New,
                priority: Some("High"),
                estimated_delay: delay,
                issue_category: CONSTRUCTION_PROBLEM,
                created_at,
            },
        )?;
    }

    let session_token = create_session(&tx, user_id, now)?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit seed failed: {e}")))?;

    Ok(SeedSummary {
        user_id,
        session_token,
        cases: cases.len(),
    })
}
