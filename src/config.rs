// src/config.rs
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::db::connection::Database;
use crate::domain::LatLng;
use crate::errors::ServerError;
use crate::map::{AssetLoader, CdnAssets, LocalAssets, MapError, MapSettings};

pub const DEFAULT_LEAFLET_BASE: &str = "https://unpkg.com/leaflet@1.9.4/dist/";

/// Where the map library comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetSource {
    Cdn(String),
    /// Sub-directory of the static dir holding leaflet.css / leaflet.js.
    Local(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub schema_path: String,
    pub addr: SocketAddr,
    pub max_workers: usize,
    pub busy_timeout: Duration,
    pub static_dir: PathBuf,
    pub assets: AssetSource,
    pub map: MapSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("case_map.sqlite3"),
            schema_path: "sql/schema.sql".to_string(),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            busy_timeout: Duration::from_millis(5000),
            static_dir: PathBuf::from("static"),
            assets: AssetSource::Cdn(DEFAULT_LEAFLET_BASE.to_string()),
            map: MapSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("CASE_MAP_DB") {
            cfg.db_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("CASE_MAP_SCHEMA") {
            cfg.schema_path = v;
        }
        if let Some(v) = lookup("CASE_MAP_ADDR") {
            cfg.addr = parse("CASE_MAP_ADDR", &v)?;
        }
        if let Some(v) = lookup("CASE_MAP_WORKERS") {
            cfg.max_workers = parse("CASE_MAP_WORKERS", &v)?;
            if cfg.max_workers == 0 {
                return Err(ServerError::InvalidConfig(
                    "CASE_MAP_WORKERS must be at least 1".into(),
                ));
            }
        }
        if let Some(v) = lookup("CASE_MAP_DB_BUSY_TIMEOUT_MS") {
            cfg.busy_timeout = Duration::from_millis(parse("CASE_MAP_DB_BUSY_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = lookup("CASE_MAP_STATIC_DIR") {
            cfg.static_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("CASE_MAP_LEAFLET_BASE") {
            cfg.assets = AssetSource::Cdn(v);
        }
        if let Some(v) = lookup("CASE_MAP_LEAFLET_DIR") {
            cfg.assets = AssetSource::Local(v.trim_matches('/').to_string());
        }

        let home_lat = lookup("CASE_MAP_HOME_LAT")
            .map(|v| parse::<f64>("CASE_MAP_HOME_LAT", &v))
            .transpose()?;
        let home_lng = lookup("CASE_MAP_HOME_LNG")
            .map(|v| parse::<f64>("CASE_MAP_HOME_LNG", &v))
            .transpose()?;
        match (home_lat, home_lng) {
            (Some(lat), Some(lng)) => {
                let home = checked_coordinate(lat, lng)?;
                cfg.map.home.coordinate = home;
                cfg.map.center = home;
            }
            (None, None) => {}
            _ => {
                return Err(ServerError::InvalidConfig(
                    "CASE_MAP_HOME_LAT and CASE_MAP_HOME_LNG must be set together".into(),
                ))
            }
        }
        if let Some(v) = lookup("CASE_MAP_HOME_LABEL") {
            cfg.map.home.label = v;
        }

        // Fail at startup rather than on the first page view.
        cfg.asset_loader()
            .map_err(|e| ServerError::InvalidConfig(e.to_string()))?;

        Ok(cfg)
    }

    pub fn database(&self) -> Database {
        Database::new(self.db_path.clone()).with_busy_timeout(self.busy_timeout)
    }

    pub fn asset_loader(&self) -> Result<Box<dyn AssetLoader>, MapError> {
        match &self.assets {
            AssetSource::Cdn(base) => Ok(Box::new(CdnAssets::new(base)?)),
            AssetSource::Local(dir) => Ok(Box::new(LocalAssets::new(
                self.static_dir.join(dir),
                format!("/static/{dir}"),
            ))),
        }
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, ServerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ServerError::InvalidConfig(format!("{key}='{value}': {e}")))
}

fn checked_coordinate(lat: f64, lng: f64) -> Result<LatLng, ServerError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(ServerError::InvalidConfig(format!(
            "home coordinate {lat}, {lng} is out of range"
        )));
    }
    Ok(LatLng::new(lat, lng))
}
