//! Map presentation: the `MapView` state machine and the mapping
//! capability it drives.

pub mod assets;
pub mod leaflet;
pub mod markers;
pub mod notice;
pub mod view;

#[cfg(test)]
pub mod recording;

pub use assets::{AssetLoader, CdnAssets, LocalAssets, MapLibrary};
pub use leaflet::LeafletScript;
pub use notice::Notice;
pub use view::{CaseListItem, MapView, ViewState};

use crate::domain::LatLng;
use maud::Markup;
use std::fmt;

/// Handle to a marker layer group. Groups are addressed by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u32);

/// A marker icon rendered from an HTML template.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIcon {
    pub html: String,
    pub class_name: &'static str,
    pub size: (u32, u32),
    pub anchor: (u32, u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            max_zoom: 19,
        }
    }
}

/// The fixed marker placed from configuration, never from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeMarker {
    pub label: String,
    pub coordinate: LatLng,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub container_id: String,
    pub center: LatLng,
    pub zoom: u8,
    pub tiles: TileLayer,
    pub home: HomeMarker,
}

impl Default for MapSettings {
    fn default() -> Self {
        let paris = LatLng::new(48.8566, 2.3522);
        Self {
            container_id: "case-map".to_string(),
            center: paris,
            zoom: 6,
            tiles: TileLayer::default(),
            home: HomeMarker {
                label: "Head office".to_string(),
                coordinate: paris,
            },
        }
    }
}

pub const HOME_LAYER: &str = "home";
pub const CASES_LAYER: &str = "cases";

/// What the map itself must provide. Implemented by `LeafletScript` for the
/// browser and by a recording backend in tests.
pub trait MapBackend {
    fn create_map(&mut self, container_id: &str) -> Result<(), MapError>;
    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<(), MapError>;
    fn add_tile_layer(&mut self, tiles: &TileLayer) -> Result<(), MapError>;
    fn create_layer_group(&mut self, name: &str) -> Result<LayerId, MapError>;
    /// Looks up a group created earlier, possibly by another request.
    fn find_layer_group(&mut self, name: &str) -> Result<LayerId, MapError>;
    fn clear_layer_group(&mut self, layer: &LayerId) -> Result<(), MapError>;
    fn create_marker(
        &mut self,
        layer: &LayerId,
        at: LatLng,
        icon: &MarkerIcon,
    ) -> Result<MarkerId, MapError>;
    fn bind_popup(&mut self, marker: MarkerId, content: Markup) -> Result<(), MapError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// Library stylesheet or script unreachable.
    Resource(String),
    /// Map could not be created (e.g. missing container).
    Init(String),
    /// Case fetch failed.
    Fetch(String),
    /// A marker or popup could not be placed.
    Render(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Resource(msg) => write!(f, "Map library could not be loaded: {msg}"),
            MapError::Init(msg) => write!(f, "Map could not be initialized: {msg}"),
            MapError::Fetch(msg) => write!(f, "Cases could not be loaded: {msg}"),
            MapError::Render(msg) => write!(f, "Map could not be drawn: {msg}"),
        }
    }
}

impl std::error::Error for MapError {}
