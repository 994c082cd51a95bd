// Test backend: keeps the map state in memory instead of drawing it.

use std::collections::BTreeMap;

use maud::Markup;

use crate::domain::LatLng;
use crate::map::{LayerId, MapBackend, MapError, MarkerIcon, MarkerId, TileLayer};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMarker {
    pub id: MarkerId,
    pub at: LatLng,
    pub icon: MarkerIcon,
    pub popup: Option<String>,
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub missing_container: bool,
    pub container: Option<String>,
    pub view: Option<(LatLng, u8)>,
    pub tiles: Vec<TileLayer>,
    pub layers: BTreeMap<String, Vec<RecordedMarker>>,
    pub layers_created: usize,
    next_marker: u32,
}

impl RecordingMap {
    pub fn without_container() -> Self {
        Self {
            missing_container: true,
            ..Self::default()
        }
    }

    /// A map that some earlier request already set up.
    pub fn existing(layers: &[&str]) -> Self {
        let mut map = Self {
            container: Some("case-map".into()),
            ..Self::default()
        };
        for name in layers {
            map.layers.insert(name.to_string(), Vec::new());
        }
        map
    }

    pub fn markers(&self, layer: &str) -> &[RecordedMarker] {
        self.layers.get(layer).map(Vec::as_slice).unwrap_or(&[])
    }

    fn layer_mut(&mut self, layer: &LayerId) -> Result<&mut Vec<RecordedMarker>, MapError> {
        self.layers
            .get_mut(layer.name())
            .ok_or_else(|| MapError::Render(format!("unknown layer group '{}'", layer.name())))
    }
}

impl MapBackend for RecordingMap {
    fn create_map(&mut self, container_id: &str) -> Result<(), MapError> {
        if self.missing_container || container_id.is_empty() {
            return Err(MapError::Init(format!("container '{container_id}' not found")));
        }
        self.container = Some(container_id.to_string());
        Ok(())
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<(), MapError> {
        self.view = Some((center, zoom));
        Ok(())
    }

    fn add_tile_layer(&mut self, tiles: &TileLayer) -> Result<(), MapError> {
        self.tiles.push(tiles.clone());
        Ok(())
    }

    fn create_layer_group(&mut self, name: &str) -> Result<LayerId, MapError> {
        self.layers.insert(name.to_string(), Vec::new());
        self.layers_created += 1;
        Ok(LayerId::new(name))
    }

    fn find_layer_group(&mut self, name: &str) -> Result<LayerId, MapError> {
        if self.layers.contains_key(name) {
            Ok(LayerId::new(name))
        } else {
            Err(MapError::Init(format!("layer group '{name}' was never created")))
        }
    }

    fn clear_layer_group(&mut self, layer: &LayerId) -> Result<(), MapError> {
        self.layer_mut(layer)?.clear();
        Ok(())
    }

    fn create_marker(
        &mut self,
        layer: &LayerId,
        at: LatLng,
        icon: &MarkerIcon,
    ) -> Result<MarkerId, MapError> {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.layer_mut(layer)?.push(RecordedMarker {
            id,
            at,
            icon: icon.clone(),
            popup: None,
        });
        Ok(id)
    }

    fn bind_popup(&mut self, marker: MarkerId, content: Markup) -> Result<(), MapError> {
        let found = self
            .layers
            .values_mut()
            .flat_map(|markers| markers.iter_mut())
            .find(|m| m.id == marker)
            .ok_or_else(|| MapError::Render(format!("unknown marker {}", marker.0)))?;
        found.popup = Some(content.into_string());
        Ok(())
    }
}
