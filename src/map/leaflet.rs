// src/map/leaflet.rs
//
// Map backend that writes Leaflet calls into a script. The browser runs the
// script; this side only builds it.

use std::collections::HashSet;
use std::fmt::Write;

use maud::Markup;

use crate::domain::LatLng;
use crate::map::{LayerId, MapBackend, MapError, MarkerIcon, MarkerId, TileLayer};

pub struct LeafletScript {
    container_id: String,
    attached: bool,
    created: bool,
    layers: HashSet<String>,
    next_marker: u32,
    body: String,
}

impl LeafletScript {
    /// Backend for a page that creates the map.
    pub fn new() -> Self {
        Self {
            container_id: String::new(),
            attached: false,
            created: false,
            layers: HashSet::new(),
            next_marker: 0,
            body: String::new(),
        }
    }

    /// Backend for a fragment that drives a map the page already created
    /// inside `container_id`.
    pub fn attached(container_id: &str) -> Self {
        Self {
            container_id: container_id.to_string(),
            attached: true,
            ..Self::new()
        }
    }

    /// The script so far, scoped to its own function so nothing leaks
    /// into the page's globals.
    pub fn script(&self) -> String {
        let mut out = String::from("(() => {\n");
        if self.attached {
            let _ = writeln!(
                out,
                "const root = document.getElementById({});\nconst cm = root && root.caseMap;\nif (!cm) {{ return; }}",
                js_string(&self.container_id)
            );
        }
        out.push_str(&self.body);
        out.push_str("})();\n");
        out
    }

    fn emit(&mut self, line: String) {
        self.body.push_str(&line);
        self.body.push('\n');
    }

    fn require_map(&self) -> Result<(), MapError> {
        if self.attached || self.created {
            Ok(())
        } else {
            Err(MapError::Init("map has not been created".into()))
        }
    }

    fn layer_ref(&self, layer: &LayerId) -> Result<String, MapError> {
        if !self.layers.contains(layer.name()) {
            return Err(MapError::Render(format!("unknown layer group '{}'", layer.name())));
        }
        Ok(format!("cm.layers[{}]", js_string(layer.name())))
    }
}

impl Default for LeafletScript {
    fn default() -> Self {
        Self::new()
    }
}

impl MapBackend for LeafletScript {
    fn create_map(&mut self, container_id: &str) -> Result<(), MapError> {
        if self.attached {
            return Err(MapError::Init("map already exists in the page".into()));
        }
        if !is_valid_element_id(container_id) {
            return Err(MapError::Init(format!("invalid map container id '{container_id}'")));
        }
        self.container_id = container_id.to_string();
        self.created = true;

        let id = js_string(container_id);
        self.emit(format!("const root = document.getElementById({id});"));
        self.emit(format!(
            "if (!root) {{ console.error(\"map container not found: \" + {id}); return; }}"
        ));
        self.emit("const cm = { map: L.map(root), layers: {} };".to_string());
        self.emit("root.caseMap = cm;".to_string());
        // Popups are built after htmx scanned the page.
        self.emit(
            "cm.map.on(\"popupopen\", (e) => { if (window.htmx) { htmx.process(e.popup.getElement()); } });"
                .to_string(),
        );
        Ok(())
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) -> Result<(), MapError> {
        self.require_map()?;
        self.emit(format!(
            "cm.map.setView([{}, {}], {zoom});",
            center.lat, center.lng
        ));
        Ok(())
    }

    fn add_tile_layer(&mut self, tiles: &TileLayer) -> Result<(), MapError> {
        self.require_map()?;
        self.emit(format!(
            "L.tileLayer({}, {{ attribution: {}, maxZoom: {} }}).addTo(cm.map);",
            js_string(&tiles.url_template),
            js_string(&tiles.attribution),
            tiles.max_zoom
        ));
        Ok(())
    }

    fn create_layer_group(&mut self, name: &str) -> Result<LayerId, MapError> {
        self.require_map()?;
        self.emit(format!(
            "cm.layers[{}] = L.layerGroup().addTo(cm.map);",
            js_string(name)
        ));
        self.layers.insert(name.to_string());
        Ok(LayerId::new(name))
    }

    fn find_layer_group(&mut self, name: &str) -> Result<LayerId, MapError> {
        if self.layers.contains(name) {
            return Ok(LayerId::new(name));
        }
        if !self.attached {
            return Err(MapError::Init(format!("layer group '{name}' was never created")));
        }
        self.emit(format!("if (!cm.layers[{}]) {{ return; }}", js_string(name)));
        self.layers.insert(name.to_string());
        Ok(LayerId::new(name))
    }

    fn clear_layer_group(&mut self, layer: &LayerId) -> Result<(), MapError> {
        let target = self.layer_ref(layer)?;
        self.emit(format!("{target}.clearLayers();"));
        Ok(())
    }

    fn create_marker(
        &mut self,
        layer: &LayerId,
        at: LatLng,
        icon: &MarkerIcon,
    ) -> Result<MarkerId, MapError> {
        if !at.lat.is_finite() || !at.lng.is_finite() {
            return Err(MapError::Render(format!("bad coordinate {}, {}", at.lat, at.lng)));
        }
        let target = self.layer_ref(layer)?;
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;

        let (w, h) = icon.size;
        let (ax, ay) = icon.anchor;
        self.emit(format!(
            "const m{} = L.marker([{}, {}], {{ icon: L.divIcon({{ html: {}, className: {}, iconSize: [{w}, {h}], iconAnchor: [{ax}, {ay}], popupAnchor: [0, -{ay}] }}) }}).addTo({target});",
            id.0,
            at.lat,
            at.lng,
            js_string(&icon.html),
            js_string(icon.class_name),
        ));
        Ok(id)
    }

    fn bind_popup(&mut self, marker: MarkerId, content: Markup) -> Result<(), MapError> {
        if marker.0 >= self.next_marker {
            return Err(MapError::Render(format!("unknown marker {}", marker.0)));
        }
        self.emit(format!(
            "m{}.bindPopup({});",
            marker.0,
            js_string(&content.into_string())
        ));
        Ok(())
    }
}

/// JSON string literal that is also safe inside an inline `<script>`.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

fn is_valid_element_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
