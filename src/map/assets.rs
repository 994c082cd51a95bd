// src/map/assets.rs
use std::fs;
use std::path::PathBuf;
use std::thread;

use url::Url;

use crate::map::MapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Stylesheet,
    Script,
}

impl AssetKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            AssetKind::Stylesheet => "leaflet.css",
            AssetKind::Script => "leaflet.js",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedAsset {
    pub kind: AssetKind,
    pub href: String,
}

/// Both halves of the mapping library, ready to be linked from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLibrary {
    pub stylesheet: LoadedAsset,
    pub script: LoadedAsset,
}

pub trait AssetLoader: Send + Sync {
    fn load(&self, kind: AssetKind) -> Result<LoadedAsset, MapError>;
}

/// Loads the stylesheet and the script at the same time and waits for both.
/// Either one failing fails the whole load.
pub fn load_map_library(loader: &dyn AssetLoader) -> Result<MapLibrary, MapError> {
    let (stylesheet, script) = thread::scope(|s| {
        let css = s.spawn(|| loader.load(AssetKind::Stylesheet));
        let js = s.spawn(|| loader.load(AssetKind::Script));
        (join_load(css), join_load(js))
    });

    Ok(MapLibrary {
        stylesheet: stylesheet?,
        script: script?,
    })
}

fn join_load(
    handle: thread::ScopedJoinHandle<'_, Result<LoadedAsset, MapError>>,
) -> Result<LoadedAsset, MapError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(MapError::Resource("asset loader panicked".into())))
}

/// Library served from a CDN directory such as `https://unpkg.com/leaflet@1.9.4/dist/`.
#[derive(Debug, Clone)]
pub struct CdnAssets {
    base: Url,
}

impl CdnAssets {
    pub fn new(base: &str) -> Result<Self, MapError> {
        let mut base = Url::parse(base)
            .map_err(|e| MapError::Resource(format!("bad asset base url '{base}': {e}")))?;
        if base.cannot_be_a_base() {
            return Err(MapError::Resource(format!("asset base url '{base}' is not a directory")));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }
}

impl AssetLoader for CdnAssets {
    fn load(&self, kind: AssetKind) -> Result<LoadedAsset, MapError> {
        let url = self
            .base
            .join(kind.file_name())
            .map_err(|e| MapError::Resource(format!("{}: {e}", kind.file_name())))?;
        Ok(LoadedAsset {
            kind,
            href: url.to_string(),
        })
    }
}

/// Library copied under the static directory and served by `/static/*`.
#[derive(Debug, Clone)]
pub struct LocalAssets {
    dir: PathBuf,
    mount: String,
}

impl LocalAssets {
    /// `dir` is where the files live on disk, `mount` the URL prefix they are served under.
    pub fn new(dir: impl Into<PathBuf>, mount: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            mount: mount.into().trim_end_matches('/').to_string(),
        }
    }
}

impl AssetLoader for LocalAssets {
    fn load(&self, kind: AssetKind) -> Result<LoadedAsset, MapError> {
        let path = self.dir.join(kind.file_name());
        let meta = fs::metadata(&path)
            .map_err(|e| MapError::Resource(format!("{} unavailable: {e}", path.display())))?;
        if !meta.is_file() {
            return Err(MapError::Resource(format!("{} is not a file", path.display())));
        }
        Ok(LoadedAsset {
            kind,
            href: format!("{}/{}", self.mount, kind.file_name()),
        })
    }
}
