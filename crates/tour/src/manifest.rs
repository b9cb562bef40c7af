use serde::{Deserialize, Serialize};

pub const MANIFEST_VERSION: &str = "1.0";

/// On-disk description of a tour: every viewpoint and where to start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TourManifest {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Id of the viewpoint shown first.
    pub starting: String,
    pub viewpoints: Vec<ViewpointEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewpointEntry {
    pub id: String,
    /// Display name, shown on tooltips of hotspots leading here.
    pub name: String,
    pub asset_path: String,
    /// Pixel size the panorama was authored at: `[width, height]`.
    pub resolution: [f64; 2],
    #[serde(default)]
    pub hotspots: Vec<HotspotEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotspotEntry {
    /// Pixel position relative to the owning viewpoint's resolution: `[x, y]`.
    pub position: [f64; 2],
    pub target: String,
}

impl TourManifest {
    pub fn new(starting: impl Into<String>) -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            name: None,
            starting: starting.into(),
            viewpoints: Vec::new(),
        }
    }

    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Prefixes every relative asset path with `root`.
    ///
    /// Absolute paths and URLs (`/…`, `scheme://…`) are left untouched.
    pub fn rebase_assets(&mut self, root: &str) {
        if root.is_empty() {
            return;
        }
        for viewpoint in &mut self.viewpoints {
            if is_absolute_asset(&viewpoint.asset_path) {
                continue;
            }
            viewpoint.asset_path = join_asset_path(root, &viewpoint.asset_path);
        }
    }
}

impl ViewpointEntry {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        asset_path: impl Into<String>,
        resolution: [f64; 2],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            asset_path: asset_path.into(),
            resolution,
            hotspots: Vec::new(),
        }
    }

    pub fn with_hotspot(mut self, position: [f64; 2], target: impl Into<String>) -> Self {
        self.hotspots.push(HotspotEntry {
            position,
            target: target.into(),
        });
        self
    }
}

fn is_absolute_asset(path: &str) -> bool {
    path.starts_with('/') || path.contains("://")
}

pub fn join_asset_path(root: &str, path: &str) -> String {
    let path = path.trim_start_matches("./");
    if root.ends_with('/') {
        format!("{root}{path}")
    } else {
        format!("{root}/{path}")
    }
}
