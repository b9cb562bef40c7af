use crate::graph::{ConfigurationError, ViewpointGraph};
use crate::manifest::{TourManifest, ViewpointEntry};

pub const DEFAULT_STARTING_ID: &str = "corridor";

/// The bundled three-room tour, with asset paths relative to the asset root.
pub fn default_tour_manifest() -> TourManifest {
    let resolution = [4096.0, 2048.0];
    let mut manifest = TourManifest::new(DEFAULT_STARTING_ID);
    manifest.name = Some("Dome explorer".to_string());
    manifest.viewpoints = vec![
        ViewpointEntry::new("corridor", "Corridor", "textures/corridor.webp", resolution)
            .with_hotspot([430.0, 1520.0], "mainHall")
            .with_hotspot([3360.0, 1260.0], "oldRoom"),
        ViewpointEntry::new("mainHall", "Main hall", "textures/mainHall.webp", resolution)
            .with_hotspot([1400.0, 1250.0], "corridor"),
        ViewpointEntry::new("oldRoom", "Old room", "textures/oldRoom.webp", resolution)
            .with_hotspot([440.0, 1350.0], "corridor"),
    ];
    manifest
}

/// Validated graph of the bundled tour, with assets under `asset_root`.
pub fn default_tour(asset_root: &str) -> Result<ViewpointGraph, ConfigurationError> {
    let mut manifest = default_tour_manifest();
    manifest.rebase_assets(asset_root);
    ViewpointGraph::from_manifest(&manifest)
}
