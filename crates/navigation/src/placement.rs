use foundation::math::{Vec3, pixel_to_sphere};
use tour::{GraphError, Viewpoint, ViewpointGraph, ViewpointId};

/// Where one hotspot button goes and what it says.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotPlacement {
    pub target: ViewpointId,
    /// Display name of the target viewpoint.
    pub label: String,
    pub anchor: Vec3,
}

/// Places the hotspots of `viewpoint` on a sphere of radius `distance`.
///
/// Output keeps the configuration order of the hotspots.
pub fn plan_hotspots(
    graph: &ViewpointGraph,
    viewpoint: &Viewpoint,
    distance: f64,
) -> Result<Vec<HotspotPlacement>, GraphError> {
    viewpoint
        .hotspots
        .iter()
        .map(|hotspot| {
            let target = graph.resolve(&hotspot.target)?;
            Ok(HotspotPlacement {
                target: hotspot.target.clone(),
                label: target.display_name.clone(),
                anchor: pixel_to_sphere(hotspot.position, viewpoint.resolution, distance),
            })
        })
        .collect()
}
