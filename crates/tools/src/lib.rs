//! Offline helpers behind the `dome` binary: tour summaries and headless walks.

use std::path::Path;

use foundation::math::{Vec2, pixel_to_angles};
use navigation::{
    AssetLoadFailure, SceneHost, Session, SessionError, TextureOutcome, ViewerConfig,
};
use serde::Serialize;
use tour::{ViewpointGraph, ViewpointId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub name: Option<String>,
    pub starting: String,
    pub viewpoints: Vec<ViewpointSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewpointSummary {
    pub id: String,
    pub name: String,
    pub asset_path: String,
    pub resolution: [f64; 2],
    pub hotspots: Vec<HotspotSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotspotSummary {
    pub target: String,
    pub position: [f64; 2],
    /// Longitude / latitude of the hotspot on the panorama, in degrees.
    pub lon_deg: f64,
    pub lat_deg: f64,
}

/// Graph in id order, hotspots in configuration order.
pub fn summarize(graph: &ViewpointGraph) -> GraphSummary {
    GraphSummary {
        name: graph.name().map(str::to_string),
        starting: graph.starting_id().to_string(),
        viewpoints: graph
            .iter()
            .map(|viewpoint| ViewpointSummary {
                id: viewpoint.id.to_string(),
                name: viewpoint.display_name.clone(),
                asset_path: viewpoint.asset_path.clone(),
                resolution: [viewpoint.resolution.x, viewpoint.resolution.y],
                hotspots: viewpoint
                    .hotspots
                    .iter()
                    .map(|hotspot| {
                        let angles = pixel_to_angles(hotspot.position, viewpoint.resolution);
                        HotspotSummary {
                            target: hotspot.target.to_string(),
                            position: [hotspot.position.x, hotspot.position.y],
                            lon_deg: angles.lon_rad.to_degrees(),
                            lat_deg: angles.lat_rad.to_degrees(),
                        }
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub position: [f64; 2],
    pub resolution: [f64; 2],
    pub radius: f64,
    pub point: [f64; 3],
}

pub fn project(position: Vec2, resolution: Vec2, radius: f64) -> ProjectedPoint {
    let point = foundation::math::pixel_to_sphere(position, resolution, radius);
    ProjectedPoint {
        position: [position.x, position.y],
        resolution: [resolution.x, resolution.y],
        radius,
        point: point.as_array(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkReport {
    pub steps: Vec<WalkStep>,
    /// `g<generation> <kind> <message>` lines, in emission order.
    pub trace: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkStep {
    pub viewpoint: String,
    pub texture: String,
    pub buttons: Vec<WalkButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkButton {
    pub target: String,
    pub label: String,
    pub anchor: [f64; 3],
}

/// How the headless walk settles panorama loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCheck {
    /// Every texture loads.
    Assume,
    /// A texture loads only if its file exists on disk.
    Filesystem,
}

impl AssetCheck {
    fn load(self, asset_path: &str) -> Result<(), AssetLoadFailure> {
        match self {
            AssetCheck::Assume => Ok(()),
            AssetCheck::Filesystem if Path::new(asset_path).is_file() => Ok(()),
            AssetCheck::Filesystem => Err(AssetLoadFailure::new(asset_path, "file not found")),
        }
    }
}

/// Starts at the tour's starting viewpoint and transitions through `path`.
pub fn walk(
    graph: ViewpointGraph,
    config: ViewerConfig,
    path: &[ViewpointId],
    check: AssetCheck,
) -> Result<WalkReport, SessionError> {
    let mut session = Session::new(graph, config, SceneHost::new());
    let mut steps = Vec::with_capacity(path.len() + 1);

    session.initialize()?;
    steps.push(settle(&mut session, check));
    for target in path {
        session.transition_to(target)?;
        steps.push(settle(&mut session, check));
    }

    let trace = session
        .events()
        .events()
        .iter()
        .map(|event| format!("{} {} {}", event.generation, event.kind, event.message))
        .collect();
    Ok(WalkReport { steps, trace })
}

fn settle(session: &mut Session<SceneHost>, check: AssetCheck) -> WalkStep {
    let outcomes = session.complete_pending_textures(|path| check.load(path));
    let texture = match outcomes.last() {
        Some(TextureOutcome::Applied) => "loaded".to_string(),
        Some(TextureOutcome::Failed(failure)) => format!("failed: {}", failure.reason),
        Some(TextureOutcome::Stale) | None => "pending".to_string(),
    };
    WalkStep {
        viewpoint: session
            .current_viewpoint()
            .map(ToString::to_string)
            .unwrap_or_default(),
        texture,
        buttons: session
            .active_hotspots()
            .iter()
            .map(|button| WalkButton {
                target: button.target().to_string(),
                label: button.label().to_string(),
                anchor: button.anchor().as_array(),
            })
            .collect(),
    }
}
