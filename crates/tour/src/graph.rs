use std::collections::BTreeMap;
use std::fmt;

use foundation::math::Vec2;
use thiserror::Error;

use crate::manifest::TourManifest;

/// Key of one viewpoint in a tour.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewpointId(String);

impl ViewpointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewpointId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Navigable edge: a pixel on the owning panorama leading to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub position: Vec2,
    pub target: ViewpointId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewpoint {
    pub id: ViewpointId,
    pub display_name: String,
    pub asset_path: String,
    /// Authoring resolution; hotspot positions are relative to it.
    pub resolution: Vec2,
    pub hotspots: Vec<Hotspot>,
}

/// One problem found while validating a tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    EmptyTour,
    DuplicateViewpoint {
        id: String,
    },
    MissingStartingViewpoint {
        id: String,
    },
    DanglingHotspot {
        viewpoint: String,
        index: usize,
        target: String,
    },
    InvalidResolution {
        viewpoint: String,
    },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::EmptyTour => write!(f, "tour has no viewpoints"),
            ConfigIssue::DuplicateViewpoint { id } => write!(f, "duplicate viewpoint id `{id}`"),
            ConfigIssue::MissingStartingViewpoint { id } => {
                write!(f, "starting viewpoint `{id}` is not defined")
            }
            ConfigIssue::DanglingHotspot {
                viewpoint,
                index,
                target,
            } => write!(
                f,
                "hotspot #{index} of `{viewpoint}` targets unknown viewpoint `{target}`"
            ),
            ConfigIssue::InvalidResolution { viewpoint } => {
                write!(f, "viewpoint `{viewpoint}` needs a positive, finite resolution")
            }
        }
    }
}

/// Tour failed validation; the viewer cannot start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tour configuration: {}", join_issues(.issues))]
pub struct ConfigurationError {
    pub issues: Vec<ConfigIssue>,
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown viewpoint `{0}`")]
    UnknownViewpoint(ViewpointId),
}

/// Validated, read-only map of viewpoints.
///
/// Ordering contract:
/// - `iter()` yields viewpoints in ascending id order.
/// - Hotspots keep their configuration order.
#[derive(Debug, Clone)]
pub struct ViewpointGraph {
    name: Option<String>,
    viewpoints: BTreeMap<ViewpointId, Viewpoint>,
    starting: ViewpointId,
}

impl ViewpointGraph {
    /// Builds and validates the graph, reporting every issue at once.
    pub fn from_manifest(manifest: &TourManifest) -> Result<Self, ConfigurationError> {
        let mut issues = Vec::new();
        let mut viewpoints = BTreeMap::new();

        if manifest.viewpoints.is_empty() {
            issues.push(ConfigIssue::EmptyTour);
        }

        for entry in &manifest.viewpoints {
            let [w, h] = entry.resolution;
            if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
                issues.push(ConfigIssue::InvalidResolution {
                    viewpoint: entry.id.clone(),
                });
            }

            let viewpoint = Viewpoint {
                id: ViewpointId::new(entry.id.as_str()),
                display_name: entry.name.clone(),
                asset_path: entry.asset_path.clone(),
                resolution: Vec2::new(w, h),
                hotspots: entry
                    .hotspots
                    .iter()
                    .map(|hs| Hotspot {
                        position: Vec2::new(hs.position[0], hs.position[1]),
                        target: ViewpointId::new(hs.target.as_str()),
                    })
                    .collect(),
            };
            if viewpoints.insert(viewpoint.id.clone(), viewpoint).is_some() {
                issues.push(ConfigIssue::DuplicateViewpoint {
                    id: entry.id.clone(),
                });
            }
        }

        for entry in &manifest.viewpoints {
            for (index, hs) in entry.hotspots.iter().enumerate() {
                if !viewpoints.contains_key(&ViewpointId::new(hs.target.as_str())) {
                    issues.push(ConfigIssue::DanglingHotspot {
                        viewpoint: entry.id.clone(),
                        index,
                        target: hs.target.clone(),
                    });
                }
            }
        }

        let starting = ViewpointId::new(manifest.starting.as_str());
        if !manifest.viewpoints.is_empty() && !viewpoints.contains_key(&starting) {
            issues.push(ConfigIssue::MissingStartingViewpoint {
                id: manifest.starting.clone(),
            });
        }

        if !issues.is_empty() {
            return Err(ConfigurationError { issues });
        }

        tracing::debug!(
            viewpoints = viewpoints.len(),
            starting = %starting,
            "viewpoint graph validated"
        );

        Ok(Self {
            name: manifest.name.clone(),
            viewpoints,
            starting,
        })
    }

    pub fn resolve(&self, id: &ViewpointId) -> Result<&Viewpoint, GraphError> {
        self.viewpoints
            .get(id)
            .ok_or_else(|| GraphError::UnknownViewpoint(id.clone()))
    }

    pub fn starting_id(&self) -> &ViewpointId {
        &self.starting
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.viewpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Viewpoint> + '_ {
        self.viewpoints.values()
    }

    /// Hotspot targets of `id`, in configuration order.
    pub fn neighbours(&self, id: &ViewpointId) -> Result<Vec<&ViewpointId>, GraphError> {
        Ok(self.resolve(id)?.hotspots.iter().map(|h| &h.target).collect())
    }
}
