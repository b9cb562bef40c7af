use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::graph::{ConfigurationError, ViewpointGraph};
use crate::manifest::{MANIFEST_VERSION, TourManifest};

pub const MANIFEST_FILE_NAME: &str = "tour.manifest.json";

/// A tour directory: `tour.manifest.json` plus the panoramas it references.
#[derive(Debug, Clone)]
pub struct TourPackage {
    root: PathBuf,
    manifest: TourManifest,
}

#[derive(Debug, Error)]
pub enum TourPackageError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported manifest version: {found}")]
    UnsupportedVersion { found: String },
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl TourPackage {
    pub fn load(root: impl AsRef<Path>) -> Result<Self, TourPackageError> {
        let root = root.as_ref().to_path_buf();
        let manifest_path = root.join(MANIFEST_FILE_NAME);
        let payload = fs::read_to_string(&manifest_path).map_err(|source| TourPackageError::Io {
            path: manifest_path.clone(),
            source,
        })?;
        let manifest = TourManifest::from_json_str(&payload)?;

        if manifest.version != MANIFEST_VERSION {
            return Err(TourPackageError::UnsupportedVersion {
                found: manifest.version,
            });
        }

        tracing::debug!(
            root = %root.display(),
            viewpoints = manifest.viewpoints.len(),
            "tour package loaded"
        );
        Ok(Self { root, manifest })
    }

    pub fn manifest(&self) -> &TourManifest {
        &self.manifest
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validates the manifest with asset paths made relative to the package root.
    pub fn graph(&self) -> Result<ViewpointGraph, TourPackageError> {
        let mut manifest = self.manifest.clone();
        manifest.rebase_assets(&self.root.to_string_lossy());
        Ok(ViewpointGraph::from_manifest(&manifest)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{MANIFEST_FILE_NAME, TourPackage, TourPackageError};
    use crate::graph::ViewpointId;
    use crate::manifest::{MANIFEST_VERSION, TourManifest, ViewpointEntry};
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        let id = format!("dome_tour_package_{label}_{}", std::process::id());
        dir.push(id);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn write_manifest(root: &PathBuf, manifest: &TourManifest) {
        let payload = serde_json::to_string_pretty(manifest).expect("serialize manifest");
        fs::write(root.join(MANIFEST_FILE_NAME), payload).expect("write manifest");
    }

    #[test]
    fn load_tour_package_manifest() {
        let root = temp_dir("load");
        let mut manifest = TourManifest::new("hall");
        manifest.name = Some("Demo".to_string());
        manifest.viewpoints.push(ViewpointEntry::new(
            "hall",
            "Hall",
            "textures/hall.webp",
            [4096.0, 2048.0],
        ));
        write_manifest(&root, &manifest);

        let package = TourPackage::load(&root).expect("load package");
        assert_eq!(package.root(), root.as_path());
        assert_eq!(package.manifest(), &manifest);

        let graph = package.graph().expect("valid graph");
        let hall = graph.resolve(&ViewpointId::new("hall")).expect("hall");
        assert!(hall.asset_path.ends_with("textures/hall.webp"));
        assert!(hall.asset_path.starts_with(root.to_string_lossy().as_ref()));
    }

    #[test]
    fn rejects_unsupported_manifest_version() {
        let root = temp_dir("version");
        let mut manifest = TourManifest::new("hall");
        manifest.version = "2.0".to_string();
        write_manifest(&root, &manifest);

        let err = TourPackage::load(&root).expect_err("expect version error");
        match err {
            TourPackageError::UnsupportedVersion { found } => {
                assert_eq!(found, "2.0");
                assert_ne!(found, MANIFEST_VERSION);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_manifest_is_an_io_error() {
        let root = temp_dir("missing");
        let err = TourPackage::load(&root).expect_err("no manifest");
        assert!(matches!(err, TourPackageError::Io { .. }));
    }

    #[test]
    fn dangling_target_surfaces_as_configuration_error() {
        let root = temp_dir("dangling");
        let mut manifest = TourManifest::new("hall");
        manifest.viewpoints.push(
            ViewpointEntry::new("hall", "Hall", "hall.webp", [2.0, 1.0])
                .with_hotspot([1.0, 0.5], "garden"),
        );
        write_manifest(&root, &manifest);

        let package = TourPackage::load(&root).expect("parses");
        let err = package.graph().expect_err("dangling");
        assert!(matches!(err, TourPackageError::Configuration(_)));
        assert!(err.to_string().contains("garden"));
    }
}
