//! Tour configuration: the manifest format, tour packages on disk and the
//! validated viewpoint graph built from them.

pub mod default_tour;
pub mod graph;
pub mod manifest;
pub mod package;

pub use default_tour::*;
pub use graph::*;
pub use manifest::*;
pub use package::*;
