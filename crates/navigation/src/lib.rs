//! Viewpoint navigation for the dome explorer: session state machine,
//! hotspot buttons and the host capabilities they drive.

pub mod button;
pub mod config;
pub mod error;
pub mod host;
pub mod placement;
pub mod scene_host;
pub mod session;
pub mod style;

pub use button::*;
pub use config::*;
pub use error::*;
pub use host::*;
pub use placement::*;
pub use scene_host::*;
pub use session::*;
pub use style::*;
