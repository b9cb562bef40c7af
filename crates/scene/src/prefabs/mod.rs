pub mod dome;
pub mod hotspot;

pub use dome::*;
pub use hotspot::*;
