pub mod equirect;
pub mod vec;

pub use equirect::*;
pub use vec::*;
