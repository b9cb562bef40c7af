pub mod event_bus;
pub mod generation;
pub mod mailbox;

pub use event_bus::*;
pub use generation::*;
pub use mailbox::*;
