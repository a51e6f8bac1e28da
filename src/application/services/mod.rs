//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (DocumentStore, IdGenerator)
//! but are themselves concrete structs, not traits.

mod outline;

pub use outline::{Applied, Direction, EditCommand, OutlineService, ROOT_ID, SHARED_DOCUMENT};
