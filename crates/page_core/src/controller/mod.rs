//! Controller layer: page events and their routing to the individual controllers.

pub mod events;
pub mod orchestration;

pub use events::{Dispatched, Key, PageEvent};
pub use orchestration::{PageController, PageDeps};
