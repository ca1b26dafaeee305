//! Document-structure extractors
//!
//! Each module handles one step of turning a language section into records.

mod dom;
mod header;
mod pronunciation;
mod section;
mod sense;

pub use dom::{heading_label, heading_of, Heading};
pub use header::*;
pub use pronunciation::*;
pub use section::*;
pub use sense::*;
