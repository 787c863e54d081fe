//! Inlay Job Model
//!
//! Defines the data contracts for overlay render jobs:
//! - **StreamInfo:** Probed metadata for each input file
//! - **CompositionConfig:** Overlay placement, scale, opacity, and volumes
//! - **Subtitles:** Timed segments, styling, and the boundary input form
//! - **OutputSpec:** Deliverable path and encode parameters
//!
//! Everything here is created fresh per invocation from caller input;
//! nothing persists across renders.

pub mod composition;
pub mod output;
pub mod stream;
pub mod subtitle;

pub use composition::*;
pub use output::*;
pub use stream::*;
pub use subtitle::*;
