//! Typed, mutable element model for MPEG-DASH manifests.
//!
//! ```no_run
//! use mpd_parser::prelude::*;
//!
//! # fn main() -> MpdResult<()> {
//! let mpd = Parser::from_file("manifest.mpd")?;
//! for period in mpd.periods() {
//!     for adaptation_set in period.adaptation_sets() {
//!         for template in adaptation_set.segment_templates() {
//!             for timing in template.segment_timings()? {
//!                 println!("{} {}", timing.number, timing.start_time);
//!             }
//!         }
//!     }
//! }
//! mpd.set_min_buffer_time(Some("PT4S"));
//! println!("{}", Parser::to_string(&mpd)?);
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod duration;
pub mod error;
pub mod node;
pub mod parser;
pub mod tags;
pub mod template;
pub mod timeline;
pub mod xml;

pub use error::{MpdError, MpdResult};
pub use parser::Parser;
pub use timeline::SegmentTiming;

pub mod prelude {
    pub use crate::error::{MpdError, MpdResult};
    pub use crate::node::{Node, Tag};
    pub use crate::parser::Parser;
    pub use crate::tags::*;
    pub use crate::timeline::SegmentTiming;
}
