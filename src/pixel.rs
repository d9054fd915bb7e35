//! The pixel pipeline: the shared linear-light buffer, blend policies, and
//! the sinks fragments are composited through.

pub mod blend;
pub mod buffer;
pub mod color;
pub mod export;
pub mod pipeline;
