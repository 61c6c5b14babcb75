//! Value objects representing immutable domain concepts.

pub mod aspect_ratio;
pub mod generation_request;
pub mod job_handle;


// Re-export commonly used types
pub use aspect_ratio::{AspectRatio, RatioOption};
pub use generation_request::{GenerationRequest, MAX_IMAGE_COUNT, MIN_IMAGE_COUNT};
pub use job_handle::JobHandle;
