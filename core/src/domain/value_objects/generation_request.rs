//! Validated parameters for a text-to-image generation.

use serde::{Deserialize, Serialize};

use super::aspect_ratio::AspectRatio;
use crate::errors::JobError;

/// Fewest images a single job may request
pub const MIN_IMAGE_COUNT: u8 = 1;

/// Most images a single job may request
pub const MAX_IMAGE_COUNT: u8 = 4;

/// A generation request whose prompt is non-blank and whose count is in range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    prompt: String,
    aspect_ratio: AspectRatio,
    count: u8,
}

impl GenerationRequest {
    /// Builds a request, clamping `count` into `[1, 4]`.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::InvalidRequest`] for a blank prompt.
    pub fn new(prompt: impl Into<String>, aspect_ratio: AspectRatio, count: i64) -> Result<Self, JobError> {
        let prompt = prompt.into();
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(JobError::InvalidRequest {
                message: "Prompt must not be empty".to_string(),
            });
        }

        let count = count.clamp(i64::from(MIN_IMAGE_COUNT), i64::from(MAX_IMAGE_COUNT)) as u8;

        Ok(Self {
            prompt: prompt.to_string(),
            aspect_ratio,
            count,
        })
    }

    /// Builds a request from loosely typed caller input.
    ///
    /// Unknown ratios fall back to 1:1 and a missing count means one image.
    pub fn from_raw(prompt: &str, ratio: Option<&str>, count: Option<i64>) -> Result<Self, JobError> {
        let aspect_ratio = ratio.map(AspectRatio::parse_or_default).unwrap_or_default();
        Self::new(prompt, aspect_ratio, count.unwrap_or(1))
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// Provider size string for this request's ratio
    pub fn size(&self) -> &'static str {
        self.aspect_ratio.size()
    }
}
