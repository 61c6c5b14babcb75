//! Output aspect ratios and their provider pixel sizes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported output aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Classic,
    #[serde(rename = "3:4")]
    ClassicPortrait,
}

/// One entry of the supported-ratio table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioOption {
    pub value: String,
    pub label: String,
    pub size: String,
}

impl AspectRatio {
    /// Every supported ratio in display order
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Classic,
        AspectRatio::ClassicPortrait,
    ];

    /// Ratio notation as accepted from callers
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Classic => "4:3",
            AspectRatio::ClassicPortrait => "3:4",
        }
    }

    /// Provider size string, `width*height`
    pub fn size(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1024*1024",
            AspectRatio::Landscape => "1344*768",
            AspectRatio::Portrait => "768*1344",
            AspectRatio::Classic => "1152*896",
            AspectRatio::ClassicPortrait => "896*1152",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Square (1:1)",
            AspectRatio::Landscape => "Landscape (16:9)",
            AspectRatio::Portrait => "Portrait (9:16)",
            AspectRatio::Classic => "Classic (4:3)",
            AspectRatio::ClassicPortrait => "Portrait (3:4)",
        }
    }

    /// Parses a ratio, falling back to 1:1 for anything unrecognised
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// The static table of supported ratios
    pub fn options() -> Vec<RatioOption> {
        Self::ALL
            .iter()
            .map(|ratio| RatioOption {
                value: ratio.as_str().to_string(),
                label: ratio.label().to_string(),
                size: ratio.size().to_string(),
            })
            .collect()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|ratio| ratio.as_str() == trimmed)
            .ok_or_else(|| format!("Unsupported aspect ratio: {}", trimmed))
    }
}
