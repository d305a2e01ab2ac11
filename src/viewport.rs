use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Browser window size used when capturing a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 900,
        }
    }
}

impl Viewport {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewportParseError {
    #[error("Invalid viewport '{0}': expected WIDTHxHEIGHT (e.g., 1440x900)")]
    InvalidFormat(String),
    #[error("Invalid viewport {axis}: '{value}'")]
    InvalidDimension { axis: &'static str, value: String },
    #[error("Viewport {0} must be greater than zero")]
    Zero(&'static str),
}

fn dimension(axis: &'static str, value: &str) -> Result<u32, ViewportParseError> {
    let value = value.trim();
    let parsed: u32 = value
        .parse()
        .map_err(|_| ViewportParseError::InvalidDimension {
            axis,
            value: value.to_string(),
        })?;
    if parsed == 0 {
        return Err(ViewportParseError::Zero(axis));
    }
    Ok(parsed)
}

impl FromStr for Viewport {
    type Err = ViewportParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .trim()
            .split_once(|c: char| c.eq_ignore_ascii_case(&'x'))
            .ok_or_else(|| ViewportParseError::InvalidFormat(s.to_string()))?;
        Ok(Viewport {
            width: dimension("width", width)?,
            height: dimension("height", height)?,
        })
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
