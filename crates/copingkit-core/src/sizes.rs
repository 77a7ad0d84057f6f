//! Paver dimensions and the named size presets offered to hosts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LayoutError;

/// Paver dimensions in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaverSize {
    pub width: f64,
    pub height: f64,
}

impl PaverSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Area in square millimeters
    pub fn area_mm2(&self) -> f64 {
        self.width * self.height
    }

    pub fn swapped(&self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(LayoutError::InvalidPaverSize {
                width: self.width,
                height: self.height,
                reason: "dimensions must be finite and positive".to_string(),
            })
        }
    }
}

impl fmt::Display for PaverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Corner and full paver sizes used by the layout generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaverConfig {
    pub corner_size: PaverSize,
    pub full_size: PaverSize,
}

impl PaverConfig {
    pub fn new(corner_size: PaverSize, full_size: PaverSize) -> Self {
        Self {
            corner_size,
            full_size,
        }
    }

    /// Same size for corner and full pavers.
    pub fn uniform(size: PaverSize) -> Self {
        Self::new(size, size)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        self.corner_size.validate()?;
        self.full_size.validate()
    }
}

/// Named paver presets, `WxH` with the width running along the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaverOption {
    /// Coping disabled
    None,
    #[default]
    Size400x400,
    Size400x600,
    Size600x400,
}

impl PaverOption {
    pub const ALL: [PaverOption; 4] = [
        PaverOption::None,
        PaverOption::Size400x400,
        PaverOption::Size400x600,
        PaverOption::Size600x400,
    ];

    /// Paver size for the preset, `None` when coping is disabled.
    pub fn size(&self) -> Option<PaverSize> {
        match self {
            Self::None => None,
            Self::Size400x400 => Some(PaverSize::new(400.0, 400.0)),
            Self::Size400x600 => Some(PaverSize::new(400.0, 600.0)),
            Self::Size600x400 => Some(PaverSize::new(600.0, 400.0)),
        }
    }

    /// Corner and full sizes for the preset.
    pub fn paver_config(&self) -> Option<PaverConfig> {
        self.size().map(PaverConfig::uniform)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Size400x400 => "400x400",
            Self::Size400x600 => "400x600",
            Self::Size600x400 => "600x400",
        }
    }
}

impl fmt::Display for PaverOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaverOption {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "400x400" => Ok(Self::Size400x400),
            "400x600" => Ok(Self::Size400x600),
            "600x400" => Ok(Self::Size600x400),
            other => Err(LayoutError::UnknownPaverOption {
                option: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PaverOption {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaverOption> for String {
    fn from(option: PaverOption) -> Self {
        option.as_str().to_string()
    }
}
