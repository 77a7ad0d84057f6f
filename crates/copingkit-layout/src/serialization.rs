//! Serialization and deserialization for coping layouts.
//!
//! Implements the persisted JSON shape hosts store alongside a project:
//! a flat paver list, summary metadata, the validation outcome and a
//! generation timestamp.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use copingkit_core::units::mm2_to_m2;
use copingkit_core::{CopingParams, PaverSize, Point};

use crate::layout::{CopingLayout, LayoutValidation};
use crate::paver::{Edge, Paver, PaverCategory};

/// Persisted paver type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistedPaverType {
    Corner,
    Full,
    StripeCut,
}

impl From<PaverCategory> for PersistedPaverType {
    fn from(category: PaverCategory) -> Self {
        match category {
            PaverCategory::Corner => Self::Corner,
            PaverCategory::Full => Self::Full,
            PaverCategory::Stripe => Self::StripeCut,
        }
    }
}

impl From<PersistedPaverType> for PaverCategory {
    fn from(paver_type: PersistedPaverType) -> Self {
        match paver_type {
            PersistedPaverType::Corner => Self::Corner,
            PersistedPaverType::Full => Self::Full,
            PersistedPaverType::StripeCut => Self::Stripe,
        }
    }
}

/// Serialized paver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPaver {
    pub id: String,
    pub position: Point,
    pub dimensions: PaverSize,
    pub rotation: f64,
    #[serde(rename = "type")]
    pub paver_type: PersistedPaverType,
    pub original_size: PaverSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_corner: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_direction: Option<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_partial: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_root: Option<String>,
}

impl PersistedPaver {
    pub fn from_paver(paver: &Paver) -> Self {
        let cut_width = if paver.category == PaverCategory::Stripe {
            Some(paver.along_edge_length())
        } else if paver.is_partial {
            let depth = match paver.extension_direction {
                Some(direction) => {
                    let (dx, dy) = direction.direction_vector();
                    paver.depth_along(dx, dy)
                }
                None => paver.depth(),
            };
            Some(depth)
        } else {
            None
        };

        Self {
            id: paver.id.clone(),
            position: paver.position,
            dimensions: paver.size,
            rotation: paver.rotation,
            paver_type: paver.category.into(),
            original_size: paver.nominal_size,
            cut_width,
            edge: Some(paver.edge),
            row_index: Some(paver.row_index),
            column_index: Some(paver.column_index),
            is_corner: Some(paver.is_corner),
            extension_direction: paver.extension_direction,
            is_partial: Some(paver.is_partial),
            extension_root: paver.extension_root.clone(),
        }
    }

    /// Restores an engine paver. Missing optional fields take their
    /// defaults: north edge, row and column 0, corner flag from the type.
    pub fn to_paver(&self) -> Paver {
        Paver {
            id: self.id.clone(),
            position: self.position,
            size: self.dimensions,
            rotation: self.rotation,
            category: self.paver_type.into(),
            edge: self.edge.unwrap_or(Edge::North),
            row_index: self.row_index.unwrap_or(0),
            column_index: self.column_index.unwrap_or(0),
            is_corner: self
                .is_corner
                .unwrap_or(self.paver_type == PersistedPaverType::Corner),
            extension_direction: self.extension_direction,
            is_partial: self.is_partial.unwrap_or(false),
            nominal_size: self.original_size,
            extension_root: self.extension_root.clone(),
        }
    }
}

/// Layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedMetadata {
    pub total_pavers: usize,
    pub corner_pavers: usize,
    pub full_pavers: usize,
    pub stripe_pavers: usize,
    pub total_area_m2: f64,
    pub grout_width_mm: f64,
}

/// Complete persisted layout structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedLayout {
    pub pavers: Vec<PersistedPaver>,
    pub metadata: PersistedMetadata,
    pub validation: LayoutValidation,
    pub generated_at: DateTime<Utc>,
}

impl PersistedLayout {
    /// Snapshot of a freshly generated layout
    pub fn from_layout(layout: &CopingLayout, params: &CopingParams) -> Self {
        Self::from_pavers(
            &layout.all_pavers(),
            layout.validation.clone(),
            params.grout_width_mm,
        )
    }

    /// Snapshot of a committed paver list, extensions included
    pub fn from_pavers(
        pavers: &[Paver],
        validation: LayoutValidation,
        grout_width_mm: f64,
    ) -> Self {
        let count = |category: PaverCategory| {
            pavers.iter().filter(|p| p.category == category).count()
        };
        let area_mm2: f64 = pavers.iter().map(Paver::area_mm2).sum();

        Self {
            pavers: pavers.iter().map(PersistedPaver::from_paver).collect(),
            metadata: PersistedMetadata {
                total_pavers: pavers.len(),
                corner_pavers: count(PaverCategory::Corner),
                full_pavers: count(PaverCategory::Full),
                stripe_pavers: count(PaverCategory::Stripe),
                total_area_m2: mm2_to_m2(area_mm2),
                grout_width_mm,
            },
            validation,
            generated_at: Utc::now(),
        }
    }

    /// Restore engine pavers
    pub fn to_pavers(&self) -> Vec<Paver> {
        self.pavers.iter().map(PersistedPaver::to_paver).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize layout")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let layout: PersistedLayout =
            serde_json::from_str(json).context("Failed to parse layout")?;
        if layout.metadata.total_pavers != layout.pavers.len() {
            tracing::warn!(
                "Layout metadata lists {} pavers but {} are stored",
                layout.metadata.total_pavers,
                layout.pavers.len()
            );
        }
        Ok(layout)
    }

    /// Save layout to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;

        std::fs::write(path.as_ref(), json).context("Failed to write layout file")?;

        Ok(())
    }

    /// Load layout from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read layout file")?;

        Self::from_json(&content)
    }
}
