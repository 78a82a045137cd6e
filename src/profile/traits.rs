//! Personality-trait profile: five facet groups with numeric sub-scores.
//!
//! Facets score on a fixed [0, 10] scale. A missing facet reads as the
//! midpoint (5); out-of-range values are clamped on access, never rejected.
//! Group maps are `BTreeMap`s so the serialized form (which feeds the seed
//! hash) is byte-stable across runs.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Midpoint default for absent facets.
pub const FACET_DEFAULT: f32 = 5.0;
/// Upper bound of the facet scale.
pub const FACET_MAX: f32 = 10.0;

/// One trait group: named facet scores.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetGroup(pub BTreeMap<String, f32>);

impl FacetGroup {
    /// Read a facet, defaulting to the midpoint and clamping to [0, 10].
    pub fn facet(&self, name: &str) -> f32 {
        self.0
            .get(name)
            .copied()
            .unwrap_or(FACET_DEFAULT)
            .clamp(0.0, FACET_MAX)
    }

    /// Set a facet score (test and builder convenience).
    pub fn set(&mut self, name: &str, value: f32) -> &mut Self {
        self.0.insert(name.to_string(), value);
        self
    }
}

/// Five-group personality profile as served by the stats endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    #[serde(default)]
    pub openness: FacetGroup,
    #[serde(default)]
    pub conscientiousness: FacetGroup,
    #[serde(default)]
    pub extraversion: FacetGroup,
    #[serde(default)]
    pub agreeableness: FacetGroup,
    #[serde(default)]
    pub neuroticism: FacetGroup,
}

impl TraitProfile {
    /// Parse a profile from endpoint JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::from)
    }

    /// Load a profile from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Stable serialized form used as seed material.
    ///
    /// Serialization of these maps cannot fail; the fallback keeps the
    /// mapper total.
    pub fn seed_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
