//! Declarative encoder schema: layers, segments, and roles.
//!
//! Plain data handed by reference to the HDC engine. Nothing here encodes
//! vectors; the schema only names roles and declares how each one is binned.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::attributes::AttributeSet;
use crate::error::{ChurnError, ChurnResult};

/// How a numeric role is turned into bins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EncodingStrategy {
    /// Cumulative bins: value `n` activates every bin up to `n`
    Thermometer,
}

impl EncodingStrategy {
    /// Wire value of the strategy.
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::Thermometer => "thermometer",
        }
    }
}

/// Binning for a numeric role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumericConfig {
    /// Width of one bin; must be positive
    pub bin_width: f64,
    /// Binning strategy
    pub encoding_strategy: EncodingStrategy,
    /// Lower bound; smaller values are clamped by the engine
    pub min_value: f64,
    /// Upper bound; larger values are clamped by the engine
    pub max_value: f64,
}

impl NumericConfig {
    /// Thermometer binning over `[min_value, max_value]`.
    #[must_use]
    pub fn thermometer(bin_width: f64, min_value: f64, max_value: f64) -> Self {
        Self {
            bin_width,
            encoding_strategy: EncodingStrategy::Thermometer,
            min_value,
            max_value,
        }
    }

    /// Number of bins covering the range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn bin_count(&self) -> usize {
        if self.bin_width <= 0.0 || self.max_value <= self.min_value {
            return 0;
        }
        ((self.max_value - self.min_value) / self.bin_width).ceil() as usize
    }

    /// Restrict a value to the declared range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if self.min_value <= self.max_value {
            value.clamp(self.min_value, self.max_value)
        } else {
            value
        }
    }
}

/// A named slot in the encoded vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Role {
    /// Attribute key this role reads
    pub name: String,
    /// Contribution to segment similarity, in [0, 1]
    pub similarity_weight: f64,
    /// Part of the composite identity key for temporal tracking
    #[serde(default)]
    pub key_part: bool,
    /// Natural-language hints that point queries at this role
    #[serde(default)]
    pub lexicons: Vec<String>,
    /// Present for numeric roles only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_config: Option<NumericConfig>,
}

impl Role {
    /// Free-text role with lexicon hints.
    #[must_use]
    pub fn text(name: &str, similarity_weight: f64, lexicons: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            similarity_weight,
            key_part: false,
            lexicons: lexicons.iter().map(|s| (*s).to_string()).collect(),
            numeric_config: None,
        }
    }

    /// Numeric role with binning.
    #[must_use]
    pub fn numeric(
        name: &str,
        similarity_weight: f64,
        numeric_config: NumericConfig,
        lexicons: &[&str],
    ) -> Self {
        Self {
            numeric_config: Some(numeric_config),
            ..Self::text(name, similarity_weight, lexicons)
        }
    }

    /// Mark the role as part of the identity key.
    #[must_use]
    pub fn key_part(mut self) -> Self {
        self.key_part = true;
        self
    }

    /// Whether the role carries numeric binning.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.numeric_config.is_some()
    }
}

/// Group of roles inside a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Segment name
    pub name: String,
    /// Roles in declaration order
    pub roles: Vec<Role>,
}

impl Segment {
    /// Find a role by name.
    #[must_use]
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }
}

/// Weighted group of segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Layer {
    /// Layer name
    pub name: String,
    /// Contribution to overall similarity, in [0, 1]
    pub similarity_weight: f64,
    /// Segments in declaration order
    pub segments: Vec<Segment>,
}

impl Layer {
    /// Find a segment by name.
    #[must_use]
    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.name == name)
    }
}

/// Temporal signal handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TemporalConfig {
    /// Signal type (`auto` lets the engine detect it)
    pub signal_type: String,
}

/// Top-level encoder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EncoderConfig {
    /// Vector dimension
    pub dimension: usize,
    /// Seed for the engine's random basis vectors
    pub seed: u64,
    /// Where timestamps come from (`auto` stamps at encode time)
    pub temporal_source: String,
    /// Temporal signal settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_config: Option<TemporalConfig>,
    /// Layers in declaration order
    pub layers: Vec<Layer>,
}

impl EncoderConfig {
    /// Find a layer by name.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Every role in declaration order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.layers
            .iter()
            .flat_map(|l| l.segments.iter())
            .flat_map(|s| s.roles.iter())
    }

    /// Find a role anywhere in the schema.
    #[must_use]
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles().find(|r| r.name == name)
    }

    /// Names of every role in declaration order.
    #[must_use]
    pub fn role_names(&self) -> Vec<&str> {
        self.roles().map(|r| r.name.as_str()).collect()
    }

    /// Roles that form the composite identity key.
    pub fn key_part_roles(&self) -> impl Iterator<Item = &Role> {
        self.roles().filter(|r| r.key_part)
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ChurnError::InvalidSchema`] on a zero dimension, no layers,
    /// duplicate role names, weights outside `[0, 1]`, or bad numeric bounds.
    pub fn validate(&self) -> ChurnResult<()> {
        if self.dimension == 0 {
            return Err(ChurnError::InvalidSchema("dimension must be > 0".into()));
        }
        if self.layers.is_empty() {
            return Err(ChurnError::InvalidSchema("no layers declared".into()));
        }

        let mut seen = HashSet::new();
        for layer in &self.layers {
            check_weight(&layer.name, layer.similarity_weight)?;
            for role in layer.segments.iter().flat_map(|s| s.roles.iter()) {
                if !seen.insert(role.name.as_str()) {
                    return Err(ChurnError::InvalidSchema(format!(
                        "duplicate role name: {}",
                        role.name
                    )));
                }
                check_weight(&role.name, role.similarity_weight)?;
                if let Some(numeric) = &role.numeric_config {
                    if numeric.bin_width.is_nan() || numeric.bin_width <= 0.0 {
                        return Err(ChurnError::InvalidSchema(format!(
                            "{}: bin_width must be > 0",
                            role.name
                        )));
                    }
                    if numeric.min_value.is_nan() || numeric.min_value >= numeric.max_value {
                        return Err(ChurnError::InvalidSchema(format!(
                            "{}: min_value must be < max_value",
                            role.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Confirm the schema's roles and the attribute vocabulary match one to one.
    ///
    /// [`AttributeSet`] always carries the fixed [`ATTRIBUTE_KEYS`], so this
    /// checks the schema, not the values in `attributes`. Call it once per
    /// config rather than per record.
    ///
    /// [`ATTRIBUTE_KEYS`]: crate::ATTRIBUTE_KEYS
    ///
    /// # Errors
    ///
    /// Returns [`ChurnError::UnknownRole`] for a key with no role, or
    /// [`ChurnError::MissingRole`] for a role with no key.
    pub fn check_attributes(&self, attributes: &AttributeSet) -> ChurnResult<()> {
        let roles: HashSet<&str> = self.roles().map(|r| r.name.as_str()).collect();
        let keys = attributes.keys();
        if let Some(unknown) = keys.iter().find(|k| !roles.contains(**k)) {
            return Err(ChurnError::UnknownRole((*unknown).to_string()));
        }
        if let Some(missing) = roles.iter().find(|r| !keys.contains(*r)) {
            return Err(ChurnError::MissingRole((*missing).to_string()));
        }
        Ok(())
    }

    /// JSON Schema describing this config type.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be serialized.
    pub fn to_json_schema() -> ChurnResult<serde_json::Value> {
        let schema = schemars::schema_for!(EncoderConfig);
        Ok(serde_json::to_value(schema)?)
    }
}

fn check_weight(name: &str, weight: f64) -> ChurnResult<()> {
    if (0.0..=1.0).contains(&weight) {
        Ok(())
    } else {
        Err(ChurnError::InvalidSchema(format!(
            "{name}: similarity_weight must be in [0.0, 1.0], got {weight}"
        )))
    }
}
