//! Style configuration.
//!
//! [StyleConfig] holds all tunable parameters of the style engine. It can be
//! built in code with the `with_*` setters or read from TOML, where every
//! field is optional:
//!
//! ```toml
//! fontsize_min = 8.0
//! fontsize_max = 48.0
//! sort_passes = ["label", "ladderize"]
//! ```

use crate::error::{Result, TextTreeError};
use serde::Deserialize;
use std::path::Path;

// =#========================================================================#=
// SORT PASS
// =#========================================================================#=
/// A reordering of children at every branch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPass {
    /// Order children by the sorted simple labels of the leaves below them.
    Label,
    /// Stably order children by ascending number of leaves below them.
    Ladderize,
}

// =#========================================================================#=
// STYLE CONFIG
// =#========================================================================#=
/// Parameters of the style engine.
///
/// # Example
/// ```
/// use text_tree::style::{SortPass, StyleConfig};
///
/// let config = StyleConfig::default()
///     .with_font_sizes(6.0, 48.0)
///     .with_sort_passes(vec![SortPass::Label, SortPass::Ladderize]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Font size of single-leaf vertices; also the per-leaf increment
    pub fontsize_min: f32,
    /// Upper bound of the font size
    pub fontsize_max: f32,
    /// Margin on both sides of every label
    pub node_margin: f32,
    /// Extra margin after a token followed by whitespace, times its font size
    pub space_margin_mult: f32,
    /// Margin next to branch points
    pub branch_margin: f32,
    /// Font size of reference annotations
    pub reference_fontsize: f32,
    /// Margin on both sides of reference annotations
    pub reference_margin: f32,
    /// Reordering passes, applied in this order
    pub sort_passes: Vec<SortPass>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            fontsize_min: 8.0,
            fontsize_max: 96.0,
            node_margin: 0.5,
            space_margin_mult: 0.625,
            branch_margin: 10.0,
            reference_fontsize: 6.0,
            reference_margin: 10.0,
            sort_passes: vec![SortPass::Label],
        }
    }
}

impl StyleConfig {
    /// Parses a configuration from TOML; missing fields take their defaults.
    ///
    /// # Errors
    /// [TextTreeError::Config] on malformed TOML or unknown fields,
    /// [TextTreeError::InvalidInput] if values are inconsistent.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: StyleConfig = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration from a TOML file.
    ///
    /// # Errors
    /// As [from_toml_str](Self::from_toml_str), plus [TextTreeError::Io].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        StyleConfig::from_toml_str(&content)
    }

    /// Sets the font size bounds.
    pub fn with_font_sizes(mut self, min: f32, max: f32) -> Self {
        self.fontsize_min = min;
        self.fontsize_max = max;
        self
    }

    /// Sets node, whitespace and branch margins.
    pub fn with_margins(mut self, node_margin: f32, space_margin_mult: f32, branch_margin: f32) -> Self {
        self.node_margin = node_margin;
        self.space_margin_mult = space_margin_mult;
        self.branch_margin = branch_margin;
        self
    }

    /// Sets font size and margin of reference annotations.
    pub fn with_reference_face(mut self, fontsize: f32, margin: f32) -> Self {
        self.reference_fontsize = fontsize;
        self.reference_margin = margin;
        self
    }

    /// Sets the sort passes, applied in the given order.
    pub fn with_sort_passes(mut self, sort_passes: Vec<SortPass>) -> Self {
        self.sort_passes = sort_passes;
        self
    }

    /// Convenience for the two sort flags: label sorting first, then
    /// ladderizing, so leaf count dominates and labels break ties.
    pub fn with_sorting(self, by_label: bool, ladderize: bool) -> Self {
        let mut passes = Vec::with_capacity(2);
        if by_label {
            passes.push(SortPass::Label);
        }
        if ladderize {
            passes.push(SortPass::Ladderize);
        }
        self.with_sort_passes(passes)
    }

    /// Checks that sizes are positive and finite and bounds ordered.
    ///
    /// # Errors
    /// [TextTreeError::InvalidInput] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("fontsize_min", self.fontsize_min),
            ("fontsize_max", self.fontsize_max),
            ("reference_fontsize", self.reference_fontsize),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TextTreeError::invalid_input(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("node_margin", self.node_margin),
            ("space_margin_mult", self.space_margin_mult),
            ("branch_margin", self.branch_margin),
            ("reference_margin", self.reference_margin),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TextTreeError::invalid_input(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.fontsize_min > self.fontsize_max {
            return Err(TextTreeError::invalid_input(format!(
                "fontsize_min {} exceeds fontsize_max {}",
                self.fontsize_min, self.fontsize_max
            )));
        }

        Ok(())
    }
}
