//! Colors, colormaps and highlight pattern matching.
//!
//! - [Rgb]: 8-bit color with hex formatting and perceived luminance
//! - [Colormap]: source of an ordered, cyclic sequence of colors
//! - [Highlighter]: highlight patterns with their assigned colors

use crate::error::{Result, TextTreeError};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::fmt;

/// Luminance above which text on a background is drawn black.
const LUMINANCE_THRESHOLD: f32 = 0.5;

// =#========================================================================#=
// RGB
// =#========================================================================#=
/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Creates a color from a `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Returns the perceived luminance in `[0, 1]`:
    /// `0.299 r + 0.587 g + 0.114 b` on channels scaled to `[0, 1]`.
    pub fn perceived_luminance(&self) -> f32 {
        let scale = |c: u8| c as f32 / 255.0;
        0.299 * scale(self.r) + 0.587 * scale(self.g) + 0.114 * scale(self.b)
    }

    /// Returns black or white, whichever contrasts more with `self` as
    /// background.
    ///
    /// # Examples
    /// ```
    /// # use text_tree::style::Rgb;
    /// assert_eq!(Rgb::WHITE.contrasting_text(), Rgb::BLACK);
    /// assert_eq!(Rgb::from_hex(0x1f77b4).contrasting_text(), Rgb::WHITE);
    /// ```
    pub fn contrasting_text(&self) -> Rgb {
        if self.perceived_luminance() > LUMINANCE_THRESHOLD {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }
}

/// Formats as lowercase `#rrggbb`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// =#========================================================================#=
// COLORMAP
// =#========================================================================#=
/// Source of highlight colors.
///
/// Implementations return `count` colors in a fixed order, cycling through
/// their palette when `count` exceeds it.
pub trait Colormap {
    /// Returns the first `count` colors of the cyclic sequence.
    fn colors(&self, count: usize) -> Vec<Rgb>;
}

/// A colormap cycling through a fixed palette.
#[derive(Debug, Clone, PartialEq)]
pub struct CyclicColormap {
    palette: Vec<Rgb>,
}

/// The qualitative 20-color "tab20" palette.
const TAB20: [u32; 20] = [
    0x1f77b4, 0xaec7e8, 0xff7f0e, 0xffbb78, 0x2ca02c, 0x98df8a, 0xd62728, 0xff9896, 0x9467bd, 0xc5b0d5,
    0x8c564b, 0xc49c94, 0xe377c2, 0xf7b6d2, 0x7f7f7f, 0xc7c7c7, 0xbcbd22, 0xdbdb8d, 0x17becf, 0x9edae5,
];

impl CyclicColormap {
    /// Creates a colormap over `palette`.
    ///
    /// # Panics
    /// Panics if `palette` is empty.
    pub fn new(palette: Vec<Rgb>) -> Self {
        assert!(!palette.is_empty(), "Colormap palette must not be empty");
        CyclicColormap { palette }
    }

    /// The "tab20" palette, the default highlight colormap.
    pub fn tab20() -> Self {
        CyclicColormap::new(TAB20.iter().map(|&hex| Rgb::from_hex(hex)).collect())
    }

    /// Returns the palette.
    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }
}

impl Default for CyclicColormap {
    fn default() -> Self {
        CyclicColormap::tab20()
    }
}

impl Colormap for CyclicColormap {
    fn colors(&self, count: usize) -> Vec<Rgb> {
        self.palette.iter().copied().cycle().take(count).collect()
    }
}

// =#========================================================================#=
// HIGHLIGHTER
// =#========================================================================#=
/// A highlight pattern with its compiled matcher and color.
#[derive(Debug, Clone)]
struct HighlightRule {
    pattern: String,
    matcher: Regex,
    color: Rgb,
}

/// Matches token texts against highlight patterns.
///
/// Patterns are case-insensitive regular expressions searched anywhere in the
/// token text. Each distinct pattern string gets the next color
/// of the colormap, in the order the patterns were given. When several
/// patterns match, the one given first wins.
///
/// # Example
/// ```
/// use text_tree::style::{CyclicColormap, Highlighter};
///
/// let highlighter = Highlighter::new(&["good", "film"], &CyclicColormap::tab20())?;
/// assert!(highlighter.color_for("Goodness").is_some());
/// assert_eq!(highlighter.color_for("cat"), None);
/// # Ok::<(), text_tree::TextTreeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    rules: Vec<HighlightRule>,
}

impl Highlighter {
    /// Compiles `patterns` and assigns their colors from `colormap`.
    ///
    /// # Errors
    /// [TextTreeError::InvalidHighlight] if a pattern is not a valid regex.
    pub fn new<S: AsRef<str>>(patterns: &[S], colormap: &dyn Colormap) -> Result<Self> {
        let mut seen = HashSet::new();
        let distinct: Vec<&str> = patterns
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| seen.insert(*p))
            .collect();

        let colors = colormap.colors(distinct.len());
        let mut rules = Vec::with_capacity(distinct.len());
        for (pattern, color) in distinct.into_iter().zip(colors) {
            let matcher = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| TextTreeError::InvalidHighlight {
                    pattern: pattern.to_string(),
                    source,
                })?;
            rules.push(HighlightRule {
                pattern: pattern.to_string(),
                matcher,
                color,
            });
        }

        Ok(Highlighter { rules })
    }

    /// Returns the color of the first pattern matching `text`.
    pub fn color_for(&self, text: &str) -> Option<Rgb> {
        self.rules
            .iter()
            .find(|rule| rule.matcher.is_match(text))
            .map(|rule| rule.color)
    }

    /// Returns the color assigned to `pattern`, as given at construction.
    pub fn color_of_pattern(&self, pattern: &str) -> Option<Rgb> {
        self.rules
            .iter()
            .find(|rule| rule.pattern == pattern)
            .map(|rule| rule.color)
    }

    /// Returns the number of distinct patterns.
    pub fn num_patterns(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_display() {
        assert_eq!(Rgb::from_hex(0x1f77b4).to_string(), "#1f77b4");
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn test_luminance_bounds() {
        assert_eq!(Rgb::BLACK.perceived_luminance(), 0.0);
        assert!((Rgb::WHITE.perceived_luminance() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_colormap_cycles() {
        let colormap = CyclicColormap::new(vec![Rgb::BLACK, Rgb::WHITE]);
        assert_eq!(colormap.colors(3), vec![Rgb::BLACK, Rgb::WHITE, Rgb::BLACK]);
    }

    #[test]
    fn test_duplicate_patterns_share_one_color() {
        let colormap = CyclicColormap::new(vec![Rgb::BLACK, Rgb::WHITE]);
        let highlighter = Highlighter::new(&["film", "film", "good"], &colormap).unwrap();
        assert_eq!(highlighter.num_patterns(), 2);
        assert_eq!(highlighter.color_of_pattern("film"), Some(Rgb::BLACK));
        assert_eq!(highlighter.color_of_pattern("good"), Some(Rgb::WHITE));
    }

    #[test]
    fn test_patterns_differing_in_case_stay_distinct() {
        let colormap = CyclicColormap::new(vec![Rgb::BLACK, Rgb::WHITE]);
        let highlighter = Highlighter::new(&["\\D", "\\d"], &colormap).unwrap();
        assert_eq!(highlighter.num_patterns(), 2);
        assert_eq!(highlighter.color_for("42"), Some(Rgb::WHITE));
        assert_eq!(highlighter.color_for("cat"), Some(Rgb::BLACK));
    }
}
