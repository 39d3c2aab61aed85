//! The style engine: rendering parameters for every vertex.

use crate::error::Result;
use crate::model::{TextTree, VertexIndex};
use crate::style::color::{Colormap, CyclicColormap, Highlighter, Rgb};
use crate::style::config::{SortPass, StyleConfig};
use tracing::debug;

// =#========================================================================#=
// ORIENTATION
// =#========================================================================#=
/// Reading direction of the drawn tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Root on the left, sentences read left to right (sentence-initial match)
    #[default]
    Forward,
    /// Root on the right, sentences read towards the root (sentence-final match)
    Reversed,
}

impl Orientation {
    /// Orientation for sentences matched at their end (`reverse`) or start.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Orientation::Reversed
        } else {
            Orientation::Forward
        }
    }
}

// =#========================================================================#=
// FACES
// =#========================================================================#=
/// Horizontal margins of a face.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
}

impl Margins {
    /// Equal margins on both sides.
    pub fn uniform(margin: f32) -> Self {
        Margins {
            left: margin,
            right: margin,
        }
    }
}

/// The main label of a vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFace {
    pub text: String,
    pub font_size: f32,
    pub margins: Margins,
    pub background: Rgb,
    pub foreground: Rgb,
}

/// Secondary annotation next to a leaf, showing its reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFace {
    pub text: String,
    pub font_size: f32,
    pub margins: Margins,
}

/// Rendering parameters of one vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    /// Number of leaves in the subtree of the vertex
    pub leaf_count: usize,
    /// Main label
    pub face: TextFace,
    /// Reference annotation (leaves with a non-empty reference only)
    pub reference: Option<ReferenceFace>,
    /// Renderer must not draw its own vertex markers or colored branch lines
    pub hide_chrome: bool,
}

/// Tree-wide rendering parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    pub orientation: Orientation,
    /// Pixels per branch length unit
    pub scale: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_right: f32,
    pub root_opening_factor: f32,
    pub show_leaf_names: bool,
    pub show_scale: bool,
}

impl TreeLayout {
    /// Layout used for every styled tree, in the given orientation.
    pub fn new(orientation: Orientation) -> Self {
        TreeLayout {
            orientation,
            scale: 20.0,
            margin_top: 20.0,
            margin_bottom: 20.0,
            margin_right: 20.0,
            root_opening_factor: 1.0,
            show_leaf_names: false,
            show_scale: false,
        }
    }
}

// =#========================================================================#=
// STYLED TREE
// =#========================================================================#=
/// A tree with rendering parameters for each vertex, ready for a renderer.
///
/// Styles are stored parallel to the tree's vertex arena.
#[derive(Debug, Clone)]
pub struct StyledTree {
    tree: TextTree,
    styles: Vec<NodeStyle>,
    layout: TreeLayout,
}

impl StyledTree {
    /// Returns the (sorted) tree.
    pub fn tree(&self) -> &TextTree {
        &self.tree
    }

    /// Returns the style of the vertex at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn style(&self, index: VertexIndex) -> &NodeStyle {
        &self.styles[index]
    }

    /// Returns all styles, indexed like the vertex arena.
    pub fn styles(&self) -> &[NodeStyle] {
        &self.styles
    }

    /// Returns the tree-wide layout.
    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    /// Returns `true` if the tree has no vertices.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Consumes this, returning tree, styles and layout.
    pub fn into_parts(self) -> (TextTree, Vec<NodeStyle>, TreeLayout) {
        (self.tree, self.styles, self.layout)
    }
}

// =#========================================================================#=
// STYLE ENGINE
// =#========================================================================#=
/// Computes font sizes, margins, colors and child order of a [TextTree].
///
/// The highlight colors are fixed once at construction; applying the engine
/// is a pure transform of the given tree and yields the same result for the
/// same input.
///
/// # Example
/// ```
/// use text_tree::model::{DocumentSentences, PrefixTreeBuilder, Sentence};
/// use text_tree::style::{Orientation, StyleConfig, StyleEngine};
///
/// let input = DocumentSentences::new(vec![
///     vec![Sentence::from_words("The cat sat")],
///     vec![Sentence::from_words("The cat ran")],
/// ]);
/// let tree = PrefixTreeBuilder::new().build(&input)?;
///
/// let engine = StyleEngine::with_highlights(StyleConfig::default(), &["cat"])?;
/// let styled = engine.apply(tree, Orientation::Forward);
///
/// let root = styled.tree().root().unwrap().index();
/// assert_eq!(styled.style(root).leaf_count, 2);
/// assert_eq!(styled.style(root).face.font_size, 16.0);
/// # Ok::<(), text_tree::TextTreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StyleEngine {
    config: StyleConfig,
    highlighter: Highlighter,
}

impl StyleEngine {
    /// Creates an engine without highlights.
    ///
    /// # Errors
    /// [TextTreeError::InvalidInput](crate::TextTreeError::InvalidInput) if
    /// the configuration is inconsistent.
    pub fn new(config: StyleConfig) -> Result<Self> {
        config.validate()?;
        Ok(StyleEngine {
            config,
            highlighter: Highlighter::default(),
        })
    }

    /// Creates an engine highlighting `patterns` with "tab20" colors.
    ///
    /// # Errors
    /// As [new](Self::new), plus
    /// [TextTreeError::InvalidHighlight](crate::TextTreeError::InvalidHighlight).
    pub fn with_highlights<S: AsRef<str>>(config: StyleConfig, patterns: &[S]) -> Result<Self> {
        StyleEngine::with_colormap(config, patterns, &CyclicColormap::tab20())
    }

    /// Creates an engine highlighting `patterns` with colors of `colormap`.
    ///
    /// # Errors
    /// As [with_highlights](Self::with_highlights).
    pub fn with_colormap<S: AsRef<str>>(
        config: StyleConfig,
        patterns: &[S],
        colormap: &dyn Colormap,
    ) -> Result<Self> {
        config.validate()?;
        let highlighter = Highlighter::new(patterns, colormap)?;
        Ok(StyleEngine { config, highlighter })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Returns the highlighter.
    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Sorts the tree and computes the style of every vertex.
    pub fn apply(&self, mut tree: TextTree, orientation: Orientation) -> StyledTree {
        for pass in &self.config.sort_passes {
            match pass {
                SortPass::Label => sort_by_label(&mut tree),
                SortPass::Ladderize => ladderize(&mut tree),
            }
        }

        let leaf_counts = tree.leaf_counts();
        let styles = (0..tree.num_vertices())
            .map(|index| self.style_vertex(&tree, index, leaf_counts[index], orientation))
            .collect();

        debug!(
            "Styled {} vertices ({} highlight patterns, passes {:?})",
            tree.num_vertices(),
            self.highlighter.num_patterns(),
            self.config.sort_passes
        );

        StyledTree {
            tree,
            styles,
            layout: TreeLayout::new(orientation),
        }
    }

    /// Returns the font size for a vertex with `leaf_count` leaves:
    /// `leaf_count × fontsize_min`, clamped to `[fontsize_min, fontsize_max]`.
    pub fn font_size(&self, leaf_count: usize) -> f32 {
        let mut sizes = [
            self.config.fontsize_min,
            leaf_count as f32 * self.config.fontsize_min,
            self.config.fontsize_max,
        ];
        sizes.sort_by(f32::total_cmp);
        sizes[1]
    }

    fn style_vertex(&self, tree: &TextTree, index: VertexIndex, leaf_count: usize, orientation: Orientation) -> NodeStyle {
        let vertex = &tree[index];
        let attributes = vertex.attributes();
        let config = &self.config;

        let font_size = self.font_size(leaf_count);

        // Trailing side follows reading direction and faces the children;
        // the leading side faces the parent
        let mut trailing = config.node_margin;
        let mut leading = config.node_margin;
        if attributes.whitespace {
            trailing += config.space_margin_mult * font_size;
        }
        if tree.num_siblings(index) > 0 {
            leading = leading.max(config.branch_margin);
        }
        if vertex.is_branch_point() {
            trailing = trailing.max(config.branch_margin);
        }
        let margins = match orientation {
            Orientation::Forward => Margins {
                left: leading,
                right: trailing,
            },
            Orientation::Reversed => Margins {
                left: trailing,
                right: leading,
            },
        };

        let background = self.highlighter.color_for(&attributes.text).unwrap_or(Rgb::WHITE);

        let reference = if vertex.is_leaf() && attributes.has_reference() {
            attributes.reference.as_ref().map(|text| ReferenceFace {
                text: text.clone(),
                font_size: config.reference_fontsize,
                margins: Margins::uniform(config.reference_margin),
            })
        } else {
            None
        };

        NodeStyle {
            leaf_count,
            face: TextFace {
                text: attributes.text.clone(),
                font_size,
                margins,
                background,
                foreground: background.contrasting_text(),
            },
            reference,
            hide_chrome: true,
        }
    }
}

// ============================================================================
// Sort passes (private)
// ============================================================================
/// Orders children at each branch point by the sorted simple labels of the
/// leaves below them.
fn sort_by_label(tree: &mut TextTree) {
    let reordered: Vec<(VertexIndex, Vec<VertexIndex>)> = {
        let mut keys: Vec<Vec<&str>> = vec![Vec::new(); tree.num_vertices()];
        for vertex in tree.post_order_iter() {
            let key = if vertex.is_leaf() {
                vec![vertex.attributes().simple_label.as_str()]
            } else {
                let mut key: Vec<&str> = vertex
                    .children()
                    .iter()
                    .flat_map(|&child| keys[child].iter().copied())
                    .collect();
                key.sort_unstable();
                key
            };
            keys[vertex.index()] = key;
        }

        let orders: Vec<(VertexIndex, Vec<VertexIndex>)> = tree
            .vertices()
            .filter(|v| v.is_branch_point())
            .map(|v| {
                let mut children = v.children().to_vec();
                children.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
                (v.index(), children)
            })
            .collect();
        orders
    };

    for (index, children) in reordered {
        *tree.children_mut(index) = children;
    }
}

/// Stably orders children at each branch point by ascending leaf count.
fn ladderize(tree: &mut TextTree) {
    let leaf_counts = tree.leaf_counts();
    let branch_points: Vec<VertexIndex> = tree
        .vertices()
        .filter(|v| v.is_branch_point())
        .map(|v| v.index())
        .collect();

    for index in branch_points {
        tree.children_mut(index).sort_by_key(|&child| leaf_counts[child]);
    }
}
