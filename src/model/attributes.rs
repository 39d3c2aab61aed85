//! Node attribute records.
//!
//! Provides [NodeAttributes], the explicit record carried by every vertex of
//! a text tree, and [AttributeValue] for caller-supplied extra attributes.
//! Supported values are `f64`, `i64`, `bool` and `String`.

use crate::model::codifier::NodeIdentity;
use crate::model::token::Token;
use std::collections::BTreeMap;
use std::fmt;

/// Caller-supplied attributes of a document, attached to the nodes where its
/// sentences terminate. Ordered by key.
pub type ExtraAttributes = BTreeMap<String, AttributeValue>;

// =#========================================================================#=
// NODE ATTRIBUTES
// =#========================================================================#=
/// Attributes of a merged node.
///
/// `reference` and `extra` are only set on nodes where some sentence ends.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttributes {
    /// Cumulative code path of this node
    pub identity: NodeIdentity,
    /// Original token text (casing of the last sentence visiting the node)
    pub text: String,
    /// Whether the token was followed by whitespace
    pub whitespace: bool,
    /// Whether the token is punctuation
    pub is_punct: bool,
    /// Lowercase alphanumeric-only text of the path to this node
    pub simple_label: String,
    /// Reference of the document whose sentence terminates here
    pub reference: Option<String>,
    /// Extra attributes of the document whose sentence terminates here
    pub extra: ExtraAttributes,
}

impl NodeAttributes {
    /// Creates the attributes for `token` at the end of path `identity`.
    ///
    /// # Arguments
    /// * `identity` - Cumulative code path of the node
    /// * `token` - The token at this position
    /// * `parent_label` - Simple label of the parent position (empty at the sentence root)
    pub fn from_token(identity: NodeIdentity, token: &Token, parent_label: &str) -> Self {
        let mut simple_label = String::with_capacity(parent_label.len() + token.text().len());
        simple_label.push_str(parent_label);
        push_simple(&mut simple_label, token.text());

        NodeAttributes {
            identity,
            text: token.text().to_string(),
            whitespace: token.whitespace(),
            is_punct: token.is_punct(),
            simple_label,
            reference: None,
            extra: ExtraAttributes::new(),
        }
    }

    /// Attributes of the synthetic root joining several sentence roots.
    pub fn synthetic_root() -> Self {
        NodeAttributes {
            identity: NodeIdentity::synthetic_root(),
            text: String::new(),
            whitespace: false,
            is_punct: false,
            simple_label: String::new(),
            reference: None,
            extra: ExtraAttributes::new(),
        }
    }

    /// Returns `true` if the token is pure punctuation or whitespace only.
    pub fn is_cosmetic(&self) -> bool {
        self.is_punct || self.text.trim().is_empty()
    }

    /// Returns `true` if a non-empty reference is attached.
    pub fn has_reference(&self) -> bool {
        self.reference.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// Returns the simple label of `text`: lowercase, alphanumeric characters only.
///
/// # Examples
/// ```
/// # use text_tree::model::attributes::simple_label;
/// assert_eq!(simple_label("Don't panic!"), "dontpanic");
/// assert_eq!(simple_label("--"), "");
/// ```
pub fn simple_label(text: &str) -> String {
    let mut label = String::with_capacity(text.len());
    push_simple(&mut label, text);
    label
}

fn push_simple(label: &mut String, text: &str) {
    for c in text.chars().filter(|c| c.is_alphanumeric()) {
        label.extend(c.to_lowercase());
    }
}

// =#========================================================================#=
// ATTRIBUTE VALUE
// =#========================================================================#=
/// Enum to encapsulate an extra attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// For floating point values
    Float(f64),
    /// For integer values
    Int(i64),
    /// For flags
    Bool(bool),
    /// For strings
    String(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::Bool(v) => write!(f, "{v}"),
            AttributeValue::String(v) => f.write_str(v),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        AttributeValue::Int(v as i64)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::String(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_label_accumulates_parent_label() {
        let root = NodeIdentity::synthetic_root().extended(1);
        let the = NodeAttributes::from_token(root.clone(), &Token::word("The", true), "");
        let dash = NodeAttributes::from_token(root.extended(2), &Token::word("--", true), &the.simple_label);
        assert_eq!(the.simple_label, "the");
        assert_eq!(dash.simple_label, "the");
        assert!(dash.is_cosmetic());
        assert!(!the.is_cosmetic());
    }

    #[test]
    fn test_whitespace_only_token_is_cosmetic() {
        let attrs = NodeAttributes::from_token(
            NodeIdentity::from(vec![1, 2]),
            &Token::new("\n\n", false, false),
            "",
        );
        assert!(attrs.is_cosmetic());
    }
}
