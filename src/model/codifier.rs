//! Token codes and node identities.
//!
//! - [Codifier]: maps distinct lowercase token strings to small integer codes.
//! - [NodeIdentity]: cumulative code path identifying a merged node.

use std::collections::HashMap;
use std::fmt;

/// Code assigned to a distinct lowercase token string; starts at 1.
pub type Code = u32;

// =#========================================================================#=
// CODIFIER
// =#========================================================================#=
/// Assigns a stable code to each distinct (lowercase) token string.
///
/// The first call with a new string assigns the next sequential code,
/// starting at 1; later calls with the same string (in any casing) return the
/// same code. There is no removal.
///
/// A codifier must only be shared by sentences of the same build, otherwise
/// node identities of unrelated corpora alias each other.
///
/// # Example
/// ```
/// use text_tree::model::Codifier;
///
/// let mut codifier = Codifier::new();
///
/// let code_the = codifier.codify("The");  // 1
/// let code_cat = codifier.codify("cat");  // 2
/// let code_the2 = codifier.codify("the"); // 1 (case-normalised)
///
/// assert_eq!(code_the, 1);
/// assert_eq!(code_the, code_the2);
/// assert_ne!(code_the, code_cat);
/// assert_eq!(codifier.text_of(code_cat), Some("cat"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Codifier {
    /// Distinct lowercase strings; string with code `c` at position `c - 1`
    texts: Vec<String>,
    /// Map from lowercase string to its code
    codes: HashMap<String, Code>,
}

impl Codifier {
    /// Creates a new, empty codifier.
    pub fn new() -> Self {
        Codifier::default()
    }

    /// Returns the code of `text`, assigning the next free code if the
    /// lowercase form of `text` has not been seen before.
    pub fn codify(&mut self, text: &str) -> Code {
        let key = text.to_lowercase();
        if let Some(&code) = self.codes.get(&key) {
            return code;
        }

        self.texts.push(key.clone());
        let code = self.texts.len() as Code;
        self.codes.insert(key, code);
        code
    }

    /// Looks up the code of `text` without assigning one.
    pub fn code_of(&self, text: &str) -> Option<Code> {
        self.codes.get(&text.to_lowercase()).copied()
    }

    /// Returns the lowercase string that was assigned `code`.
    pub fn text_of(&self, code: Code) -> Option<&str> {
        let position = (code as usize).checked_sub(1)?;
        self.texts.get(position).map(String::as_str)
    }

    /// Returns the number of codes assigned so far.
    pub fn num_codes(&self) -> usize {
        self.texts.len()
    }

    /// Returns `true` if no code has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

// =#========================================================================#=
// NODE IDENTITY
// =#========================================================================#=
/// Identity of a merged node: the codes of all tokens from the sentence root
/// up to and including the node's token.
///
/// Two tokens with the same code path are the same node. The empty path is
/// reserved for the synthetic root joining several sentence roots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeIdentity(Vec<Code>);

impl NodeIdentity {
    /// Identity of the synthetic root.
    pub fn synthetic_root() -> Self {
        NodeIdentity(Vec::new())
    }

    /// Returns the identity one token deeper, ending in `code`.
    pub fn extended(&self, code: Code) -> Self {
        let mut path = Vec::with_capacity(self.0.len() + 1);
        path.extend_from_slice(&self.0);
        path.push(code);
        NodeIdentity(path)
    }

    /// Returns the code path.
    pub fn codes(&self) -> &[Code] {
        &self.0
    }

    /// Returns the depth of the node, i.e. the length of its code path.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the synthetic root identity.
    pub fn is_synthetic_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Code>> for NodeIdentity {
    fn from(codes: Vec<Code>) -> Self {
        NodeIdentity(codes)
    }
}

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{code}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_of_code_zero_is_none() {
        let mut codifier = Codifier::new();
        codifier.codify("kea");
        assert_eq!(codifier.text_of(0), None);
        assert_eq!(codifier.text_of(1), Some("kea"));
        assert_eq!(codifier.text_of(2), None);
    }

    #[test]
    fn test_identity_display_joins_codes() {
        let identity = NodeIdentity::synthetic_root().extended(3).extended(14);
        assert_eq!(identity.to_string(), "3.14");
        assert_eq!(identity.depth(), 2);
    }

    #[test]
    fn test_identities_do_not_alias_concatenations() {
        // "ab" + "c" and "a" + "bc" concatenate to the same text
        let mut codifier = Codifier::new();
        let left = NodeIdentity::default()
            .extended(codifier.codify("ab"))
            .extended(codifier.codify("c"));
        let right = NodeIdentity::default()
            .extended(codifier.codify("a"))
            .extended(codifier.codify("bc"));
        assert_ne!(left, right);
    }
}
