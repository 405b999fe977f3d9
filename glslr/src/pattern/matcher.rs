use std::collections::HashMap;

use crate::ast::{KindFilter, NodeId, NodeKind, Root, RootSupplier};
use crate::parse::{self, ParseShape, Parser};
use crate::{Error, Result};

use super::PLACEHOLDER_PREFIX;

struct ClassWildcard {
    name: String,
    /// `None` accepts any kind at the exemplar's position
    kind: Option<NodeKind>,
}

type PostCondition = Box<dyn Fn(&Root, &MatchResult) -> bool>;

/// Captures produced by a successful match
#[derive(Debug, Default, Clone)]
pub struct MatchResult {
    nodes: HashMap<String, NodeId>,
    strings: HashMap<String, String>,
}

impl MatchResult {
    /// Captured node under a wildcard name, checked against the expected kind
    pub fn node_match(&self, root: &Root, name: &str, expected: KindFilter) -> Result<NodeId> {
        let node = *self
            .nodes
            .get(name)
            .ok_or_else(|| Error::unique(name, 0))?;
        let found = root.kind(node);
        if expected.accepts(found) {
            Ok(node)
        } else {
            Err(Error::KindMismatch {
                node,
                found,
                expected: expected.to_string(),
            })
        }
    }

    /// Captured identifier text under a placeholder name
    pub fn string_match(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    fn capture_node(&mut self, root: &Root, name: &str, node: NodeId) -> bool {
        match self.nodes.get(name) {
            // repeated placeholders must capture equal subtrees
            Some(previous) => root.subtree_eq(*previous, root, node),
            None => {
                self.nodes.insert(name.to_owned(), node);
                true
            }
        }
    }

    fn capture_string(&mut self, name: &str, text: &str) -> bool {
        match self.strings.get(name) {
            Some(previous) => previous == text,
            None => {
                self.strings.insert(name.to_owned(), text.to_owned());
                true
            }
        }
    }
}

/// A compiled structural pattern
pub struct Matcher {
    pattern: Root,
    pattern_root: NodeId,
    prefix: String,
    shape: ParseShape,
    wildcards: HashMap<NodeId, ClassWildcard>,
    post_condition: Option<PostCondition>,
}

impl Matcher {
    /// Compile a pattern from a fragment of the given parse shape
    pub fn new(source: &str, shape: ParseShape, prefix: &str) -> Result<Self> {
        let (pattern, pattern_root) =
            Parser::new().parse_node_separate(RootSupplier::Default, shape, source)?;
        debug!("compiled matcher for {:?} pattern {:?}", shape, source);
        Ok(Self {
            pattern,
            pattern_root,
            prefix: prefix.to_owned(),
            shape,
            wildcards: HashMap::new(),
            post_condition: None,
        })
    }

    pub fn with_external_declaration(source: &str) -> Result<Self> {
        Self::new(source, ParseShape::ExternalDeclaration, PLACEHOLDER_PREFIX)
    }

    pub fn with_statement(source: &str) -> Result<Self> {
        Self::new(source, ParseShape::Statement, PLACEHOLDER_PREFIX)
    }

    pub fn with_expression(source: &str) -> Result<Self> {
        Self::new(source, ParseShape::Expression, PLACEHOLDER_PREFIX)
    }

    /// The root holding the compiled pattern, for locating exemplar nodes
    pub fn pattern(&self) -> &Root {
        &self.pattern
    }

    pub fn pattern_node(&self) -> NodeId {
        self.pattern_root
    }

    /// The unique placeholder identifier node spelled `<prefix><name>`
    pub fn find_placeholder(&self, name: &str) -> Result<NodeId> {
        self.pattern
            .identifier_index()
            .get_unique(format!("{}{}", self.prefix, name).as_str())
    }

    /// Register the exemplar's position as a kind wildcard.
    ///
    /// A trailing `*` in the name makes the capture kind-agnostic; otherwise the
    /// candidate node must have the declared kind. The capture key is the name with
    /// the `*` stripped.
    pub fn mark_class_wildcard(&mut self, name: &str, exemplar: NodeId, kind: NodeKind) {
        let (key, any) = match name.strip_suffix('*') {
            Some(stripped) => (stripped, true),
            None => (name, false),
        };
        self.wildcards.insert(
            exemplar,
            ClassWildcard {
                name: key.to_owned(),
                kind: if any { None } else { Some(kind) },
            },
        );
    }

    /// Locate the `kind` ancestor of every occurrence of the placeholder and
    /// register each position as a class wildcard under the same name
    pub fn mark_class_wildcard_at(&mut self, name: &str, kind: NodeKind) -> Result<()> {
        let spelled = format!("{}{}", self.prefix, name.trim_end_matches('*'));
        let placeholders = self.pattern.identifier_index().get(spelled.as_str());
        if placeholders.is_empty() {
            return Err(Error::unique(spelled, 0));
        }
        for placeholder in placeholders {
            let exemplar = self
                .pattern
                .ancestor_of_kind(placeholder, kind)
                .ok_or(Error::DetachmentViolation(placeholder))?;
            self.mark_class_wildcard(name, exemplar, kind);
        }
        Ok(())
    }

    /// Add a post-condition checked after structural matching succeeds
    pub fn set_post_condition(
        &mut self,
        condition: impl Fn(&Root, &MatchResult) -> bool + 'static,
    ) {
        self.post_condition = Some(Box::new(condition));
    }

    /// Match a candidate subtree, capturing placeholders.
    ///
    /// Returns `Ok(None)` when the candidate does not match; a candidate of the
    /// wrong parse shape is an error.
    pub fn match_node(&self, root: &Root, candidate: NodeId) -> Result<Option<MatchResult>> {
        parse::expect_shape(root, candidate, self.shape)?;

        let mut result = MatchResult::default();
        if !self.compare(self.pattern_root, root, candidate, &mut result) {
            return Ok(None);
        }
        if let Some(condition) = self.post_condition.as_ref() {
            if !condition(root, &result) {
                trace!("post-condition rejected candidate {:?}", candidate);
                return Ok(None);
            }
        }
        Ok(Some(result))
    }

    fn compare(
        &self,
        pattern_id: NodeId,
        root: &Root,
        candidate: NodeId,
        result: &mut MatchResult,
    ) -> bool {
        if let Some(wildcard) = self.wildcards.get(&pattern_id) {
            if let Some(kind) = wildcard.kind {
                if root.kind(candidate) != kind {
                    return false;
                }
            }
            return result.capture_node(root, &wildcard.name, candidate);
        }

        if let Some(name) = self.pattern.identifier_name(pattern_id) {
            if let Some(key) = name.strip_prefix(self.prefix.as_str()) {
                // identifier wildcard: any spelling matches and is captured
                return match root.identifier_name(candidate) {
                    Some(text) => result.capture_string(key, text),
                    None => false,
                };
            }
        }

        if !self
            .pattern
            .content(pattern_id)
            .shallow_eq(root.content(candidate))
        {
            return false;
        }

        let pattern_children = self.pattern.children(pattern_id);
        let candidate_children = root.children(candidate);
        pattern_children.len() == candidate_children.len()
            && pattern_children
                .iter()
                .zip(candidate_children.iter())
                .all(|(p, c)| self.compare(*p, root, *c, result))
    }
}
