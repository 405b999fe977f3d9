use std::collections::HashMap;

use crate::ast::{KindFilter, NodeId, Root, RootSupplier};
use crate::parse::{ParseShape, Parser};
use crate::{Error, Result};

use super::PLACEHOLDER_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoleShape {
    Node(KindFilter),
    Identifier,
}

#[derive(Debug)]
struct Hole {
    name: String,
    node: NodeId,
    shape: HoleShape,
}

/// A value filling a template hole on instantiation
#[derive(Debug)]
pub enum TemplateValue {
    /// A detached node already living in the target root
    Node(NodeId),
    /// An identifier spelling
    Ident(String),
}

/// A compiled code-generation template with typed holes
pub struct Template {
    pattern: Root,
    pattern_root: NodeId,
    prefix: String,
    holes: Vec<Hole>,
}

impl Template {
    /// Compile a template from a fragment of the given parse shape
    pub fn new(source: &str, shape: ParseShape, prefix: &str) -> Result<Self> {
        let (pattern, pattern_root) =
            Parser::new().parse_node_separate(RootSupplier::Default, shape, source)?;
        debug!("compiled template for {:?} pattern {:?}", shape, source);
        Ok(Self {
            pattern,
            pattern_root,
            prefix: prefix.to_owned(),
            holes: Vec::new(),
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

    pub fn pattern(&self) -> &Root {
        &self.pattern
    }

    fn find_placeholder(&self, name: &str) -> Result<NodeId> {
        self.pattern
            .identifier_index()
            .get_unique(format!("{}{}", self.prefix, name).as_str())
    }

    /// Declare the placeholder a node hole: the smallest enclosing node accepted by
    /// the filter is replaced by the supplied node on instantiation
    pub fn mark_local_replacement(&mut self, name: &str, filter: KindFilter) -> Result<()> {
        let placeholder = self.find_placeholder(name)?;
        let mut node = placeholder;
        while !filter.accepts(self.pattern.kind(node)) {
            node = self
                .pattern
                .parent(node)
                .ok_or_else(|| Error::hole(name, "has no enclosing node of the declared kind"))?;
        }
        self.holes.push(Hole {
            name: name.to_owned(),
            node,
            shape: HoleShape::Node(filter),
        });
        Ok(())
    }

    /// Declare a pattern node a hole directly, for positions already located
    /// through the pattern root's indices
    pub fn mark_local_replacement_at(
        &mut self,
        name: &str,
        node: NodeId,
        filter: KindFilter,
    ) -> Result<()> {
        if !self.pattern.exists(node) {
            return Err(Error::DetachmentViolation(node));
        }
        self.holes.push(Hole {
            name: name.to_owned(),
            node,
            shape: HoleShape::Node(filter),
        });
        Ok(())
    }

    /// Declare the placeholder an identifier hole: its spelling is supplied on
    /// instantiation
    pub fn mark_identifier_replacement(&mut self, name: &str) -> Result<()> {
        let placeholder = self.find_placeholder(name)?;
        self.holes.push(Hole {
            name: name.to_owned(),
            node: placeholder,
            shape: HoleShape::Identifier,
        });
        Ok(())
    }

    /// Instantiate the template into a target root.
    ///
    /// Every hole must be filled by exactly one named value and node values must be
    /// detached nodes of the declared kind living in `target`; the check happens
    /// before any cloning, so either a single fresh tree is returned or nothing
    /// surfaces. The clone is detached; attaching it registers it under the target
    /// root's policies.
    pub fn instantiate(
        &self,
        target: &mut Root,
        values: &[(&str, TemplateValue)],
    ) -> Result<NodeId> {
        for hole in &self.holes {
            let supplied = values.iter().filter(|(name, _)| *name == hole.name).count();
            if supplied != 1 {
                return Err(Error::hole(
                    hole.name.as_str(),
                    format!("expects exactly one value, got {}", supplied),
                ));
            }
        }
        for (name, value) in values {
            let hole = self
                .holes
                .iter()
                .find(|hole| hole.name == *name)
                .ok_or_else(|| Error::hole(*name, "is not declared by this template"))?;
            match (hole.shape, value) {
                (HoleShape::Node(filter), TemplateValue::Node(node)) => {
                    if !target.exists(*node) || target.parent(*node).is_some() {
                        return Err(Error::DetachmentViolation(*node));
                    }
                    let found = target.kind(*node);
                    if !filter.accepts(found) {
                        return Err(Error::KindMismatch {
                            node: *node,
                            found,
                            expected: filter.to_string(),
                        });
                    }
                }
                (HoleShape::Identifier, TemplateValue::Ident(_)) => {}
                (HoleShape::Identifier, TemplateValue::Node(node)) => {
                    if target.identifier_name(*node).is_none() {
                        return Err(Error::hole(*name, "expects an identifier"));
                    }
                }
                (HoleShape::Node(_), TemplateValue::Ident(_)) => {
                    return Err(Error::hole(*name, "expects a node, got an identifier"));
                }
            }
        }

        let mut mapping = HashMap::new();
        let clone = target.clone_from_mapped(&self.pattern, self.pattern_root, &mut mapping);

        let mut result = clone;
        for (name, value) in values {
            let hole = self
                .holes
                .iter()
                .find(|hole| hole.name == *name)
                .expect("validated above");
            let hole_clone = mapping[&hole.node];
            match (hole.shape, value) {
                (HoleShape::Node(_), TemplateValue::Node(node)) => {
                    if hole_clone == result {
                        result = *node;
                    } else {
                        target.replace_and_delete(hole_clone, *node)?;
                    }
                }
                (HoleShape::Identifier, TemplateValue::Ident(text)) => {
                    target.rename_identifier(hole_clone, text.clone())?;
                }
                (HoleShape::Identifier, TemplateValue::Node(node)) => {
                    let text = target
                        .identifier_name(*node)
                        .expect("validated above")
                        .to_owned();
                    target.rename_identifier(hole_clone, text)?;
                }
                (HoleShape::Node(_), TemplateValue::Ident(_)) => unreachable!(),
            }
        }

        trace!("instantiated template into {:?}", result);
        Ok(result)
    }
}
