//! Compiled structural query paths.
//!
//! A path is a small query language over the tree: `/translationUnit/externalDeclaration`
//! selects the top-level declarations, `//functionDefinition[0]` the first function
//! definition anywhere below the starting node. Each step is an axis (child or
//! descendant), a kind predicate (a concrete kind name, a family name, or `*`) and an
//! optional ordinal. Paths are compiled once, typically in a phase's init, and
//! evaluated per run.

use std::collections::HashMap;

use crate::{Error, Result};

use super::{KindFilter, NodeId, NodeKind, Root};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone)]
struct Step {
    axis: Axis,
    filter: KindFilter,
    ordinal: Option<usize>,
}

/// A compiled query plan, reusable across runs
#[derive(Debug, Clone)]
pub struct CompiledPath {
    steps: Vec<Step>,
}

lazy_static! {
    static ref KIND_NAMES: HashMap<&'static str, KindFilter> = {
        use NodeKind::*;
        let mut m = HashMap::new();
        m.insert("*", KindFilter::Any);
        m.insert("externalDeclaration", KindFilter::ExternalDeclaration);
        m.insert("statement", KindFilter::Statement);
        m.insert("expression", KindFilter::Expression);
        m.insert("declaration", KindFilter::Declaration);
        let exact = [
            ("translationUnit", TranslationUnit),
            ("versionStatement", Version),
            ("extensionStatement", Extension),
            ("pragmaStatement", Pragma),
            ("directive", Directive),
            ("layoutDefaults", LayoutDefaults),
            ("functionDefinition", FunctionDefinition),
            ("initDeclaration", InitDeclaration),
            ("declarationMember", DeclarationMember),
            ("interfaceBlock", InterfaceBlock),
            ("functionPrototype", FunctionPrototype),
            ("functionParameter", FunctionParameter),
            ("precisionDeclaration", PrecisionDeclaration),
            ("emptyDeclaration", EmptyDeclaration),
            ("compoundStatement", Compound),
            ("expressionStatement", ExpressionStatement),
            ("emptyStatement", EmptyStatement),
            ("declarationStatement", DeclarationStatement),
            ("selectionStatement", Selection),
            ("switchStatement", Switch),
            ("caseLabel", CaseLabel),
            ("whileStatement", While),
            ("doWhileStatement", DoWhile),
            ("forStatement", For),
            ("jumpStatement", Jump),
            ("conditionDeclaration", ConditionDeclaration),
            ("reference", Reference),
            ("literal", Literal),
            ("grouping", Grouping),
            ("memberAccess", MemberAccess),
            ("arrayAccess", ArrayAccess),
            ("functionCall", FunctionCall),
            ("unaryExpression", Unary),
            ("binaryExpression", Binary),
            ("assignmentExpression", Assignment),
            ("ternaryExpression", Ternary),
            ("sequenceExpression", Sequence),
            ("initializerList", InitializerList),
            ("fullySpecifiedType", FullySpecifiedType),
            ("typeQualifier", TypeQualifier),
            ("qualifierPart", QualifierPart),
            ("layoutQualifier", LayoutQualifier),
            ("layoutQualifierPart", LayoutQualifierPart),
            ("typeSpecifier", TypeSpecifier),
            ("structSpecifier", StructSpecifier),
            ("structField", StructField),
            ("arraySpecifier", ArraySpecifier),
            ("arrayDimension", ArrayDimension),
            ("arrayedIdentifier", ArrayedIdentifier),
            ("identifier", Identifier),
        ];
        for (name, kind) in exact.iter() {
            m.insert(*name, KindFilter::Exact(*kind));
        }
        m
    };
}

/// Compile a path expression into a reusable plan
pub fn compile_path(source: &str) -> Result<CompiledPath> {
    if !source.starts_with('/') {
        return Err(Error::MalformedPath(format!(
            "{:?} does not start with /",
            source
        )));
    }

    let mut steps = Vec::new();
    let mut rest = source;
    while !rest.is_empty() {
        let axis = if rest.starts_with("//") {
            rest = &rest[2..];
            Axis::Descendant
        } else if rest.starts_with('/') {
            rest = &rest[1..];
            Axis::Child
        } else {
            return Err(Error::MalformedPath(source.to_owned()));
        };

        let end = rest.find('/').unwrap_or_else(|| rest.len());
        let segment = &rest[..end];
        rest = &rest[end..];
        if segment.is_empty() {
            return Err(Error::MalformedPath(source.to_owned()));
        }

        let (name, ordinal) = match segment.find('[') {
            Some(open) => {
                let close = segment
                    .rfind(']')
                    .ok_or_else(|| Error::MalformedPath(source.to_owned()))?;
                let ordinal = segment[open + 1..close]
                    .parse::<usize>()
                    .map_err(|_| Error::MalformedPath(source.to_owned()))?;
                (&segment[..open], Some(ordinal))
            }
            None => (segment, None),
        };

        let filter = *KIND_NAMES
            .get(name)
            .ok_or_else(|| Error::MalformedPath(format!("unknown kind {:?}", name)))?;
        steps.push(Step {
            axis,
            filter,
            ordinal,
        });
    }

    Ok(CompiledPath { steps })
}

impl CompiledPath {
    /// Run the plan starting at `from`. The first child step may match the starting
    /// node itself, so `/translationUnit/...` works from the tree root.
    pub fn evaluate(&self, root: &Root, from: NodeId) -> Vec<NodeId> {
        let mut frontier = vec![from];
        for (index, step) in self.steps.iter().enumerate() {
            let mut matched = Vec::new();
            for node in &frontier {
                match step.axis {
                    Axis::Child if index == 0 => {
                        if step.filter.accepts(root.kind(*node)) {
                            matched.push(*node);
                        }
                    }
                    Axis::Child => {
                        for child in root.children(*node) {
                            if step.filter.accepts(root.kind(child)) {
                                matched.push(child);
                            }
                        }
                    }
                    Axis::Descendant => {
                        let mut stack = vec![*node];
                        while let Some(current) = stack.pop() {
                            if step.filter.accepts(root.kind(current)) {
                                matched.push(current);
                            }
                            let mut children = root.children(current);
                            children.reverse();
                            stack.extend(children);
                        }
                    }
                }
            }
            let mut seen = std::collections::HashSet::new();
            matched.retain(|node| seen.insert(*node));
            if let Some(ordinal) = step.ordinal {
                matched = match matched.get(ordinal) {
                    Some(node) => vec![*node],
                    None => Vec::new(),
                };
            }
            frontier = matched;
            if frontier.is_empty() {
                break;
            }
        }
        frontier
    }
}
