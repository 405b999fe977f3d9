use std::collections::HashMap;

use crate::ast::{NodeId, NodeKind, Root};
use crate::parse::{self, ParseShape};
use crate::pattern::{MatchResult, Matcher};
use crate::{Error, Result};

/// Execution shape of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseShape {
    /// Enter/exit callbacks driven by a depth-first traversal; phases at the same
    /// scheduling position share one traversal
    Walk,
    /// A once-per-tree callback, typically a bulk query over the indices
    Run,
}

/// Lifecycle state of a scheduled phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseState {
    Created,
    Initialized,
    Active,
    Skipped,
}

/// One unit of transformation work.
///
/// Walk phases override [TransformationPhase::enter] and [TransformationPhase::exit];
/// run phases override [TransformationPhase::run] and report [PhaseShape::Run] from
/// [TransformationPhase::shape]. Compiled patterns and paths belong in
/// [TransformationPhase::init], which executes at most once per manager binding.
pub trait TransformationPhase<J> {
    fn shape(&self) -> PhaseShape {
        PhaseShape::Walk
    }

    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Queried once per run; an inactive phase is skipped for that run
    fn is_active(&self, _job: &J) -> bool {
        true
    }

    fn enter(&mut self, _ctx: &mut PhaseContext<J>, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn exit(&mut self, _ctx: &mut PhaseContext<J>, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn run(&mut self, _ctx: &mut PhaseContext<J>, _unit: NodeId) -> Result<()> {
        Ok(())
    }
}

/// A named position in the translation unit's top-level child sequence, or inside a
/// named function body. Repeated insertions at one point preserve call order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InjectionPoint {
    BeforeVersion,
    BeforeExtensions,
    BeforeDirectives,
    BeforeDeclarations,
    BeforeEof,
    BeforeFunctionBody(String),
    EndOfFunctionBody(String),
}

// Top-level children are ordered by zone: version, extensions, other directives,
// then declarations
fn node_zone(kind: NodeKind) -> usize {
    match kind {
        NodeKind::Version => 1,
        NodeKind::Extension => 2,
        NodeKind::Pragma | NodeKind::Directive => 3,
        _ => 4,
    }
}

impl InjectionPoint {
    fn target_zone(&self) -> usize {
        match self {
            InjectionPoint::BeforeVersion => 1,
            InjectionPoint::BeforeExtensions => 2,
            InjectionPoint::BeforeDirectives => 3,
            InjectionPoint::BeforeDeclarations => 4,
            _ => usize::MAX,
        }
    }
}

/// Environment a phase operates in: the tree, the per-run job state and the
/// injection cursors of the current run
pub struct PhaseContext<'a, J> {
    pub root: &'a mut Root,
    pub job: &'a mut J,
    unit: NodeId,
    cursors: &'a mut HashMap<InjectionPoint, NodeId>,
}

impl<'a, J> PhaseContext<'a, J> {
    pub(crate) fn new(
        root: &'a mut Root,
        job: &'a mut J,
        unit: NodeId,
        cursors: &'a mut HashMap<InjectionPoint, NodeId>,
    ) -> Self {
        Self {
            root,
            job,
            unit,
            cursors,
        }
    }

    /// The translation unit driving this run
    pub fn unit(&self) -> NodeId {
        self.unit
    }

    /// Parse a detached external declaration fragment into the tree's root
    pub fn parse_external_declaration(&mut self, source: &str) -> Result<NodeId> {
        parse::parse_fragment(self.root, ParseShape::ExternalDeclaration, source)
    }

    /// Parse a detached statement fragment into the tree's root
    pub fn parse_statement(&mut self, source: &str) -> Result<NodeId> {
        parse::parse_fragment(self.root, ParseShape::Statement, source)
    }

    /// Parse a detached expression fragment into the tree's root
    pub fn parse_expression(&mut self, source: &str) -> Result<NodeId> {
        parse::parse_fragment(self.root, ParseShape::Expression, source)
    }

    /// Parse and inject an external declaration at the given point
    pub fn inject_external_declaration(
        &mut self,
        source: &str,
        point: InjectionPoint,
    ) -> Result<NodeId> {
        let node = self.parse_external_declaration(source)?;
        self.inject_node(point, node)?;
        Ok(node)
    }

    /// Insert a detached node at the given injection point
    pub fn inject_node(&mut self, point: InjectionPoint, node: NodeId) -> Result<()> {
        match &point {
            InjectionPoint::EndOfFunctionBody(name) => {
                let body = self.function_body(name)?;
                self.root.append_child(body, node)
            }
            InjectionPoint::BeforeFunctionBody(name) => {
                let body = self.function_body(name)?;
                let position = self.cursor_position(&point, body, 0);
                self.root.insert_child(body, position, node)?;
                self.cursors.insert(point, node);
                Ok(())
            }
            _ => {
                let unit = self.unit;
                let anchor = self.zone_anchor(point.target_zone());
                let position = self.cursor_position(&point, unit, anchor);
                self.root.insert_child(unit, position, node)?;
                self.cursors.insert(point, node);
                Ok(())
            }
        }
    }

    /// Insert several detached nodes at one point, in order, batching the index
    /// updates in a build session
    pub fn inject_nodes(&mut self, point: InjectionPoint, nodes: Vec<NodeId>) -> Result<()> {
        let (parent, mut position) = match &point {
            InjectionPoint::EndOfFunctionBody(name) => {
                let body = self.function_body(name)?;
                (body, self.root.children(body).len())
            }
            InjectionPoint::BeforeFunctionBody(name) => {
                let body = self.function_body(name)?;
                (body, self.cursor_position(&point, body, 0))
            }
            _ => {
                let anchor = self.zone_anchor(point.target_zone());
                (self.unit, self.cursor_position(&point, self.unit, anchor))
            }
        };

        let mut result = Ok(());
        let mut last = None;
        let mut session = self.root.index_build_session();
        for node in nodes {
            if let Err(error) = session.insert_child(parent, position, node) {
                result = Err(error);
                break;
            }
            position += 1;
            last = Some(node);
        }
        drop(session);

        if !matches!(point, InjectionPoint::EndOfFunctionBody(_)) {
            if let Some(last) = last {
                self.cursors.insert(point, last);
            }
        }
        result
    }

    /// Siblings of a node, the full child sequence of its parent
    pub fn siblings(&self, node: NodeId) -> Result<Vec<NodeId>> {
        let parent = self
            .root
            .parent(node)
            .ok_or(Error::DetachmentViolation(node))?;
        Ok(self.root.children(parent))
    }

    /// Insert a statement at the start of `main`
    pub fn prepend_main_body(&mut self, statement: NodeId) -> Result<()> {
        self.inject_node(
            InjectionPoint::BeforeFunctionBody("main".to_owned()),
            statement,
        )
    }

    /// Append a statement to the end of `main`
    pub fn append_main_body(&mut self, statement: NodeId) -> Result<()> {
        self.inject_node(
            InjectionPoint::EndOfFunctionBody("main".to_owned()),
            statement,
        )
    }

    fn function_body(&self, name: &str) -> Result<NodeId> {
        for candidate in self.root.external_declaration_index().get_stream(name) {
            if let crate::ast::Content::FunctionDefinition { body, .. } =
                self.root.content(candidate)
            {
                return Ok(*body);
            }
        }
        Err(Error::NoSuchFunction(name.to_owned()))
    }

    // First index of the parent's child sequence belonging to a zone at or past the
    // target, so each zone keeps its internal order
    fn zone_anchor(&self, target_zone: usize) -> usize {
        let children = self.root.children(self.unit);
        children
            .iter()
            .position(|child| node_zone(self.root.kind(*child)) >= target_zone)
            .unwrap_or_else(|| children.len())
    }

    // Insertion index honoring the per-run cursor: after the previous insertion at
    // this point when there was one, at the computed anchor otherwise
    fn cursor_position(&self, point: &InjectionPoint, parent: NodeId, anchor: usize) -> usize {
        if let Some(previous) = self.cursors.get(point) {
            if self.root.parent(*previous) == Some(parent) {
                if let Some(position) = self
                    .root
                    .children(parent)
                    .iter()
                    .position(|id| id == previous)
                {
                    return position + 1;
                }
            }
        }
        anchor
    }
}

type RewriteFn<J> = Box<dyn FnMut(&mut PhaseContext<J>, NodeId, &MatchResult) -> Result<()>>;

/// Run-shaped convenience phase: iterate an index snapshot, apply a matcher,
/// rewrite the matching candidates
pub struct MatchPhase<J> {
    kind: NodeKind,
    matcher: Matcher,
    rewrite: RewriteFn<J>,
}

impl<J> MatchPhase<J> {
    pub fn new(
        kind: NodeKind,
        matcher: Matcher,
        rewrite: impl FnMut(&mut PhaseContext<J>, NodeId, &MatchResult) -> Result<()> + 'static,
    ) -> Self {
        Self {
            kind,
            matcher,
            rewrite: Box::new(rewrite),
        }
    }
}

impl<J> TransformationPhase<J> for MatchPhase<J> {
    fn shape(&self) -> PhaseShape {
        PhaseShape::Run
    }

    fn run(&mut self, ctx: &mut PhaseContext<J>, _unit: NodeId) -> Result<()> {
        let candidates = ctx.root.node_index().get(&self.kind);
        debug!(
            "match phase over {} {:?} candidates",
            candidates.len(),
            self.kind
        );
        for candidate in candidates {
            // earlier rewrites may have detached or deleted this candidate
            if !ctx.root.exists(candidate) || !ctx.root.is_attached(candidate) {
                continue;
            }
            if let Some(captures) = self.matcher.match_node(ctx.root, candidate)? {
                (self.rewrite)(ctx, candidate, &captures)?;
            }
        }
        Ok(())
    }
}
