//! Parsing front-end over the external grammar-driven parser.
//!
//! The [Parser] wraps the `glsl` crate's per-shape parse entry points and adds the
//! concerns the engine needs around them: an explicit parsing strategy with a retry
//! state machine, a source-level token filter applied before the grammar sees the
//! input, an error-throwing toggle, and a debug hook receiving the errors of both
//! attempts.

use glsl::parser::{Parse, ParseError};
use glsl::syntax;

use crate::ast::{self, builder, NodeId, Root, RootSupplier};
use crate::{Error, Result};

/// The grammar shapes a source fragment can be parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseShape {
    TranslationUnit,
    ExternalDeclaration,
    Statement,
    CompoundStatement,
    Expression,
}

impl ParseShape {
    /// Whether a node of this kind has this parse shape
    pub fn accepts(self, kind: ast::NodeKind) -> bool {
        use crate::ast::KindFilter;
        match self {
            ParseShape::TranslationUnit => kind == ast::NodeKind::TranslationUnit,
            ParseShape::ExternalDeclaration => KindFilter::ExternalDeclaration.accepts(kind),
            ParseShape::Statement => KindFilter::Statement.accepts(kind),
            ParseShape::CompoundStatement => kind == ast::NodeKind::Compound,
            ParseShape::Expression => KindFilter::Expression.accepts(kind),
        }
    }
}

/// Parsing strategy of the retry state machine
///
/// The grammar has a single prediction mode, so the fast and exact attempts run the
/// same rules; under [ParsingStrategy::SllAndLlOnError] a failed parse is retried
/// once and the second outcome is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsingStrategy {
    SllAndLlOnError,
    SllOnly,
    LlOnly,
}

impl Default for ParsingStrategy {
    fn default() -> Self {
        ParsingStrategy::SllAndLlOnError
    }
}

/// Filter applied to the raw source before it reaches the grammar.
///
/// This is the seam for input the grammar cannot digest, such as string literals
/// used by printf-style debugging. State is reset before every parse.
pub trait ParseTokenFilter {
    fn reset_state(&mut self) {}

    fn filter(&mut self, source: &str) -> String;
}

type ErrorConsumer = Box<dyn FnMut(&ParseError, Option<&ParseError>)>;

enum ParseAttempt {
    Fast,
    Exact,
}

/// The enhanced parser: lexing, token filtering and strategy switching on demand
#[derive(Default)]
pub struct Parser {
    strategy: ParsingStrategy,
    throw_parse_errors: Option<bool>,
    token_filter: Option<Box<dyn ParseTokenFilter>>,
    error_consumer: Option<ErrorConsumer>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_parsing_strategy(&mut self, strategy: ParsingStrategy) {
        self.strategy = strategy;
    }

    /// Shorthand for the fast strategy
    pub fn set_sll_only(&mut self) {
        self.set_parsing_strategy(ParsingStrategy::SllOnly);
    }

    /// Shorthand for the exact strategy
    pub fn set_ll_only(&mut self) {
        self.set_parsing_strategy(ParsingStrategy::LlOnly);
    }

    /// When disabled, a failing translation-unit parse is swallowed and the
    /// transformation run is skipped instead of erroring
    pub fn set_throw_parse_errors(&mut self, throw: bool) {
        self.throw_parse_errors = Some(throw);
    }

    pub fn throw_parse_errors(&self) -> bool {
        self.throw_parse_errors.unwrap_or(true)
    }

    pub fn set_parse_token_filter(&mut self, filter: Option<Box<dyn ParseTokenFilter>>) {
        self.token_filter = filter;
    }

    /// Debug hook receiving the fast-attempt error and, when the retry also
    /// failed, the exact-attempt error
    pub fn set_internal_error_consumer(&mut self, consumer: Option<ErrorConsumer>) {
        self.error_consumer = consumer;
    }

    fn run_parse<T: Parse>(&mut self, source: &str) -> std::result::Result<T, ParseError> {
        let filtered;
        let source = match self.token_filter.as_mut() {
            Some(filter) => {
                filter.reset_state();
                filtered = filter.filter(source);
                filtered.as_str()
            }
            None => source,
        };

        let mut state = ParseAttempt::Fast;
        let mut first_error = None;
        loop {
            match state {
                ParseAttempt::Fast => match T::parse(source) {
                    Ok(parsed) => return Ok(parsed),
                    Err(error) => match self.strategy {
                        ParsingStrategy::SllOnly | ParsingStrategy::LlOnly => return Err(error),
                        ParsingStrategy::SllAndLlOnError => {
                            trace!("fast parse attempt failed, retrying: {}", error);
                            first_error = Some(error);
                            state = ParseAttempt::Exact;
                        }
                    },
                },
                ParseAttempt::Exact => {
                    let second = T::parse(source);
                    if let Some(consumer) = self.error_consumer.as_mut() {
                        let first = first_error
                            .as_ref()
                            .expect("exact attempt always follows a failed fast attempt");
                        consumer(first, second.as_ref().err());
                    }
                    return second;
                }
            }
        }
    }

    /// Parse a whole translation unit into `root`, honoring the error toggle.
    ///
    /// Returns `Ok(None)` when parse errors are being swallowed and the source did
    /// not parse.
    pub fn parse_translation_unit(
        &mut self,
        root: &mut Root,
        source: &str,
    ) -> Result<Option<NodeId>> {
        match self.run_parse::<syntax::TranslationUnit>(source) {
            Ok(tu) => Ok(Some(builder::build_translation_unit(root, tu))),
            Err(error) => {
                if self.throw_parse_errors() {
                    Err(error.into())
                } else {
                    debug!("swallowed parse error: {}", error);
                    Ok(None)
                }
            }
        }
    }

    /// Parse a detached external declaration into an existing root
    pub fn parse_external_declaration(&mut self, root: &mut Root, source: &str) -> Result<NodeId> {
        let parsed = self.run_parse::<syntax::ExternalDeclaration>(source)?;
        Ok(builder::build_external_declaration(root, parsed))
    }

    /// Parse a detached statement into an existing root
    pub fn parse_statement(&mut self, root: &mut Root, source: &str) -> Result<NodeId> {
        let parsed = self.run_parse::<syntax::Statement>(source)?;
        Ok(builder::build_statement(root, parsed))
    }

    /// Parse a detached expression into an existing root
    pub fn parse_expression(&mut self, root: &mut Root, source: &str) -> Result<NodeId> {
        let parsed = self.run_parse::<syntax::Expr>(source)?;
        Ok(builder::build_expr(root, parsed))
    }

    /// Parse a fragment of the given shape into a freshly supplied root, installing
    /// it as that root's tree so its indices are populated
    pub fn parse_node_separate(
        &mut self,
        supplier: RootSupplier,
        shape: ParseShape,
        source: &str,
    ) -> Result<(Root, NodeId)> {
        let mut root = supplier.supply();
        let node = match shape {
            ParseShape::TranslationUnit => {
                let parsed = self.run_parse::<syntax::TranslationUnit>(source)?;
                return Ok({
                    let node = builder::build_translation_unit(&mut root, parsed);
                    (root, node)
                });
            }
            ParseShape::ExternalDeclaration => {
                let parsed = self.run_parse::<syntax::ExternalDeclaration>(source)?;
                builder::build_external_declaration(&mut root, parsed)
            }
            ParseShape::Statement => {
                let parsed = self.run_parse::<syntax::Statement>(source)?;
                builder::build_statement(&mut root, parsed)
            }
            ParseShape::CompoundStatement => {
                let parsed = self.run_parse::<syntax::CompoundStatement>(source)?;
                builder::build_compound(&mut root, parsed)
            }
            ParseShape::Expression => {
                let parsed = self.run_parse::<syntax::Expr>(source)?;
                builder::build_expr(&mut root, parsed)
            }
        };
        let mut session = root.index_build_session();
        session.set_tree_root(node);
        drop(session);
        Ok((root, node))
    }
}

/// Parse a fragment into an existing root with default parser settings.
///
/// Patterns and injected fragments are compiled through this; the configured
/// manager parser only drives the main source.
pub fn parse_fragment(root: &mut Root, shape: ParseShape, source: &str) -> Result<NodeId> {
    let mut parser = Parser::new();
    match shape {
        ParseShape::TranslationUnit => {
            let parsed = parser.run_parse::<syntax::TranslationUnit>(source)?;
            Ok(builder::build_translation_unit(root, parsed))
        }
        ParseShape::ExternalDeclaration => parser.parse_external_declaration(root, source),
        ParseShape::Statement => parser.parse_statement(root, source),
        ParseShape::CompoundStatement => {
            let parsed = parser.run_parse::<syntax::CompoundStatement>(source)?;
            Ok(builder::build_compound(root, parsed))
        }
        ParseShape::Expression => parser.parse_expression(root, source),
    }
}

/// Error-check a node against the parse shape it is expected to have
pub fn expect_shape(root: &Root, node: NodeId, shape: ParseShape) -> Result<()> {
    let kind = root.kind(node);
    if shape.accepts(kind) {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            expected: shape,
            found: kind,
        })
    }
}
