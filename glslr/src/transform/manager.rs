use std::collections::HashMap;

use crate::ast::{self, print, NodeId, Root, RootSupplier, WalkEvent};
use crate::parse::{Parser, ParseTokenFilter, ParsingStrategy};
use crate::Result;

use super::{InjectionPoint, PhaseContext, PhaseEntry, PhaseShape, PhaseState, Transformation};

/// Public facade coordinating parse, phase execution and printing.
///
/// The manager owns the parser and the registered transformations. Each call to
/// [TransformationManager::transform] parses the source, builds a fresh tree under
/// the configured root supplier, resets all transformation state, drives the
/// scheduled phases in `(index, group)` order with equal positions fused, and
/// prints the result.
///
/// `J` is the job-parameter state shared by the phases of one run.
pub struct TransformationManager<J> {
    parser: Parser,
    transformations: Vec<Transformation<J>>,
    root_supplier: RootSupplier,
}

impl<J> Default for TransformationManager<J> {
    fn default() -> Self {
        Self {
            parser: Parser::new(),
            transformations: Vec::new(),
            root_supplier: RootSupplier::Default,
        }
    }
}

impl<J> TransformationManager<J> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_transformation(&mut self, transformation: Transformation<J>) {
        self.transformations.push(transformation);
    }

    pub fn set_parsing_strategy(&mut self, strategy: ParsingStrategy) {
        self.parser.set_parsing_strategy(strategy);
    }

    pub fn set_parse_token_filter(&mut self, filter: Option<Box<dyn ParseTokenFilter>>) {
        self.parser.set_parse_token_filter(filter);
    }

    pub fn set_throw_parse_errors(&mut self, throw: bool) {
        self.parser.set_throw_parse_errors(throw);
    }

    pub fn set_root_supplier(&mut self, supplier: RootSupplier) {
        self.root_supplier = supplier;
    }

    pub fn parser_mut(&mut self) -> &mut Parser {
        &mut self.parser
    }

    /// Transform a source string with an externally supplied job state
    pub fn transform_with(&mut self, source: &str, job: &mut J) -> Result<String> {
        let mut root = self.root_supplier.supply();
        let unit = match self.parser.parse_translation_unit(&mut root, source)? {
            Some(unit) => unit,
            // parse errors are being swallowed; skip the run
            None => return Ok(source.to_owned()),
        };

        for transformation in &mut self.transformations {
            transformation.reset_state(job);
        }

        let mut entries: Vec<&mut PhaseEntry<J>> = self
            .transformations
            .iter_mut()
            .flat_map(|transformation| transformation.registry.iter_mut())
            .collect();
        entries.sort_by_key(|entry| (entry.index, entry.group));

        drive_phases(&mut entries, &mut root, unit, job)?;

        Ok(print::print_tree(&root, unit))
    }
}

impl<J: Default> TransformationManager<J> {
    /// Transform a source string with a fresh default job state
    pub fn transform(&mut self, source: &str) -> Result<String> {
        let mut job = J::default();
        self.transform_with(source, &mut job)
    }
}

fn drive_phases<J>(
    entries: &mut [&mut PhaseEntry<J>],
    root: &mut Root,
    unit: NodeId,
    job: &mut J,
) -> Result<()> {
    let mut cursors: HashMap<InjectionPoint, NodeId> = HashMap::new();

    let mut start = 0;
    while start < entries.len() {
        let position = (entries[start].index, entries[start].group);
        let mut end = start + 1;
        while end < entries.len() && (entries[end].index, entries[end].group) == position {
            end += 1;
        }
        let bucket = &mut entries[start..end];
        debug!(
            "phase position {:?}: {} phase(s)",
            position,
            bucket.len()
        );

        for entry in bucket.iter_mut() {
            if entry.state == PhaseState::Created {
                entry.phase.init()?;
                entry.state = PhaseState::Initialized;
            }
        }
        for entry in bucket.iter_mut() {
            entry.state = if entry.phase.is_active(job) {
                PhaseState::Active
            } else {
                trace!("phase at {:?} skipped for this run", position);
                PhaseState::Skipped
            };
        }

        for entry in bucket.iter_mut() {
            if entry.state == PhaseState::Active && entry.phase.shape() == PhaseShape::Run {
                let mut ctx = PhaseContext::new(root, job, unit, &mut cursors);
                entry.phase.run(&mut ctx, unit)?;
            }
        }

        let mut walkers: Vec<&mut &mut PhaseEntry<J>> = bucket
            .iter_mut()
            .filter(|entry| {
                entry.state == PhaseState::Active && entry.phase.shape() == PhaseShape::Walk
            })
            .collect();
        if !walkers.is_empty() {
            // equal positions share a single traversal
            ast::walk(root, unit, &mut |root, event, node| {
                let mut ctx = PhaseContext::new(root, job, unit, &mut cursors);
                for entry in walkers.iter_mut() {
                    match event {
                        WalkEvent::Enter => entry.phase.enter(&mut ctx, node)?,
                        WalkEvent::Exit => entry.phase.exit(&mut ctx, node)?,
                    }
                }
                Ok(())
            })?;
        }

        for entry in bucket.iter_mut() {
            entry.state = PhaseState::Initialized;
        }
        start = end;
    }
    Ok(())
}
