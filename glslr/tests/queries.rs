//! Compiled paths and bounded ancestor searches

mod common;

use glslr::ast::path::{compile_path, CompiledPath};
use glslr::ast::{NodeId, NodeKind, RootSupplier};
use glslr::parse::{ParseShape, Parser};
use glslr::transform::{
    PhaseContext, PhaseShape, Transformation, TransformationManager, TransformationPhase,
};
use glslr::{Error, Result};

use pretty_assertions::assert_eq;

const SOURCE: &str = r#"#version 330
uniform float alpha;
uniform vec2 beta;

void main() {
    if (alpha > 0.5) {
        gl_FragColor = vec4(beta, 0.0, alpha);
    }
}
"#;

fn parse(source: &str) -> (glslr::ast::Root, glslr::ast::NodeId) {
    common::init_logger();
    Parser::new()
        .parse_node_separate(RootSupplier::Default, ParseShape::TranslationUnit, source)
        .expect("failed to parse")
}

#[test]
fn child_paths_select_top_level_declarations() {
    let (root, unit) = parse(SOURCE);

    let path = compile_path("/translationUnit/externalDeclaration").unwrap();
    assert_eq!(path.evaluate(&root, unit).len(), root.children(unit).len());

    let path = compile_path("/translationUnit/functionDefinition").unwrap();
    assert_eq!(path.evaluate(&root, unit).len(), 1);
}

#[test]
fn descendant_paths_reach_into_bodies() {
    let (root, unit) = parse(SOURCE);

    let path = compile_path("//functionCall").unwrap();
    let calls = path.evaluate(&root, unit);
    assert_eq!(calls.len(), 1);
    assert_eq!(root.kind(calls[0]), NodeKind::FunctionCall);

    let path = compile_path("//selectionStatement//reference").unwrap();
    // alpha in the condition, gl_FragColor, beta and alpha in the body
    assert_eq!(path.evaluate(&root, unit).len(), 4);
}

#[test]
fn ordinals_pick_a_single_match() {
    let (root, unit) = parse(SOURCE);

    let path = compile_path("/translationUnit/initDeclaration[1]").unwrap();
    let picked = path.evaluate(&root, unit);
    assert_eq!(picked.len(), 1);
    let names = root.declared_names(picked[0]);
    assert_eq!(names, vec!["beta".to_owned()]);
}

#[test]
fn malformed_paths_are_rejected() {
    match compile_path("translationUnit") {
        Err(Error::MalformedPath(_)) => {}
        other => panic!("expected a malformed path error, got {:?}", other),
    }
    assert!(compile_path("/noSuchRule").is_err());
}

#[test]
fn bounded_ancestor_search_honors_offset_and_height() {
    let (root, _) = parse(SOURCE);

    let beta_ref = root
        .identifier_index()
        .get("beta")
        .into_iter()
        .find(|id| root.has_ancestor_of_kind(*id, NodeKind::FunctionDefinition))
        .expect("beta is referenced inside main");

    assert!(root.has_ancestor_of_kind(beta_ref, NodeKind::Selection));
    // the reference wrapper sits one level up; skipping past it still finds the call
    let call = root.ancestor_where(beta_ref, 3, 1, |root, node| {
        root.kind(node) == NodeKind::FunctionCall
    });
    assert!(call.is_some());
    // a zero-height search can never match
    assert!(root
        .ancestor_where(beta_ref, 0, 0, |root, node| root.kind(node)
            == NodeKind::FunctionCall)
        .is_none());
}

#[test]
fn operand_structure_tags_expressions() {
    use glslr::ast::OperandStructure;

    let (root, unit) = parse(SOURCE);

    let call = compile_path("//functionCall").unwrap().evaluate(&root, unit)[0];
    assert_eq!(
        root.content(call).operand_structure(),
        Some(OperandStructure::Many)
    );

    let comparison = compile_path("//binaryExpression").unwrap().evaluate(&root, unit)[0];
    assert_eq!(
        root.content(comparison).operand_structure(),
        Some(OperandStructure::Binary)
    );

    // statements carry no operand structure
    assert_eq!(root.content(unit).operand_structure(), None);
}

// Paths compile lazily in a phase's init and execute per run
struct CountDeclarations {
    path: Option<CompiledPath>,
}

impl TransformationPhase<Vec<usize>> for CountDeclarations {
    fn shape(&self) -> PhaseShape {
        PhaseShape::Run
    }

    fn init(&mut self) -> Result<()> {
        self.path = Some(compile_path("/translationUnit/externalDeclaration")?);
        Ok(())
    }

    fn run(&mut self, ctx: &mut PhaseContext<Vec<usize>>, unit: NodeId) -> Result<()> {
        let path = self.path.as_ref().expect("compiled in init");
        ctx.job.push(path.evaluate(ctx.root, unit).len());
        Ok(())
    }
}

#[test]
fn phases_compile_paths_in_init() {
    common::init_logger();

    let mut manager = TransformationManager::new();
    manager.register_transformation(Transformation::with_phase(CountDeclarations {
        path: None,
    }));

    let mut counts = Vec::new();
    manager.transform_with(SOURCE, &mut counts).unwrap();
    assert_eq!(counts, vec![4]);
}
