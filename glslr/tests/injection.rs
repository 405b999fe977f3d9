//! Injection points over the top-level child sequence

mod common;

use glslr::ast::NodeId;
use glslr::transform::{
    InjectionPoint, PhaseContext, PhaseShape, Transformation, TransformationManager,
    TransformationPhase,
};
use glslr::Result;

const INPUT: &str = r#"#version 330
#extension GL_ARB_explicit_attrib_location : enable
#pragma optimize(on)
uniform float alpha;
void main() {
    gl_FragColor = vec4(alpha);
}
"#;

struct Inject {
    source: &'static str,
    point: InjectionPoint,
}

impl TransformationPhase<()> for Inject {
    fn shape(&self) -> PhaseShape {
        PhaseShape::Run
    }

    fn run(&mut self, ctx: &mut PhaseContext<()>, _unit: NodeId) -> Result<()> {
        ctx.inject_external_declaration(self.source, self.point.clone())?;
        Ok(())
    }
}

fn run_injection(phases: Vec<Inject>) -> String {
    common::init_logger();
    let mut transformation = Transformation::new();
    for phase in phases {
        transformation.add_phase(phase);
    }
    let mut manager = TransformationManager::new();
    manager.register_transformation(transformation);
    manager.transform(INPUT).expect("transform failed")
}

fn position_of(output: &str, needle: &str) -> usize {
    output
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in {:?}", needle, output))
}

#[test]
fn before_version_precedes_the_version_statement() {
    let output = run_injection(vec![Inject {
        source: "float injected;",
        point: InjectionPoint::BeforeVersion,
    }]);
    assert!(position_of(&output, "float injected;") < position_of(&output, "#version"));
}

#[test]
fn before_extensions_lands_between_version_and_extensions() {
    let output = run_injection(vec![Inject {
        source: "float injected;",
        point: InjectionPoint::BeforeExtensions,
    }]);
    assert!(position_of(&output, "#version") < position_of(&output, "float injected;"));
    assert!(position_of(&output, "float injected;") < position_of(&output, "#extension"));
}

#[test]
fn before_directives_lands_between_extensions_and_pragmas() {
    let output = run_injection(vec![Inject {
        source: "float injected;",
        point: InjectionPoint::BeforeDirectives,
    }]);
    assert!(position_of(&output, "#extension") < position_of(&output, "float injected;"));
    assert!(position_of(&output, "float injected;") < position_of(&output, "#pragma"));
}

#[test]
fn before_declarations_precedes_the_first_declaration() {
    let output = run_injection(vec![Inject {
        source: "float injected;",
        point: InjectionPoint::BeforeDeclarations,
    }]);
    assert!(position_of(&output, "#pragma") < position_of(&output, "float injected;"));
    assert!(position_of(&output, "float injected;") < position_of(&output, "uniform float alpha;"));
}

#[test]
fn before_eof_appends_at_the_end() {
    let output = run_injection(vec![Inject {
        source: "float injected;",
        point: InjectionPoint::BeforeEof,
    }]);
    assert!(position_of(&output, "void main()") < position_of(&output, "float injected;"));
}

#[test]
fn repeated_injections_at_one_point_preserve_call_order() {
    let output = run_injection(vec![
        Inject {
            source: "float first;",
            point: InjectionPoint::BeforeDeclarations,
        },
        Inject {
            source: "float second;",
            point: InjectionPoint::BeforeDeclarations,
        },
        Inject {
            source: "float third;",
            point: InjectionPoint::BeforeDeclarations,
        },
    ]);
    let first = position_of(&output, "float first;");
    let second = position_of(&output, "float second;");
    let third = position_of(&output, "float third;");
    assert!(first < second && second < third);
    assert!(third < position_of(&output, "uniform float alpha;"));
}

struct MainBody;

impl TransformationPhase<()> for MainBody {
    fn shape(&self) -> PhaseShape {
        PhaseShape::Run
    }

    fn run(&mut self, ctx: &mut PhaseContext<()>, _unit: NodeId) -> Result<()> {
        let prologue = ctx.parse_statement("initDebug();")?;
        ctx.prepend_main_body(prologue)?;
        let epilogue = ctx.parse_statement("flushDebug();")?;
        ctx.append_main_body(epilogue)?;
        Ok(())
    }
}

#[test]
fn main_body_helpers_wrap_the_function_body() {
    common::init_logger();
    let mut manager = TransformationManager::new();
    manager.register_transformation(Transformation::with_phase(MainBody));

    let output = manager.transform(INPUT).expect("transform failed");
    let body_open = position_of(&output, "void main()");
    assert!(body_open < position_of(&output, "initDebug();"));
    assert!(position_of(&output, "initDebug();") < position_of(&output, "gl_FragColor"));
    assert!(position_of(&output, "gl_FragColor") < position_of(&output, "flushDebug();"));
}

struct BulkInject;

impl TransformationPhase<()> for BulkInject {
    fn shape(&self) -> PhaseShape {
        PhaseShape::Run
    }

    fn run(&mut self, ctx: &mut PhaseContext<()>, _unit: NodeId) -> Result<()> {
        let a = ctx.parse_external_declaration("float bulk0;")?;
        let b = ctx.parse_external_declaration("float bulk1;")?;
        ctx.inject_nodes(InjectionPoint::BeforeDeclarations, vec![a, b])?;
        Ok(())
    }
}

#[test]
fn bulk_injection_keeps_order_inside_a_build_session() {
    common::init_logger();
    let mut manager = TransformationManager::new();
    manager.register_transformation(Transformation::with_phase(BulkInject));

    let output = manager.transform(INPUT).expect("transform failed");
    assert!(position_of(&output, "float bulk0;") < position_of(&output, "float bulk1;"));
    assert!(position_of(&output, "float bulk1;") < position_of(&output, "uniform float alpha;"));
}
