//! Matcher captures and template instantiation

mod common;

use glslr::ast::{KindFilter, NodeKind, RootSupplier};
use glslr::parse::{ParseShape, Parser};
use glslr::pattern::{Matcher, Template, TemplateValue};
use glslr::Error;

use pretty_assertions::assert_eq;

fn parse(source: &str) -> (glslr::ast::Root, glslr::ast::NodeId) {
    common::init_logger();
    Parser::new()
        .parse_node_separate(RootSupplier::Default, ParseShape::TranslationUnit, source)
        .expect("failed to parse")
}

#[test]
fn identifier_wildcards_capture_text() {
    let (root, _) = parse("uniform float brightness;\n");
    let candidate = root
        .external_declaration_index()
        .get_unique("brightness")
        .unwrap();

    let matcher = Matcher::with_external_declaration("uniform float __name;").unwrap();
    let captures = matcher
        .match_node(&root, candidate)
        .unwrap()
        .expect("should match");
    assert_eq!(captures.string_match("name"), Some("brightness"));
}

#[test]
fn class_wildcards_capture_nodes_of_the_declared_kind() {
    let (root, _) = parse("varying vec2 varyVec;\n");
    let candidate = root
        .external_declaration_index()
        .get_unique("varyVec")
        .unwrap();

    let mut matcher = Matcher::with_external_declaration("varying __type varyVec;").unwrap();
    // the placeholder parses as a type name; its enclosing specifier becomes the
    // wildcard position
    let placeholder = matcher.find_placeholder("type").unwrap();
    let exemplar = matcher
        .pattern()
        .ancestor_of_kind(placeholder, NodeKind::TypeSpecifier)
        .unwrap();
    matcher.mark_class_wildcard("type", exemplar, NodeKind::TypeSpecifier);

    let captures = matcher
        .match_node(&root, candidate)
        .unwrap()
        .expect("should match");
    let ty = captures
        .node_match(&root, "type", KindFilter::Exact(NodeKind::TypeSpecifier))
        .unwrap();
    assert_eq!(glslr::ast::print::print_tree(&root, ty), "vec2");
}

#[test]
fn mismatched_shapes_are_an_error() {
    let (root, _) = parse("uniform float x;\n");
    let decl = root.external_declaration_index().get_unique("x").unwrap();

    let matcher = Matcher::with_expression("foo(__a)").unwrap();
    match matcher.match_node(&root, decl) {
        Err(Error::ShapeMismatch { .. }) => {}
        other => panic!("expected a shape mismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn repeated_placeholders_must_capture_equal_values() {
    let (root, _) = parse("void main() { add(x, x); add(x, y); }\n");

    let mut matcher = Matcher::with_expression("add(__a, __a)").unwrap();
    matcher.mark_class_wildcard_at("a*", NodeKind::Reference).unwrap();

    let calls = root.node_index().get(&NodeKind::FunctionCall);
    let results: Vec<bool> = calls
        .iter()
        .map(|call| matcher.match_node(&root, *call).unwrap().is_some())
        .collect();
    assert_eq!(results, vec![true, false]);
}

#[test]
fn post_conditions_reject_structural_matches() {
    let (root, _) = parse("uniform float first1; uniform float second;\n");

    let mut matcher = Matcher::with_external_declaration("uniform float __name;").unwrap();
    matcher.set_post_condition(|_, captures| {
        captures
            .string_match("name")
            .map(|name| name.ends_with(|c: char| c.is_ascii_digit()))
            .unwrap_or(false)
    });

    let first = root.external_declaration_index().get_unique("first1").unwrap();
    let second = root.external_declaration_index().get_unique("second").unwrap();
    assert!(matcher.match_node(&root, first).unwrap().is_some());
    assert!(matcher.match_node(&root, second).unwrap().is_none());
}

#[test]
fn templates_instantiate_with_substitution() {
    let (mut root, _) = parse("void main() {}\n");

    let mut template = Template::with_expression("vec4(texture(__s, __c))").unwrap();
    template
        .mark_local_replacement("s", KindFilter::Expression)
        .unwrap();
    template
        .mark_local_replacement("c", KindFilter::Expression)
        .unwrap();

    let mut parser = Parser::new();
    let s = parser.parse_expression(&mut root, "samplers[2]").unwrap();
    let c = parser.parse_expression(&mut root, "uv.xy").unwrap();

    let instance = template
        .instantiate(
            &mut root,
            &[
                ("s", TemplateValue::Node(s)),
                ("c", TemplateValue::Node(c)),
            ],
        )
        .unwrap();
    assert_eq!(
        glslr::ast::print::print_tree(&root, instance),
        "vec4(texture(samplers[2], uv.xy))"
    );
}

#[test]
fn identifier_holes_take_spellings() {
    let (mut root, _) = parse("void main() {}\n");

    let mut template = Template::with_statement("float __name = 1.0;").unwrap();
    template.mark_identifier_replacement("name").unwrap();

    let instance = template
        .instantiate(&mut root, &[("name", TemplateValue::Ident("tmp0".to_owned()))])
        .unwrap();
    let printed = glslr::ast::print::print_tree(&root, instance);
    assert!(printed.contains("float tmp0 = 1."), "got {:?}", printed);
}

#[test]
fn instantiation_is_atomic_on_missing_holes() {
    let (mut root, _) = parse("void main() {}\n");

    let mut template = Template::with_expression("clamp(__x, 0.0, 1.0)").unwrap();
    template
        .mark_local_replacement("x", KindFilter::Expression)
        .unwrap();

    let before = root.node_index().get(&NodeKind::FunctionCall).len();
    match template.instantiate(&mut root, &[]) {
        Err(Error::TemplateHole { .. }) => {}
        other => panic!("expected a template hole error, got {:?}", other),
    }
    // nothing surfaced and nothing was indexed
    assert_eq!(root.node_index().get(&NodeKind::FunctionCall).len(), before);
}

#[test]
fn cloned_subtrees_print_identically() {
    let (root, _) = parse("uniform mat4 transforms[8];\nvoid main() { }\n");
    let mut target = RootSupplier::Default.supply();

    let decl = root
        .external_declaration_index()
        .get_unique("transforms")
        .unwrap();
    let clone = target.clone_from(&root, decl);
    assert_eq!(
        glslr::ast::print::print_tree(&root, decl),
        glslr::ast::print::print_tree(&target, clone)
    );
}
