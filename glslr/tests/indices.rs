//! Root index maintenance and invariants

mod common;

use glslr::ast::{Content, NodeKind, RootSupplier};
use glslr::parse::{ParseShape, Parser};
use glslr::Error;

use pretty_assertions::assert_eq;

const SOURCE: &str = r#"#version 330
uniform float alpha;
uniform vec2 beta;

void main() {
    gl_FragColor = vec4(alpha, beta.x, beta.y, 1.0);
}
"#;

fn parse(source: &str) -> (glslr::ast::Root, glslr::ast::NodeId) {
    common::init_logger();
    Parser::new()
        .parse_node_separate(RootSupplier::Default, ParseShape::TranslationUnit, source)
        .expect("failed to parse")
}

#[test]
fn identifier_index_tracks_spellings() {
    let (root, _) = parse(SOURCE);

    // declaration plus one reference
    assert_eq!(root.identifier_index().get("alpha").len(), 2);
    assert_eq!(root.identifier_index().get("beta").len(), 3);
    assert!(root.identifier_index().get("gamma").is_empty());

    root.check_invariants().expect("invariants after parse");
}

#[test]
fn node_index_tracks_kinds() {
    let (root, _) = parse(SOURCE);

    assert_eq!(root.node_index().get(&NodeKind::InitDeclaration).len(), 2);
    assert_eq!(root.node_index().get(&NodeKind::FunctionDefinition).len(), 1);
    assert_eq!(root.node_index().get(&NodeKind::Version).len(), 1);
}

#[test]
fn external_declaration_index_maps_declared_names() {
    let (root, _) = parse(SOURCE);

    let alpha = root.external_declaration_index().get_unique("alpha").unwrap();
    assert_eq!(root.kind(alpha), NodeKind::InitDeclaration);

    let main = root.external_declaration_index().get_unique("main").unwrap();
    assert_eq!(root.kind(main), NodeKind::FunctionDefinition);

    // references do not declare anything at the top level
    assert!(root.external_declaration_index().get("gl_FragColor").is_empty());
}

#[test]
fn get_one_and_get_unique_enforce_cardinality() {
    let (root, _) = parse(SOURCE);

    assert!(root.identifier_index().get_one("alpha").is_ok());
    match root.identifier_index().get_unique("alpha") {
        Err(Error::UniquenessViolation { found, .. }) => assert_eq!(found, 2),
        other => panic!("expected a uniqueness violation, got {:?}", other.map(|_| ())),
    }
    assert!(root.identifier_index().get_one("missing").is_err());
}

#[test]
fn renaming_reindexes_identifiers() {
    let (mut root, _) = parse(SOURCE);

    let alpha_decl = root.external_declaration_index().get_unique("alpha").unwrap();
    for ident in root.identifier_index().get("alpha") {
        root.rename_identifier(ident, "opacity").unwrap();
    }

    assert!(root.identifier_index().get("alpha").is_empty());
    assert_eq!(root.identifier_index().get("opacity").len(), 2);

    // the external declaration index follows declared names
    assert!(root.external_declaration_index().get("alpha").is_empty());
    assert_eq!(
        root.external_declaration_index().get_unique("opacity").unwrap(),
        alpha_decl
    );

    root.check_invariants().expect("invariants after rename");
}

#[test]
fn detach_and_delete_deregisters_subtree() {
    let (mut root, _) = parse(SOURCE);

    let alpha = root.external_declaration_index().get_unique("alpha").unwrap();
    root.detach_and_delete(alpha).unwrap();

    assert!(root.external_declaration_index().get("alpha").is_empty());
    assert!(root.identifier_index().get("alpha").is_empty());
    assert!(!root.exists(alpha));
    assert_eq!(root.node_index().get(&NodeKind::InitDeclaration).len(), 1);

    root.check_invariants().expect("invariants after removal");
}

#[test]
fn ancestors_of_identifier_finds_owning_nodes() {
    let (root, _) = parse(SOURCE);

    let declarations = root.ancestors_of_identifier("beta", NodeKind::InitDeclaration);
    assert_eq!(declarations.len(), 1);
    let functions = root.ancestors_of_identifier("beta", NodeKind::FunctionDefinition);
    assert_eq!(functions.len(), 1);
}

#[test]
fn build_session_defers_and_commits_the_net_effect() {
    let (mut root, unit) = parse(SOURCE);
    let mut parser = Parser::new();
    let injected = parser
        .parse_external_declaration(&mut root, "uniform float gamma;")
        .unwrap();

    {
        let mut session = root.index_build_session();
        session.append_child(unit, injected).unwrap();
        // queries inside the session still see the pre-session state
        assert!(session.external_declaration_index().get("gamma").is_empty());

        let alpha = session
            .external_declaration_index()
            .get_unique("alpha")
            .unwrap();
        session.detach_and_delete(alpha).unwrap();
        assert!(!session.external_declaration_index().get("alpha").is_empty());
    }

    // exactly the net of the queued insertions and removals
    assert!(!root.external_declaration_index().get("gamma").is_empty());
    assert!(root.external_declaration_index().get("alpha").is_empty());
    root.check_invariants().expect("invariants after session");
}

#[test]
fn clone_into_registers_on_attach_only() {
    let (root, _) = parse(SOURCE);
    let (mut other, other_unit) = parse("void stub() {}\n");

    let alpha = root.external_declaration_index().get_unique("alpha").unwrap();
    let clone = other.clone_from(&root, alpha);

    // detached clones are not indexed yet
    assert!(other.identifier_index().get("alpha").is_empty());

    other.append_child(other_unit, clone).unwrap();
    assert_eq!(
        other.external_declaration_index().get_unique("alpha").unwrap(),
        clone
    );
    other.check_invariants().expect("invariants after adoption");
}

#[test]
fn replace_is_atomic_for_indices() {
    let (mut root, _) = parse(SOURCE);
    let mut parser = Parser::new();

    let alpha = root.external_declaration_index().get_unique("alpha").unwrap();
    let replacement = parser
        .parse_external_declaration(&mut root, "uniform float delta;")
        .unwrap();
    root.replace_and_delete(alpha, replacement).unwrap();

    assert!(root.external_declaration_index().get("alpha").is_empty());
    assert!(!root.external_declaration_index().get("delta").is_empty());
    root.check_invariants().expect("invariants after replace");
}

#[test]
fn detaching_a_required_slot_is_a_violation() {
    let (mut root, _) = parse(SOURCE);

    let main = root.external_declaration_index().get_unique("main").unwrap();
    let body = match root.content(main) {
        Content::FunctionDefinition { body, .. } => *body,
        other => panic!("expected a function definition, got {:?}", other.kind()),
    };
    match root.detach(body) {
        Err(Error::DetachmentViolation(node)) => assert_eq!(node, body),
        other => panic!("expected a detachment violation, got {:?}", other),
    }
}
