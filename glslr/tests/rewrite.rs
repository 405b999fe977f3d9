//! Pattern-driven rewrites: call replacement, qualifier synthesis, array hoisting

mod common;

use glslr::ast::{Content, KindFilter, LiteralValue, NodeId, NodeKind, QualifierKind};
use glslr::pattern::{Matcher, Template, TemplateValue};
use glslr::transform::{
    MatchPhase, PhaseContext, Transformation, TransformationManager, TransformationPhase,
};
use glslr::Result;

#[test]
fn shadow2d_calls_become_wrapped_texture_calls() {
    let mut matcher = Matcher::with_expression("shadow2D(__s, __c)").unwrap();
    matcher.mark_class_wildcard_at("s*", NodeKind::Reference).unwrap();
    matcher.mark_class_wildcard_at("c*", NodeKind::Reference).unwrap();

    let mut template = Template::with_expression("vec4(texture(__s, __c))").unwrap();
    template.mark_local_replacement("s", KindFilter::Expression).unwrap();
    template.mark_local_replacement("c", KindFilter::Expression).unwrap();

    let phase = MatchPhase::new(
        NodeKind::FunctionCall,
        matcher,
        move |ctx: &mut PhaseContext<()>, candidate, captures| {
            let s = captures.node_match(ctx.root, "s", KindFilter::Expression)?;
            let c = captures.node_match(ctx.root, "c", KindFilter::Expression)?;
            let s = ctx.root.clone_subtree(s);
            let c = ctx.root.clone_subtree(c);
            let replacement = template.instantiate(
                ctx.root,
                &[("s", TemplateValue::Node(s)), ("c", TemplateValue::Node(c))],
            )?;
            ctx.root.replace_and_delete(candidate, replacement)
        },
    );

    let mut manager = TransformationManager::new();
    manager.register_transformation(Transformation::with_phase(phase));

    common::verify_transform(
        &mut manager,
        "void main(){ shadow2D(s, c); }",
        "void main(){ vec4(texture(s, c)); }",
    );
}

#[test]
fn out_declarations_gain_explicit_locations() {
    let mut matcher = Matcher::with_external_declaration("out float __name;").unwrap();
    // the dummy float stands for any type at that position
    let dummy_type = matcher
        .pattern()
        .node_index()
        .get_unique(&NodeKind::TypeSpecifier)
        .unwrap();
    matcher.mark_class_wildcard("type", dummy_type, NodeKind::TypeSpecifier);
    matcher.set_post_condition(|_, captures| {
        captures
            .string_match("name")
            .map(|name| name.ends_with(|c: char| c.is_ascii_digit()))
            .unwrap_or(false)
    });

    let phase = MatchPhase::new(
        NodeKind::InitDeclaration,
        matcher,
        |ctx: &mut PhaseContext<()>, candidate, captures| {
            let name = captures.string_match("name").expect("captured by pattern");
            let digits = name
                .rfind(|c: char| !c.is_ascii_digit())
                .map(|i| i + 1)
                .unwrap_or(0);
            let location: i32 = name[digits..].parse().expect("checked by post-condition");

            let ty = match ctx.root.content(candidate) {
                Content::InitDeclaration { ty, .. } => *ty,
                _ => return Ok(()),
            };
            let qualifier = match ctx.root.content(ty) {
                Content::FullySpecifiedType {
                    qualifier: Some(qualifier),
                    ..
                } => *qualifier,
                _ => return Ok(()),
            };

            let value = ctx.root.add(Content::Literal {
                value: LiteralValue::Int(location),
            });
            let key = ctx.root.add_identifier("location");
            let part = ctx.root.add(Content::LayoutQualifierPart {
                name: Some(key),
                value: Some(value),
                shared: false,
            });
            let layout = ctx.root.add(Content::LayoutQualifier { parts: vec![part] });
            let qualifier_part = ctx.root.add(Content::QualifierPart {
                part: QualifierKind::Layout(layout),
            });
            ctx.root.append_child(qualifier, qualifier_part)
        },
    );

    let mut manager = TransformationManager::new();
    manager.register_transformation(Transformation::with_phase(phase));

    common::verify_transform(
        &mut manager,
        "out vec4 outColor4; out vec3 outColor0; out vec3 outColor10, fooBar;",
        "out layout(location = 4) vec4 outColor4; out layout(location = 0) vec3 outColor0; out vec3 outColor10, fooBar;",
    );
}

struct HoistUnsizedArrays;

impl TransformationPhase<()> for HoistUnsizedArrays {
    fn enter(&mut self, ctx: &mut PhaseContext<()>, node: NodeId) -> Result<()> {
        if ctx.root.kind(node) != NodeKind::InitDeclaration {
            return Ok(());
        }
        let (ty, members) = match ctx.root.content(node) {
            Content::InitDeclaration { ty, members } => (*ty, members.clone()),
            _ => return Ok(()),
        };
        let specifier = match ctx.root.content(ty) {
            Content::FullySpecifiedType { ty, .. } => *ty,
            _ => return Ok(()),
        };
        match ctx.root.content(specifier) {
            Content::TypeSpecifier { array: None, .. } => {}
            _ => return Ok(()),
        }
        if members.is_empty() {
            return Ok(());
        }

        // every declarator must carry exactly one unsized dimension
        let mut specs = Vec::new();
        for member in &members {
            let spec = match ctx.root.content(*member) {
                Content::DeclarationMember {
                    array: Some(spec), ..
                } => *spec,
                _ => return Ok(()),
            };
            let dimensions = match ctx.root.content(spec) {
                Content::ArraySpecifier { dimensions } if dimensions.len() == 1 => {
                    dimensions.clone()
                }
                _ => return Ok(()),
            };
            match ctx.root.content(dimensions[0]) {
                Content::ArrayDimension { size: None } => specs.push(spec),
                _ => return Ok(()),
            }
        }

        let first = specs[0];
        ctx.root.detach(first)?;
        ctx.root.adopt(specifier, first, |content, id| match content {
            Content::TypeSpecifier { array: array @ None, .. } => {
                *array = Some(id);
                true
            }
            _ => false,
        })?;
        for spec in &specs[1..] {
            ctx.root.detach_and_delete(*spec)?;
        }
        Ok(())
    }
}

#[test]
fn unsized_member_arrays_hoist_onto_the_type() {
    let mut manager = TransformationManager::new();
    manager.register_transformation(Transformation::with_phase(HoistUnsizedArrays));

    common::verify_transform(&mut manager, "int foo[], bar[];", "int[] foo, bar;");
}

#[test]
fn sized_arrays_are_left_alone() {
    let mut manager = TransformationManager::new();
    manager.register_transformation(Transformation::with_phase(HoistUnsizedArrays));

    common::verify_transform(&mut manager, "int[7] foo[5];", "int[7] foo[5];");
}
