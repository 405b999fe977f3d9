//! Reprints an arena tree as GLSL text.
//!
//! Tokens are emitted on two channels: [Channel::Default] for real tokens and
//! [Channel::Hidden] for the whitespace and newlines the printer synthesizes.
//! Whitespace is normalized; token order and semantics are never changed. A newline
//! always follows `#version`, `#extension`, `#pragma`, raw directives and layout
//! defaults.

use glsl::syntax::{
    AssignmentOp, BinaryOp, InterpolationQualifier, PrecisionQualifier,
    PreprocessorExtensionBehavior, PreprocessorVersionProfile, StorageQualifier,
};
use glsl::transpiler::glsl::FormattingState;

use super::{Content, JumpOperation, LiteralValue, NodeId, QualifierKind, Root, TypeClass, UnaryOperator};

/// Output channel of an emitted token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Default,
    Hidden,
}

#[derive(Default)]
struct Output {
    tokens: Vec<(Channel, String)>,
}

impl Output {
    fn token(&mut self, text: impl Into<String>) {
        self.tokens.push((Channel::Default, text.into()));
    }

    fn space(&mut self) {
        self.tokens.push((Channel::Hidden, " ".to_owned()));
    }

    fn newline(&mut self) {
        self.tokens.push((Channel::Hidden, "\n".to_owned()));
    }

    fn indent(&mut self, depth: usize) {
        if depth > 0 {
            self.tokens.push((Channel::Hidden, "    ".repeat(depth)));
        }
    }

    fn finish(self) -> String {
        self.tokens.into_iter().map(|(_, text)| text).collect()
    }
}

/// Print any subtree; translation units, external declarations and statements end
/// with a newline, smaller fragments do not
pub fn print_tree(root: &Root, id: NodeId) -> String {
    let mut printer = Printer {
        root,
        out: Output::default(),
        depth: 0,
    };
    printer.any(id);
    printer.out.finish()
}

struct Printer<'r> {
    root: &'r Root,
    out: Output,
    depth: usize,
}

impl<'r> Printer<'r> {
    fn any(&mut self, id: NodeId) {
        let kind = self.root.kind(id);
        if kind == super::NodeKind::TranslationUnit {
            self.translation_unit(id);
        } else if kind.is_external_declaration() {
            self.external_declaration(id);
        } else if kind.is_statement() {
            self.statement(id);
        } else if kind.is_expression() {
            self.expr(id, 17);
        } else {
            self.fragment(id);
        }
    }

    fn translation_unit(&mut self, id: NodeId) {
        if let Content::TranslationUnit { declarations } = self.root.content(id) {
            for decl in declarations.clone() {
                self.external_declaration(decl);
            }
        }
    }

    fn external_declaration(&mut self, id: NodeId) {
        match self.root.content(id).clone() {
            Content::Version { version, profile } => {
                self.out.token("#version");
                self.out.space();
                self.out.token(version.to_string());
                if let Some(profile) = profile {
                    self.out.space();
                    self.out.token(match profile {
                        PreprocessorVersionProfile::Core => "core",
                        PreprocessorVersionProfile::Compatibility => "compatibility",
                        PreprocessorVersionProfile::ES => "es",
                    });
                }
                self.out.newline();
            }
            Content::Extension { name, behavior } => {
                self.out.token("#extension");
                self.out.space();
                self.out.token(name);
                if let Some(behavior) = behavior {
                    self.out.token(" : ");
                    self.out.token(match behavior {
                        PreprocessorExtensionBehavior::Require => "require",
                        PreprocessorExtensionBehavior::Enable => "enable",
                        PreprocessorExtensionBehavior::Warn => "warn",
                        PreprocessorExtensionBehavior::Disable => "disable",
                    });
                }
                self.out.newline();
            }
            Content::Pragma { command } => {
                self.out.token("#pragma");
                self.out.space();
                self.out.token(command);
                self.out.newline();
            }
            Content::Directive { raw } => {
                self.out.token(raw);
                self.out.newline();
            }
            Content::LayoutDefaults { qualifier, names } => {
                self.fragment(qualifier);
                for (i, name) in names.iter().enumerate() {
                    self.out.token(if i == 0 { " " } else { ", " });
                    self.fragment(*name);
                }
                self.out.token(";");
                self.out.newline();
            }
            Content::FunctionDefinition { prototype, body } => {
                self.prototype(prototype);
                self.out.space();
                self.compound_block(body);
                self.out.newline();
            }
            _ => {
                self.declaration(id);
                self.out.newline();
            }
        }
    }

    fn declaration(&mut self, id: NodeId) {
        match self.root.content(id).clone() {
            Content::InitDeclaration { ty, members } => {
                self.fragment(ty);
                for (i, member) in members.iter().enumerate() {
                    self.out.token(if i == 0 { " " } else { ", " });
                    self.fragment(*member);
                }
                self.out.token(";");
            }
            Content::InterfaceBlock {
                qualifier,
                name,
                fields,
                instance,
            } => {
                self.fragment(qualifier);
                self.out.space();
                self.fragment(name);
                self.out.token(" {");
                self.out.newline();
                self.depth += 1;
                for field in fields {
                    self.out.indent(self.depth);
                    self.struct_field(field);
                    self.out.newline();
                }
                self.depth -= 1;
                self.out.indent(self.depth);
                self.out.token("}");
                if let Some(instance) = instance {
                    self.out.space();
                    self.fragment(instance);
                }
                self.out.token(";");
            }
            Content::FunctionPrototype { .. } => {
                self.prototype(id);
                self.out.token(";");
            }
            Content::PrecisionDeclaration { precision, ty } => {
                self.out.token("precision");
                self.out.space();
                self.out.token(precision_keyword(&precision));
                self.out.space();
                self.fragment(ty);
                self.out.token(";");
            }
            Content::EmptyDeclaration => self.out.token(";"),
            _ => self.fragment(id),
        }
    }

    fn prototype(&mut self, id: NodeId) {
        if let Content::FunctionPrototype {
            ty,
            name,
            parameters,
        } = self.root.content(id).clone()
        {
            self.fragment(ty);
            self.out.space();
            self.fragment(name);
            self.out.token("(");
            for (i, parameter) in parameters.iter().enumerate() {
                if i > 0 {
                    self.out.token(", ");
                }
                self.fragment(*parameter);
            }
            self.out.token(")");
        }
    }

    fn struct_field(&mut self, id: NodeId) {
        if let Content::StructField {
            qualifier,
            ty,
            declarators,
        } = self.root.content(id).clone()
        {
            if let Some(qualifier) = qualifier {
                self.fragment(qualifier);
                self.out.space();
            }
            self.fragment(ty);
            for (i, declarator) in declarators.iter().enumerate() {
                self.out.token(if i == 0 { " " } else { ", " });
                self.fragment(*declarator);
            }
            self.out.token(";");
        }
    }

    fn compound_block(&mut self, id: NodeId) {
        self.out.token("{");
        self.out.newline();
        self.depth += 1;
        if let Content::Compound { statements } = self.root.content(id).clone() {
            for statement in statements {
                self.statement(statement);
            }
        }
        self.depth -= 1;
        self.out.indent(self.depth);
        self.out.token("}");
    }

    /// A statement in nested position: compounds inline after a space, anything
    /// else on its own indented line
    fn embedded_statement(&mut self, id: NodeId) {
        if self.root.kind(id) == super::NodeKind::Compound {
            self.out.space();
            self.compound_block(id);
            self.out.newline();
        } else {
            self.out.newline();
            self.depth += 1;
            self.statement(id);
            self.depth -= 1;
        }
    }

    fn statement(&mut self, id: NodeId) {
        match self.root.content(id).clone() {
            Content::Compound { .. } => {
                self.out.indent(self.depth);
                self.compound_block(id);
                self.out.newline();
            }
            Content::ExpressionStatement { expression } => {
                self.out.indent(self.depth);
                self.expr(expression, 17);
                self.out.token(";");
                self.out.newline();
            }
            Content::EmptyStatement => {
                self.out.indent(self.depth);
                self.out.token(";");
                self.out.newline();
            }
            Content::DeclarationStatement { declaration } => {
                self.out.indent(self.depth);
                self.declaration(declaration);
                self.out.newline();
            }
            Content::Selection {
                condition,
                if_branch,
                else_branch,
            } => {
                self.out.indent(self.depth);
                self.out.token("if (");
                self.expr(condition, 17);
                self.out.token(")");
                self.branch_then_else(if_branch, else_branch);
            }
            Content::Switch { head, body } => {
                self.out.indent(self.depth);
                self.out.token("switch (");
                self.expr(head, 17);
                self.out.token(") {");
                self.out.newline();
                self.depth += 1;
                for statement in body {
                    self.statement(statement);
                }
                self.depth -= 1;
                self.out.indent(self.depth);
                self.out.token("}");
                self.out.newline();
            }
            Content::CaseLabel { label } => {
                self.out.indent(self.depth);
                match label {
                    Some(label) => {
                        self.out.token("case ");
                        self.expr(label, 17);
                        self.out.token(":");
                    }
                    None => self.out.token("default:"),
                }
                self.out.newline();
            }
            Content::While { condition, body } => {
                self.out.indent(self.depth);
                self.out.token("while (");
                self.condition(condition);
                self.out.token(")");
                self.embedded_statement(body);
            }
            Content::DoWhile { body, condition } => {
                self.out.indent(self.depth);
                self.out.token("do");
                if self.root.kind(body) == super::NodeKind::Compound {
                    self.out.space();
                    self.compound_block(body);
                    self.out.token(" while (");
                    self.expr(condition, 17);
                    self.out.token(");");
                    self.out.newline();
                } else {
                    self.out.newline();
                    self.depth += 1;
                    self.statement(body);
                    self.depth -= 1;
                    self.out.indent(self.depth);
                    self.out.token("while (");
                    self.expr(condition, 17);
                    self.out.token(");");
                    self.out.newline();
                }
            }
            Content::For {
                init,
                condition,
                update,
                body,
            } => {
                self.out.indent(self.depth);
                self.out.token("for (");
                match init {
                    Some(init) if self.root.kind(init).is_declaration() => {
                        self.declaration(init);
                    }
                    Some(init) => {
                        self.expr(init, 17);
                        self.out.token(";");
                    }
                    None => self.out.token(";"),
                }
                self.out.space();
                if let Some(condition) = condition {
                    self.condition(condition);
                }
                self.out.token(";");
                if let Some(update) = update {
                    self.out.space();
                    self.expr(update, 17);
                }
                self.out.token(")");
                self.embedded_statement(body);
            }
            Content::Jump {
                operation,
                argument,
            } => {
                self.out.indent(self.depth);
                self.out.token(match operation {
                    JumpOperation::Break => "break",
                    JumpOperation::Continue => "continue",
                    JumpOperation::Discard => "discard",
                    JumpOperation::Return => "return",
                });
                if let Some(argument) = argument {
                    self.out.space();
                    self.expr(argument, 17);
                }
                self.out.token(";");
                self.out.newline();
            }
            _ => {
                self.out.indent(self.depth);
                self.fragment(id);
                self.out.newline();
            }
        }
    }

    fn branch_then_else(&mut self, if_branch: NodeId, else_branch: Option<NodeId>) {
        let compound_then = self.root.kind(if_branch) == super::NodeKind::Compound;
        if compound_then {
            self.out.space();
            self.compound_block(if_branch);
        } else {
            self.out.newline();
            self.depth += 1;
            self.statement(if_branch);
            self.depth -= 1;
        }
        match else_branch {
            Some(else_branch) => {
                if compound_then {
                    self.out.token(" else");
                } else {
                    self.out.indent(self.depth);
                    self.out.token("else");
                }
                if self.root.kind(else_branch) == super::NodeKind::Compound {
                    self.out.space();
                    self.compound_block(else_branch);
                    self.out.newline();
                } else if self.root.kind(else_branch) == super::NodeKind::Selection {
                    self.out.space();
                    // continue the else-if chain on the same line
                    let mut chained = Printer {
                        root: self.root,
                        out: Output::default(),
                        depth: self.depth,
                    };
                    chained.statement(else_branch);
                    let text = chained.out.finish();
                    self.out.token(text.trim_start().to_owned());
                } else {
                    self.out.newline();
                    self.depth += 1;
                    self.statement(else_branch);
                    self.depth -= 1;
                }
            }
            None => {
                if compound_then {
                    self.out.newline();
                }
            }
        }
    }

    fn condition(&mut self, id: NodeId) {
        if let Content::ConditionDeclaration {
            ty,
            name,
            initializer,
        } = self.root.content(id).clone()
        {
            self.fragment(ty);
            self.out.space();
            self.fragment(name);
            self.out.token(" = ");
            self.fragment(initializer);
        } else {
            self.expr(id, 17);
        }
    }

    // Type-system and declarator fragments, plus expression fallthrough
    fn fragment(&mut self, id: NodeId) {
        match self.root.content(id).clone() {
            Content::Identifier { name } => self.out.token(name),
            Content::FullySpecifiedType { qualifier, ty } => {
                if let Some(qualifier) = qualifier {
                    self.fragment(qualifier);
                    self.out.space();
                }
                self.fragment(ty);
            }
            Content::TypeQualifier { parts } => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        self.out.space();
                    }
                    self.fragment(*part);
                }
            }
            Content::QualifierPart { part } => match part {
                QualifierKind::Storage(sq) => self.storage_qualifier(&sq),
                QualifierKind::Layout(lq) => self.fragment(lq),
                QualifierKind::Precision(pq) => self.out.token(precision_keyword(&pq)),
                QualifierKind::Interpolation(iq) => self.out.token(match iq {
                    InterpolationQualifier::Smooth => "smooth",
                    InterpolationQualifier::Flat => "flat",
                    InterpolationQualifier::NoPerspective => "noperspective",
                }),
                QualifierKind::Invariant => self.out.token("invariant"),
                QualifierKind::Precise => self.out.token("precise"),
            },
            Content::LayoutQualifier { parts } => {
                self.out.token("layout(");
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        self.out.token(", ");
                    }
                    self.fragment(*part);
                }
                self.out.token(")");
            }
            Content::LayoutQualifierPart {
                name,
                value,
                shared,
            } => {
                if shared {
                    self.out.token("shared");
                } else if let Some(name) = name {
                    self.fragment(name);
                    if let Some(value) = value {
                        self.out.token(" = ");
                        self.expr(value, 17);
                    }
                }
            }
            Content::TypeSpecifier { class, array } => {
                match class {
                    TypeClass::Builtin(builtin) => {
                        let mut text = String::new();
                        glsl::transpiler::glsl::show_type_specifier_non_array(
                            &mut text,
                            &builtin,
                            &mut FormattingState::default(),
                        )
                        .unwrap();
                        self.out.token(text);
                    }
                    TypeClass::Struct(ss) => self.fragment(ss),
                    TypeClass::Named(name) => self.fragment(name),
                }
                if let Some(array) = array {
                    self.fragment(array);
                }
            }
            Content::StructSpecifier { name, fields } => {
                self.out.token("struct");
                if let Some(name) = name {
                    self.out.space();
                    self.fragment(name);
                }
                self.out.token(" {");
                self.out.newline();
                self.depth += 1;
                for field in fields {
                    self.out.indent(self.depth);
                    self.struct_field(field);
                    self.out.newline();
                }
                self.depth -= 1;
                self.out.indent(self.depth);
                self.out.token("}");
            }
            Content::StructField { .. } => self.struct_field(id),
            Content::ArraySpecifier { dimensions } => {
                for dimension in dimensions {
                    self.fragment(dimension);
                }
            }
            Content::ArrayDimension { size } => {
                self.out.token("[");
                if let Some(size) = size {
                    self.expr(size, 17);
                }
                self.out.token("]");
            }
            Content::ArrayedIdentifier { name, array } => {
                self.fragment(name);
                if let Some(array) = array {
                    self.fragment(array);
                }
            }
            Content::DeclarationMember {
                name,
                array,
                initializer,
            } => {
                self.fragment(name);
                if let Some(array) = array {
                    self.fragment(array);
                }
                if let Some(initializer) = initializer {
                    self.out.token(" = ");
                    self.fragment(initializer);
                }
            }
            Content::FunctionParameter {
                qualifier,
                ty,
                declarator,
            } => {
                if let Some(qualifier) = qualifier {
                    self.fragment(qualifier);
                    self.out.space();
                }
                self.fragment(ty);
                if let Some(declarator) = declarator {
                    self.out.space();
                    self.fragment(declarator);
                }
            }
            Content::InitializerList { items } => {
                self.out.token("{ ");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.token(", ");
                    }
                    self.fragment(*item);
                }
                self.out.token(" }");
            }
            Content::FunctionPrototype { .. } => self.prototype(id),
            Content::ConditionDeclaration { .. } => self.condition(id),
            content if content.kind().is_expression() => self.expr(id, 17),
            content if content.kind().is_declaration() => self.declaration(id),
            _ => self.any(id),
        }
    }

    fn storage_qualifier(&mut self, sq: &StorageQualifier) {
        use StorageQualifier::*;
        match sq {
            Const => self.out.token("const"),
            InOut => self.out.token("inout"),
            In => self.out.token("in"),
            Out => self.out.token("out"),
            Centroid => self.out.token("centroid"),
            Patch => self.out.token("patch"),
            Sample => self.out.token("sample"),
            Uniform => self.out.token("uniform"),
            Buffer => self.out.token("buffer"),
            Shared => self.out.token("shared"),
            Coherent => self.out.token("coherent"),
            Volatile => self.out.token("volatile"),
            Restrict => self.out.token("restrict"),
            ReadOnly => self.out.token("readonly"),
            WriteOnly => self.out.token("writeonly"),
            Attribute => self.out.token("attribute"),
            Varying => self.out.token("varying"),
            Subroutine(names) => {
                self.out.token("subroutine");
                if !names.is_empty() {
                    self.out.token("(");
                    for (i, name) in names.iter().enumerate() {
                        if i > 0 {
                            self.out.token(", ");
                        }
                        self.out.token(name.0.clone());
                    }
                    self.out.token(")");
                }
            }
        }
    }

    fn precedence(&self, id: NodeId) -> u8 {
        match self.root.content(id) {
            Content::Reference { .. } | Content::Literal { .. } | Content::Grouping { .. } => 0,
            Content::MemberAccess { .. }
            | Content::ArrayAccess { .. }
            | Content::FunctionCall { .. } => 1,
            Content::Unary { operator, .. } if operator.is_postfix() => 1,
            Content::Unary { .. } => 3,
            Content::Binary { operator, .. } => match operator {
                BinaryOp::Mult | BinaryOp::Div | BinaryOp::Mod => 4,
                BinaryOp::Add | BinaryOp::Sub => 5,
                BinaryOp::LShift | BinaryOp::RShift => 6,
                BinaryOp::LT | BinaryOp::GT | BinaryOp::LTE | BinaryOp::GTE => 7,
                BinaryOp::Equal | BinaryOp::NonEqual => 8,
                BinaryOp::BitAnd => 9,
                BinaryOp::BitXor => 10,
                BinaryOp::BitOr => 11,
                BinaryOp::And => 12,
                BinaryOp::Xor => 13,
                BinaryOp::Or => 14,
            },
            Content::Ternary { .. } => 15,
            Content::Assignment { .. } => 16,
            Content::Sequence { .. } => 17,
            _ => 0,
        }
    }

    fn expr(&mut self, id: NodeId, limit: u8) {
        let precedence = self.precedence(id);
        if precedence > limit {
            self.out.token("(");
            self.expr(id, 17);
            self.out.token(")");
            return;
        }

        match self.root.content(id).clone() {
            Content::Reference { target } => self.fragment(target),
            Content::Literal { value } => self.literal(&value),
            Content::Grouping { inner } => {
                self.out.token("(");
                self.expr(inner, 17);
                self.out.token(")");
            }
            Content::MemberAccess { base, member } => {
                self.expr(base, precedence);
                self.out.token(".");
                self.fragment(member);
            }
            Content::ArrayAccess { base, index } => {
                self.expr(base, precedence);
                self.fragment(index);
            }
            Content::FunctionCall { callee, arguments } => {
                if self.root.kind(callee).is_expression() {
                    self.expr(callee, precedence);
                } else {
                    self.fragment(callee);
                }
                self.out.token("(");
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.out.token(", ");
                    }
                    // a sequence in argument position needs its parentheses back
                    self.expr(*argument, 16);
                }
                self.out.token(")");
            }
            Content::Unary { operator, operand } => {
                if operator.is_postfix() {
                    self.expr(operand, precedence);
                    self.out.token(match operator {
                        UnaryOperator::PostIncrement => "++",
                        _ => "--",
                    });
                } else {
                    self.out.token(match operator {
                        UnaryOperator::PreIncrement => "++",
                        UnaryOperator::PreDecrement => "--",
                        UnaryOperator::Identity => "+",
                        UnaryOperator::Negation => "-",
                        UnaryOperator::LogicalNot => "!",
                        UnaryOperator::BitwiseNot => "~",
                        _ => unreachable!(),
                    });
                    // a directly nested prefix operator would lex as ++/--
                    let nested_prefix = matches!(
                        self.root.content(operand),
                        Content::Unary { operator, .. } if !operator.is_postfix()
                    );
                    self.expr(operand, if nested_prefix { 0 } else { precedence });
                }
            }
            Content::Binary {
                operator,
                left,
                right,
            } => {
                self.expr(left, precedence);
                self.out.token(format!(" {} ", binary_symbol(&operator)));
                self.expr(right, precedence - 1);
            }
            Content::Assignment {
                operator,
                target,
                value,
            } => {
                self.expr(target, precedence - 1);
                self.out.token(format!(" {} ", assignment_symbol(&operator)));
                self.expr(value, precedence);
            }
            Content::Ternary {
                condition,
                consequent,
                alternate,
            } => {
                self.expr(condition, precedence - 1);
                self.out.token(" ? ");
                self.expr(consequent, precedence);
                self.out.token(" : ");
                self.expr(alternate, precedence);
            }
            Content::Sequence { items } => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.token(", ");
                    }
                    self.expr(*item, 16);
                }
            }
            _ => self.fragment(id),
        }
    }

    fn literal(&mut self, value: &LiteralValue) {
        match value {
            LiteralValue::Int(x) => self.out.token(x.to_string()),
            LiteralValue::UInt(x) => self.out.token(format!("{}u", x)),
            LiteralValue::Float(x) => {
                if x.fract() == 0.0 {
                    self.out.token(format!("{}.", x));
                } else {
                    self.out.token(x.to_string());
                }
            }
            LiteralValue::Double(x) => {
                if x.fract() == 0.0 {
                    self.out.token(format!("{}.lf", x));
                } else {
                    self.out.token(format!("{}lf", x));
                }
            }
            LiteralValue::Bool(x) => self.out.token(x.to_string()),
            LiteralValue::Str(x) => self.out.token(format!("{:?}", x)),
        }
    }
}

fn precision_keyword(pq: &PrecisionQualifier) -> &'static str {
    match pq {
        PrecisionQualifier::High => "highp",
        PrecisionQualifier::Medium => "mediump",
        PrecisionQualifier::Low => "lowp",
    }
}

fn binary_symbol(op: &BinaryOp) -> &'static str {
    match op {
        BinaryOp::Or => "||",
        BinaryOp::Xor => "^^",
        BinaryOp::And => "&&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::BitAnd => "&",
        BinaryOp::Equal => "==",
        BinaryOp::NonEqual => "!=",
        BinaryOp::LT => "<",
        BinaryOp::GT => ">",
        BinaryOp::LTE => "<=",
        BinaryOp::GTE => ">=",
        BinaryOp::LShift => "<<",
        BinaryOp::RShift => ">>",
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mult => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
    }
}

fn assignment_symbol(op: &AssignmentOp) -> &'static str {
    match op {
        AssignmentOp::Equal => "=",
        AssignmentOp::Mult => "*=",
        AssignmentOp::Div => "/=",
        AssignmentOp::Mod => "%=",
        AssignmentOp::Add => "+=",
        AssignmentOp::Sub => "-=",
        AssignmentOp::LShift => "<<=",
        AssignmentOp::RShift => ">>=",
        AssignmentOp::And => "&=",
        AssignmentOp::Xor => "^=",
        AssignmentOp::Or => "|=",
    }
}
