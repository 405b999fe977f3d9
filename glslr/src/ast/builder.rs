//! Adapter from the external parser's syntax trees to arena nodes.
//!
//! The builder consumes `glsl::syntax` values by value and produces detached arena
//! nodes; [build_translation_unit] additionally installs the result as the tree root,
//! which indexes the whole tree under the root's policies. No semantic checks happen
//! here.

use glsl::syntax;
use glsl::transpiler::glsl::FormattingState;

use super::{Content, LiteralValue, NodeId, QualifierKind, Root, TypeClass, UnaryOperator};

/// Build a whole translation unit and install it as the tree root
pub fn build_translation_unit(root: &mut Root, tu: syntax::TranslationUnit) -> NodeId {
    let declarations = (tu.0)
        .0
        .into_iter()
        .map(|ed| external_declaration(root, ed))
        .collect();
    let unit = root.add(Content::TranslationUnit { declarations });
    root.set_tree_root(unit);
    unit
}

/// Build a detached external declaration node
pub fn build_external_declaration(root: &mut Root, ed: syntax::ExternalDeclaration) -> NodeId {
    external_declaration(root, ed)
}

/// Build a detached statement node
pub fn build_statement(root: &mut Root, s: syntax::Statement) -> NodeId {
    statement(root, s)
}

/// Build a detached compound statement node
pub fn build_compound(root: &mut Root, c: syntax::CompoundStatement) -> NodeId {
    compound(root, c)
}

/// Build a detached expression node
pub fn build_expr(root: &mut Root, e: syntax::Expr) -> NodeId {
    expr(root, e)
}

fn external_declaration(root: &mut Root, ed: syntax::ExternalDeclaration) -> NodeId {
    match ed {
        syntax::ExternalDeclaration::Preprocessor(pp) => preprocessor(root, pp),
        syntax::ExternalDeclaration::FunctionDefinition(fd) => {
            let prototype = function_prototype(root, fd.prototype);
            let body = compound(root, fd.statement);
            root.add(Content::FunctionDefinition { prototype, body })
        }
        syntax::ExternalDeclaration::Declaration(d) => declaration(root, d),
    }
}

fn preprocessor(root: &mut Root, pp: syntax::Preprocessor) -> NodeId {
    match pp {
        syntax::Preprocessor::Version(v) => root.add(Content::Version {
            version: v.version,
            profile: v.profile,
        }),
        syntax::Preprocessor::Extension(e) => root.add(Content::Extension {
            name: match e.name {
                syntax::PreprocessorExtensionName::All => "all".to_owned(),
                syntax::PreprocessorExtensionName::Specific(name) => name,
            },
            behavior: e.behavior,
        }),
        syntax::Preprocessor::Pragma(p) => root.add(Content::Pragma { command: p.command }),
        other => {
            // Directives the engine does not model are carried through as raw text
            let mut raw = String::new();
            glsl::transpiler::glsl::show_preprocessor(
                &mut raw,
                &other,
                &mut FormattingState::default(),
            )
            .unwrap();
            root.add(Content::Directive {
                raw: raw.trim_end().to_owned(),
            })
        }
    }
}

fn declaration(root: &mut Root, d: syntax::Declaration) -> NodeId {
    match d {
        syntax::Declaration::FunctionPrototype(fp) => function_prototype(root, fp),
        syntax::Declaration::InitDeclaratorList(idl) => {
            let ty = fully_specified_type(root, idl.head.ty);
            let mut members = Vec::new();
            if let Some(name) = idl.head.name {
                let name = identifier(root, name);
                let array = idl.head.array_specifier.map(|a| array_specifier(root, a));
                let initializer = idl.head.initializer.map(|i| init(root, i));
                members.push(root.add(Content::DeclarationMember {
                    name,
                    array,
                    initializer,
                }));
            }
            for tail in idl.tail {
                let name = identifier(root, tail.ident.ident);
                let array = tail.ident.array_spec.map(|a| array_specifier(root, a));
                let initializer = tail.initializer.map(|i| init(root, i));
                members.push(root.add(Content::DeclarationMember {
                    name,
                    array,
                    initializer,
                }));
            }
            root.add(Content::InitDeclaration { ty, members })
        }
        syntax::Declaration::Precision(pq, ts) => {
            let ty = type_specifier(root, ts);
            root.add(Content::PrecisionDeclaration { precision: pq, ty })
        }
        syntax::Declaration::Block(b) => {
            let qualifier = type_qualifier(root, b.qualifier);
            let name = identifier(root, b.name);
            let fields = b.fields.into_iter().map(|f| struct_field(root, f)).collect();
            let instance = b.identifier.map(|ai| arrayed_identifier(root, ai));
            root.add(Content::InterfaceBlock {
                qualifier,
                name,
                fields,
                instance,
            })
        }
        syntax::Declaration::Global(tq, idents) => {
            let qualifier = type_qualifier(root, tq);
            let names = idents.into_iter().map(|i| identifier(root, i)).collect();
            root.add(Content::LayoutDefaults { qualifier, names })
        }
    }
}

fn function_prototype(root: &mut Root, fp: syntax::FunctionPrototype) -> NodeId {
    let ty = fully_specified_type(root, fp.ty);
    let name = identifier(root, fp.name);
    let parameters = fp
        .parameters
        .into_iter()
        .map(|p| function_parameter(root, p))
        .collect();
    root.add(Content::FunctionPrototype {
        ty,
        name,
        parameters,
    })
}

fn function_parameter(root: &mut Root, p: syntax::FunctionParameterDeclaration) -> NodeId {
    match p {
        syntax::FunctionParameterDeclaration::Named(qualifier, declarator) => {
            let qualifier = qualifier.map(|q| type_qualifier(root, q));
            let ty = type_specifier(root, declarator.ty);
            let declarator = arrayed_identifier(root, declarator.ident);
            root.add(Content::FunctionParameter {
                qualifier,
                ty,
                declarator: Some(declarator),
            })
        }
        syntax::FunctionParameterDeclaration::Unnamed(qualifier, ts) => {
            let qualifier = qualifier.map(|q| type_qualifier(root, q));
            let ty = type_specifier(root, ts);
            root.add(Content::FunctionParameter {
                qualifier,
                ty,
                declarator: None,
            })
        }
    }
}

fn fully_specified_type(root: &mut Root, fst: syntax::FullySpecifiedType) -> NodeId {
    let qualifier = fst.qualifier.map(|q| type_qualifier(root, q));
    let ty = type_specifier(root, fst.ty);
    root.add(Content::FullySpecifiedType { qualifier, ty })
}

fn type_qualifier(root: &mut Root, tq: syntax::TypeQualifier) -> NodeId {
    let parts = tq
        .qualifiers
        .0
        .into_iter()
        .map(|q| qualifier_spec(root, q))
        .collect();
    root.add(Content::TypeQualifier { parts })
}

fn qualifier_spec(root: &mut Root, q: syntax::TypeQualifierSpec) -> NodeId {
    let part = match q {
        syntax::TypeQualifierSpec::Storage(sq) => QualifierKind::Storage(sq),
        syntax::TypeQualifierSpec::Layout(lq) => QualifierKind::Layout(layout_qualifier(root, lq)),
        syntax::TypeQualifierSpec::Precision(pq) => QualifierKind::Precision(pq),
        syntax::TypeQualifierSpec::Interpolation(iq) => QualifierKind::Interpolation(iq),
        syntax::TypeQualifierSpec::Invariant => QualifierKind::Invariant,
        syntax::TypeQualifierSpec::Precise => QualifierKind::Precise,
    };
    root.add(Content::QualifierPart { part })
}

fn layout_qualifier(root: &mut Root, lq: syntax::LayoutQualifier) -> NodeId {
    let parts = lq
        .ids
        .0
        .into_iter()
        .map(|spec| match spec {
            syntax::LayoutQualifierSpec::Identifier(ident, value) => {
                let name = Some(identifier(root, ident));
                let value = value.map(|e| expr(root, *e));
                root.add(Content::LayoutQualifierPart {
                    name,
                    value,
                    shared: false,
                })
            }
            syntax::LayoutQualifierSpec::Shared => root.add(Content::LayoutQualifierPart {
                name: None,
                value: None,
                shared: true,
            }),
        })
        .collect();
    root.add(Content::LayoutQualifier { parts })
}

fn type_specifier(root: &mut Root, ts: syntax::TypeSpecifier) -> NodeId {
    let array = ts.array_specifier.map(|a| array_specifier(root, a));
    let class = match ts.ty {
        syntax::TypeSpecifierNonArray::Struct(ss) => TypeClass::Struct(struct_specifier(root, ss)),
        syntax::TypeSpecifierNonArray::TypeName(tn) => {
            TypeClass::Named(root.add_identifier(tn.0))
        }
        builtin => TypeClass::Builtin(builtin),
    };
    root.add(Content::TypeSpecifier { class, array })
}

fn struct_specifier(root: &mut Root, ss: syntax::StructSpecifier) -> NodeId {
    let name = ss.name.map(|tn| root.add_identifier(tn.0));
    let fields = ss
        .fields
        .0
        .into_iter()
        .map(|f| struct_field(root, f))
        .collect();
    root.add(Content::StructSpecifier { name, fields })
}

fn struct_field(root: &mut Root, sf: syntax::StructFieldSpecifier) -> NodeId {
    let qualifier = sf.qualifier.map(|q| type_qualifier(root, q));
    let ty = type_specifier(root, sf.ty);
    let declarators = sf
        .identifiers
        .0
        .into_iter()
        .map(|ai| arrayed_identifier(root, ai))
        .collect();
    root.add(Content::StructField {
        qualifier,
        ty,
        declarators,
    })
}

fn arrayed_identifier(root: &mut Root, ai: syntax::ArrayedIdentifier) -> NodeId {
    let name = identifier(root, ai.ident);
    let array = ai.array_spec.map(|a| array_specifier(root, a));
    root.add(Content::ArrayedIdentifier { name, array })
}

fn array_specifier(root: &mut Root, spec: syntax::ArraySpecifier) -> NodeId {
    let dimensions = spec
        .dimensions
        .0
        .into_iter()
        .map(|dim| {
            let size = match dim {
                syntax::ArraySpecifierDimension::Unsized => None,
                syntax::ArraySpecifierDimension::ExplicitlySized(e) => Some(expr(root, *e)),
            };
            root.add(Content::ArrayDimension { size })
        })
        .collect();
    root.add(Content::ArraySpecifier { dimensions })
}

fn statement(root: &mut Root, s: syntax::Statement) -> NodeId {
    match s {
        syntax::Statement::Compound(c) => compound(root, *c),
        syntax::Statement::Simple(ss) => simple_statement(root, *ss),
    }
}

fn compound(root: &mut Root, c: syntax::CompoundStatement) -> NodeId {
    let statements = c
        .statement_list
        .into_iter()
        .map(|s| statement(root, s))
        .collect();
    root.add(Content::Compound { statements })
}

fn simple_statement(root: &mut Root, ss: syntax::SimpleStatement) -> NodeId {
    match ss {
        syntax::SimpleStatement::Declaration(d) => {
            let declaration = declaration(root, d);
            root.add(Content::DeclarationStatement { declaration })
        }
        syntax::SimpleStatement::Expression(es) => match es {
            Some(e) => {
                let expression = expr(root, e);
                root.add(Content::ExpressionStatement { expression })
            }
            None => root.add(Content::EmptyStatement),
        },
        syntax::SimpleStatement::Selection(s) => {
            let condition = expr(root, *s.cond);
            let (if_branch, else_branch) = match s.rest {
                syntax::SelectionRestStatement::Statement(st) => (statement(root, *st), None),
                syntax::SelectionRestStatement::Else(st, else_st) => {
                    (statement(root, *st), Some(statement(root, *else_st)))
                }
            };
            root.add(Content::Selection {
                condition,
                if_branch,
                else_branch,
            })
        }
        syntax::SimpleStatement::Switch(sw) => {
            let head = expr(root, *sw.head);
            let body = sw.body.into_iter().map(|s| statement(root, s)).collect();
            root.add(Content::Switch { head, body })
        }
        syntax::SimpleStatement::CaseLabel(cl) => {
            let label = match cl {
                syntax::CaseLabel::Case(e) => Some(expr(root, *e)),
                syntax::CaseLabel::Def => None,
            };
            root.add(Content::CaseLabel { label })
        }
        syntax::SimpleStatement::Iteration(it) => iteration(root, it),
        syntax::SimpleStatement::Jump(j) => {
            use super::JumpOperation::*;
            let (operation, argument) = match j {
                syntax::JumpStatement::Continue => (Continue, None),
                syntax::JumpStatement::Break => (Break, None),
                syntax::JumpStatement::Discard => (Discard, None),
                syntax::JumpStatement::Return(e) => (Return, e.map(|e| expr(root, *e))),
            };
            root.add(Content::Jump {
                operation,
                argument,
            })
        }
    }
}

fn iteration(root: &mut Root, it: syntax::IterationStatement) -> NodeId {
    match it {
        syntax::IterationStatement::While(cond, body) => {
            let condition = condition(root, cond);
            let body = statement(root, *body);
            root.add(Content::While { condition, body })
        }
        syntax::IterationStatement::DoWhile(body, cond) => {
            let body = statement(root, *body);
            let condition = expr(root, *cond);
            root.add(Content::DoWhile { body, condition })
        }
        syntax::IterationStatement::For(init, rest, body) => {
            let init = match init {
                syntax::ForInitStatement::Expression(e) => e.map(|e| expr(root, e)),
                syntax::ForInitStatement::Declaration(d) => Some(declaration(root, *d)),
            };
            let cond = rest.condition.map(|c| condition(root, c));
            let update = rest.post_expr.map(|e| expr(root, *e));
            let body = statement(root, *body);
            root.add(Content::For {
                init,
                condition: cond,
                update,
                body,
            })
        }
    }
}

fn condition(root: &mut Root, c: syntax::Condition) -> NodeId {
    match c {
        syntax::Condition::Expr(e) => expr(root, *e),
        syntax::Condition::Assignment(fst, name, initializer) => {
            let ty = fully_specified_type(root, fst);
            let name = identifier(root, name);
            let initializer = init(root, initializer);
            root.add(Content::ConditionDeclaration {
                ty,
                name,
                initializer,
            })
        }
    }
}

fn init(root: &mut Root, i: syntax::Initializer) -> NodeId {
    match i {
        syntax::Initializer::Simple(e) => expr(root, *e),
        syntax::Initializer::List(items) => {
            let items = items.0.into_iter().map(|i| init(root, i)).collect();
            root.add(Content::InitializerList { items })
        }
    }
}

fn expr(root: &mut Root, e: syntax::Expr) -> NodeId {
    use syntax::Expr;

    match e {
        Expr::Variable(ident) => {
            let target = identifier(root, ident);
            root.add(Content::Reference { target })
        }
        Expr::IntConst(x) => root.add(Content::Literal {
            value: LiteralValue::Int(x),
        }),
        Expr::UIntConst(x) => root.add(Content::Literal {
            value: LiteralValue::UInt(x),
        }),
        Expr::BoolConst(x) => root.add(Content::Literal {
            value: LiteralValue::Bool(x),
        }),
        Expr::FloatConst(x) => root.add(Content::Literal {
            value: LiteralValue::Float(x),
        }),
        Expr::DoubleConst(x) => root.add(Content::Literal {
            value: LiteralValue::Double(x),
        }),
        Expr::Unary(op, operand) => {
            let operator = match op {
                syntax::UnaryOp::Inc => UnaryOperator::PreIncrement,
                syntax::UnaryOp::Dec => UnaryOperator::PreDecrement,
                syntax::UnaryOp::Add => UnaryOperator::Identity,
                syntax::UnaryOp::Minus => UnaryOperator::Negation,
                syntax::UnaryOp::Not => UnaryOperator::LogicalNot,
                syntax::UnaryOp::Complement => UnaryOperator::BitwiseNot,
            };
            let operand = expr(root, *operand);
            root.add(Content::Unary { operator, operand })
        }
        Expr::PostInc(operand) => {
            let operand = expr(root, *operand);
            root.add(Content::Unary {
                operator: UnaryOperator::PostIncrement,
                operand,
            })
        }
        Expr::PostDec(operand) => {
            let operand = expr(root, *operand);
            root.add(Content::Unary {
                operator: UnaryOperator::PostDecrement,
                operand,
            })
        }
        Expr::Binary(op, left, right) => {
            let left = expr(root, *left);
            let right = expr(root, *right);
            root.add(Content::Binary {
                operator: op,
                left,
                right,
            })
        }
        Expr::Ternary(cond, consequent, alternate) => {
            let condition = expr(root, *cond);
            let consequent = expr(root, *consequent);
            let alternate = expr(root, *alternate);
            root.add(Content::Ternary {
                condition,
                consequent,
                alternate,
            })
        }
        Expr::Assignment(target, op, value) => {
            let target = expr(root, *target);
            let value = expr(root, *value);
            root.add(Content::Assignment {
                operator: op,
                target,
                value,
            })
        }
        Expr::Bracket(base, spec) => {
            let base = expr(root, *base);
            let index = array_specifier(root, spec);
            root.add(Content::ArrayAccess { base, index })
        }
        Expr::FunCall(fi, args) => {
            let callee = match fi {
                syntax::FunIdentifier::Identifier(ident) => identifier(root, ident),
                syntax::FunIdentifier::Expr(e) => expr(root, *e),
            };
            let arguments = args.into_iter().map(|a| expr(root, a)).collect();
            root.add(Content::FunctionCall { callee, arguments })
        }
        Expr::Dot(base, member) => {
            let base = expr(root, *base);
            let member = identifier(root, member);
            root.add(Content::MemberAccess { base, member })
        }
        Expr::Comma(_, _) => {
            let mut items = Vec::new();
            flatten_comma(root, e, &mut items);
            root.add(Content::Sequence { items })
        }
    }
}

// The external grammar nests comma chains to the left; the sequence node is flat
fn flatten_comma(root: &mut Root, e: syntax::Expr, items: &mut Vec<NodeId>) {
    match e {
        syntax::Expr::Comma(a, b) => {
            flatten_comma(root, *a, items);
            items.push(expr(root, *b));
        }
        other => items.push(expr(root, other)),
    }
}

fn identifier(root: &mut Root, ident: syntax::Identifier) -> NodeId {
    root.add_identifier(ident.0)
}
