//! Node model for the arena syntax tree.
//!
//! Every node is stored in a [Root](super::Root) arena and addressed by a [NodeId]
//! handle. Parent and child slots hold handles, which keeps the upward links of the
//! tree free of ownership cycles. The payload of a node is a [Content] value; its
//! [NodeKind] is the tag the node index and the matchers operate on.

use glsl::syntax::{
    AssignmentOp, BinaryOp, InterpolationQualifier, PrecisionQualifier,
    PreprocessorExtensionBehavior, PreprocessorVersionProfile, StorageQualifier,
    TypeSpecifierNonArray,
};

/// Handle to a node inside a [Root](super::Root) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind tag of a node, used as the key of the node index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    TranslationUnit,
    Version,
    Extension,
    Pragma,
    Directive,
    LayoutDefaults,
    FunctionDefinition,
    InitDeclaration,
    DeclarationMember,
    InterfaceBlock,
    FunctionPrototype,
    FunctionParameter,
    PrecisionDeclaration,
    EmptyDeclaration,
    Compound,
    ExpressionStatement,
    EmptyStatement,
    DeclarationStatement,
    Selection,
    Switch,
    CaseLabel,
    While,
    DoWhile,
    For,
    Jump,
    ConditionDeclaration,
    Reference,
    Literal,
    Grouping,
    MemberAccess,
    ArrayAccess,
    FunctionCall,
    Unary,
    Binary,
    Assignment,
    Ternary,
    Sequence,
    InitializerList,
    FullySpecifiedType,
    TypeQualifier,
    QualifierPart,
    LayoutQualifier,
    LayoutQualifierPart,
    TypeSpecifier,
    StructSpecifier,
    StructField,
    ArraySpecifier,
    ArrayDimension,
    ArrayedIdentifier,
    Identifier,
}

impl NodeKind {
    /// Kinds forming the expression family
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            NodeKind::Reference
                | NodeKind::Literal
                | NodeKind::Grouping
                | NodeKind::MemberAccess
                | NodeKind::ArrayAccess
                | NodeKind::FunctionCall
                | NodeKind::Unary
                | NodeKind::Binary
                | NodeKind::Assignment
                | NodeKind::Ternary
                | NodeKind::Sequence
        )
    }

    /// Kinds forming the statement family
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::Compound
                | NodeKind::ExpressionStatement
                | NodeKind::EmptyStatement
                | NodeKind::DeclarationStatement
                | NodeKind::Selection
                | NodeKind::Switch
                | NodeKind::CaseLabel
                | NodeKind::While
                | NodeKind::DoWhile
                | NodeKind::For
                | NodeKind::Jump
        )
    }

    /// Kinds forming the declaration family
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::InitDeclaration
                | NodeKind::InterfaceBlock
                | NodeKind::FunctionPrototype
                | NodeKind::PrecisionDeclaration
                | NodeKind::EmptyDeclaration
        )
    }

    /// Kinds that may appear as direct children of a translation unit
    pub fn is_external_declaration(self) -> bool {
        self.is_declaration()
            || matches!(
                self,
                NodeKind::Version
                    | NodeKind::Extension
                    | NodeKind::Pragma
                    | NodeKind::Directive
                    | NodeKind::LayoutDefaults
                    | NodeKind::FunctionDefinition
            )
    }
}

/// Kind predicate used by matchers, templates and query paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    Exact(NodeKind),
    Expression,
    Statement,
    Declaration,
    ExternalDeclaration,
    Any,
}

impl KindFilter {
    pub fn accepts(self, kind: NodeKind) -> bool {
        match self {
            KindFilter::Exact(k) => k == kind,
            KindFilter::Expression => kind.is_expression(),
            KindFilter::Statement => kind.is_statement(),
            KindFilter::Declaration => kind.is_declaration(),
            KindFilter::ExternalDeclaration => kind.is_external_declaration(),
            KindFilter::Any => true,
        }
    }
}

impl std::fmt::Display for KindFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            KindFilter::Exact(k) => write!(f, "{:?}", k),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Second tag used by generic expression walks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandStructure {
    None,
    Unary,
    Binary,
    Ternary,
    Many,
}

/// Typed literal payload
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i32),
    UInt(u32),
    Float(f32),
    Double(f64),
    Bool(bool),
    Str(String),
}

/// Unary operators, folding prefix and postfix increment and decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    Identity,
    Negation,
    LogicalNot,
    BitwiseNot,
}

impl UnaryOperator {
    pub fn is_postfix(self) -> bool {
        matches!(self, UnaryOperator::PostIncrement | UnaryOperator::PostDecrement)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOperation {
    Break,
    Continue,
    Return,
    Discard,
}

/// Payload of a single qualifier part
#[derive(Debug, Clone, PartialEq)]
pub enum QualifierKind {
    Storage(StorageQualifier),
    Layout(NodeId),
    Precision(PrecisionQualifier),
    Interpolation(InterpolationQualifier),
    Invariant,
    Precise,
}

/// Discriminates the three shapes of a type specifier
#[derive(Debug, Clone, PartialEq)]
pub enum TypeClass {
    /// Builtin type; never carries the struct or type-name variants
    Builtin(TypeSpecifierNonArray),
    Struct(NodeId),
    Named(NodeId),
}

/// Payload of an arena node. Child slots hold [NodeId] handles.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    TranslationUnit {
        declarations: Vec<NodeId>,
    },
    Version {
        version: u16,
        profile: Option<PreprocessorVersionProfile>,
    },
    Extension {
        name: String,
        behavior: Option<PreprocessorExtensionBehavior>,
    },
    Pragma {
        command: String,
    },
    /// Non-parsed preprocessor line carried through verbatim
    Directive {
        raw: String,
    },
    LayoutDefaults {
        qualifier: NodeId,
        names: Vec<NodeId>,
    },
    FunctionDefinition {
        prototype: NodeId,
        body: NodeId,
    },
    InitDeclaration {
        ty: NodeId,
        members: Vec<NodeId>,
    },
    DeclarationMember {
        name: NodeId,
        array: Option<NodeId>,
        initializer: Option<NodeId>,
    },
    InterfaceBlock {
        qualifier: NodeId,
        name: NodeId,
        fields: Vec<NodeId>,
        instance: Option<NodeId>,
    },
    FunctionPrototype {
        ty: NodeId,
        name: NodeId,
        parameters: Vec<NodeId>,
    },
    FunctionParameter {
        qualifier: Option<NodeId>,
        ty: NodeId,
        declarator: Option<NodeId>,
    },
    PrecisionDeclaration {
        precision: PrecisionQualifier,
        ty: NodeId,
    },
    EmptyDeclaration,
    Compound {
        statements: Vec<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    EmptyStatement,
    DeclarationStatement {
        declaration: NodeId,
    },
    Selection {
        condition: NodeId,
        if_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    Switch {
        head: NodeId,
        body: Vec<NodeId>,
    },
    CaseLabel {
        /// `None` stands for the `default` label
        label: Option<NodeId>,
    },
    While {
        condition: NodeId,
        body: NodeId,
    },
    DoWhile {
        body: NodeId,
        condition: NodeId,
    },
    For {
        init: Option<NodeId>,
        condition: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    Jump {
        operation: JumpOperation,
        argument: Option<NodeId>,
    },
    ConditionDeclaration {
        ty: NodeId,
        name: NodeId,
        initializer: NodeId,
    },
    Reference {
        target: NodeId,
    },
    Literal {
        value: LiteralValue,
    },
    Grouping {
        inner: NodeId,
    },
    MemberAccess {
        base: NodeId,
        member: NodeId,
    },
    ArrayAccess {
        base: NodeId,
        index: NodeId,
    },
    FunctionCall {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    Unary {
        operator: UnaryOperator,
        operand: NodeId,
    },
    Binary {
        operator: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Assignment {
        operator: AssignmentOp,
        target: NodeId,
        value: NodeId,
    },
    Ternary {
        condition: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    Sequence {
        items: Vec<NodeId>,
    },
    InitializerList {
        items: Vec<NodeId>,
    },
    FullySpecifiedType {
        qualifier: Option<NodeId>,
        ty: NodeId,
    },
    TypeQualifier {
        parts: Vec<NodeId>,
    },
    QualifierPart {
        part: QualifierKind,
    },
    LayoutQualifier {
        parts: Vec<NodeId>,
    },
    LayoutQualifierPart {
        name: Option<NodeId>,
        value: Option<NodeId>,
        shared: bool,
    },
    TypeSpecifier {
        class: TypeClass,
        array: Option<NodeId>,
    },
    StructSpecifier {
        name: Option<NodeId>,
        fields: Vec<NodeId>,
    },
    StructField {
        qualifier: Option<NodeId>,
        ty: NodeId,
        declarators: Vec<NodeId>,
    },
    ArraySpecifier {
        dimensions: Vec<NodeId>,
    },
    ArrayDimension {
        /// `None` is an unsized dimension
        size: Option<NodeId>,
    },
    ArrayedIdentifier {
        name: NodeId,
        array: Option<NodeId>,
    },
    Identifier {
        name: String,
    },
}

impl Content {
    pub fn kind(&self) -> NodeKind {
        match self {
            Content::TranslationUnit { .. } => NodeKind::TranslationUnit,
            Content::Version { .. } => NodeKind::Version,
            Content::Extension { .. } => NodeKind::Extension,
            Content::Pragma { .. } => NodeKind::Pragma,
            Content::Directive { .. } => NodeKind::Directive,
            Content::LayoutDefaults { .. } => NodeKind::LayoutDefaults,
            Content::FunctionDefinition { .. } => NodeKind::FunctionDefinition,
            Content::InitDeclaration { .. } => NodeKind::InitDeclaration,
            Content::DeclarationMember { .. } => NodeKind::DeclarationMember,
            Content::InterfaceBlock { .. } => NodeKind::InterfaceBlock,
            Content::FunctionPrototype { .. } => NodeKind::FunctionPrototype,
            Content::FunctionParameter { .. } => NodeKind::FunctionParameter,
            Content::PrecisionDeclaration { .. } => NodeKind::PrecisionDeclaration,
            Content::EmptyDeclaration => NodeKind::EmptyDeclaration,
            Content::Compound { .. } => NodeKind::Compound,
            Content::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            Content::EmptyStatement => NodeKind::EmptyStatement,
            Content::DeclarationStatement { .. } => NodeKind::DeclarationStatement,
            Content::Selection { .. } => NodeKind::Selection,
            Content::Switch { .. } => NodeKind::Switch,
            Content::CaseLabel { .. } => NodeKind::CaseLabel,
            Content::While { .. } => NodeKind::While,
            Content::DoWhile { .. } => NodeKind::DoWhile,
            Content::For { .. } => NodeKind::For,
            Content::Jump { .. } => NodeKind::Jump,
            Content::ConditionDeclaration { .. } => NodeKind::ConditionDeclaration,
            Content::Reference { .. } => NodeKind::Reference,
            Content::Literal { .. } => NodeKind::Literal,
            Content::Grouping { .. } => NodeKind::Grouping,
            Content::MemberAccess { .. } => NodeKind::MemberAccess,
            Content::ArrayAccess { .. } => NodeKind::ArrayAccess,
            Content::FunctionCall { .. } => NodeKind::FunctionCall,
            Content::Unary { .. } => NodeKind::Unary,
            Content::Binary { .. } => NodeKind::Binary,
            Content::Assignment { .. } => NodeKind::Assignment,
            Content::Ternary { .. } => NodeKind::Ternary,
            Content::Sequence { .. } => NodeKind::Sequence,
            Content::InitializerList { .. } => NodeKind::InitializerList,
            Content::FullySpecifiedType { .. } => NodeKind::FullySpecifiedType,
            Content::TypeQualifier { .. } => NodeKind::TypeQualifier,
            Content::QualifierPart { .. } => NodeKind::QualifierPart,
            Content::LayoutQualifier { .. } => NodeKind::LayoutQualifier,
            Content::LayoutQualifierPart { .. } => NodeKind::LayoutQualifierPart,
            Content::TypeSpecifier { .. } => NodeKind::TypeSpecifier,
            Content::StructSpecifier { .. } => NodeKind::StructSpecifier,
            Content::StructField { .. } => NodeKind::StructField,
            Content::ArraySpecifier { .. } => NodeKind::ArraySpecifier,
            Content::ArrayDimension { .. } => NodeKind::ArrayDimension,
            Content::ArrayedIdentifier { .. } => NodeKind::ArrayedIdentifier,
            Content::Identifier { .. } => NodeKind::Identifier,
        }
    }

    /// Operand structure of an expression node; `None` for non-expression kinds
    pub fn operand_structure(&self) -> Option<OperandStructure> {
        Some(match self {
            Content::Reference { .. } | Content::Literal { .. } => OperandStructure::None,
            Content::Grouping { .. } | Content::MemberAccess { .. } | Content::Unary { .. } => {
                OperandStructure::Unary
            }
            Content::ArrayAccess { .. }
            | Content::Binary { .. }
            | Content::Assignment { .. } => OperandStructure::Binary,
            Content::Ternary { .. } => OperandStructure::Ternary,
            Content::FunctionCall { .. } | Content::Sequence { .. } => OperandStructure::Many,
            _ => return None,
        })
    }

    /// Visit every child slot handle, in print order
    pub fn for_each_child(&self, f: &mut dyn FnMut(NodeId)) {
        // The mutable visitor is the single source of truth for slot order
        let mut clone = self.clone();
        clone.for_each_child_mut(&mut |id| f(*id));
    }

    /// Collect the child handles in print order
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.for_each_child(&mut |id| out.push(id));
        out
    }

    /// Visit every child slot handle mutably, in print order
    pub fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut NodeId)) {
        fn opt(id: &mut Option<NodeId>, f: &mut dyn FnMut(&mut NodeId)) {
            if let Some(id) = id.as_mut() {
                f(id);
            }
        }
        fn all(ids: &mut [NodeId], f: &mut dyn FnMut(&mut NodeId)) {
            for id in ids {
                f(id);
            }
        }

        match self {
            Content::TranslationUnit { declarations } => all(declarations, f),
            Content::Version { .. }
            | Content::Extension { .. }
            | Content::Pragma { .. }
            | Content::Directive { .. }
            | Content::EmptyDeclaration
            | Content::EmptyStatement
            | Content::Literal { .. }
            | Content::Identifier { .. } => {}
            Content::LayoutDefaults { qualifier, names } => {
                f(qualifier);
                all(names, f);
            }
            Content::FunctionDefinition { prototype, body } => {
                f(prototype);
                f(body);
            }
            Content::InitDeclaration { ty, members } => {
                f(ty);
                all(members, f);
            }
            Content::DeclarationMember {
                name,
                array,
                initializer,
            } => {
                f(name);
                opt(array, f);
                opt(initializer, f);
            }
            Content::InterfaceBlock {
                qualifier,
                name,
                fields,
                instance,
            } => {
                f(qualifier);
                f(name);
                all(fields, f);
                opt(instance, f);
            }
            Content::FunctionPrototype {
                ty,
                name,
                parameters,
            } => {
                f(ty);
                f(name);
                all(parameters, f);
            }
            Content::FunctionParameter {
                qualifier,
                ty,
                declarator,
            } => {
                opt(qualifier, f);
                f(ty);
                opt(declarator, f);
            }
            Content::PrecisionDeclaration { ty, .. } => f(ty),
            Content::Compound { statements } => all(statements, f),
            Content::ExpressionStatement { expression } => f(expression),
            Content::DeclarationStatement { declaration } => f(declaration),
            Content::Selection {
                condition,
                if_branch,
                else_branch,
            } => {
                f(condition);
                f(if_branch);
                opt(else_branch, f);
            }
            Content::Switch { head, body } => {
                f(head);
                all(body, f);
            }
            Content::CaseLabel { label } => opt(label, f),
            Content::While { condition, body } => {
                f(condition);
                f(body);
            }
            Content::DoWhile { body, condition } => {
                f(body);
                f(condition);
            }
            Content::For {
                init,
                condition,
                update,
                body,
            } => {
                opt(init, f);
                opt(condition, f);
                opt(update, f);
                f(body);
            }
            Content::Jump { argument, .. } => opt(argument, f),
            Content::ConditionDeclaration {
                ty,
                name,
                initializer,
            } => {
                f(ty);
                f(name);
                f(initializer);
            }
            Content::Reference { target } => f(target),
            Content::Grouping { inner } => f(inner),
            Content::MemberAccess { base, member } => {
                f(base);
                f(member);
            }
            Content::ArrayAccess { base, index } => {
                f(base);
                f(index);
            }
            Content::FunctionCall { callee, arguments } => {
                f(callee);
                all(arguments, f);
            }
            Content::Unary { operand, .. } => f(operand),
            Content::Binary { left, right, .. } => {
                f(left);
                f(right);
            }
            Content::Assignment { target, value, .. } => {
                f(target);
                f(value);
            }
            Content::Ternary {
                condition,
                consequent,
                alternate,
            } => {
                f(condition);
                f(consequent);
                f(alternate);
            }
            Content::Sequence { items } | Content::InitializerList { items } => all(items, f),
            Content::FullySpecifiedType { qualifier, ty } => {
                opt(qualifier, f);
                f(ty);
            }
            Content::TypeQualifier { parts } => all(parts, f),
            Content::QualifierPart { part } => {
                if let QualifierKind::Layout(id) = part {
                    f(id);
                }
            }
            Content::LayoutQualifier { parts } => all(parts, f),
            Content::LayoutQualifierPart { name, value, .. } => {
                opt(name, f);
                opt(value, f);
            }
            Content::TypeSpecifier { class, array } => {
                match class {
                    TypeClass::Builtin(_) => {}
                    TypeClass::Struct(id) | TypeClass::Named(id) => f(id),
                }
                opt(array, f);
            }
            Content::StructSpecifier { name, fields } => {
                opt(name, f);
                all(fields, f);
            }
            Content::StructField {
                qualifier,
                ty,
                declarators,
            } => {
                opt(qualifier, f);
                f(ty);
                all(declarators, f);
            }
            Content::ArraySpecifier { dimensions } => all(dimensions, f),
            Content::ArrayDimension { size } => opt(size, f),
            Content::ArrayedIdentifier { name, array } => {
                f(name);
                opt(array, f);
            }
        }
    }

    /// Replace `old` with `new` in whichever slot holds it. Returns false if no slot does.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        let mut replaced = false;
        self.for_each_child_mut(&mut |id| {
            if !replaced && *id == old {
                *id = new;
                replaced = true;
            }
        });
        replaced
    }

    /// Remove `child` from a sequence slot or clear the optional slot holding it.
    ///
    /// Returns false when the child occupies a required slot (or no slot at all), in
    /// which case the caller should replace instead of detach.
    pub fn remove_child(&mut self, child: NodeId) -> bool {
        fn from_vec(ids: &mut Vec<NodeId>, child: NodeId) -> bool {
            if let Some(pos) = ids.iter().position(|id| *id == child) {
                ids.remove(pos);
                true
            } else {
                false
            }
        }
        fn clear(slot: &mut Option<NodeId>, child: NodeId) -> bool {
            if *slot == Some(child) {
                *slot = None;
                true
            } else {
                false
            }
        }

        match self {
            Content::TranslationUnit { declarations } => from_vec(declarations, child),
            Content::LayoutDefaults { names, .. } => from_vec(names, child),
            Content::InitDeclaration { members, .. } => from_vec(members, child),
            Content::DeclarationMember {
                array, initializer, ..
            } => clear(array, child) || clear(initializer, child),
            Content::InterfaceBlock {
                fields, instance, ..
            } => from_vec(fields, child) || clear(instance, child),
            Content::FunctionPrototype { parameters, .. } => from_vec(parameters, child),
            Content::FunctionParameter {
                qualifier,
                declarator,
                ..
            } => clear(qualifier, child) || clear(declarator, child),
            Content::Compound { statements } => from_vec(statements, child),
            Content::Selection { else_branch, .. } => clear(else_branch, child),
            Content::Switch { body, .. } => from_vec(body, child),
            Content::CaseLabel { label } => clear(label, child),
            Content::For {
                init,
                condition,
                update,
                ..
            } => clear(init, child) || clear(condition, child) || clear(update, child),
            Content::Jump { argument, .. } => clear(argument, child),
            Content::FunctionCall { arguments, .. } => from_vec(arguments, child),
            Content::Sequence { items } | Content::InitializerList { items } => {
                from_vec(items, child)
            }
            Content::FullySpecifiedType { qualifier, .. } => clear(qualifier, child),
            Content::TypeQualifier { parts } => from_vec(parts, child),
            Content::LayoutQualifier { parts } => from_vec(parts, child),
            Content::LayoutQualifierPart { name, value, .. } => {
                clear(name, child) || clear(value, child)
            }
            Content::TypeSpecifier { array, .. } => clear(array, child),
            Content::StructSpecifier { name, fields } => {
                clear(name, child) || from_vec(fields, child)
            }
            Content::StructField {
                qualifier,
                declarators,
                ..
            } => clear(qualifier, child) || from_vec(declarators, child),
            Content::ArraySpecifier { dimensions } => from_vec(dimensions, child),
            Content::ArrayDimension { size } => clear(size, child),
            Content::ArrayedIdentifier { array, .. } => clear(array, child),
            _ => false,
        }
    }

    /// The primary ordered child sequence of a list node, if this is one
    pub fn child_list_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Content::TranslationUnit { declarations } => Some(declarations),
            Content::InitDeclaration { members, .. } => Some(members),
            Content::InterfaceBlock { fields, .. } => Some(fields),
            Content::FunctionPrototype { parameters, .. } => Some(parameters),
            Content::Compound { statements } => Some(statements),
            Content::Switch { body, .. } => Some(body),
            Content::FunctionCall { arguments, .. } => Some(arguments),
            Content::Sequence { items } | Content::InitializerList { items } => Some(items),
            Content::TypeQualifier { parts } => Some(parts),
            Content::LayoutQualifier { parts } => Some(parts),
            Content::StructSpecifier { fields, .. } => Some(fields),
            Content::StructField { declarators, .. } => Some(declarators),
            Content::ArraySpecifier { dimensions } => Some(dimensions),
            Content::LayoutDefaults { names, .. } => Some(names),
            _ => None,
        }
    }

    /// Shared view of the primary child sequence
    pub fn child_list(&self) -> Option<Vec<NodeId>> {
        let mut clone = self.clone();
        clone.child_list_mut().map(|v| v.clone())
    }

    /// Structural equality of the payload ignoring child handles
    pub fn shallow_eq(&self, other: &Content) -> bool {
        let erase = |content: &Content| {
            let mut c = content.clone();
            c.for_each_child_mut(&mut |id| *id = NodeId(u32::MAX));
            c
        };
        erase(self) == erase(other)
    }
}

/// A node slot in the arena: parent link plus payload
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) content: Content,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn kind(&self) -> NodeKind {
        self.content.kind()
    }
}
