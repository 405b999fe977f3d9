//! Arena tree storage and the per-tree indices.
//!
//! A [Root] owns every node of one tree and the three indices backing structural
//! queries: identifier spelling, node kind, and external declarations by declared
//! name. A node is present in the indices exactly while it is attached (transitively)
//! to the tree root.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use indexmap::{Equivalent, IndexMap, IndexSet};

use crate::{Error, Result};

use super::node::{Content, Node, NodeId, NodeKind};

/// Index maintenance policy
///
/// Exact keeps entries with the same key in stable insertion order across removals;
/// Unordered allows removal to reorder the remaining entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexPolicy {
    Exact,
    Unordered,
}

/// One multimap index over the arena
#[derive(Debug, Clone)]
pub struct Index<K: Hash + Eq + Clone> {
    policy: IndexPolicy,
    map: IndexMap<K, IndexSet<NodeId>>,
}

impl<K: Hash + Eq + Clone> Index<K> {
    fn new(policy: IndexPolicy) -> Self {
        Self {
            policy,
            map: IndexMap::new(),
        }
    }

    fn add(&mut self, key: K, id: NodeId) {
        self.map.entry(key).or_insert_with(IndexSet::new).insert(id);
    }

    fn remove<Q>(&mut self, key: &Q, id: NodeId)
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let mut empty = false;
        if let Some(set) = self.map.get_mut(key) {
            match self.policy {
                IndexPolicy::Exact => set.shift_remove(&id),
                IndexPolicy::Unordered => set.swap_remove(&id),
            };
            empty = set.is_empty();
        }
        if empty {
            match self.policy {
                IndexPolicy::Exact => self.map.shift_remove(key),
                IndexPolicy::Unordered => self.map.swap_remove(key),
            };
        }
    }

    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Iterate the entries under a key, a possibly empty stream
    pub fn get_stream<'a, Q>(&'a self, key: &Q) -> impl Iterator<Item = NodeId> + 'a
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.map.get(key).into_iter().flatten().copied()
    }

    /// Collect the entries under a key
    pub fn get<Q>(&self, key: &Q) -> Vec<NodeId>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.get_stream(key).collect()
    }

    /// An arbitrary entry under the key; error when there is none
    pub fn get_one<Q>(&self, key: &Q) -> Result<NodeId>
    where
        Q: Hash + Equivalent<K> + ?Sized + std::fmt::Debug,
    {
        self.get_stream(key)
            .next()
            .ok_or_else(|| Error::unique(format!("{:?}", key), 0))
    }

    /// The single entry under the key; error when there are zero or several
    pub fn get_unique<Q>(&self, key: &Q) -> Result<NodeId>
    where
        Q: Hash + Equivalent<K> + ?Sized + std::fmt::Debug,
    {
        let mut stream = self.get_stream(key);
        match (stream.next(), stream.next()) {
            (Some(id), None) => Ok(id),
            (None, _) => Err(Error::unique(format!("{:?}", key), 0)),
            (Some(_), Some(_)) => {
                Err(Error::unique(format!("{:?}", key), 2 + stream.count()))
            }
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Iterate all keys in index order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }
}

/// Selects the index policies of a freshly supplied [Root]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSupplier {
    /// Exact maintenance for all three indices
    Default,
    /// Exact identifier index, unordered node index, exact external declarations
    ExactUnorderedEdExact,
    /// Unordered maintenance everywhere
    AllUnordered,
}

impl Default for RootSupplier {
    fn default() -> Self {
        RootSupplier::Default
    }
}

impl RootSupplier {
    /// Create a root with this supplier's index policies
    pub fn supply(self) -> Root {
        use IndexPolicy::*;
        match self {
            RootSupplier::Default => Root::with_policies(Exact, Exact, Exact),
            RootSupplier::ExactUnorderedEdExact => Root::with_policies(Exact, Unordered, Exact),
            RootSupplier::AllUnordered => Root::with_policies(Unordered, Unordered, Unordered),
        }
    }
}

#[derive(Debug, Clone)]
enum IndexOp {
    IdentAdd(String, NodeId),
    IdentRemove(String, NodeId),
    NodeAdd(NodeKind, NodeId),
    NodeRemove(NodeKind, NodeId),
    ExternalAdd(String, NodeId),
    ExternalRemove(String, NodeId),
}

/// Arena owning the nodes of one tree plus its indices
#[derive(Debug, Clone)]
pub struct Root {
    nodes: Vec<Option<Node>>,
    tree_root: Option<NodeId>,
    identifier_index: Index<String>,
    node_index: Index<NodeKind>,
    external_index: Index<String>,
    pending: Option<Vec<IndexOp>>,
}

impl Default for Root {
    fn default() -> Self {
        RootSupplier::Default.supply()
    }
}

impl Root {
    pub fn with_policies(
        identifiers: IndexPolicy,
        nodes: IndexPolicy,
        external: IndexPolicy,
    ) -> Self {
        Self {
            nodes: Vec::new(),
            tree_root: None,
            identifier_index: Index::new(identifiers),
            node_index: Index::new(nodes),
            external_index: Index::new(external),
            pending: None,
        }
    }

    /// Identifier spelling index: name to identifier nodes
    pub fn identifier_index(&self) -> &Index<String> {
        &self.identifier_index
    }

    /// Node kind index: kind to nodes of that exact kind
    pub fn node_index(&self) -> &Index<NodeKind> {
        &self.node_index
    }

    /// External declaration index: declared name to owning top-level declarations
    pub fn external_declaration_index(&self) -> &Index<String> {
        &self.external_index
    }

    // --- arena access ---

    pub fn exists(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.index())
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(|slot| slot.as_ref())
    }

    /// Panics on a deleted handle; use [Root::get] where deletion is expected
    pub fn node(&self, id: NodeId) -> &Node {
        self.get(id).expect("use of a deleted node handle")
    }

    pub fn content(&self, id: NodeId) -> &Content {
        &self.node(id).content
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).content.children()
    }

    pub fn tree_root(&self) -> Option<NodeId> {
        self.tree_root
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes
            .get_mut(id.index())
            .and_then(|slot| slot.as_mut())
            .expect("use of a deleted node handle")
    }

    /// Mutable payload access for leaf edits; structural slots must be edited
    /// through the attach, detach and replace operations
    pub fn content_mut(&mut self, id: NodeId) -> &mut Content {
        &mut self.node_mut(id).content
    }

    /// Insert a detached node built from `content`; children become parented to it
    pub fn add(&mut self, content: Content) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let children = content.children();
        self.nodes.push(Some(Node {
            parent: None,
            content,
        }));
        for child in children {
            let node = self.node_mut(child);
            debug_assert!(node.parent.is_none(), "child is already attached");
            node.parent = Some(id);
        }
        id
    }

    /// Convenience for creating a fresh identifier node
    pub fn add_identifier(&mut self, name: impl Into<String>) -> NodeId {
        self.add(Content::Identifier { name: name.into() })
    }

    /// Declare `id` the root of this tree and index its subtree
    pub fn set_tree_root(&mut self, id: NodeId) {
        debug_assert!(self.parent(id).is_none());
        self.tree_root = Some(id);
        self.register(id);
    }

    /// Whether the node is reachable from the tree root by parent links
    pub fn is_attached(&self, id: NodeId) -> bool {
        let tree_root = match self.tree_root {
            Some(root) => root,
            None => return false,
        };
        let mut current = id;
        loop {
            if current == tree_root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    // --- ancestors ---

    /// Nearest ancestor (including the node itself) of the given kind
    pub fn ancestor_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.kind(node) == kind {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    pub fn has_ancestor_of_kind(&self, id: NodeId, kind: NodeKind) -> bool {
        self.ancestor_of_kind(id, kind).is_some()
    }

    /// Bounded upward search: skip `offset` ancestors above the node, then test up
    /// to `levels_up` further ancestors against the predicate
    pub fn ancestor_where(
        &self,
        id: NodeId,
        levels_up: usize,
        offset: usize,
        predicate: impl Fn(&Root, NodeId) -> bool,
    ) -> Option<NodeId> {
        let mut current = self.parent(id)?;
        for _ in 0..offset {
            current = self.parent(current)?;
        }
        for _ in 0..levels_up {
            if predicate(self, current) {
                return Some(current);
            }
            current = self.parent(current)?;
        }
        None
    }

    /// Unique `kind` ancestors of all identifiers currently spelled `name`,
    /// in identifier index order
    pub fn ancestors_of_identifier(&self, name: &str, kind: NodeKind) -> Vec<NodeId> {
        let mut seen = IndexSet::new();
        for ident in self.identifier_index.get_stream(name) {
            if let Some(ancestor) = self.ancestor_of_kind(ident, kind) {
                seen.insert(ancestor);
            }
        }
        seen.into_iter().collect()
    }

    // --- identifier maintenance ---

    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.content {
            Content::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Change an identifier's spelling, keeping the indices consistent
    pub fn rename_identifier(&mut self, id: NodeId, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        let old_name = match self.identifier_name(id) {
            Some(name) => name.to_owned(),
            None => return Err(Error::DetachmentViolation(id)),
        };
        if old_name == new_name {
            return Ok(());
        }

        let attached = self.is_attached(id);
        let owner = self.owning_external_declaration(id);
        let old_declared = owner.map(|ed| self.declared_names(ed));

        match self.content_mut(id) {
            Content::Identifier { name } => *name = new_name.clone(),
            _ => unreachable!(),
        }

        if attached {
            self.apply(IndexOp::IdentRemove(old_name, id));
            self.apply(IndexOp::IdentAdd(new_name, id));
            if let (Some(ed), Some(old_declared)) = (owner, old_declared) {
                let new_declared = self.declared_names(ed);
                for name in old_declared.iter().filter(|n| !new_declared.contains(n)) {
                    self.apply(IndexOp::ExternalRemove(name.clone(), ed));
                }
                for name in new_declared.iter().filter(|n| !old_declared.contains(n)) {
                    self.apply(IndexOp::ExternalAdd(name.clone(), ed));
                }
            }
        }
        Ok(())
    }

    /// The top-level declaration holding this node, when it has one
    pub fn owning_external_declaration(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if self.kind(parent) == NodeKind::TranslationUnit {
                return Some(current);
            }
            current = parent;
        }
        None
    }

    /// Names declared by a top-level node, the keys it takes in the external
    /// declaration index
    pub fn declared_names(&self, ed: NodeId) -> Vec<String> {
        let mut names = Vec::new();
        let mut push_ident = |root: &Root, id: NodeId| {
            if let Some(name) = root.identifier_name(id) {
                names.push(name.to_owned());
            }
        };
        match self.content(ed) {
            Content::FunctionDefinition { prototype, .. } => {
                if let Content::FunctionPrototype { name, .. } = self.content(*prototype) {
                    push_ident(self, *name);
                }
            }
            Content::FunctionPrototype { name, .. } => push_ident(self, *name),
            Content::InitDeclaration { members, .. } => {
                for member in members {
                    if let Content::DeclarationMember { name, .. } = self.content(*member) {
                        push_ident(self, *name);
                    }
                }
            }
            Content::InterfaceBlock {
                name,
                fields,
                instance,
                ..
            } => {
                push_ident(self, *name);
                if let Some(instance) = instance {
                    if let Content::ArrayedIdentifier { name, .. } = self.content(*instance) {
                        push_ident(self, *name);
                    }
                }
                for field in fields {
                    if let Content::StructField { declarators, .. } = self.content(*field) {
                        for declarator in declarators {
                            if let Content::ArrayedIdentifier { name, .. } =
                                self.content(*declarator)
                            {
                                push_ident(self, *name);
                            }
                        }
                    }
                }
            }
            Content::LayoutDefaults { names: decls, .. } => {
                for decl in decls.clone() {
                    push_ident(self, decl);
                }
            }
            _ => {}
        }
        names
    }

    // --- attachment ---

    /// Append a detached node to a list node's primary child sequence
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let len = match self.get(parent).map(|n| n.content.child_list()) {
            Some(Some(list)) => list.len(),
            _ => return Err(Error::DetachmentViolation(parent)),
        };
        self.insert_child(parent, len, child)
    }

    /// Insert a detached node into a list node's primary child sequence
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        if !self.exists(child) || self.parent(child).is_some() {
            return Err(Error::DetachmentViolation(child));
        }
        match self.node_mut(parent).content.child_list_mut() {
            Some(list) if index <= list.len() => list.insert(index, child),
            _ => return Err(Error::DetachmentViolation(parent)),
        }
        self.node_mut(child).parent = Some(parent);
        if self.is_attached(parent) {
            self.register(child);
        }
        Ok(())
    }

    /// Attach a detached node into a slot of `parent` chosen by the installer.
    ///
    /// The installer mutates the parent payload to hold the child and reports
    /// whether it did; this is the attach path for optional slots the sequence
    /// operations cannot reach.
    pub fn adopt(
        &mut self,
        parent: NodeId,
        child: NodeId,
        install: impl FnOnce(&mut Content, NodeId) -> bool,
    ) -> Result<()> {
        if !self.exists(child) || self.parent(child).is_some() {
            return Err(Error::DetachmentViolation(child));
        }
        if !install(&mut self.node_mut(parent).content, child) {
            return Err(Error::DetachmentViolation(parent));
        }
        self.node_mut(child).parent = Some(parent);
        if self.is_attached(parent) {
            self.register(child);
        }
        Ok(())
    }

    /// Atomically substitute `new` for `old` in the parent slot holding `old`
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        let parent = self
            .parent(old)
            .ok_or(Error::DetachmentViolation(old))?;
        if !self.exists(new) || self.parent(new).is_some() {
            return Err(Error::DetachmentViolation(new));
        }
        if self.is_attached(old) {
            self.unregister(old);
        }
        if !self.node_mut(parent).content.replace_child(old, new) {
            return Err(Error::IndexInvariantBroken(format!(
                "parent of {:?} does not hold it in any slot",
                old
            )));
        }
        self.node_mut(old).parent = None;
        self.node_mut(new).parent = Some(parent);
        if self.is_attached(new) {
            self.register(new);
        }
        Ok(())
    }

    /// [Root::replace], then delete the detached subtree
    pub fn replace_and_delete(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        self.replace(old, new)?;
        self.delete_subtree(old);
        Ok(())
    }

    /// Remove a node from its parent's sequence or optional slot and deregister
    /// its subtree. Fails on required slots; replace those instead.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let parent = self.parent(id).ok_or(Error::DetachmentViolation(id))?;
        let attached = self.is_attached(id);
        if !self.node_mut(parent).content.remove_child(id) {
            return Err(Error::DetachmentViolation(id));
        }
        if attached {
            // The parent link is still intact here, which the external
            // declaration index teardown relies on
            self.unregister(id);
        }
        self.node_mut(id).parent = None;
        Ok(())
    }

    /// [Root::detach], then delete the subtree so reuse of the handle is detectable
    pub fn detach_and_delete(&mut self, id: NodeId) -> Result<()> {
        self.detach(id)?;
        self.delete_subtree(id);
        Ok(())
    }

    fn delete_subtree(&mut self, id: NodeId) {
        let children = self.children(id);
        for child in children {
            self.delete_subtree(child);
        }
        self.nodes[id.index()] = None;
    }

    // --- cloning ---

    /// Deep copy a subtree of `src` into this arena; the copy is detached
    pub fn clone_from(&mut self, src: &Root, id: NodeId) -> NodeId {
        let mut mapping = HashMap::new();
        self.clone_from_mapped(src, id, &mut mapping)
    }

    pub(crate) fn clone_from_mapped(
        &mut self,
        src: &Root,
        id: NodeId,
        mapping: &mut HashMap<NodeId, NodeId>,
    ) -> NodeId {
        let mut content = src.node(id).content.clone();
        for child in content.children() {
            let cloned = self.clone_from_mapped(src, child, mapping);
            content.replace_child(child, cloned);
        }
        let new_id = self.add(content);
        mapping.insert(id, new_id);
        new_id
    }

    /// Deep copy a subtree within this arena; the copy is detached
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let mut content = self.node(id).content.clone();
        for child in content.children() {
            let cloned = self.clone_subtree(child);
            content.replace_child(child, cloned);
        }
        self.add(content)
    }

    /// Structural equality of two subtrees, possibly across arenas
    pub fn subtree_eq(&self, a: NodeId, other: &Root, b: NodeId) -> bool {
        if !self.node(a).content.shallow_eq(&other.node(b).content) {
            return false;
        }
        let left = self.children(a);
        let right = other.children(b);
        left.len() == right.len()
            && left
                .iter()
                .zip(right.iter())
                .all(|(l, r)| self.subtree_eq(*l, other, *r))
    }

    // --- index maintenance ---

    fn apply(&mut self, op: IndexOp) {
        if let Some(pending) = self.pending.as_mut() {
            pending.push(op);
            return;
        }
        match op {
            IndexOp::IdentAdd(name, id) => self.identifier_index.add(name, id),
            IndexOp::IdentRemove(name, id) => self.identifier_index.remove(&name, id),
            IndexOp::NodeAdd(kind, id) => self.node_index.add(kind, id),
            IndexOp::NodeRemove(kind, id) => self.node_index.remove(&kind, id),
            IndexOp::ExternalAdd(name, id) => self.external_index.add(name, id),
            IndexOp::ExternalRemove(name, id) => self.external_index.remove(&name, id),
        }
    }

    fn register(&mut self, id: NodeId) {
        trace!("registering subtree at {:?}", id);
        // document order keeps the Exact policy's insertion order meaningful
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let kind = self.kind(current);
            self.apply(IndexOp::NodeAdd(kind, current));
            if let Some(name) = self.identifier_name(current).map(str::to_owned) {
                self.apply(IndexOp::IdentAdd(name, current));
            }
            if self
                .parent(current)
                .map(|p| self.kind(p) == NodeKind::TranslationUnit)
                .unwrap_or(false)
            {
                for name in self.declared_names(current) {
                    self.apply(IndexOp::ExternalAdd(name, current));
                }
            }
            stack.extend(self.children(current).into_iter().rev());
        }
    }

    fn unregister(&mut self, id: NodeId) {
        trace!("deregistering subtree at {:?}", id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let kind = self.kind(current);
            self.apply(IndexOp::NodeRemove(kind, current));
            if let Some(name) = self.identifier_name(current).map(str::to_owned) {
                self.apply(IndexOp::IdentRemove(name, current));
            }
            if self
                .parent(current)
                .map(|p| self.kind(p) == NodeKind::TranslationUnit)
                .unwrap_or(false)
            {
                for name in self.declared_names(current) {
                    self.apply(IndexOp::ExternalRemove(name, current));
                }
            }
            stack.extend(self.children(current).into_iter().rev());
        }
    }

    /// Open a scope during which index mutations are queued; they are applied in
    /// order when the session ends, including along error paths
    pub fn index_build_session(&mut self) -> IndexBuildSession<'_> {
        debug_assert!(self.pending.is_none(), "index build sessions do not nest");
        self.pending = Some(Vec::new());
        IndexBuildSession { root: self }
    }

    fn flush_session(&mut self) {
        if let Some(ops) = self.pending.take() {
            debug!("flushing {} queued index operations", ops.len());
            for op in ops {
                self.apply(op);
            }
        }
    }

    /// Verify the structural invariants linking the arena and the indices
    pub fn check_invariants(&self) -> Result<()> {
        let broken = |msg: String| Err(Error::IndexInvariantBroken(msg));

        for (index, slot) in self.nodes.iter().enumerate() {
            let node = match slot {
                Some(node) => node,
                None => continue,
            };
            let id = NodeId(index as u32);
            if let Some(parent) = node.parent {
                let holding = self
                    .children(parent)
                    .into_iter()
                    .filter(|c| *c == id)
                    .count();
                if holding != 1 {
                    return broken(format!(
                        "{:?} appears {} times among the children of {:?}",
                        id, holding, parent
                    ));
                }
            }
            if self.is_attached(id) {
                if !self.node_index.get_stream(&node.kind()).any(|n| n == id) {
                    return broken(format!("attached {:?} missing from the node index", id));
                }
                if let Content::Identifier { name } = &node.content {
                    if !self.identifier_index.get_stream(name.as_str()).any(|n| n == id) {
                        return broken(format!(
                            "attached identifier {:?} missing under {:?}",
                            id, name
                        ));
                    }
                }
            }
        }

        for key in self.identifier_index.keys() {
            for id in self.identifier_index.get_stream(key) {
                if self.identifier_name(id) != Some(key.as_str()) {
                    return broken(format!("identifier index entry {:?} renamed away", id));
                }
                if !self.is_attached(id) {
                    return broken(format!("identifier index entry {:?} is detached", id));
                }
            }
        }
        for kind in self.node_index.keys() {
            for id in self.node_index.get_stream(kind) {
                if !self.exists(id) || self.kind(id) != *kind {
                    return broken(format!("node index entry {:?} under wrong kind", id));
                }
                if !self.is_attached(id) {
                    return broken(format!("node index entry {:?} is detached", id));
                }
            }
        }
        Ok(())
    }
}

/// Guard for a batched index update scope; dropping it flushes the queue
pub struct IndexBuildSession<'r> {
    root: &'r mut Root,
}

impl Deref for IndexBuildSession<'_> {
    type Target = Root;

    fn deref(&self) -> &Root {
        self.root
    }
}

impl DerefMut for IndexBuildSession<'_> {
    fn deref_mut(&mut self) -> &mut Root {
        self.root
    }
}

impl Drop for IndexBuildSession<'_> {
    fn drop(&mut self) {
        self.root.flush_session();
    }
}
