//! Arena syntax tree: node model, per-tree indices, builder, printer and queries.

mod node;
pub use node::*;

mod root;
pub use root::*;

pub mod builder;

pub mod path;

pub mod print;

/// Traversal event of the depth-first walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent {
    Enter,
    Exit,
}

/// Depth-first walk from `from`, reporting enter and exit events.
///
/// The visitor may mutate the tree: children are snapshotted after the enter event
/// and a child is only descended into while it is still attached under its parent.
/// A node deleted during its own visit produces no exit event.
pub fn walk(
    root: &mut Root,
    from: NodeId,
    visit: &mut dyn FnMut(&mut Root, WalkEvent, NodeId) -> crate::Result<()>,
) -> crate::Result<()> {
    if !root.exists(from) {
        return Ok(());
    }
    visit(root, WalkEvent::Enter, from)?;
    if !root.exists(from) {
        return Ok(());
    }
    for child in root.children(from) {
        if root.exists(child) && root.parent(child) == Some(from) {
            walk(root, child, visit)?;
        }
    }
    if root.exists(from) {
        visit(root, WalkEvent::Exit, from)?;
    }
    Ok(())
}
