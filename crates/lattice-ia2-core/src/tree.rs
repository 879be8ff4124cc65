//! An in-memory accessible tree.
//!
//! [`AccessibleTree`] is a ready-made provider: an arena of nodes with
//! parent-child ownership, relations and pluggable facets. Hosts that keep
//! their own widget tree implement [`AccessibleNode`] directly; this tree is
//! for hosts that build an accessibility model on the side, and for tests.
//!
//! Nodes live in a [`SlotMap`], so a [`NodeKey`] stays stable while the tree
//! changes and goes stale once its node is destroyed. Handles returned by
//! [`AccessibleTree::handle`] check their key on every call, which makes
//! destroyed nodes report [`AccessibleNode::is_valid`] `false`.
//!
//! # Example
//!
//! ```
//! use lattice_ia2_core::{AccessibleNode, AccessibleTree, NodeSpec, Rect};
//! use accesskit::Role;
//!
//! let tree = AccessibleTree::new();
//! let window = tree.add_node(None, NodeSpec::new(Role::Window).backed()).unwrap();
//! let button = tree
//!     .add_node(Some(window), NodeSpec::new(Role::Button).rect(Rect::new(10, 10, 80, 24)))
//!     .unwrap();
//!
//! let handle = tree.handle(button).unwrap();
//! assert!(handle.is_valid());
//! assert_eq!(handle.role(), Role::Button);
//!
//! tree.destroy(window).unwrap();
//! assert!(!handle.is_valid());
//! ```

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use accesskit::Role;
use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use crate::error::{TreeError, TreeResult};
use crate::geometry::{Color, Rect};
use crate::logging::targets;
use crate::node::{AccessibleNode, Capability, Facet, NodeRef, ObjectKey, WindowHandle};
use crate::relation::{RelationEntry, RelationKind};
use crate::state::NodeState;

new_key_type! {
    /// Identifier of a node in an [`AccessibleTree`].
    pub struct NodeKey;
}

impl NodeKey {
    /// Convert the key to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Rebuild a key from [`NodeKey::as_raw`].
    ///
    /// This does not check that the node exists.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Initial description of a node added with [`AccessibleTree::add_node`].
#[derive(Debug, Clone)]
pub struct NodeSpec {
    /// Role.
    pub role: Role,
    /// State flags.
    pub state: NodeState,
    /// Screen rectangle.
    pub rect: Rect,
    /// Foreground color.
    pub foreground: Color,
    /// Background color.
    pub background: Color,
    /// Whether a native object backs the node.
    pub backed: bool,
    /// Hosting window.
    pub window: Option<WindowHandle>,
}

impl NodeSpec {
    /// A node with the given role and default everything else.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            state: NodeState::default(),
            rect: Rect::default(),
            foreground: Color::BLACK,
            background: Color::WHITE,
            backed: false,
            window: None,
        }
    }

    /// Set the screen rectangle.
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Set the state flags.
    pub fn state(mut self, state: NodeState) -> Self {
        self.state = state;
        self
    }

    /// Set foreground and background colors.
    pub fn colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    /// Mark the node as backed by a native object.
    pub fn backed(mut self) -> Self {
        self.backed = true;
        self
    }

    /// Set the hosting window.
    pub fn window(mut self, window: WindowHandle) -> Self {
        self.window = Some(window);
        self
    }
}

struct NodeData {
    spec: NodeSpec,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    relations: Vec<(NodeKey, RelationKind)>,
    capabilities: Vec<Capability>,
}

impl NodeData {
    fn new(spec: NodeSpec, parent: Option<NodeKey>) -> Self {
        Self {
            spec,
            parent,
            children: Vec::new(),
            relations: Vec::new(),
            capabilities: Vec::new(),
        }
    }
}

struct TreeInner {
    nodes: RwLock<SlotMap<NodeKey, NodeData>>,
    live_handles: AtomicUsize,
}

/// A shared, thread-safe in-memory accessible tree.
///
/// Cloning the tree clones a reference to the same arena.
#[derive(Clone)]
pub struct AccessibleTree {
    inner: Arc<TreeInner>,
}

/// A non-owning reference to an [`AccessibleTree`].
///
/// Facets stored inside the tree hold this instead of the tree itself so the
/// arena does not keep itself alive.
#[derive(Clone)]
pub struct WeakTree {
    inner: Weak<TreeInner>,
}

impl WeakTree {
    /// Upgrade to a strong reference if the tree is still alive.
    pub fn upgrade(&self) -> Option<AccessibleTree> {
        self.inner.upgrade().map(|inner| AccessibleTree { inner })
    }
}

impl AccessibleTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TreeInner {
                nodes: RwLock::new(SlotMap::with_key()),
                live_handles: AtomicUsize::new(0),
            }),
        }
    }

    /// Create a weak reference to this tree.
    pub fn downgrade(&self) -> WeakTree {
        WeakTree {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Add a node under `parent` (or as a root) and return its key.
    pub fn add_node(&self, parent: Option<NodeKey>, spec: NodeSpec) -> TreeResult<NodeKey> {
        let mut nodes = self.inner.nodes.write();
        if let Some(parent) = parent
            && !nodes.contains_key(parent)
        {
            return Err(TreeError::InvalidNode);
        }
        let role = spec.role;
        let key = nodes.insert(NodeData::new(spec, parent));
        if let Some(parent) = parent
            && let Some(parent_data) = nodes.get_mut(parent)
        {
            parent_data.children.push(key);
        }
        tracing::trace!(target: targets::TREE, ?key, ?role, "added node");
        Ok(key)
    }

    /// Remove a node and all its descendants.
    #[tracing::instrument(skip(self), target = "lattice_ia2_core::tree", level = "trace")]
    pub fn destroy(&self, key: NodeKey) -> TreeResult<()> {
        let mut nodes = self.inner.nodes.write();
        let descendants = collect_descendants(&nodes, key)?;

        if let Some(parent) = nodes.get(key).and_then(|data| data.parent)
            && let Some(parent_data) = nodes.get_mut(parent)
        {
            parent_data.children.retain(|&child| child != key);
        }

        for child in descendants {
            nodes.remove(child);
        }
        nodes.remove(key);
        Ok(())
    }

    /// Whether the node exists.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.inner.nodes.read().contains_key(key)
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.inner.nodes.read().len()
    }

    /// Children of a node, in order.
    pub fn children(&self, key: NodeKey) -> TreeResult<Vec<NodeKey>> {
        let nodes = self.inner.nodes.read();
        let data = nodes.get(key).ok_or(TreeError::InvalidNode)?;
        Ok(data.children.clone())
    }

    /// Parent of a node.
    pub fn parent(&self, key: NodeKey) -> TreeResult<Option<NodeKey>> {
        let nodes = self.inner.nodes.read();
        let data = nodes.get(key).ok_or(TreeError::InvalidNode)?;
        Ok(data.parent)
    }

    /// Move a node under a new parent, or make it a root with `None`.
    pub fn set_parent(&self, key: NodeKey, new_parent: Option<NodeKey>) -> TreeResult<()> {
        let mut nodes = self.inner.nodes.write();
        if !nodes.contains_key(key) {
            return Err(TreeError::InvalidNode);
        }
        if let Some(parent) = new_parent {
            if !nodes.contains_key(parent) {
                return Err(TreeError::InvalidNode);
            }
            if parent == key || is_ancestor_of(&nodes, key, parent) {
                return Err(TreeError::CircularParentage);
            }
        }

        let old_parent = nodes.get(key).and_then(|data| data.parent);
        if let Some(old) = old_parent
            && let Some(old_data) = nodes.get_mut(old)
        {
            old_data.children.retain(|&child| child != key);
        }
        if let Some(parent) = new_parent
            && let Some(parent_data) = nodes.get_mut(parent)
        {
            parent_data.children.push(key);
        }
        if let Some(data) = nodes.get_mut(key) {
            data.parent = new_parent;
        }
        Ok(())
    }

    /// Replace a node's state flags.
    pub fn set_state(&self, key: NodeKey, state: NodeState) -> TreeResult<()> {
        self.with_node_mut(key, |data| data.spec.state = state)
    }

    /// Replace a node's screen rectangle.
    pub fn set_rect(&self, key: NodeKey, rect: Rect) -> TreeResult<()> {
        self.with_node_mut(key, |data| data.spec.rect = rect)
    }

    /// Attach or detach the backing native object.
    pub fn set_backed(&self, key: NodeKey, backed: bool) -> TreeResult<()> {
        self.with_node_mut(key, |data| data.spec.backed = backed)
    }

    /// Add a relation from `source` to `target`.
    pub fn add_relation(&self, source: NodeKey, target: NodeKey, kind: RelationKind) -> TreeResult<()> {
        if !self.contains(target) {
            return Err(TreeError::InvalidNode);
        }
        self.with_node_mut(source, |data| data.relations.push((target, kind)))
    }

    /// Remove all relations from `source`.
    pub fn clear_relations(&self, source: NodeKey) -> TreeResult<()> {
        self.with_node_mut(source, |data| data.relations.clear())
    }

    /// Install a facet, replacing any facet of the same kind.
    pub fn set_capability(&self, key: NodeKey, capability: Capability) -> TreeResult<()> {
        self.with_node_mut(key, |data| {
            let facet = capability.facet();
            data.capabilities.retain(|c| c.facet() != facet);
            data.capabilities.push(capability);
        })
    }

    /// Remove the facet of kind `facet`, if present.
    pub fn remove_capability(&self, key: NodeKey, facet: Facet) -> TreeResult<()> {
        self.with_node_mut(key, |data| data.capabilities.retain(|c| c.facet() != facet))
    }

    /// Create a new owned handle for a node.
    pub fn handle(&self, key: NodeKey) -> TreeResult<NodeRef> {
        if !self.contains(key) {
            return Err(TreeError::InvalidNode);
        }
        Ok(Box::new(TreeNode::new(self.inner.clone(), key)))
    }

    /// Number of node handles currently alive.
    ///
    /// Every handle created by this tree, directly or through navigation,
    /// counts until it is dropped.
    pub fn live_handles(&self) -> usize {
        self.inner.live_handles.load(Ordering::Acquire)
    }

    fn with_node_mut<R>(&self, key: NodeKey, f: impl FnOnce(&mut NodeData) -> R) -> TreeResult<R> {
        let mut nodes = self.inner.nodes.write();
        let data = nodes.get_mut(key).ok_or(TreeError::InvalidNode)?;
        Ok(f(data))
    }
}

impl Default for AccessibleTree {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_descendants(nodes: &SlotMap<NodeKey, NodeData>, key: NodeKey) -> TreeResult<Vec<NodeKey>> {
    let mut result = Vec::new();
    let mut stack = vec![key];
    while let Some(id) = stack.pop() {
        let data = nodes.get(id).ok_or(TreeError::InvalidNode)?;
        for &child in &data.children {
            result.push(child);
            stack.push(child);
        }
    }
    Ok(result)
}

fn is_ancestor_of(nodes: &SlotMap<NodeKey, NodeData>, ancestor: NodeKey, key: NodeKey) -> bool {
    let mut current = nodes.get(key).and_then(|data| data.parent);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = nodes.get(id).and_then(|data| data.parent);
    }
    false
}

/// A handle onto one node of an [`AccessibleTree`].
pub struct TreeNode {
    tree: Arc<TreeInner>,
    key: NodeKey,
}

impl TreeNode {
    fn new(tree: Arc<TreeInner>, key: NodeKey) -> Self {
        tree.live_handles.fetch_add(1, Ordering::AcqRel);
        Self { tree, key }
    }

    /// The key of the node this handle refers to.
    pub fn key(&self) -> NodeKey {
        self.key
    }

    fn sibling(&self, key: NodeKey) -> NodeRef {
        Box::new(TreeNode::new(self.tree.clone(), key))
    }

    fn read<R: Default>(&self, f: impl FnOnce(&NodeData) -> R) -> R {
        self.tree.nodes.read().get(self.key).map(f).unwrap_or_default()
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        self.tree.live_handles.fetch_sub(1, Ordering::AcqRel);
    }
}

impl AccessibleNode for TreeNode {
    fn is_valid(&self) -> bool {
        self.tree.nodes.read().contains_key(self.key)
    }

    fn role(&self) -> Role {
        self.tree
            .nodes
            .read()
            .get(self.key)
            .map(|data| data.spec.role)
            .unwrap_or(Role::Unknown)
    }

    fn state(&self) -> NodeState {
        self.read(|data| data.spec.state)
    }

    fn rect(&self) -> Rect {
        self.read(|data| data.spec.rect)
    }

    fn foreground_color(&self) -> Color {
        self.read(|data| data.spec.foreground)
    }

    fn background_color(&self) -> Color {
        self.read(|data| data.spec.background)
    }

    fn parent(&self) -> Option<NodeRef> {
        let parent = self.read(|data| data.parent)?;
        Some(self.sibling(parent))
    }

    fn child_count(&self) -> usize {
        self.read(|data| data.children.len())
    }

    fn child(&self, index: usize) -> Option<NodeRef> {
        let child = self.read(|data| data.children.get(index).copied())?;
        Some(self.sibling(child))
    }

    fn index_of_child(&self, child: &dyn AccessibleNode) -> Option<usize> {
        let child = child.as_any().downcast_ref::<TreeNode>()?;
        if !Arc::ptr_eq(&self.tree, &child.tree) {
            return None;
        }
        self.read(|data| data.children.iter().position(|&k| k == child.key))
    }

    fn relations(&self) -> Vec<RelationEntry> {
        let nodes = self.tree.nodes.read();
        let Some(data) = nodes.get(self.key) else {
            return Vec::new();
        };
        data.relations
            .iter()
            .filter(|(target, _)| nodes.contains_key(*target))
            .map(|&(target, kind)| RelationEntry::new(self.sibling(target), kind))
            .collect()
    }

    fn object(&self) -> Option<ObjectKey> {
        self.read(|data| data.spec.backed.then(|| ObjectKey(self.key.as_raw())))
    }

    fn window_handle(&self) -> Option<WindowHandle> {
        self.read(|data| data.spec.window)
    }

    fn capability(&self, facet: Facet) -> Option<Capability> {
        self.read(|data| data.capabilities.iter().find(|c| c.facet() == facet).cloned())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

static_assertions::assert_impl_all!(AccessibleTree: Send, Sync);
static_assertions::assert_impl_all!(TreeNode: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn sample() -> (AccessibleTree, NodeKey, NodeKey, NodeKey) {
        let tree = AccessibleTree::new();
        let root = tree.add_node(None, NodeSpec::new(Role::Window).backed()).unwrap();
        let a = tree.add_node(Some(root), NodeSpec::new(Role::Button)).unwrap();
        let b = tree.add_node(Some(root), NodeSpec::new(Role::Label)).unwrap();
        (tree, root, a, b)
    }

    #[test]
    fn test_navigation() {
        let (tree, root, a, b) = sample();
        let root_handle = tree.handle(root).unwrap();
        assert_eq!(root_handle.child_count(), 2);

        let second = root_handle.child(1).unwrap();
        assert_eq!(second.role(), Role::Label);
        assert_eq!(root_handle.index_of_child(&*second), Some(1));

        let parent = tree.handle(a).unwrap().parent().unwrap();
        assert_eq!(parent.role(), Role::Window);
        assert!(root_handle.parent().is_none());
        assert_eq!(tree.children(root).unwrap(), vec![a, b]);
    }

    #[test]
    fn test_handles_are_counted() {
        let (tree, root, _, _) = sample();
        assert_eq!(tree.live_handles(), 0);
        {
            let handle = tree.handle(root).unwrap();
            let _child = handle.child(0).unwrap();
            assert_eq!(tree.live_handles(), 2);
        }
        assert_eq!(tree.live_handles(), 0);
    }

    #[test]
    fn test_cascade_destroy_invalidates_handles() {
        let (tree, root, a, _) = sample();
        let handle = tree.handle(a).unwrap();
        assert!(handle.is_valid());

        tree.destroy(root).unwrap();
        assert!(!handle.is_valid());
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.handle(a).err(), Some(TreeError::InvalidNode));
    }

    #[test]
    fn test_circular_parentage_rejected() {
        let (tree, root, a, _) = sample();
        assert_eq!(tree.set_parent(root, Some(a)), Err(TreeError::CircularParentage));
        assert_eq!(tree.set_parent(a, Some(a)), Err(TreeError::CircularParentage));
    }

    #[test]
    fn test_reparenting() {
        let (tree, root, a, b) = sample();
        tree.set_parent(b, Some(a)).unwrap();
        assert_eq!(tree.children(root).unwrap(), vec![a]);
        assert_eq!(tree.children(a).unwrap(), vec![b]);
        assert_eq!(tree.parent(b).unwrap(), Some(a));
    }

    #[test]
    fn test_object_identity_follows_backing() {
        let (tree, root, a, _) = sample();
        let first = tree.handle(root).unwrap();
        let second = tree.handle(root).unwrap();
        assert!(first.object().is_some());
        assert_eq!(first.object(), second.object());

        let child = tree.handle(a).unwrap();
        assert!(child.object().is_none());
        tree.set_backed(a, true).unwrap();
        assert!(child.object().is_some());
    }

    #[test]
    fn test_relations_skip_destroyed_targets() {
        let (tree, root, a, b) = sample();
        tree.add_relation(a, b, RelationKind::LabelledBy).unwrap();
        tree.add_relation(a, root, RelationKind::MemberOf).unwrap();
        let handle = tree.handle(a).unwrap();
        assert_eq!(handle.relations().len(), 2);

        tree.destroy(b).unwrap();
        let relations = handle.relations();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].kind, RelationKind::MemberOf);
    }

    #[test]
    fn test_invalid_handle_reports_defaults() {
        let (tree, _, a, _) = sample();
        tree.set_rect(a, Rect::new(5, 5, 10, 10)).unwrap();
        let handle = tree.handle(a).unwrap();
        assert_eq!(handle.rect().top_left(), Point::new(5, 5));

        tree.destroy(a).unwrap();
        assert_eq!(handle.rect(), Rect::default());
        assert_eq!(handle.role(), Role::Unknown);
        assert!(handle.parent().is_none());
    }
}
