//! Integration tests for the in-memory provider.

use std::any::Any;
use std::sync::Arc;

use accesskit::Role;
use lattice_ia2_core::{
    AccessibleNode, AccessibleTree, Capability, Facet, GridBuilder, NodeRef, NodeSpec, NodeState,
    ObjectKey, PlainText, Point, Rect, RelationKind, Size, TextBoundary,
};

/// A host node implemented directly on the trait, without the arena.
struct FixedLabel;

impl AccessibleNode for FixedLabel {
    fn is_valid(&self) -> bool {
        true
    }

    fn role(&self) -> Role {
        Role::Label
    }

    fn state(&self) -> NodeState {
        NodeState::default()
    }

    fn rect(&self) -> Rect {
        Rect::new(0, 0, 40, 12)
    }

    fn parent(&self) -> Option<NodeRef> {
        None
    }

    fn child_count(&self) -> usize {
        0
    }

    fn child(&self, _index: usize) -> Option<NodeRef> {
        None
    }

    fn index_of_child(&self, _child: &dyn AccessibleNode) -> Option<usize> {
        None
    }

    fn object(&self) -> Option<ObjectKey> {
        Some(ObjectKey(7))
    }

    fn capability(&self, _facet: Facet) -> Option<Capability> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn host_nodes_use_provided_defaults() {
    let label = FixedLabel;
    assert!(label.relations().is_empty());
    assert!(label.window_handle().is_none());
    assert!(label.text().is_none());
    assert_eq!(label.background_color().to_argb(), 0xFFFF_FFFF);
}

#[test]
fn facets_can_come_and_go() {
    let tree = AccessibleTree::new();
    let field = tree
        .add_node(None, NodeSpec::new(Role::TextInput).state(NodeState::editable_text(false)))
        .unwrap();
    let handle = tree.handle(field).unwrap();
    assert!(handle.text().is_none());

    let text = Arc::new(PlainText::new("hello world", Point::new(0, 0), Size::new(7, 14)));
    tree.set_capability(field, Capability::Text(text)).unwrap();
    let facet = handle.text().unwrap();
    assert_eq!(facet.character_count(), 11);
    assert_eq!(facet.text_at_offset(8, TextBoundary::Word).text, "world");

    tree.remove_capability(field, Facet::Text).unwrap();
    assert!(handle.text().is_none());
}

#[test]
fn relations_and_grid_share_one_tree() {
    let tree = AccessibleTree::new();
    let window = tree.add_node(None, NodeSpec::new(Role::Window).backed()).unwrap();
    let caption = tree.add_node(Some(window), NodeSpec::new(Role::Label)).unwrap();
    let table = tree
        .add_node(Some(window), NodeSpec::new(Role::Table).rect(Rect::new(0, 20, 200, 40)))
        .unwrap();
    tree.add_relation(table, caption, RelationKind::LabelledBy).unwrap();

    let grid = GridBuilder::new(2, 2)
        .cell_size(Size::new(100, 20))
        .caption(caption)
        .install(&tree, table)
        .unwrap();

    let handle = tree.handle(table).unwrap();
    let facet = handle.table().unwrap();
    assert_eq!(facet.caption().unwrap().role(), Role::Label);
    assert_eq!(handle.relations()[0].kind, RelationKind::LabelledBy);

    grid.select_row(1);
    let selected = facet.selected_cells();
    assert_eq!(selected.len(), 2);
    assert_eq!(selected[0].rect().top_left(), Point::new(0, 40));
    drop(selected);
    drop(facet);
    drop(handle);

    tree.destroy(window).unwrap();
    assert_eq!(tree.node_count(), 0);
    assert_eq!(tree.live_handles(), 0);
}
