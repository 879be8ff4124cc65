//! Provider model for the Lattice IAccessible2 bridge.
//!
//! This crate defines what an accessible tree looks like to the bridge:
//!
//! - **Nodes**: the [`AccessibleNode`] trait, implemented by whatever owns
//!   the UI (role, state, geometry, navigation, relations, object identity)
//! - **Facets**: optional behavior a node may expose at any moment, asked
//!   for by [`Facet`] and answered with a [`Capability`]
//! - **Values**: [`Variant`], [`Color`], [`Rect`], [`NodeState`],
//!   [`RelationKind`]
//! - **In-memory provider**: [`AccessibleTree`], an arena-backed tree with
//!   ready-made facets ([`PlainText`], [`RangeValue`], [`ActionList`],
//!   [`GridBuilder`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use accesskit::Role;
//! use lattice_ia2_core::{AccessibleNode, AccessibleTree, Capability, NodeSpec, RangeValue, Variant};
//!
//! let tree = AccessibleTree::new();
//! let window = tree.add_node(None, NodeSpec::new(Role::Window).backed()).unwrap();
//! let slider = tree.add_node(Some(window), NodeSpec::new(Role::Slider)).unwrap();
//! tree.set_capability(slider, Capability::Value(Arc::new(RangeValue::new(3.0, 0.0, 10.0))))
//!     .unwrap();
//!
//! let value = tree.handle(slider).unwrap().value().unwrap();
//! assert_eq!(value.current_value(), Variant::Double(3.0));
//! ```

mod error;
pub mod facets;
pub mod geometry;
pub mod grid;
pub mod logging;
mod node;
mod relation;
mod state;
mod tree;
mod variant;

pub use error::{TreeError, TreeResult};
pub use facets::{ActionList, ActionSpec, PlainText, RangeValue};
pub use geometry::{Color, Point, Rect, Size};
pub use grid::{Grid, GridBuilder};
pub use node::{
    AccessibleNode, ActionFacet, Capability, CellExtents, Facet, NodeRef, ObjectKey, TableCellFacet,
    TableFacet, TextBoundary, TextFacet, TextSegment, ValueFacet, WindowHandle,
};
pub use relation::{RelationEntry, RelationKind};
pub use state::NodeState;
pub use tree::{AccessibleTree, NodeKey, NodeSpec, TreeNode, WeakTree};
pub use variant::Variant;
