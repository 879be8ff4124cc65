//! IAccessible2 protocol bridge for Horizon Lattice accessible trees.
//!
//! This crate exposes any tree implementing
//! [`AccessibleNode`](lattice_ia2_core::AccessibleNode) through the
//! IAccessible2 interface family:
//!
//! - **Protocol objects**: [`AccessibleObject`], reference counted through
//!   [`Shared`], answering the base, component, relation and facet interfaces
//! - **Negotiation**: [`InterfaceId`] and [`AccessibleInterface::query_interface`],
//!   decided from the node's facets at the moment of the call
//! - **Relations**: grouped by kind into [`RelationObject`]s
//! - **Identity**: [`StableId`]s for nodes with or without a backing object
//! - **Results**: [`BridgeResult`], [`Reply`] and [`ClientArray`], reported
//!   to clients as a [`Status`] and its `HRESULT`
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use accesskit::Role;
//! use lattice_ia2::{AccessibleInterface, BridgeContext, InterfaceId, Outcome, Status};
//! use lattice_ia2_core::{AccessibleTree, Capability, NodeSpec, RangeValue};
//!
//! let tree = AccessibleTree::new();
//! let window = tree.add_node(None, NodeSpec::new(Role::Window).backed()).unwrap();
//! let slider = tree.add_node(Some(window), NodeSpec::new(Role::Slider)).unwrap();
//!
//! let context = BridgeContext::default();
//! let object = context.wrap(tree.handle(slider).unwrap()).unwrap();
//! assert_eq!(object.query_interface(InterfaceId::Value).status(), Status::NoInterface);
//!
//! tree.set_capability(slider, Capability::Value(Arc::new(RangeValue::new(3.0, 0.0, 10.0))))
//!     .unwrap();
//! let value = object.query_interface(InterfaceId::Value).unwrap();
//! assert_eq!(value.current_value().status(), Status::Ok);
//! ```

mod accessible;
mod array;
pub mod capability;
mod config;
mod context;
pub mod coords;
pub mod identity;
pub mod logging;
mod relation;
pub mod role;
mod service;
mod shared;
pub mod states;
mod status;

pub use accessible::{AccessibleInterface, AccessibleObject, AccessibleRef, GroupPosition, ScrollType};
pub use array::ClientArray;
pub use capability::{InterfaceId, Support, negotiate, query_capability};
pub use config::{BridgeConfig, ConfigError, ConfigResult, Locale};
pub use context::BridgeContext;
pub use coords::CoordinateType;
pub use identity::{StableId, stable_id};
pub use relation::{
    RelationGroup, RelationInterface, RelationObject, RelationPage, RelationRef, group_relations,
    relation_type_name,
};
pub use service::{ApplicationInterface, ApplicationObject, ApplicationRef, Service};
pub use shared::Shared;
pub use status::{BridgeError, BridgeResult, Outcome, Payload, Reply, Status, hresult};

static_assertions::assert_impl_all!(AccessibleObject: Send, Sync);
static_assertions::assert_impl_all!(RelationObject: Send, Sync);
static_assertions::assert_impl_all!(ApplicationObject: Send, Sync);
static_assertions::assert_impl_all!(AccessibleRef: Send, Sync);
