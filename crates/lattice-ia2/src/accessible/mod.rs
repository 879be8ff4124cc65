//! The accessible protocol object.
//!
//! An [`AccessibleObject`] wraps exactly one provider node and answers every
//! protocol interface the node currently qualifies for. Clients hold it as an
//! [`AccessibleRef`]; the object, and with it the node handle, is destroyed by
//! the release that brings the count to zero.
//!
//! Every operation checks that the node is still valid before touching it and
//! fails with [`BridgeError::StaleObject`] otherwise. Facet operations live in
//! the submodules, one per protocol interface.

mod action;
mod component;
mod table;
mod table_cell;
mod text;
mod value;

use std::sync::Arc;

use lattice_ia2_core::{AccessibleNode, Facet, NodeRef, Point, WindowHandle};

use crate::array::ClientArray;
use crate::capability::{self, InterfaceId};
use crate::config::Locale;
use crate::context::BridgeContext;
use crate::coords::CoordinateType;
use crate::identity::{self, StableId};
use crate::logging::{self, targets};
use crate::relation::{self, RelationPage, RelationRef};
use crate::role;
use crate::service::Service;
use crate::shared::Shared;
use crate::states;
use crate::status::{BridgeError, BridgeResult, Reply, narrow};

/// A protocol object wrapping one provider node.
#[derive(Debug)]
pub struct AccessibleObject {
    node: NodeRef,
    context: BridgeContext,
}

/// A counted reference to an [`AccessibleObject`].
pub type AccessibleRef = Shared<AccessibleObject>;

/// Where `scroll_to` should place the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollType {
    /// Top-left corner at the top-left of the screen.
    TopLeft,
    /// Bottom-right corner at the bottom-right of the screen.
    BottomRight,
    /// Top edge at the top of the screen.
    TopEdge,
    /// Bottom edge at the bottom of the screen.
    BottomEdge,
    /// Left edge at the left of the screen.
    LeftEdge,
    /// Right edge at the right of the screen.
    RightEdge,
    /// Anywhere on screen.
    Anywhere,
}

/// Position of an object within its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupPosition {
    /// 1-based hierarchical level.
    pub level: i32,
    /// Number of items in the group.
    pub similar_items_in_group: i32,
    /// 1-based position in the group.
    pub position_in_group: i32,
}

impl AccessibleObject {
    pub(crate) fn new(node: NodeRef, context: BridgeContext) -> Self {
        tracing::trace!(target: targets::OBJECT, role = ?node.role(), "created accessible object");
        Self { node, context }
    }

    /// The wrapped node.
    pub fn node(&self) -> &dyn AccessibleNode {
        &*self.node
    }

    /// The context this object was created by.
    pub fn context(&self) -> &BridgeContext {
        &self.context
    }

    /// The node, after the validity check every call starts with.
    fn live(&self, method: &'static str) -> BridgeResult<&dyn AccessibleNode> {
        let node = &*self.node;
        if !node.is_valid() {
            tracing::trace!(target: targets::CLIENT, method, "call on stale object");
            return Err(BridgeError::StaleObject);
        }
        logging::client_call(self.context.config().trace_client_calls, method, node.role());
        Ok(node)
    }

    /// The facet `get` returns, or [`BridgeError::CapabilityAbsent`].
    fn facet<F: ?Sized>(
        &self,
        method: &'static str,
        facet: Facet,
        get: impl FnOnce(&dyn AccessibleNode) -> Option<Arc<F>>,
    ) -> BridgeResult<Arc<F>> {
        let node = self.live(method)?;
        get(node).ok_or(BridgeError::CapabilityAbsent(facet))
    }

    fn wrap_optional(&self, node: Option<NodeRef>) -> BridgeResult<Reply<AccessibleRef>> {
        match node {
            Some(node) => self.context.wrap(node).map(Reply::Data),
            None => Ok(Reply::NoData),
        }
    }

    // IAccessible

    /// The parent object; `NoData` for a root.
    pub fn parent(&self) -> BridgeResult<Reply<AccessibleRef>> {
        let node = self.live("accParent")?;
        self.wrap_optional(node.parent())
    }

    /// Number of children.
    pub fn child_count(&self) -> BridgeResult<i32> {
        Ok(narrow(self.live("accChildCount")?.child_count()))
    }

    /// The child at `index`.
    pub fn child(&self, index: i32) -> BridgeResult<AccessibleRef> {
        let node = self.live("accChild")?;
        let child = usize::try_from(index)
            .ok()
            .and_then(|index| node.child(index))
            .ok_or_else(|| BridgeError::bad_argument(format!("child {index} out of range")))?;
        self.context.wrap(child)
    }

    // IAccessible2

    /// The role code.
    pub fn role(&self) -> BridgeResult<i32> {
        Ok(role::role_code(self.live("role")?.role()))
    }

    /// IA2 state bits.
    pub fn states(&self) -> BridgeResult<u32> {
        Ok(states::ia2_states(&self.live("states")?.state()))
    }

    /// The stable id; `NoData` when none can be derived.
    pub fn unique_id(&self) -> BridgeResult<Reply<StableId>> {
        let id = identity::stable_id(self.live("uniqueID")?);
        Ok(if id.is_none() { Reply::NoData } else { Reply::Data(id) })
    }

    /// The window hosting this node, or the nearest ancestor that knows it.
    pub fn window_handle(&self) -> BridgeResult<Reply<WindowHandle>> {
        let node = self.live("windowHandle")?;
        if let Some(handle) = node.window_handle() {
            return Ok(Reply::Data(handle));
        }
        let mut ancestor = node.parent();
        while let Some(current) = ancestor {
            if let Some(handle) = current.window_handle() {
                return Ok(Reply::Data(handle));
            }
            ancestor = current.parent();
        }
        Ok(Reply::NoData)
    }

    /// Index among the parent's children; `NoData` for a root.
    pub fn index_in_parent(&self) -> BridgeResult<Reply<i32>> {
        let node = self.live("indexInParent")?;
        let index = node
            .parent()
            .and_then(|parent| parent.index_of_child(node))
            .map(narrow);
        Ok(Reply::from_option(index))
    }

    /// The configured locale.
    pub fn locale(&self) -> BridgeResult<Locale> {
        self.live("locale")?;
        Ok(self.context.config().locale.clone())
    }

    /// Object attributes. None are exposed.
    pub fn attributes(&self) -> BridgeResult<Reply<String>> {
        self.live("attributes")?;
        Ok(Reply::NoData)
    }

    /// Group position. Not tracked.
    pub fn group_position(&self) -> BridgeResult<Reply<GroupPosition>> {
        self.live("groupPosition")?;
        Ok(Reply::NoData)
    }

    /// Scroll the object into view. Not supported.
    pub fn scroll_to(&self, _scroll_type: ScrollType) -> BridgeResult<()> {
        self.live("scrollTo")?;
        Err(BridgeError::NotImplemented("scrollTo"))
    }

    /// Scroll the object to a point. Not supported.
    pub fn scroll_to_point(&self, _coords: CoordinateType, _point: Point) -> BridgeResult<()> {
        self.live("scrollToPoint")?;
        Err(BridgeError::NotImplemented("scrollToPoint"))
    }

    /// Extended role string. Not supported.
    pub fn extended_role(&self) -> BridgeResult<String> {
        self.live("extendedRole")?;
        Err(BridgeError::NotImplemented("extendedRole"))
    }

    /// Localized extended role. Not supported.
    pub fn localized_extended_role(&self) -> BridgeResult<String> {
        self.live("localizedExtendedRole")?;
        Err(BridgeError::NotImplemented("localizedExtendedRole"))
    }

    /// Number of extended states. Not supported.
    pub fn n_extended_states(&self) -> BridgeResult<i32> {
        self.live("nExtendedStates")?;
        Err(BridgeError::NotImplemented("nExtendedStates"))
    }

    /// Extended state strings. Not supported.
    pub fn extended_states(&self, _max: i32) -> BridgeResult<ClientArray<String>> {
        self.live("extendedStates")?;
        Err(BridgeError::NotImplemented("extendedStates"))
    }

    /// Localized extended state strings. Not supported.
    pub fn localized_extended_states(&self, _max: i32) -> BridgeResult<ClientArray<String>> {
        self.live("localizedExtendedStates")?;
        Err(BridgeError::NotImplemented("localizedExtendedStates"))
    }

    // Relations

    /// Number of distinct relation kinds; `NoData` when there are none.
    pub fn n_relations(&self) -> BridgeResult<Reply<i32>> {
        let node = self.live("nRelations")?;
        let total = relation::relation_page(node, &self.context, 0, None)?.total;
        Ok(if total > 0 { Reply::Data(total) } else { Reply::NoData })
    }

    /// The relation group at `index`; `NoData` past the last group.
    pub fn relation(&self, index: i32) -> BridgeResult<Reply<RelationRef>> {
        let node = self.live("relation")?;
        let page = relation::relation_page(node, &self.context, index, Some(1))?;
        Ok(Reply::from_option(
            page.relations.and_then(|relations| relations.into_vec().pop()),
        ))
    }

    /// Up to `max` relation groups from the first.
    pub fn relations(&self, max: i32) -> BridgeResult<ClientArray<RelationRef>> {
        let node = self.live("relations")?;
        let page = relation::relation_page(node, &self.context, 0, Some(max))?;
        Ok(page.relations.unwrap_or_default())
    }

    /// Up to `max` relation groups from `start`, with the total. A `max` of
    /// `None` only counts.
    pub fn get_relations(&self, start: i32, max: Option<i32>) -> BridgeResult<RelationPage> {
        let node = self.live("getRelations")?;
        relation::relation_page(node, &self.context, start, max)
    }
}

impl Drop for AccessibleObject {
    fn drop(&mut self) {
        tracing::trace!(target: targets::OBJECT, "destroyed accessible object");
    }
}

/// Interface negotiation and service discovery on a counted object.
pub trait AccessibleInterface {
    /// A new reference to this object if it implements `iid` right now.
    fn query_interface(&self, iid: InterfaceId) -> BridgeResult<AccessibleRef>;

    /// The object serving `iid` for `service`.
    fn query_service(&self, service: InterfaceId, iid: InterfaceId) -> BridgeResult<Service>;
}

impl AccessibleInterface for AccessibleRef {
    fn query_interface(&self, iid: InterfaceId) -> BridgeResult<AccessibleRef> {
        capability::negotiate(self.node(), iid)?;
        Ok(self.clone())
    }

    fn query_service(&self, service: InterfaceId, iid: InterfaceId) -> BridgeResult<Service> {
        self.live("QueryService")?;
        if iid == InterfaceId::Application {
            return Ok(Service::Application(self.context.application()));
        }
        match (service, iid) {
            (
                InterfaceId::Accessible,
                InterfaceId::Accessible2 | InterfaceId::Accessible | InterfaceId::Unknown | InterfaceId::Dispatch,
            ) => Ok(Service::Accessible(self.clone())),
            _ => Err(BridgeError::NoInterface(iid)),
        }
    }
}

#[cfg(test)]
mod tests {
    use accesskit::Role;
    use lattice_ia2_core::{AccessibleTree, NodeKey, NodeSpec, Rect, RelationKind};

    use super::*;
    use crate::role::msaa;
    use crate::status::{Outcome, Status};

    fn window_with_button() -> (AccessibleTree, NodeKey, NodeKey) {
        let tree = AccessibleTree::new();
        let window = tree
            .add_node(
                None,
                NodeSpec::new(Role::Window)
                    .backed()
                    .window(WindowHandle(0x1234))
                    .rect(Rect::new(0, 0, 640, 480)),
            )
            .unwrap();
        let button = tree
            .add_node(Some(window), NodeSpec::new(Role::Button).rect(Rect::new(10, 10, 80, 24)))
            .unwrap();
        (tree, window, button)
    }

    fn wrap(tree: &AccessibleTree, key: NodeKey) -> AccessibleRef {
        BridgeContext::default().wrap(tree.handle(key).unwrap()).unwrap()
    }

    #[test]
    fn test_navigation() {
        let (tree, _, button) = window_with_button();
        let object = wrap(&tree, button);

        let parent = object.parent().unwrap().data().unwrap();
        assert_eq!(parent.role().unwrap(), msaa::WINDOW);
        assert_eq!(parent.child_count().unwrap(), 1);
        assert_eq!(parent.child(0).unwrap().role().unwrap(), msaa::PUSHBUTTON);
        assert!(matches!(parent.child(1), Err(BridgeError::BadArgument(_))));
        assert!(matches!(parent.child(-1), Err(BridgeError::BadArgument(_))));

        assert!(parent.parent().unwrap().is_no_data());
        assert_eq!(object.index_in_parent().unwrap(), Reply::Data(0));
        assert!(parent.index_in_parent().unwrap().is_no_data());
    }

    #[test]
    fn test_window_handle_comes_from_ancestor() {
        let (tree, window, button) = window_with_button();
        let object = wrap(&tree, button);
        assert_eq!(object.window_handle().unwrap(), Reply::Data(WindowHandle(0x1234)));

        let orphan = tree.add_node(None, NodeSpec::new(Role::Group)).unwrap();
        assert!(wrap(&tree, orphan).window_handle().unwrap().is_no_data());
        drop(object);
        tree.destroy(window).unwrap();
        assert_eq!(tree.live_handles(), 0);
    }

    #[test]
    fn test_unique_id() {
        let (tree, _, button) = window_with_button();
        let first = wrap(&tree, button).unique_id().unwrap();
        let second = wrap(&tree, button).unique_id().unwrap();
        assert_eq!(first, second);
        assert!(!first.data().unwrap().is_none());

        let lonely = tree.add_node(None, NodeSpec::new(Role::Label)).unwrap();
        assert_eq!(wrap(&tree, lonely).unique_id().status(), Status::NoData);
    }

    #[test]
    fn test_unsupported_ia2_methods() {
        let (tree, _, button) = window_with_button();
        let object = wrap(&tree, button);
        assert_eq!(object.scroll_to(ScrollType::Anywhere).status(), Status::NotImplemented);
        assert_eq!(object.extended_role().status(), Status::NotImplemented);
        assert_eq!(object.extended_states(4).status(), Status::NotImplemented);
        assert_eq!(object.attributes().status(), Status::NoData);
        assert_eq!(object.group_position().status(), Status::NoData);
        assert_eq!(object.locale().unwrap().country, "United States");
    }

    #[test]
    fn test_relation_convenience_calls() {
        let (tree, window, button) = window_with_button();
        tree.add_relation(button, window, RelationKind::MemberOf).unwrap();
        let object = wrap(&tree, button);

        assert_eq!(object.n_relations().unwrap(), Reply::Data(1));
        let member_of = object.relation(0).unwrap().data().unwrap();
        assert_eq!(member_of.relation_type().unwrap(), "memberOf");
        assert_eq!(object.relation(1).status(), Status::NoData);
        assert_eq!(object.relation(5).status(), Status::NoData);
        assert!(matches!(object.relation(-1), Err(BridgeError::BadArgument(_))));
        assert_eq!(object.relations(4).unwrap().len(), 1);
        assert_eq!(object.relations(0).status(), Status::NoData);
    }

    #[test]
    fn test_no_relations_is_no_data() {
        let (tree, _, button) = window_with_button();
        let object = wrap(&tree, button);

        let count = object.n_relations();
        assert_eq!(count.status(), Status::NoData);
        assert_eq!(count.status().hresult(), crate::status::hresult::S_FALSE);
        assert_eq!(object.get_relations(0, None).status(), count.status());
        assert_eq!(object.relation(0).status(), Status::NoData);
        assert!(object.relations(4).unwrap().is_null());
    }

    #[test]
    fn test_stale_object() {
        let (tree, _, button) = window_with_button();
        let object = wrap(&tree, button);
        tree.destroy(button).unwrap();

        assert_eq!(object.role().unwrap_err(), BridgeError::StaleObject);
        assert_eq!(object.parent().unwrap_err(), BridgeError::StaleObject);
        assert_eq!(object.n_relations().unwrap_err(), BridgeError::StaleObject);
        assert_eq!(
            object.query_interface(InterfaceId::Accessible2).unwrap_err(),
            BridgeError::StaleObject
        );
        assert_eq!(Shared::ref_count(&object), 1);
    }

    #[test]
    fn test_query_interface_adds_a_reference() {
        let (tree, _, button) = window_with_button();
        let object = wrap(&tree, button);

        let second = object.query_interface(InterfaceId::Component).unwrap();
        assert!(Shared::ptr_eq(&object, &second));
        assert_eq!(Shared::ref_count(&object), 2);

        assert_eq!(
            object.query_interface(InterfaceId::Text).unwrap_err(),
            BridgeError::NoInterface(InterfaceId::Text)
        );
        assert_eq!(Shared::ref_count(&object), 2);
    }

    #[test]
    fn test_query_service() {
        let (tree, _, button) = window_with_button();
        let object = wrap(&tree, button);

        match object.query_service(InterfaceId::Accessible, InterfaceId::Accessible2).unwrap() {
            Service::Accessible(same) => assert!(Shared::ptr_eq(&same, &object)),
            other => panic!("unexpected service {other:?}"),
        }
        assert!(matches!(
            object.query_service(InterfaceId::ServiceProvider, InterfaceId::Application),
            Ok(Service::Application(_))
        ));
        assert_eq!(
            object
                .query_service(InterfaceId::Text, InterfaceId::Accessible2)
                .unwrap_err(),
            BridgeError::NoInterface(InterfaceId::Accessible2)
        );
    }
}
