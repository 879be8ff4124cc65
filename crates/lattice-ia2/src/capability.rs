//! Capability queries and interface negotiation.
//!
//! Which protocol interfaces an object answers to depends on the facets its
//! node exposes at the moment of the query. Nothing here is cached: a node
//! may gain or lose a facet between two calls.

use std::fmt;

use lattice_ia2_core::{AccessibleNode, Facet};

use crate::logging::targets;
use crate::status::{BridgeError, BridgeResult};

/// Whether `node` currently exposes `facet`.
pub fn query_capability(node: &dyn AccessibleNode, facet: Facet) -> bool {
    node.capability(facet).is_some()
}

/// The protocol interfaces a client can ask an object for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceId {
    /// `IUnknown`.
    Unknown,
    /// `IDispatch`.
    Dispatch,
    /// `IAccessible`.
    Accessible,
    /// `IOleWindow`.
    OleWindow,
    /// `IServiceProvider`.
    ServiceProvider,
    /// `IAccessible2`.
    Accessible2,
    /// `IAccessibleAction`.
    Action,
    /// `IAccessibleApplication`.
    Application,
    /// `IAccessibleComponent`.
    Component,
    /// `IAccessibleEditableText`.
    EditableText,
    /// `IAccessibleHyperlink`.
    Hyperlink,
    /// `IAccessibleHypertext`.
    Hypertext,
    /// `IAccessibleImage`.
    Image,
    /// `IAccessibleRelation`.
    Relation,
    /// `IAccessibleTable`.
    Table,
    /// `IAccessibleTable2`.
    Table2,
    /// `IAccessibleTableCell`.
    TableCell,
    /// `IAccessibleText`.
    Text,
    /// `IAccessibleValue`.
    Value,
}

/// How an accessible object answers a request for an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// Always implemented.
    Always,
    /// Implemented while the node exposes the facet.
    WithFacet(Facet),
    /// Never implemented by an accessible object.
    Never,
}

impl InterfaceId {
    /// All interface identifiers.
    pub const ALL: [InterfaceId; 19] = [
        Self::Unknown,
        Self::Dispatch,
        Self::Accessible,
        Self::OleWindow,
        Self::ServiceProvider,
        Self::Accessible2,
        Self::Action,
        Self::Application,
        Self::Component,
        Self::EditableText,
        Self::Hyperlink,
        Self::Hypertext,
        Self::Image,
        Self::Relation,
        Self::Table,
        Self::Table2,
        Self::TableCell,
        Self::Text,
        Self::Value,
    ];

    /// The `IID_*` name, for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "IID_IUnknown",
            Self::Dispatch => "IID_IDispatch",
            Self::Accessible => "IID_IAccessible",
            Self::OleWindow => "IID_IOleWindow",
            Self::ServiceProvider => "IID_IServiceProvider",
            Self::Accessible2 => "IID_IAccessible2",
            Self::Action => "IID_IAccessibleAction",
            Self::Application => "IID_IAccessibleApplication",
            Self::Component => "IID_IAccessibleComponent",
            Self::EditableText => "IID_IAccessibleEditableText",
            Self::Hyperlink => "IID_IAccessibleHyperlink",
            Self::Hypertext => "IID_IAccessibleHypertext",
            Self::Image => "IID_IAccessibleImage",
            Self::Relation => "IID_IAccessibleRelation",
            Self::Table => "IID_IAccessibleTable",
            Self::Table2 => "IID_IAccessibleTable2",
            Self::TableCell => "IID_IAccessibleTableCell",
            Self::Text => "IID_IAccessibleText",
            Self::Value => "IID_IAccessibleValue",
        }
    }

    /// How an accessible object supports this interface.
    pub fn support(self) -> Support {
        match self {
            Self::Unknown
            | Self::Dispatch
            | Self::Accessible
            | Self::OleWindow
            | Self::ServiceProvider
            | Self::Accessible2
            | Self::Component
            | Self::Relation => Support::Always,
            Self::Action => Support::WithFacet(Facet::Action),
            Self::Table2 => Support::WithFacet(Facet::Table),
            Self::TableCell => Support::WithFacet(Facet::TableCell),
            Self::Text => Support::WithFacet(Facet::Text),
            Self::Value => Support::WithFacet(Facet::Value),
            Self::Table
            | Self::EditableText
            | Self::Hyperlink
            | Self::Hypertext
            | Self::Image
            | Self::Application => Support::Never,
        }
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decide whether an accessible object wrapping `node` implements `iid`.
///
/// Validity is checked first; an invalid node is stale whatever the
/// interface.
pub fn negotiate(node: &dyn AccessibleNode, iid: InterfaceId) -> BridgeResult<()> {
    if !node.is_valid() {
        return Err(BridgeError::StaleObject);
    }
    let supported = match iid.support() {
        Support::Always => true,
        Support::WithFacet(facet) => query_capability(node, facet),
        Support::Never => false,
    };
    tracing::debug!(target: targets::OBJECT, iid = iid.name(), supported, "negotiated interface");
    if supported {
        Ok(())
    } else {
        Err(BridgeError::NoInterface(iid))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use accesskit::Role;
    use lattice_ia2_core::{AccessibleTree, Capability, NodeSpec, RangeValue};

    use super::*;

    #[test]
    fn test_mandatory_and_unsupported_interfaces() {
        let tree = AccessibleTree::new();
        let key = tree.add_node(None, NodeSpec::new(Role::Button)).unwrap();
        let node = tree.handle(key).unwrap();

        for iid in InterfaceId::ALL {
            let expected = iid.support() == Support::Always;
            assert_eq!(negotiate(&*node, iid).is_ok(), expected, "{iid}");
        }
        assert_eq!(
            negotiate(&*node, InterfaceId::EditableText),
            Err(BridgeError::NoInterface(InterfaceId::EditableText))
        );
    }

    #[test]
    fn test_facet_interfaces_follow_capability() {
        let tree = AccessibleTree::new();
        let key = tree.add_node(None, NodeSpec::new(Role::Slider)).unwrap();
        let node = tree.handle(key).unwrap();
        assert!(!query_capability(&*node, Facet::Value));
        assert!(negotiate(&*node, InterfaceId::Value).is_err());

        tree.set_capability(key, Capability::Value(Arc::new(RangeValue::new(0.0, 0.0, 1.0))))
            .unwrap();
        assert!(query_capability(&*node, Facet::Value));
        assert!(negotiate(&*node, InterfaceId::Value).is_ok());
        assert!(negotiate(&*node, InterfaceId::Value).is_ok());
    }

    #[test]
    fn test_stale_before_anything_else() {
        let tree = AccessibleTree::new();
        let key = tree.add_node(None, NodeSpec::new(Role::Button)).unwrap();
        let node = tree.handle(key).unwrap();
        tree.destroy(key).unwrap();
        assert_eq!(negotiate(&*node, InterfaceId::Unknown), Err(BridgeError::StaleObject));
        assert_eq!(negotiate(&*node, InterfaceId::Image), Err(BridgeError::StaleObject));
    }
}
