//! The wrapping service shared by every protocol object.

use std::sync::Arc;

use lattice_ia2_core::{AccessibleNode, NodeRef};

use crate::accessible::{AccessibleObject, AccessibleRef};
use crate::array::ClientArray;
use crate::config::BridgeConfig;
use crate::service::{ApplicationObject, ApplicationRef};
use crate::shared::Shared;
use crate::status::{BridgeError, BridgeResult};

/// Turns provider nodes into protocol objects.
///
/// Cloning is cheap; all clones share one configuration.
#[derive(Debug, Clone, Default)]
pub struct BridgeContext {
    config: Arc<BridgeConfig>,
}

impl BridgeContext {
    /// Create a context with the given configuration.
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Whether `node` can be wrapped right now.
    pub fn can_wrap(&self, node: &dyn AccessibleNode) -> bool {
        node.is_valid()
    }

    /// Wrap `node` into a new protocol object with a reference count of 1.
    ///
    /// Fails with [`BridgeError::WrapFailed`] for an invalid node; the handle
    /// is released either way.
    pub fn wrap(&self, node: NodeRef) -> BridgeResult<AccessibleRef> {
        if !self.can_wrap(&*node) {
            return Err(BridgeError::WrapFailed);
        }
        Ok(Shared::new(AccessibleObject::new(node, self.clone())))
    }

    /// Wrap every node, or none of them.
    pub fn wrap_all(&self, nodes: Vec<NodeRef>) -> BridgeResult<ClientArray<AccessibleRef>> {
        let wrapped = nodes
            .into_iter()
            .map(|node| self.wrap(node))
            .collect::<BridgeResult<Vec<_>>>()?;
        Ok(ClientArray::from_vec(wrapped))
    }

    /// A new application object.
    pub fn application(&self) -> ApplicationRef {
        Shared::new(ApplicationObject::new(self.config.clone()))
    }
}

#[cfg(test)]
mod tests {
    use accesskit::Role;
    use lattice_ia2_core::{AccessibleTree, NodeSpec};

    use super::*;

    #[test]
    fn test_wrap_rejects_invalid_nodes() {
        let tree = AccessibleTree::new();
        let key = tree.add_node(None, NodeSpec::new(Role::Button)).unwrap();
        let context = BridgeContext::default();

        let object = context.wrap(tree.handle(key).unwrap()).unwrap();
        assert_eq!(Shared::ref_count(&object), 1);

        let stale = tree.handle(key).unwrap();
        tree.destroy(key).unwrap();
        assert_eq!(context.wrap(stale).unwrap_err(), BridgeError::WrapFailed);
        drop(object);
        assert_eq!(tree.live_handles(), 0);
    }

    #[test]
    fn test_wrap_all_is_all_or_nothing() {
        let tree = AccessibleTree::new();
        let a = tree.add_node(None, NodeSpec::new(Role::Cell)).unwrap();
        let b = tree.add_node(None, NodeSpec::new(Role::Cell)).unwrap();
        let context = BridgeContext::default();

        let nodes = vec![tree.handle(a).unwrap(), tree.handle(b).unwrap()];
        assert_eq!(context.wrap_all(nodes).unwrap().len(), 2);

        let nodes = vec![tree.handle(a).unwrap(), tree.handle(b).unwrap()];
        tree.destroy(b).unwrap();
        assert_eq!(context.wrap_all(nodes).unwrap_err(), BridgeError::WrapFailed);
        assert_eq!(tree.live_handles(), 0);
    }
}
