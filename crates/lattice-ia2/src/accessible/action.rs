//! `IAccessibleAction`: named actions addressed by index.
//!
//! Unlike the other facets, a node without actions is not an error here:
//! `n_actions` reports zero and the per-index calls answer `NoData`.

use std::sync::Arc;

use lattice_ia2_core::ActionFacet;

use super::AccessibleObject;
use crate::array::ClientArray;
use crate::status::{BridgeError, BridgeResult, Reply, narrow};

impl AccessibleObject {
    /// The action facet and the name of action `index`, or `None` when the
    /// node has no actions.
    fn action_at(&self, method: &'static str, index: i32) -> BridgeResult<Option<(Arc<dyn ActionFacet>, String)>> {
        let Some(action) = self.live(method)?.action() else {
            return Ok(None);
        };
        let name = usize::try_from(index)
            .ok()
            .and_then(|index| action.action_names().into_iter().nth(index))
            .ok_or_else(|| BridgeError::bad_argument(format!("action {index} out of range")))?;
        Ok(Some((action, name)))
    }

    /// Number of actions; zero without an action facet.
    pub fn n_actions(&self) -> BridgeResult<i32> {
        let count = self
            .live("nActions")?
            .action()
            .map_or(0, |action| action.action_names().len());
        Ok(narrow(count))
    }

    /// Perform action `index`.
    pub fn do_action(&self, index: i32) -> BridgeResult<Reply<()>> {
        let action = self.action_at("doAction", index)?;
        Ok(Reply::from_option(action.map(|(action, name)| action.do_action(&name))))
    }

    /// Name of action `index`.
    pub fn action_name(&self, index: i32) -> BridgeResult<Reply<String>> {
        Ok(Reply::from_option(self.action_at("name", index)?.map(|(_, name)| name)))
    }

    /// Localized name of action `index`.
    pub fn localized_action_name(&self, index: i32) -> BridgeResult<Reply<String>> {
        let action = self.action_at("localizedName", index)?;
        Ok(Reply::from_option(
            action.map(|(action, name)| action.localized_action_name(&name)),
        ))
    }

    /// Description of action `index`.
    pub fn action_description(&self, index: i32) -> BridgeResult<Reply<String>> {
        let action = self.action_at("description", index)?;
        Ok(Reply::from_option(
            action.map(|(action, name)| action.localized_action_description(&name)),
        ))
    }

    /// Up to `max` key bindings of action `index`.
    pub fn key_bindings(&self, index: i32, max: i32) -> BridgeResult<ClientArray<String>> {
        let max = usize::try_from(max)
            .map_err(|_| BridgeError::bad_argument(format!("negative binding count {max}")))?;
        let Some((action, name)) = self.action_at("keyBinding", index)? else {
            return Ok(ClientArray::null());
        };
        let bindings = action.key_bindings_for_action(&name).into_iter().take(max).collect();
        Ok(ClientArray::from_vec(bindings))
    }
}
