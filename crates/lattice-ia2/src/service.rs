//! Service discovery and the application object.
//!
//! `IServiceProvider::QueryService` lets a client jump from any accessible
//! object to the accessible interfaces of the same object, or to the
//! application object describing the host and toolkit.

use std::sync::Arc;

use crate::accessible::AccessibleRef;
use crate::capability::InterfaceId;
use crate::config::BridgeConfig;
use crate::logging::targets;
use crate::shared::Shared;
use crate::status::{BridgeError, BridgeResult, Payload};

/// `IAccessibleApplication`: names and versions of the host application and
/// its toolkit.
#[derive(Debug)]
pub struct ApplicationObject {
    config: Arc<BridgeConfig>,
}

/// A counted reference to an [`ApplicationObject`].
pub type ApplicationRef = Shared<ApplicationObject>;

impl ApplicationObject {
    pub(crate) fn new(config: Arc<BridgeConfig>) -> Self {
        tracing::trace!(target: targets::OBJECT, app = %config.app_name, "created application object");
        Self { config }
    }

    /// The configured application name.
    pub fn app_name(&self) -> BridgeResult<String> {
        Ok(self.config.app_name.clone())
    }

    /// The configured application version.
    pub fn app_version(&self) -> BridgeResult<String> {
        Ok(self.config.app_version.clone())
    }

    /// The toolkit name.
    pub fn toolkit_name(&self) -> BridgeResult<String> {
        Ok(self.config.toolkit_name.clone())
    }

    /// The toolkit version.
    pub fn toolkit_version(&self) -> BridgeResult<String> {
        Ok(self.config.toolkit_version.clone())
    }
}

/// Interface negotiation for application objects.
pub trait ApplicationInterface {
    /// A new reference for `iid`, if this object implements it.
    fn query_interface(&self, iid: InterfaceId) -> BridgeResult<ApplicationRef>;
}

impl ApplicationInterface for ApplicationRef {
    fn query_interface(&self, iid: InterfaceId) -> BridgeResult<ApplicationRef> {
        match iid {
            InterfaceId::Unknown | InterfaceId::Application => Ok(self.clone()),
            _ => Err(BridgeError::NoInterface(iid)),
        }
    }
}

/// The object a service query resolved to.
#[derive(Debug)]
pub enum Service {
    /// The queried accessible object itself.
    Accessible(AccessibleRef),
    /// A new application object.
    Application(ApplicationRef),
}

impl Payload for Service {}
