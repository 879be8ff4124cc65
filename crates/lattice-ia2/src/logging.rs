//! Logging facilities for the bridge.
//!
//! The bridge uses the `tracing` crate. Client calls, object lifetimes,
//! relation materialization and identity derivation each log under their
//! own target so they can be filtered independently:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_ia2::client=trace,lattice_ia2::object=debug")
//!     .init();
//! ```

use accesskit::Role;

/// Target names for log filtering.
pub mod targets {
    /// Bridge crate target.
    pub const BRIDGE: &str = "lattice_ia2";
    /// Every client call.
    pub const CLIENT: &str = "lattice_ia2::client";
    /// Object creation, destruction and interface negotiation.
    pub const OBJECT: &str = "lattice_ia2::object";
    /// Relation grouping and materialization.
    pub const RELATION: &str = "lattice_ia2::relation";
    /// Stable id derivation.
    pub const IDENTITY: &str = "lattice_ia2::identity";
}

/// Trace one client call, when enabled.
pub(crate) fn client_call(enabled: bool, method: &'static str, role: Role) {
    if enabled {
        tracing::trace!(target: targets::CLIENT, method, ?role, "client call");
    }
}
