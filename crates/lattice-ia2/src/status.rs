//! Status codes, errors and replies returned across the protocol boundary.
//!
//! Every protocol operation returns a [`BridgeResult`]. A call either fails
//! with a [`BridgeError`], succeeds with a value, or succeeds with nothing
//! ([`Reply::NoData`], or a null [`ClientArray`](crate::ClientArray)). The
//! [`Outcome`] trait collapses any of these into the tri-state [`Status`]
//! and its wire `HRESULT`.

use lattice_ia2_core::Facet;

use crate::capability::InterfaceId;

/// `HRESULT` values used on the wire.
pub mod hresult {
    /// Success.
    pub const S_OK: i32 = 0;
    /// Success with no data.
    pub const S_FALSE: i32 = 1;
    /// Not implemented.
    pub const E_NOTIMPL: i32 = 0x8000_4001_u32 as i32;
    /// Interface not supported.
    pub const E_NOINTERFACE: i32 = 0x8000_4002_u32 as i32;
    /// Unspecified failure.
    pub const E_FAIL: i32 = 0x8000_4005_u32 as i32;
    /// Invalid argument.
    pub const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;
    /// The object is no longer connected to its backing element.
    pub const CO_E_OBJNOTCONNECTED: i32 = 0x8004_01FD_u32 as i32;
}

/// Errors surfaced to clients.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    /// The wrapped node is no longer valid.
    #[error("accessible object is no longer connected to a live node")]
    StaleObject,

    /// The node does not currently expose the facet the call needs.
    #[error("node does not expose the {0} facet")]
    CapabilityAbsent(Facet),

    /// The object does not implement the requested interface.
    #[error("interface {0} is not supported")]
    NoInterface(InterfaceId),

    /// An index, offset or count is out of range or refused.
    #[error("invalid argument: {0}")]
    BadArgument(String),

    /// The protocol method is deliberately unsupported.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// A node could not be wrapped into a protocol object.
    #[error("failed to wrap node into a protocol object")]
    WrapFailed,
}

impl BridgeError {
    /// Create a bad-argument error.
    pub fn bad_argument(message: impl Into<String>) -> Self {
        Self::BadArgument(message.into())
    }

    /// The status this error is reported as.
    pub fn status(&self) -> Status {
        match self {
            Self::StaleObject => Status::Stale,
            Self::CapabilityAbsent(_) | Self::WrapFailed => Status::Failed,
            Self::NoInterface(_) => Status::NoInterface,
            Self::BadArgument(_) => Status::InvalidArgument,
            Self::NotImplemented(_) => Status::NotImplemented,
        }
    }
}

/// Result type for protocol operations.
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

/// Narrow a count or index to the wire's `long`, saturating at `i32::MAX`.
pub(crate) fn narrow(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// A successful reply that may carry no data.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// A value.
    Data(T),
    /// A well-formed, empty answer.
    NoData,
}

impl<T> Reply<T> {
    /// `Data` for `Some`, `NoData` for `None`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Data(value),
            None => Self::NoData,
        }
    }

    /// The value, if any.
    pub fn data(self) -> Option<T> {
        match self {
            Self::Data(value) => Some(value),
            Self::NoData => None,
        }
    }

    /// Whether this is [`Reply::NoData`].
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// Map the value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        match self {
            Self::Data(value) => Reply::Data(f(value)),
            Self::NoData => Reply::NoData,
        }
    }
}

/// Tri-state outcome of a protocol call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Success with data.
    Ok,
    /// Success without data.
    NoData,
    /// Argument out of range or refused.
    InvalidArgument,
    /// Interface not supported.
    NoInterface,
    /// Method deliberately unsupported.
    NotImplemented,
    /// Capability absent or wrapping failed.
    Failed,
    /// The object is stale.
    Stale,
}

impl Status {
    /// The wire `HRESULT`.
    pub fn hresult(self) -> i32 {
        match self {
            Self::Ok => hresult::S_OK,
            Self::NoData => hresult::S_FALSE,
            Self::InvalidArgument => hresult::E_INVALIDARG,
            Self::NoInterface => hresult::E_NOINTERFACE,
            Self::NotImplemented => hresult::E_NOTIMPL,
            Self::Failed => hresult::E_FAIL,
            Self::Stale => hresult::CO_E_OBJNOTCONNECTED,
        }
    }

    /// Whether the call succeeded, with or without data.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::NoData)
    }
}

/// A success value that knows whether it carries data.
pub trait Payload {
    /// `false` when the value represents a "no data" answer.
    fn has_data(&self) -> bool {
        true
    }
}

impl<T> Payload for Reply<T> {
    fn has_data(&self) -> bool {
        !self.is_no_data()
    }
}

macro_rules! impl_payload {
    ($($ty:ty),* $(,)?) => {
        $(impl Payload for $ty {})*
    };
}

impl_payload!(
    (),
    bool,
    i32,
    u32,
    f64,
    String,
    lattice_ia2_core::Point,
    lattice_ia2_core::Rect,
    lattice_ia2_core::CellExtents,
    (i32, i32),
    lattice_ia2_core::TextSegment,
    crate::config::Locale,
);

impl<T> Payload for crate::shared::Shared<T> {}

/// Anything that can be reported as a [`Status`].
pub trait Outcome {
    /// The status reported to the client.
    fn status(&self) -> Status;
}

impl<T: Payload> Outcome for BridgeResult<T> {
    fn status(&self) -> Status {
        match self {
            Ok(value) if value.has_data() => Status::Ok,
            Ok(_) => Status::NoData,
            Err(error) => error.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_statuses_are_distinct() {
        let errors = [
            BridgeError::StaleObject,
            BridgeError::NoInterface(InterfaceId::Text),
            BridgeError::bad_argument("index 3"),
            BridgeError::NotImplemented("scrollTo"),
        ];
        let codes: Vec<i32> = errors.iter().map(|e| e.status().hresult()).collect();
        assert_eq!(
            codes,
            vec![
                hresult::CO_E_OBJNOTCONNECTED,
                hresult::E_NOINTERFACE,
                hresult::E_INVALIDARG,
                hresult::E_NOTIMPL,
            ]
        );
        assert_eq!(BridgeError::CapabilityAbsent(Facet::Value).status(), Status::Failed);
    }

    #[test]
    fn test_outcome_of_replies() {
        let data: BridgeResult<Reply<i32>> = Ok(Reply::Data(4));
        let empty: BridgeResult<Reply<i32>> = Ok(Reply::NoData);
        let plain: BridgeResult<i32> = Ok(0);
        assert_eq!(data.status(), Status::Ok);
        assert_eq!(empty.status(), Status::NoData);
        assert_eq!(empty.status().hresult(), hresult::S_FALSE);
        assert_eq!(plain.status(), Status::Ok);
        assert!(Status::NoData.is_success());
        assert!(!Status::Stale.is_success());
    }

    #[test]
    fn test_narrow_saturates() {
        assert_eq!(narrow(0), 0);
        assert_eq!(narrow(42), 42);
        assert_eq!(narrow(i32::MAX as usize), i32::MAX);
        assert_eq!(narrow(usize::MAX), i32::MAX);
    }
}
