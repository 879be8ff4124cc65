//! Stable numeric identities for nodes.
//!
//! A node backed by a native object is identified by a hash of that object.
//! A node without one borrows the identity of its nearest backed ancestor and
//! folds in the child indices on the path down to it, so two handles to the
//! same position under the same ancestor get the same id.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use lattice_ia2_core::{AccessibleNode, NodeRef, ObjectKey};

use crate::logging::targets;

/// A 32-bit node identity. Zero means no identity could be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StableId(pub u32);

impl StableId {
    /// The "no identity" sentinel.
    pub const NONE: StableId = StableId(0);

    /// Whether this is the sentinel.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    fn from_hash(hash: u32) -> Self {
        // Zero is reserved.
        Self(if hash == 0 { 1 } else { hash })
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

fn hash_u32(value: impl Hash) -> u32 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    let full = hasher.finish();
    (full ^ (full >> 32)) as u32
}

fn hash_object(object: ObjectKey) -> u32 {
    hash_u32(object)
}

/// Derive the stable id of `node`.
///
/// Returns [`StableId::NONE`] when neither the node nor any ancestor is
/// backed by an object, or when a parent does not list the child it was
/// reached from. Ancestor handles obtained during the walk are released as
/// soon as the walk moves past them.
pub fn stable_id(node: &dyn AccessibleNode) -> StableId {
    if let Some(object) = node.object() {
        return StableId::from_hash(hash_object(object));
    }

    let mut indices: Vec<usize> = Vec::new();
    let mut ancestor: Option<NodeRef> = None;
    loop {
        let current: &dyn AccessibleNode = match ancestor.as_deref() {
            Some(ancestor) => ancestor,
            None => node,
        };
        let Some(parent) = current.parent() else {
            tracing::trace!(target: targets::IDENTITY, depth = indices.len(), "no backed ancestor");
            return StableId::NONE;
        };
        let Some(index) = parent.index_of_child(current) else {
            tracing::trace!(target: targets::IDENTITY, depth = indices.len(), "parent does not list child");
            return StableId::NONE;
        };
        indices.push(index);

        if let Some(object) = parent.object() {
            let hash = indices
                .iter()
                .rev()
                .fold(hash_object(object), |h, &index| hash_u32(h.wrapping_add(u32::try_from(index).unwrap_or(u32::MAX))));
            return StableId::from_hash(hash);
        }
        // Releases the previous ancestor.
        ancestor = Some(parent);
    }
}
