//! Relations between accessible nodes.

use crate::node::NodeRef;

/// The kind of a directed relation from a node to one or more targets.
///
/// Kinds are named from the source node's point of view: a node with a
/// [`RelationKind::LabelledBy`] entry is labelled by the entry's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum RelationKind {
    /// The node is a label for the target.
    LabelFor,
    /// The node is labelled by the target.
    LabelledBy,
    /// The node controls the target.
    ControllerFor,
    /// The node is controlled by the target.
    ControlledBy,
    /// The node describes the target.
    DescriptionFor,
    /// The node is described by the target.
    DescribedBy,
    /// Reading continues at the target.
    FlowsTo,
    /// Reading continues here from the target.
    FlowsFrom,
    /// The node is a member of the target group.
    MemberOf,
    /// The node is a child of the target tree node.
    NodeChildOf,
    /// The node is embedded by the target.
    EmbeddedBy,
    /// The node embeds the target.
    Embeds,
    /// The node is the parent window of the target.
    ParentWindowOf,
    /// The node is a subwindow of the target.
    SubwindowOf,
    /// The node is a popup for the target.
    PopupFor,
}

impl RelationKind {
    /// All relation kinds.
    pub const ALL: [RelationKind; 15] = [
        Self::LabelFor,
        Self::LabelledBy,
        Self::ControllerFor,
        Self::ControlledBy,
        Self::DescriptionFor,
        Self::DescribedBy,
        Self::FlowsTo,
        Self::FlowsFrom,
        Self::MemberOf,
        Self::NodeChildOf,
        Self::EmbeddedBy,
        Self::Embeds,
        Self::ParentWindowOf,
        Self::SubwindowOf,
        Self::PopupFor,
    ];
}

/// A single `(target, kind)` link reported by a node.
///
/// The target handle is owned by the entry and released with it.
#[derive(Debug)]
pub struct RelationEntry {
    /// The related node.
    pub target: NodeRef,
    /// How the source relates to the target.
    pub kind: RelationKind,
}

impl RelationEntry {
    /// Create a new entry.
    pub fn new(target: NodeRef, kind: RelationKind) -> Self {
        Self { target, kind }
    }
}
