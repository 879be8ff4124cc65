//! Relation grouping and relation objects.
//!
//! A node reports its relations as a flat list of `(target, kind)` entries.
//! Clients see one relation object per kind, holding every target of that
//! kind. Kinds keep the order in which they first appear in the list and
//! targets keep their order within a kind.

use lattice_ia2_core::{AccessibleNode, NodeRef, RelationEntry, RelationKind};

use crate::accessible::AccessibleRef;
use crate::array::ClientArray;
use crate::capability::InterfaceId;
use crate::context::BridgeContext;
use crate::logging::targets;
use crate::shared::Shared;
use crate::status::{BridgeError, BridgeResult, Payload, narrow};

/// Targets of one relation kind.
#[derive(Debug)]
pub struct RelationGroup {
    /// The kind.
    pub kind: RelationKind,
    /// Targets in the order they were reported.
    pub targets: Vec<NodeRef>,
}

/// Group `entries` by kind, in first-seen order.
pub fn group_relations(entries: Vec<RelationEntry>) -> Vec<RelationGroup> {
    let mut groups: Vec<RelationGroup> = Vec::new();
    for RelationEntry { target, kind } in entries {
        match groups.iter_mut().find(|group| group.kind == kind) {
            Some(group) => group.targets.push(target),
            None => groups.push(RelationGroup {
                kind,
                targets: vec![target],
            }),
        }
    }
    groups
}

/// The IAccessible2 relation string for `kind`.
pub fn relation_type_name(kind: RelationKind) -> &'static str {
    match kind {
        RelationKind::LabelFor => "labelFor",
        RelationKind::LabelledBy => "labelledBy",
        RelationKind::ControllerFor => "controllerFor",
        RelationKind::ControlledBy => "controlledBy",
        RelationKind::DescriptionFor => "descriptionFor",
        RelationKind::DescribedBy => "describedBy",
        RelationKind::FlowsTo => "flowsTo",
        RelationKind::FlowsFrom => "flowsFrom",
        RelationKind::MemberOf => "memberOf",
        RelationKind::NodeChildOf => "nodeChildOf",
        RelationKind::EmbeddedBy => "embeddedBy",
        RelationKind::Embeds => "embeds",
        RelationKind::ParentWindowOf => "parentWindowOf",
        RelationKind::SubwindowOf => "subwindowOf",
        RelationKind::PopupFor => "popupFor",
        _ => "",
    }
}

/// A relation exposed to clients: one kind and at least one target.
#[derive(Debug)]
pub struct RelationObject {
    kind: RelationKind,
    targets: Vec<AccessibleRef>,
}

/// A counted reference to a [`RelationObject`].
pub type RelationRef = Shared<RelationObject>;

impl RelationObject {
    /// Wrap every target of `group`. Any failure fails the whole group.
    fn from_group(group: RelationGroup, context: &BridgeContext) -> BridgeResult<Self> {
        let targets = group
            .targets
            .into_iter()
            .map(|target| context.wrap(target))
            .collect::<BridgeResult<Vec<_>>>()?;
        debug_assert!(!targets.is_empty());
        Ok(Self {
            kind: group.kind,
            targets,
        })
    }

    /// The relation kind.
    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// The relation string, e.g. `"labelledBy"`.
    pub fn relation_type(&self) -> BridgeResult<String> {
        Ok(relation_type_name(self.kind).to_string())
    }

    /// Same as [`relation_type`](Self::relation_type); relation strings are
    /// not localized.
    pub fn localized_relation_type(&self) -> BridgeResult<String> {
        self.relation_type()
    }

    /// Number of targets.
    pub fn n_targets(&self) -> BridgeResult<i32> {
        Ok(narrow(self.targets.len()))
    }

    /// A new reference to target `index`.
    pub fn target(&self, index: i32) -> BridgeResult<AccessibleRef> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.targets.get(i))
            .cloned()
            .ok_or_else(|| BridgeError::bad_argument(format!("relation target {index} out of range")))
    }

    /// New references to up to `max` targets.
    pub fn targets(&self, max: i32) -> BridgeResult<ClientArray<AccessibleRef>> {
        let max = usize::try_from(max)
            .map_err(|_| BridgeError::bad_argument(format!("negative target count {max}")))?;
        Ok(ClientArray::from_vec(self.targets.iter().take(max).cloned().collect()))
    }
}

/// Interface negotiation for relation objects.
pub trait RelationInterface {
    /// A new reference for `iid`, if this object implements it.
    fn query_interface(&self, iid: InterfaceId) -> BridgeResult<RelationRef>;
}

impl RelationInterface for RelationRef {
    fn query_interface(&self, iid: InterfaceId) -> BridgeResult<RelationRef> {
        match iid {
            InterfaceId::Unknown | InterfaceId::Relation => Ok(self.clone()),
            _ => Err(BridgeError::NoInterface(iid)),
        }
    }
}

/// A page of relation objects.
#[derive(Debug)]
pub struct RelationPage {
    /// Number of distinct relation kinds on the node.
    pub total: i32,
    /// The materialized relations; `None` for a count-only query.
    pub relations: Option<ClientArray<RelationRef>>,
}

impl Payload for RelationPage {
    fn has_data(&self) -> bool {
        match &self.relations {
            Some(relations) => !relations.is_null(),
            None => self.total > 0,
        }
    }
}

/// Group the relations of `node` and materialize up to `max` groups from
/// `start`. `max = None` only counts.
pub(crate) fn relation_page(
    node: &dyn AccessibleNode,
    context: &BridgeContext,
    start: i32,
    max: Option<i32>,
) -> BridgeResult<RelationPage> {
    let start = usize::try_from(start)
        .map_err(|_| BridgeError::bad_argument(format!("negative relation index {start}")))?;
    let max = max
        .map(|max| {
            usize::try_from(max)
                .map_err(|_| BridgeError::bad_argument(format!("negative relation count {max}")))
        })
        .transpose()?;

    let groups = group_relations(node.relations());
    let total = narrow(groups.len());
    let Some(max) = max else {
        return Ok(RelationPage {
            total,
            relations: None,
        });
    };

    let relations = groups
        .into_iter()
        .skip(start)
        .take(max)
        .map(|group| RelationObject::from_group(group, context).map(Shared::new))
        .collect::<BridgeResult<Vec<_>>>()?;
    tracing::trace!(target: targets::RELATION, total, start, returned = relations.len(), "materialized relations");
    Ok(RelationPage {
        total,
        relations: Some(ClientArray::from_vec(relations)),
    })
}

#[cfg(test)]
mod tests {
    use accesskit::Role;
    use lattice_ia2_core::{AccessibleTree, NodeKey, NodeSpec, Rect};

    use super::*;
    use crate::status::{Outcome, Status};

    fn labelled_tree() -> (AccessibleTree, NodeKey, Vec<NodeKey>) {
        let tree = AccessibleTree::new();
        let root = tree.add_node(None, NodeSpec::new(Role::Window).backed()).unwrap();
        let source = tree.add_node(Some(root), NodeSpec::new(Role::TextInput)).unwrap();
        let targets: Vec<NodeKey> = (0..5)
            .map(|i| {
                let spec = NodeSpec::new(Role::Label).rect(Rect::new(0, i * 20, 80, 16));
                tree.add_node(Some(root), spec).unwrap()
            })
            .collect();
        let kinds = [
            RelationKind::LabelledBy,
            RelationKind::LabelledBy,
            RelationKind::DescribedBy,
            RelationKind::MemberOf,
            RelationKind::LabelledBy,
        ];
        for (target, kind) in targets.iter().zip(kinds) {
            tree.add_relation(source, *target, kind).unwrap();
        }
        (tree, source, targets)
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let (tree, source, targets) = labelled_tree();
        let groups = group_relations(tree.handle(source).unwrap().relations());
        let kinds: Vec<RelationKind> = groups.iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![RelationKind::LabelledBy, RelationKind::DescribedBy, RelationKind::MemberOf]
        );
        let first = &groups[0].targets;
        assert_eq!(first.len(), 3);
        let node = tree.handle(targets[4]).unwrap();
        assert_eq!(first[2].rect(), node.rect());
    }

    #[test]
    fn test_page_past_the_end_is_no_data() {
        let (tree, source, _) = labelled_tree();
        let node = tree.handle(source).unwrap();
        let context = BridgeContext::default();

        let page = relation_page(&*node, &context, 5, Some(2));
        assert_eq!(page.status(), Status::NoData);
        let page = page.unwrap();
        assert_eq!(page.total, 3);
        assert!(page.relations.unwrap().is_null());

        let zero = relation_page(&*node, &context, 0, Some(0));
        assert_eq!(zero.status(), Status::NoData);

        let negative = relation_page(&*node, &context, -1, Some(1));
        assert_eq!(negative.status(), Status::InvalidArgument);
    }

    #[test]
    fn test_count_only() {
        let (tree, source, _) = labelled_tree();
        let node = tree.handle(source).unwrap();
        let page = relation_page(&*node, &BridgeContext::default(), 0, None);
        assert_eq!(page.status(), Status::Ok);
        let page = page.unwrap();
        assert_eq!(page.total, 3);
        assert!(page.relations.is_none());
    }

    #[test]
    fn test_relation_object_targets() {
        let (tree, source, _) = labelled_tree();
        let node = tree.handle(source).unwrap();
        let page = relation_page(&*node, &BridgeContext::default(), 0, Some(1)).unwrap();
        let relations = page.relations.unwrap().into_vec();
        assert_eq!(relations.len(), 1);

        let relation = &relations[0];
        assert_eq!(relation.relation_type().unwrap(), "labelledBy");
        assert_eq!(relation.n_targets().unwrap(), 3);
        assert_eq!(relation.targets(2).unwrap().len(), 2);
        assert!(relation.targets(0).unwrap().is_null());
        assert!(matches!(relation.target(3), Err(BridgeError::BadArgument(_))));
        assert!(relation.query_interface(InterfaceId::Relation).is_ok());
        assert_eq!(
            relation.query_interface(InterfaceId::Text).unwrap_err(),
            BridgeError::NoInterface(InterfaceId::Text)
        );
    }

    #[test]
    fn test_unwrappable_target_fails_whole_call() {
        let (tree, source, targets) = labelled_tree();
        let node = tree.handle(source).unwrap();
        let entries = node.relations();
        tree.destroy(targets[1]).unwrap();
        let groups = group_relations(entries);
        let context = BridgeContext::default();
        let result: BridgeResult<Vec<_>> = groups
            .into_iter()
            .map(|g| RelationObject::from_group(g, &context))
            .collect();
        assert_eq!(result.unwrap_err(), BridgeError::WrapFailed);
    }
}
