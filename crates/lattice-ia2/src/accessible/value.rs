//! `IAccessibleValue`.

use std::sync::Arc;

use lattice_ia2_core::{Facet, ValueFacet, Variant};

use super::AccessibleObject;
use crate::status::{BridgeError, BridgeResult, Reply};

fn reply(value: Variant) -> Reply<Variant> {
    if value.is_empty() { Reply::NoData } else { Reply::Data(value) }
}

impl AccessibleObject {
    fn value_facet(&self, method: &'static str) -> BridgeResult<Arc<dyn ValueFacet>> {
        self.facet(method, Facet::Value, |node| node.value())
    }

    /// The current value; `NoData` when it is empty.
    pub fn current_value(&self) -> BridgeResult<Reply<Variant>> {
        Ok(reply(self.value_facet("currentValue")?.current_value()))
    }

    /// The upper bound; `NoData` when unset.
    pub fn maximum_value(&self) -> BridgeResult<Reply<Variant>> {
        Ok(reply(self.value_facet("maximumValue")?.maximum_value()))
    }

    /// The lower bound; `NoData` when unset.
    pub fn minimum_value(&self) -> BridgeResult<Reply<Variant>> {
        Ok(reply(self.value_facet("minimumValue")?.minimum_value()))
    }

    /// Set the value. It is coerced to a number first; values that do not
    /// coerce are refused.
    pub fn set_current_value(&self, value: Variant) -> BridgeResult<()> {
        let facet = self.value_facet("setCurrentValue")?;
        let number = value
            .to_f64()
            .ok_or_else(|| BridgeError::bad_argument(format!("cannot use {value:?} as a number")))?;
        facet.set_current_value(Variant::Double(number));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use accesskit::Role;
    use lattice_ia2_core::{AccessibleTree, Capability, NodeSpec, RangeValue};

    use super::*;
    use crate::context::BridgeContext;
    use crate::status::{Outcome, Status};

    struct Unset;

    impl ValueFacet for Unset {
        fn current_value(&self) -> Variant {
            Variant::Empty
        }

        fn set_current_value(&self, _value: Variant) {}

        fn maximum_value(&self) -> Variant {
            Variant::Empty
        }

        fn minimum_value(&self) -> Variant {
            Variant::Int(0)
        }
    }

    #[test]
    fn test_range_value() {
        let tree = AccessibleTree::new();
        let slider = tree.add_node(None, NodeSpec::new(Role::Slider)).unwrap();
        tree.set_capability(slider, Capability::Value(Arc::new(RangeValue::new(3.0, 0.0, 10.0))))
            .unwrap();
        let object = BridgeContext::default().wrap(tree.handle(slider).unwrap()).unwrap();

        assert_eq!(object.current_value().unwrap(), Reply::Data(Variant::Double(3.0)));
        assert_eq!(object.maximum_value().unwrap(), Reply::Data(Variant::Double(10.0)));

        object.set_current_value(Variant::from("7.5")).unwrap();
        assert_eq!(object.current_value().unwrap(), Reply::Data(Variant::Double(7.5)));
        object.set_current_value(Variant::Int(40)).unwrap();
        assert_eq!(object.current_value().unwrap(), Reply::Data(Variant::Double(10.0)));

        assert_eq!(
            object.set_current_value(Variant::from("loud")).status(),
            Status::InvalidArgument
        );
        assert_eq!(object.set_current_value(Variant::Empty).status(), Status::InvalidArgument);
    }

    #[test]
    fn test_empty_values_are_no_data() {
        let tree = AccessibleTree::new();
        let key = tree.add_node(None, NodeSpec::new(Role::ProgressIndicator)).unwrap();
        tree.set_capability(key, Capability::Value(Arc::new(Unset))).unwrap();
        let object = BridgeContext::default().wrap(tree.handle(key).unwrap()).unwrap();

        assert_eq!(object.current_value().status(), Status::NoData);
        assert_eq!(object.maximum_value().status(), Status::NoData);
        assert_eq!(object.minimum_value().unwrap(), Reply::Data(Variant::Int(0)));

        tree.remove_capability(key, Facet::Value).unwrap();
        assert_eq!(object.current_value().unwrap_err(), BridgeError::CapabilityAbsent(Facet::Value));
    }
}
