//! `IAccessibleComponent`: position and colors.

use lattice_ia2_core::Point;

use super::AccessibleObject;
use crate::coords::{self, CoordinateType};
use crate::status::BridgeResult;

impl AccessibleObject {
    /// Top-left corner relative to the parent.
    pub fn location_in_parent(&self) -> BridgeResult<Point> {
        let node = self.live("locationInParent")?;
        Ok(coords::map_from_screen(node, CoordinateType::ParentRelative, node.rect().top_left()))
    }

    /// Foreground color as `0xAARRGGBB`.
    pub fn foreground(&self) -> BridgeResult<u32> {
        Ok(self.live("foreground")?.foreground_color().to_argb())
    }

    /// Background color as `0xAARRGGBB`.
    pub fn background(&self) -> BridgeResult<u32> {
        Ok(self.live("background")?.background_color().to_argb())
    }
}

#[cfg(test)]
mod tests {
    use accesskit::Role;
    use lattice_ia2_core::{AccessibleTree, Color, NodeSpec, Rect};

    use crate::context::BridgeContext;

    use super::*;

    #[test]
    fn test_location_and_colors() {
        let tree = AccessibleTree::new();
        let window = tree
            .add_node(None, NodeSpec::new(Role::Window).rect(Rect::new(100, 50, 400, 300)))
            .unwrap();
        let label = tree
            .add_node(
                Some(window),
                NodeSpec::new(Role::Label)
                    .rect(Rect::new(120, 80, 60, 20))
                    .colors(Color::rgb(0x20, 0x40, 0x60), Color::rgba(0xff, 0xff, 0xff, 0x80)),
            )
            .unwrap();
        let object = BridgeContext::default().wrap(tree.handle(label).unwrap()).unwrap();

        assert_eq!(object.location_in_parent().unwrap(), Point::new(20, 30));
        assert_eq!(object.foreground().unwrap(), 0xff20_4060);
        assert_eq!(object.background().unwrap(), 0x80ff_ffff);

        let root = BridgeContext::default().wrap(tree.handle(window).unwrap()).unwrap();
        assert_eq!(root.location_in_parent().unwrap(), Point::new(100, 50));
    }
}
