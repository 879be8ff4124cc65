//! Translation between screen and parent-relative coordinates.

use lattice_ia2_core::{AccessibleNode, Point};

/// The coordinate space a client asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoordinateType {
    /// Relative to the screen's top-left corner.
    #[default]
    Screen,
    /// Relative to the top-left corner of the node's parent.
    ParentRelative,
}

fn parent_origin(node: &dyn AccessibleNode) -> Point {
    node.parent().map_or(Point::ORIGIN, |parent| parent.rect().top_left())
}

/// Convert a screen point into `coords` relative to `node`.
pub fn map_from_screen(node: &dyn AccessibleNode, coords: CoordinateType, point: Point) -> Point {
    match coords {
        CoordinateType::Screen => point,
        CoordinateType::ParentRelative => point - parent_origin(node),
    }
}

/// Convert a point in `coords` relative to `node` into screen space.
pub fn map_to_screen(node: &dyn AccessibleNode, coords: CoordinateType, point: Point) -> Point {
    match coords {
        CoordinateType::Screen => point,
        CoordinateType::ParentRelative => point + parent_origin(node),
    }
}

#[cfg(test)]
mod tests {
    use accesskit::Role;
    use lattice_ia2_core::{AccessibleTree, NodeSpec, Rect};

    use super::*;

    #[test]
    fn test_parent_relative_round_trip() {
        let tree = AccessibleTree::new();
        let parent = tree
            .add_node(None, NodeSpec::new(Role::Window).rect(Rect::new(200, 150, 400, 300)))
            .unwrap();
        let child = tree.add_node(Some(parent), NodeSpec::new(Role::TextInput)).unwrap();
        let node = tree.handle(child).unwrap();

        let relative = Point::new(12, 34);
        let screen = map_to_screen(&*node, CoordinateType::ParentRelative, relative);
        assert_eq!(screen, Point::new(212, 184));
        assert_eq!(map_from_screen(&*node, CoordinateType::ParentRelative, screen), relative);
        assert_eq!(map_from_screen(&*node, CoordinateType::Screen, screen), screen);
    }

    #[test]
    fn test_root_has_screen_origin() {
        let tree = AccessibleTree::new();
        let root = tree.add_node(None, NodeSpec::new(Role::Window)).unwrap();
        let node = tree.handle(root).unwrap();
        let point = Point::new(5, 6);
        assert_eq!(map_to_screen(&*node, CoordinateType::ParentRelative, point), point);
    }
}
