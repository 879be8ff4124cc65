//! `IAccessibleText`.
//!
//! Offsets and boundaries pass straight through to the provider. Geometry is
//! converted between the provider's screen space and the coordinate type the
//! client asks for.

use std::sync::Arc;

use lattice_ia2_core::{Facet, Point, Rect, TextBoundary, TextFacet, TextSegment};

use super::{AccessibleObject, ScrollType};
use crate::coords::{self, CoordinateType};
use crate::status::{BridgeError, BridgeResult, Reply, narrow};

fn segment(found: TextSegment) -> Reply<TextSegment> {
    if found.text.is_empty() { Reply::NoData } else { Reply::Data(found) }
}

impl AccessibleObject {
    fn text_facet(&self, method: &'static str) -> BridgeResult<Arc<dyn TextFacet>> {
        self.facet(method, Facet::Text, |node| node.text())
    }

    /// Add a selection spanning `start..end`.
    pub fn add_selection(&self, start: i32, end: i32) -> BridgeResult<()> {
        self.text_facet("addSelection")?.add_selection(start, end);
        Ok(())
    }

    /// Attribute string of the run containing `offset`, with the run bounds.
    pub fn text_attributes(&self, offset: i32) -> BridgeResult<TextSegment> {
        Ok(self.text_facet("attributes")?.attributes(offset))
    }

    /// The caret offset.
    pub fn caret_offset(&self) -> BridgeResult<i32> {
        Ok(self.text_facet("caretOffset")?.cursor_position())
    }

    /// Move the caret to `offset`.
    pub fn set_caret_offset(&self, offset: i32) -> BridgeResult<()> {
        self.text_facet("setCaretOffset")?.set_cursor_position(offset);
        Ok(())
    }

    /// Bounds of the character at `offset` in `coords`.
    pub fn character_extents(&self, offset: i32, coords: CoordinateType) -> BridgeResult<Rect> {
        let text = self.text_facet("characterExtents")?;
        let rect = text.character_rect(offset);
        let origin = coords::map_from_screen(self.node(), coords, rect.top_left());
        Ok(Rect {
            origin,
            size: rect.size,
        })
    }

    /// Number of selections.
    pub fn n_selections(&self) -> BridgeResult<i32> {
        Ok(narrow(self.text_facet("nSelections")?.selection_count()))
    }

    /// Start and end offsets of selection `index`.
    pub fn selection(&self, index: i32) -> BridgeResult<(i32, i32)> {
        Ok(self.text_facet("selection")?.selection(index))
    }

    /// Replace selection `index` with `start..end`.
    pub fn set_selection(&self, index: i32, start: i32, end: i32) -> BridgeResult<()> {
        self.text_facet("setSelection")?.set_selection(index, start, end);
        Ok(())
    }

    /// Remove selection `index`.
    pub fn remove_selection(&self, index: i32) -> BridgeResult<()> {
        self.text_facet("removeSelection")?.remove_selection(index);
        Ok(())
    }

    /// Offset of the character at `point` given in `coords`; `NoData` when
    /// no character is there.
    pub fn offset_at_point(&self, point: Point, coords: CoordinateType) -> BridgeResult<Reply<i32>> {
        let text = self.text_facet("offsetAtPoint")?;
        let screen = coords::map_to_screen(self.node(), coords, point);
        let offset = text.offset_at_point(screen);
        Ok(if offset == -1 { Reply::NoData } else { Reply::Data(offset) })
    }

    /// Text in `[start, end)`. An empty result is refused.
    pub fn text(&self, start: i32, end: i32) -> BridgeResult<String> {
        let text = self.text_facet("text")?.text(start, end);
        if text.is_empty() {
            return Err(BridgeError::bad_argument(format!("no text in [{start}, {end})")));
        }
        Ok(text)
    }

    /// The `boundary` segment before `offset`.
    pub fn text_before_offset(&self, offset: i32, boundary: TextBoundary) -> BridgeResult<Reply<TextSegment>> {
        Ok(segment(self.text_facet("textBeforeOffset")?.text_before_offset(offset, boundary)))
    }

    /// The `boundary` segment after `offset`.
    pub fn text_after_offset(&self, offset: i32, boundary: TextBoundary) -> BridgeResult<Reply<TextSegment>> {
        Ok(segment(self.text_facet("textAfterOffset")?.text_after_offset(offset, boundary)))
    }

    /// The `boundary` segment containing `offset`.
    pub fn text_at_offset(&self, offset: i32, boundary: TextBoundary) -> BridgeResult<Reply<TextSegment>> {
        Ok(segment(self.text_facet("textAtOffset")?.text_at_offset(offset, boundary)))
    }

    /// Number of characters.
    pub fn n_characters(&self) -> BridgeResult<i32> {
        Ok(narrow(self.text_facet("nCharacters")?.character_count()))
    }

    /// Scroll `[start, end)` into view. The provider decides the placement.
    pub fn scroll_substring_to(&self, start: i32, end: i32, _scroll_type: ScrollType) -> BridgeResult<()> {
        self.text_facet("scrollSubstringTo")?.scroll_to_substring(start, end);
        Ok(())
    }

    /// Scroll a substring to a point. Not supported.
    pub fn scroll_substring_to_point(
        &self,
        _start: i32,
        _end: i32,
        _coords: CoordinateType,
        _point: Point,
    ) -> BridgeResult<()> {
        self.text_facet("scrollSubstringToPoint")?;
        Err(BridgeError::NotImplemented("scrollSubstringToPoint"))
    }

    /// Text inserted by the last change. Not supported.
    pub fn new_text(&self) -> BridgeResult<TextSegment> {
        self.text_facet("newText")?;
        Err(BridgeError::NotImplemented("newText"))
    }

    /// Text removed by the last change. Not supported.
    pub fn old_text(&self) -> BridgeResult<TextSegment> {
        self.text_facet("oldText")?;
        Err(BridgeError::NotImplemented("oldText"))
    }
}

#[cfg(test)]
mod tests {
    use accesskit::Role;
    use lattice_ia2_core::{AccessibleTree, Capability, NodeKey, NodeSpec, PlainText, Size};

    use super::*;
    use crate::accessible::AccessibleRef;
    use crate::context::BridgeContext;
    use crate::status::{Outcome, Status};

    fn field(content: &str) -> (AccessibleTree, NodeKey, AccessibleRef) {
        let tree = AccessibleTree::new();
        let window = tree
            .add_node(None, NodeSpec::new(Role::Window).rect(Rect::new(100, 50, 400, 300)))
            .unwrap();
        let input = tree
            .add_node(Some(window), NodeSpec::new(Role::TextInput).rect(Rect::new(110, 60, 200, 32)))
            .unwrap();
        let text = PlainText::new(content, Point::new(110, 60), Size::new(8, 16)).with_attributes("font-weight:bold;");
        tree.set_capability(input, Capability::Text(Arc::new(text))).unwrap();
        let object = BridgeContext::default().wrap(tree.handle(input).unwrap()).unwrap();
        (tree, input, object)
    }

    #[test]
    fn test_text_queries() {
        let (_tree, _, object) = field("hello big world");
        assert_eq!(object.n_characters().unwrap(), 15);
        assert_eq!(object.text(6, 9).unwrap(), "big");
        assert!(matches!(object.text(20, 25), Err(BridgeError::BadArgument(_))));

        let at = object.text_at_offset(7, TextBoundary::Word).unwrap().data().unwrap();
        assert_eq!((at.text.as_str(), at.start, at.end), ("big ", 6, 10));
        let after = object.text_after_offset(7, TextBoundary::Word).unwrap().data().unwrap();
        assert_eq!(after.text, "world");
        assert_eq!(object.text_before_offset(0, TextBoundary::Word).status(), Status::NoData);

        let attributes = object.text_attributes(3).unwrap();
        assert_eq!(attributes.text, "font-weight:bold;");
        assert_eq!((attributes.start, attributes.end), (0, 15));
    }

    #[test]
    fn test_caret_and_selections() {
        let (_tree, _, object) = field("abcdef");
        object.set_caret_offset(4).unwrap();
        assert_eq!(object.caret_offset().unwrap(), 4);

        object.add_selection(3, 1).unwrap();
        assert_eq!(object.n_selections().unwrap(), 1);
        assert_eq!(object.selection(0).unwrap(), (1, 3));
        object.set_selection(0, 2, 5).unwrap();
        assert_eq!(object.selection(0).unwrap(), (2, 5));
        object.remove_selection(0).unwrap();
        assert_eq!(object.n_selections().unwrap(), 0);
    }

    #[test]
    fn test_geometry_in_both_coordinate_types() {
        let (_tree, _, object) = field("abc\ndef");
        let screen = object.character_extents(5, CoordinateType::Screen).unwrap();
        assert_eq!(screen, Rect::new(118, 76, 8, 16));
        let relative = object.character_extents(5, CoordinateType::ParentRelative).unwrap();
        assert_eq!(relative, Rect::new(18, 26, 8, 16));

        assert_eq!(
            object.offset_at_point(Point::new(120, 80), CoordinateType::Screen).unwrap(),
            Reply::Data(5)
        );
        assert_eq!(
            object.offset_at_point(Point::new(20, 30), CoordinateType::ParentRelative).unwrap(),
            Reply::Data(5)
        );
        assert_eq!(
            object.offset_at_point(Point::new(0, 0), CoordinateType::Screen).status(),
            Status::NoData
        );
    }

    #[test]
    fn test_facet_can_disappear() {
        let (tree, input, object) = field("abc");
        assert_eq!(object.n_characters().unwrap(), 3);
        tree.remove_capability(input, Facet::Text).unwrap();
        assert_eq!(object.n_characters().unwrap_err(), BridgeError::CapabilityAbsent(Facet::Text));
        assert_eq!(object.new_text().unwrap_err(), BridgeError::CapabilityAbsent(Facet::Text));
    }

    #[test]
    fn test_unsupported_text_methods() {
        let (_tree, _, object) = field("abc");
        assert_eq!(object.new_text().status(), Status::NotImplemented);
        assert_eq!(object.old_text().status(), Status::NotImplemented);
        assert_eq!(
            object
                .scroll_substring_to_point(0, 1, CoordinateType::Screen, Point::new(0, 0))
                .status(),
            Status::NotImplemented
        );
    }
}
