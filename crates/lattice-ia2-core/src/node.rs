//! The accessible-tree provider interface.
//!
//! A provider exposes its tree through [`AccessibleNode`] handles. Handles
//! are cheap, independently owned views onto a node: every navigation call
//! ([`AccessibleNode::parent`], [`AccessibleNode::child`], table lookups,
//! relation targets) hands back a fresh [`NodeRef`] that the caller owns and
//! releases by dropping it. Two handles may refer to the same logical node.
//!
//! Optional behavior is grouped into facets. A node is asked for a facet by
//! kind ([`Facet`]) and answers with a [`Capability`] holding the facet
//! object, or `None`. The answer may change between calls, so callers must
//! ask again every time they need the facet.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use accesskit::Role;

use crate::geometry::{Color, Point, Rect};
use crate::relation::RelationEntry;
use crate::state::NodeState;
use crate::variant::Variant;

/// An owned handle to a provider node.
pub type NodeRef = Box<dyn AccessibleNode>;

/// Hashable identity of the native object backing a node.
///
/// Two handles for the same backing object report equal keys for as long as
/// the object is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(pub u64);

/// Native window handle a node is hosted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// The closed set of optional facets a node may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    /// Text content, caret and selections.
    Text,
    /// Two-dimensional table.
    Table,
    /// A cell inside a table.
    TableCell,
    /// A numeric value within a range.
    Value,
    /// Named, invokable actions.
    Action,
}

impl Facet {
    /// All facets.
    pub const ALL: [Facet; 5] = [
        Facet::Text,
        Facet::Table,
        Facet::TableCell,
        Facet::Value,
        Facet::Action,
    ];

    /// A short lowercase name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Table => "table",
            Self::TableCell => "table-cell",
            Self::Value => "value",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A facet object returned by [`AccessibleNode::capability`].
#[derive(Clone)]
pub enum Capability {
    /// See [`TextFacet`].
    Text(Arc<dyn TextFacet>),
    /// See [`TableFacet`].
    Table(Arc<dyn TableFacet>),
    /// See [`TableCellFacet`].
    TableCell(Arc<dyn TableCellFacet>),
    /// See [`ValueFacet`].
    Value(Arc<dyn ValueFacet>),
    /// See [`ActionFacet`].
    Action(Arc<dyn ActionFacet>),
}

impl Capability {
    /// The kind of facet held.
    pub fn facet(&self) -> Facet {
        match self {
            Self::Text(_) => Facet::Text,
            Self::Table(_) => Facet::Table,
            Self::TableCell(_) => Facet::TableCell,
            Self::Value(_) => Facet::Value,
            Self::Action(_) => Facet::Action,
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Capability").field(&self.facet()).finish()
    }
}

/// A node in the provider's accessible tree.
///
/// # Handles
///
/// Methods returning [`NodeRef`] return new handles owned by the caller.
/// Implementations must not assume the caller keeps them alive.
///
/// # Validity
///
/// [`is_valid`](Self::is_valid) reports whether the underlying element still
/// exists. The other methods may be called on an invalid handle but their
/// results are unspecified; the bridge always checks validity first.
pub trait AccessibleNode: Any + Send + Sync {
    /// Whether the underlying element still exists.
    fn is_valid(&self) -> bool;

    /// The node's role.
    fn role(&self) -> Role;

    /// The node's state flags.
    fn state(&self) -> NodeState;

    /// Bounding rectangle in screen coordinates.
    fn rect(&self) -> Rect;

    /// Foreground color.
    fn foreground_color(&self) -> Color {
        Color::BLACK
    }

    /// Background color.
    fn background_color(&self) -> Color {
        Color::WHITE
    }

    /// The parent node, or `None` for a root.
    fn parent(&self) -> Option<NodeRef>;

    /// Number of children.
    fn child_count(&self) -> usize;

    /// The child at `index`.
    fn child(&self, index: usize) -> Option<NodeRef>;

    /// Index of `child` among this node's children.
    fn index_of_child(&self, child: &dyn AccessibleNode) -> Option<usize>;

    /// Relations from this node, in no particular order.
    fn relations(&self) -> Vec<RelationEntry> {
        Vec::new()
    }

    /// Identity of the native object backing this node, if it has one.
    fn object(&self) -> Option<ObjectKey>;

    /// The native window hosting this node, if known.
    fn window_handle(&self) -> Option<WindowHandle> {
        None
    }

    /// The facet of kind `facet`, if the node currently exposes it.
    fn capability(&self, facet: Facet) -> Option<Capability>;

    /// Upcast for provider-side identity comparisons.
    fn as_any(&self) -> &dyn Any;

    /// The text facet, if present.
    fn text(&self) -> Option<Arc<dyn TextFacet>> {
        match self.capability(Facet::Text) {
            Some(Capability::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The table facet, if present.
    fn table(&self) -> Option<Arc<dyn TableFacet>> {
        match self.capability(Facet::Table) {
            Some(Capability::Table(table)) => Some(table),
            _ => None,
        }
    }

    /// The table-cell facet, if present.
    fn table_cell(&self) -> Option<Arc<dyn TableCellFacet>> {
        match self.capability(Facet::TableCell) {
            Some(Capability::TableCell(cell)) => Some(cell),
            _ => None,
        }
    }

    /// The value facet, if present.
    fn value(&self) -> Option<Arc<dyn ValueFacet>> {
        match self.capability(Facet::Value) {
            Some(Capability::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// The action facet, if present.
    fn action(&self) -> Option<Arc<dyn ActionFacet>> {
        match self.capability(Facet::Action) {
            Some(Capability::Action(action)) => Some(action),
            _ => None,
        }
    }
}

impl fmt::Debug for dyn AccessibleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("AccessibleNode");
        s.field("valid", &self.is_valid());
        if self.is_valid() {
            s.field("role", &self.role());
            s.field("object", &self.object());
        }
        s.finish()
    }
}

/// Text unit used by the offset-relative text queries.
///
/// The provider alone decides where boundaries fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextBoundary {
    /// A single character.
    Char,
    /// A word.
    Word,
    /// A sentence.
    Sentence,
    /// A paragraph.
    Paragraph,
    /// A line.
    Line,
    /// The entire text.
    All,
}

/// A run of text with its offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextSegment {
    /// The text.
    pub text: String,
    /// Offset of the first character.
    pub start: i32,
    /// Offset one past the last character.
    pub end: i32,
}

/// Text content, caret and selection.
///
/// Offsets are character offsets as understood by the provider.
pub trait TextFacet: Send + Sync {
    /// Number of characters.
    fn character_count(&self) -> usize;

    /// Text in `[start, end)`.
    fn text(&self, start: i32, end: i32) -> String;

    /// Segment of kind `boundary` preceding `offset`.
    fn text_before_offset(&self, offset: i32, boundary: TextBoundary) -> TextSegment;

    /// Segment of kind `boundary` following `offset`.
    fn text_after_offset(&self, offset: i32, boundary: TextBoundary) -> TextSegment;

    /// Segment of kind `boundary` containing `offset`.
    fn text_at_offset(&self, offset: i32, boundary: TextBoundary) -> TextSegment;

    /// Caret position.
    fn cursor_position(&self) -> i32;

    /// Move the caret.
    fn set_cursor_position(&self, position: i32);

    /// Number of selections.
    fn selection_count(&self) -> usize;

    /// Offsets of selection `index` as `(start, end)`.
    fn selection(&self, index: i32) -> (i32, i32);

    /// Add a selection.
    fn add_selection(&self, start: i32, end: i32);

    /// Remove selection `index`.
    fn remove_selection(&self, index: i32);

    /// Replace selection `index`.
    fn set_selection(&self, index: i32, start: i32, end: i32);

    /// Screen rectangle of the character at `offset`.
    fn character_rect(&self, offset: i32) -> Rect;

    /// Offset of the character at the screen `point`, or -1.
    fn offset_at_point(&self, point: Point) -> i32;

    /// Attribute string for the run containing `offset`, with the run's bounds.
    fn attributes(&self, offset: i32) -> TextSegment;

    /// Scroll so that `[start, end)` becomes visible.
    fn scroll_to_substring(&self, start: i32, end: i32);
}

/// A two-dimensional table.
pub trait TableFacet: Send + Sync {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Number of columns.
    fn column_count(&self) -> usize;

    /// The cell at `(row, column)`.
    fn cell_at(&self, row: i32, column: i32) -> Option<NodeRef>;

    /// The table caption.
    fn caption(&self) -> Option<NodeRef>;

    /// The table summary.
    fn summary(&self) -> Option<NodeRef>;

    /// Description of `column`; empty when none.
    fn column_description(&self, column: i32) -> String;

    /// Description of `row`; empty when none.
    fn row_description(&self, row: i32) -> String;

    /// Number of selected cells.
    fn selected_cell_count(&self) -> usize;

    /// Number of fully selected columns.
    fn selected_column_count(&self) -> usize;

    /// Number of fully selected rows.
    fn selected_row_count(&self) -> usize;

    /// Handles for the selected cells.
    fn selected_cells(&self) -> Vec<NodeRef>;

    /// Indices of the selected columns.
    fn selected_columns(&self) -> Vec<i32>;

    /// Indices of the selected rows.
    fn selected_rows(&self) -> Vec<i32>;

    /// Whether `column` is selected.
    fn is_column_selected(&self, column: i32) -> bool;

    /// Whether `row` is selected.
    fn is_row_selected(&self, row: i32) -> bool;

    /// Select `row`; `false` if refused.
    fn select_row(&self, row: i32) -> bool;

    /// Select `column`; `false` if refused.
    fn select_column(&self, column: i32) -> bool;

    /// Unselect `row`; `false` if refused.
    fn unselect_row(&self, row: i32) -> bool;

    /// Unselect `column`; `false` if refused.
    fn unselect_column(&self, column: i32) -> bool;
}

/// Position and span of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellExtents {
    /// Row index.
    pub row: i32,
    /// Column index.
    pub column: i32,
    /// Rows spanned.
    pub row_extent: i32,
    /// Columns spanned.
    pub column_extent: i32,
    /// Whether the cell is selected.
    pub selected: bool,
}

/// A cell inside a table.
pub trait TableCellFacet: Send + Sync {
    /// Row index.
    fn row_index(&self) -> i32;

    /// Column index.
    fn column_index(&self) -> i32;

    /// Rows spanned.
    fn row_extent(&self) -> i32;

    /// Columns spanned.
    fn column_extent(&self) -> i32;

    /// Whether the cell is selected.
    fn is_selected(&self) -> bool;

    /// Header cells of the cell's row.
    fn row_header_cells(&self) -> Vec<NodeRef>;

    /// Header cells of the cell's column.
    fn column_header_cells(&self) -> Vec<NodeRef>;

    /// The containing table.
    fn table(&self) -> Option<NodeRef>;

    /// All extents at once.
    fn row_column_extents(&self) -> CellExtents {
        CellExtents {
            row: self.row_index(),
            column: self.column_index(),
            row_extent: self.row_extent(),
            column_extent: self.column_extent(),
            selected: self.is_selected(),
        }
    }
}

/// A value within a range.
pub trait ValueFacet: Send + Sync {
    /// Current value.
    fn current_value(&self) -> Variant;

    /// Set the current value.
    fn set_current_value(&self, value: Variant);

    /// Upper bound.
    fn maximum_value(&self) -> Variant;

    /// Lower bound.
    fn minimum_value(&self) -> Variant;
}

/// Named, invokable actions.
pub trait ActionFacet: Send + Sync {
    /// Action names in presentation order.
    fn action_names(&self) -> Vec<String>;

    /// Perform the named action.
    fn do_action(&self, name: &str);

    /// Localized name of an action.
    fn localized_action_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Localized description of an action.
    fn localized_action_description(&self, name: &str) -> String;

    /// Key bindings that trigger an action.
    fn key_bindings_for_action(&self, name: &str) -> Vec<String>;
}
