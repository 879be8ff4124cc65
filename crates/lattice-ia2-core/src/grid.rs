//! A table facet over a rectangular grid of tree nodes.
//!
//! [`GridBuilder::install`] creates one child node per cell under a table
//! node and installs [`TableFacet`] on the table and [`TableCellFacet`] on
//! every cell. Selection is by whole rows and columns; a cell is selected
//! when its row or its column is.

use std::collections::BTreeSet;
use std::sync::Arc;

use accesskit::Role;
use parking_lot::Mutex;

use crate::error::{TreeError, TreeResult};
use crate::geometry::{Rect, Size};
use crate::logging::targets;
use crate::node::{Capability, NodeRef, TableCellFacet, TableFacet};
use crate::tree::{AccessibleTree, NodeKey, NodeSpec, WeakTree};

/// Builds a grid under an existing table node.
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    rows: usize,
    columns: usize,
    cell_size: Size,
    header_row: bool,
    header_column: bool,
    caption: Option<NodeKey>,
    summary: Option<NodeKey>,
    column_descriptions: Vec<String>,
    row_descriptions: Vec<String>,
}

impl GridBuilder {
    /// A grid of `rows` × `columns` plain cells.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    /// Lay cells out with this size from the table's top-left corner.
    pub fn cell_size(mut self, size: Size) -> Self {
        self.cell_size = size;
        self
    }

    /// Treat row 0 as column headers.
    pub fn header_row(mut self) -> Self {
        self.header_row = true;
        self
    }

    /// Treat column 0 as row headers.
    pub fn header_column(mut self) -> Self {
        self.header_column = true;
        self
    }

    /// Node reported as the table caption.
    pub fn caption(mut self, key: NodeKey) -> Self {
        self.caption = Some(key);
        self
    }

    /// Node reported as the table summary.
    pub fn summary(mut self, key: NodeKey) -> Self {
        self.summary = Some(key);
        self
    }

    /// Column descriptions, by column index.
    pub fn column_descriptions<S: Into<String>>(mut self, descriptions: impl IntoIterator<Item = S>) -> Self {
        self.column_descriptions = descriptions.into_iter().map(Into::into).collect();
        self
    }

    /// Row descriptions, by row index.
    pub fn row_descriptions<S: Into<String>>(mut self, descriptions: impl IntoIterator<Item = S>) -> Self {
        self.row_descriptions = descriptions.into_iter().map(Into::into).collect();
        self
    }

    /// Create the cell nodes under `table` and install the facets.
    pub fn install(self, tree: &AccessibleTree, table: NodeKey) -> TreeResult<Grid> {
        let origin = tree.handle(table)?.rect().top_left();

        let mut cells = Vec::with_capacity(self.rows * self.columns);
        for row in 0..self.rows {
            for column in 0..self.columns {
                let role = if self.header_row && row == 0 {
                    Role::ColumnHeader
                } else if self.header_column && column == 0 {
                    Role::RowHeader
                } else {
                    Role::Cell
                };
                let rect = Rect::new(
                    origin.x + column as i32 * self.cell_size.width,
                    origin.y + row as i32 * self.cell_size.height,
                    self.cell_size.width,
                    self.cell_size.height,
                );
                cells.push(tree.add_node(Some(table), NodeSpec::new(role).rect(rect))?);
            }
        }

        let state = Arc::new(GridState {
            table,
            rows: self.rows,
            columns: self.columns,
            cells,
            header_row: self.header_row,
            header_column: self.header_column,
            caption: self.caption,
            summary: self.summary,
            column_descriptions: self.column_descriptions,
            row_descriptions: self.row_descriptions,
            selected_rows: Mutex::new(BTreeSet::new()),
            selected_columns: Mutex::new(BTreeSet::new()),
        });

        let weak = tree.downgrade();
        tree.set_capability(
            table,
            Capability::Table(Arc::new(GridTable {
                tree: weak.clone(),
                state: state.clone(),
            })),
        )?;
        for row in 0..state.rows {
            for column in 0..state.columns {
                let key = state.cells[row * state.columns + column];
                tree.set_capability(
                    key,
                    Capability::TableCell(Arc::new(GridCell {
                        tree: weak.clone(),
                        state: state.clone(),
                        row: row as i32,
                        column: column as i32,
                    })),
                )?;
            }
        }
        tracing::debug!(
            target: targets::GRID,
            ?table,
            rows = state.rows,
            columns = state.columns,
            "installed grid"
        );
        Ok(Grid { state })
    }
}

struct GridState {
    table: NodeKey,
    rows: usize,
    columns: usize,
    cells: Vec<NodeKey>,
    header_row: bool,
    header_column: bool,
    caption: Option<NodeKey>,
    summary: Option<NodeKey>,
    column_descriptions: Vec<String>,
    row_descriptions: Vec<String>,
    selected_rows: Mutex<BTreeSet<i32>>,
    selected_columns: Mutex<BTreeSet<i32>>,
}

impl GridState {
    fn cell(&self, row: i32, column: i32) -> Option<NodeKey> {
        let row = usize::try_from(row).ok().filter(|&r| r < self.rows)?;
        let column = usize::try_from(column).ok().filter(|&c| c < self.columns)?;
        self.cells.get(row * self.columns + column).copied()
    }

    fn is_selected(&self, row: i32, column: i32) -> bool {
        self.selected_rows.lock().contains(&row) || self.selected_columns.lock().contains(&column)
    }

    fn selected_positions(&self) -> Vec<(i32, i32)> {
        let mut positions = Vec::new();
        for row in 0..self.rows as i32 {
            for column in 0..self.columns as i32 {
                if self.is_selected(row, column) {
                    positions.push((row, column));
                }
            }
        }
        positions
    }

    fn handle(&self, tree: &WeakTree, key: Option<NodeKey>) -> Option<NodeRef> {
        tree.upgrade()?.handle(key?).ok()
    }
}

/// Handle to an installed grid.
#[derive(Clone)]
pub struct Grid {
    state: Arc<GridState>,
}

impl Grid {
    /// The table node.
    pub fn table(&self) -> NodeKey {
        self.state.table
    }

    /// The node of the cell at `(row, column)`.
    pub fn cell(&self, row: usize, column: usize) -> TreeResult<NodeKey> {
        if row >= self.state.rows || column >= self.state.columns {
            return Err(TreeError::InvalidNode);
        }
        Ok(self.state.cells[row * self.state.columns + column])
    }

    /// Select a row directly, as a user would.
    pub fn select_row(&self, row: usize) {
        self.state.selected_rows.lock().insert(row as i32);
    }

    /// Select a column directly, as a user would.
    pub fn select_column(&self, column: usize) {
        self.state.selected_columns.lock().insert(column as i32);
    }
}

struct GridTable {
    tree: WeakTree,
    state: Arc<GridState>,
}

impl GridTable {
    fn valid_row(&self, row: i32) -> bool {
        (0..self.state.rows as i32).contains(&row)
    }

    fn valid_column(&self, column: i32) -> bool {
        (0..self.state.columns as i32).contains(&column)
    }
}

impl TableFacet for GridTable {
    fn row_count(&self) -> usize {
        self.state.rows
    }

    fn column_count(&self) -> usize {
        self.state.columns
    }

    fn cell_at(&self, row: i32, column: i32) -> Option<NodeRef> {
        self.state.handle(&self.tree, self.state.cell(row, column))
    }

    fn caption(&self) -> Option<NodeRef> {
        self.state.handle(&self.tree, self.state.caption)
    }

    fn summary(&self) -> Option<NodeRef> {
        self.state.handle(&self.tree, self.state.summary)
    }

    fn column_description(&self, column: i32) -> String {
        usize::try_from(column)
            .ok()
            .and_then(|c| self.state.column_descriptions.get(c).cloned())
            .unwrap_or_default()
    }

    fn row_description(&self, row: i32) -> String {
        usize::try_from(row)
            .ok()
            .and_then(|r| self.state.row_descriptions.get(r).cloned())
            .unwrap_or_default()
    }

    fn selected_cell_count(&self) -> usize {
        self.state.selected_positions().len()
    }

    fn selected_column_count(&self) -> usize {
        self.state.selected_columns.lock().len()
    }

    fn selected_row_count(&self) -> usize {
        self.state.selected_rows.lock().len()
    }

    fn selected_cells(&self) -> Vec<NodeRef> {
        self.state
            .selected_positions()
            .into_iter()
            .filter_map(|(row, column)| self.cell_at(row, column))
            .collect()
    }

    fn selected_columns(&self) -> Vec<i32> {
        self.state.selected_columns.lock().iter().copied().collect()
    }

    fn selected_rows(&self) -> Vec<i32> {
        self.state.selected_rows.lock().iter().copied().collect()
    }

    fn is_column_selected(&self, column: i32) -> bool {
        self.state.selected_columns.lock().contains(&column)
    }

    fn is_row_selected(&self, row: i32) -> bool {
        self.state.selected_rows.lock().contains(&row)
    }

    fn select_row(&self, row: i32) -> bool {
        self.valid_row(row) && {
            self.state.selected_rows.lock().insert(row);
            true
        }
    }

    fn select_column(&self, column: i32) -> bool {
        self.valid_column(column) && {
            self.state.selected_columns.lock().insert(column);
            true
        }
    }

    fn unselect_row(&self, row: i32) -> bool {
        self.valid_row(row) && {
            self.state.selected_rows.lock().remove(&row);
            true
        }
    }

    fn unselect_column(&self, column: i32) -> bool {
        self.valid_column(column) && {
            self.state.selected_columns.lock().remove(&column);
            true
        }
    }
}

struct GridCell {
    tree: WeakTree,
    state: Arc<GridState>,
    row: i32,
    column: i32,
}

impl TableCellFacet for GridCell {
    fn row_index(&self) -> i32 {
        self.row
    }

    fn column_index(&self) -> i32 {
        self.column
    }

    fn row_extent(&self) -> i32 {
        1
    }

    fn column_extent(&self) -> i32 {
        1
    }

    fn is_selected(&self) -> bool {
        self.state.is_selected(self.row, self.column)
    }

    fn row_header_cells(&self) -> Vec<NodeRef> {
        if !self.state.header_column || self.column == 0 {
            return Vec::new();
        }
        self.state
            .handle(&self.tree, self.state.cell(self.row, 0))
            .into_iter()
            .collect()
    }

    fn column_header_cells(&self) -> Vec<NodeRef> {
        if !self.state.header_row || self.row == 0 {
            return Vec::new();
        }
        self.state
            .handle(&self.tree, self.state.cell(0, self.column))
            .into_iter()
            .collect()
    }

    fn table(&self) -> Option<NodeRef> {
        self.state.handle(&self.tree, Some(self.state.table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::AccessibleNode;

    fn grid() -> (AccessibleTree, Grid) {
        let tree = AccessibleTree::new();
        let table = tree
            .add_node(None, NodeSpec::new(Role::Table).rect(Rect::new(100, 100, 300, 90)))
            .unwrap();
        let grid = GridBuilder::new(3, 3)
            .cell_size(Size::new(100, 30))
            .header_row()
            .column_descriptions(["Name", "Size", "Kind"])
            .install(&tree, table)
            .unwrap();
        (tree, grid)
    }

    #[test]
    fn test_cells_are_laid_out() {
        let (tree, grid) = grid();
        let cell = tree.handle(grid.cell(2, 1).unwrap()).unwrap();
        assert_eq!(cell.rect(), Rect::new(200, 160, 100, 30));
        assert_eq!(cell.role(), Role::Cell);
        assert_eq!(tree.handle(grid.cell(0, 1).unwrap()).unwrap().role(), Role::ColumnHeader);
        assert_eq!(tree.children(grid.table()).unwrap().len(), 9);
    }

    #[test]
    fn test_row_and_column_selection() {
        let (tree, grid) = grid();
        let table = tree.handle(grid.table()).unwrap().table().unwrap();
        assert!(table.select_row(1));
        assert!(table.select_column(2));
        assert!(!table.select_row(7));

        assert_eq!(table.selected_rows(), vec![1]);
        assert_eq!(table.selected_columns(), vec![2]);
        // Row 1 (3 cells) plus column 2 in rows 0 and 2.
        assert_eq!(table.selected_cell_count(), 5);

        let cell = tree.handle(grid.cell(0, 2).unwrap()).unwrap().table_cell().unwrap();
        assert!(cell.is_selected());
        assert!(table.unselect_column(2));
        assert!(!cell.is_selected());
    }

    #[test]
    fn test_headers_and_descriptions() {
        let (tree, grid) = grid();
        let cell = tree.handle(grid.cell(2, 1).unwrap()).unwrap().table_cell().unwrap();
        let headers = cell.column_header_cells();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].role(), Role::ColumnHeader);
        assert!(cell.row_header_cells().is_empty());
        assert_eq!(cell.table().unwrap().role(), Role::Table);

        let table = tree.handle(grid.table()).unwrap().table().unwrap();
        assert_eq!(table.column_description(1), "Size");
        assert_eq!(table.row_description(1), "");
        assert!(table.cell_at(3, 0).is_none());
    }
}
