//! `IAccessibleTable2`.

use std::sync::Arc;

use lattice_ia2_core::{Facet, TableFacet};

use super::{AccessibleObject, AccessibleRef};
use crate::array::ClientArray;
use crate::status::{BridgeError, BridgeResult, Reply, narrow};

fn description(text: String) -> Reply<String> {
    if text.is_empty() { Reply::NoData } else { Reply::Data(text) }
}

fn refused(what: &str, index: i32) -> BridgeError {
    BridgeError::bad_argument(format!("{what} {index} refused"))
}

impl AccessibleObject {
    fn table_facet(&self, method: &'static str) -> BridgeResult<Arc<dyn TableFacet>> {
        self.facet(method, Facet::Table, |node| node.table())
    }

    /// The cell at `(row, column)`.
    pub fn cell_at(&self, row: i32, column: i32) -> BridgeResult<AccessibleRef> {
        let cell = self
            .table_facet("cellAt")?
            .cell_at(row, column)
            .ok_or_else(|| BridgeError::bad_argument(format!("no cell at ({row}, {column})")))?;
        self.context.wrap(cell)
    }

    /// The caption; `NoData` when there is none.
    pub fn caption(&self) -> BridgeResult<Reply<AccessibleRef>> {
        let caption = self.table_facet("caption")?.caption();
        self.wrap_optional(caption)
    }

    /// The summary; `NoData` when there is none.
    pub fn summary(&self) -> BridgeResult<Reply<AccessibleRef>> {
        let summary = self.table_facet("summary")?.summary();
        self.wrap_optional(summary)
    }

    /// Description of `column`; `NoData` when empty.
    pub fn column_description(&self, column: i32) -> BridgeResult<Reply<String>> {
        Ok(description(self.table_facet("columnDescription")?.column_description(column)))
    }

    /// Description of `row`; `NoData` when empty.
    pub fn row_description(&self, row: i32) -> BridgeResult<Reply<String>> {
        Ok(description(self.table_facet("rowDescription")?.row_description(row)))
    }

    /// Number of columns.
    pub fn n_columns(&self) -> BridgeResult<i32> {
        Ok(narrow(self.table_facet("nColumns")?.column_count()))
    }

    /// Number of rows.
    pub fn n_rows(&self) -> BridgeResult<i32> {
        Ok(narrow(self.table_facet("nRows")?.row_count()))
    }

    /// Number of selected cells.
    pub fn n_selected_cells(&self) -> BridgeResult<i32> {
        Ok(narrow(self.table_facet("nSelectedCells")?.selected_cell_count()))
    }

    /// Number of fully selected columns.
    pub fn n_selected_columns(&self) -> BridgeResult<i32> {
        Ok(narrow(self.table_facet("nSelectedColumns")?.selected_column_count()))
    }

    /// Number of fully selected rows.
    pub fn n_selected_rows(&self) -> BridgeResult<i32> {
        Ok(narrow(self.table_facet("nSelectedRows")?.selected_row_count()))
    }

    /// The selected cells, all wrapped or none.
    pub fn selected_cells(&self) -> BridgeResult<ClientArray<AccessibleRef>> {
        let cells = self.table_facet("selectedCells")?.selected_cells();
        self.context.wrap_all(cells)
    }

    /// Indices of the selected columns; the null array when none are.
    pub fn selected_columns(&self) -> BridgeResult<ClientArray<i32>> {
        Ok(ClientArray::from_vec(self.table_facet("selectedColumns")?.selected_columns()))
    }

    /// Indices of the selected rows; the null array when none are.
    pub fn selected_rows(&self) -> BridgeResult<ClientArray<i32>> {
        Ok(ClientArray::from_vec(self.table_facet("selectedRows")?.selected_rows()))
    }

    /// Whether every cell of `column` is selected.
    pub fn is_column_selected(&self, column: i32) -> BridgeResult<bool> {
        Ok(self.table_facet("isColumnSelected")?.is_column_selected(column))
    }

    /// Whether every cell of `row` is selected.
    pub fn is_row_selected(&self, row: i32) -> BridgeResult<bool> {
        Ok(self.table_facet("isRowSelected")?.is_row_selected(row))
    }

    /// Select `row`; `BadArgument` when the provider refuses.
    pub fn select_row(&self, row: i32) -> BridgeResult<()> {
        if self.table_facet("selectRow")?.select_row(row) { Ok(()) } else { Err(refused("row", row)) }
    }

    /// Select `column`; `BadArgument` when the provider refuses.
    pub fn select_column(&self, column: i32) -> BridgeResult<()> {
        if self.table_facet("selectColumn")?.select_column(column) {
            Ok(())
        } else {
            Err(refused("column", column))
        }
    }

    /// Clear the selection of `row`.
    pub fn unselect_row(&self, row: i32) -> BridgeResult<()> {
        if self.table_facet("unselectRow")?.unselect_row(row) { Ok(()) } else { Err(refused("row", row)) }
    }

    /// Clear the selection of `column`.
    pub fn unselect_column(&self, column: i32) -> BridgeResult<()> {
        if self.table_facet("unselectColumn")?.unselect_column(column) {
            Ok(())
        } else {
            Err(refused("column", column))
        }
    }

    /// Last model change. Changes are not tracked.
    pub fn model_change(&self) -> BridgeResult<()> {
        self.table_facet("modelChange")?;
        Err(BridgeError::NotImplemented("modelChange"))
    }
}
