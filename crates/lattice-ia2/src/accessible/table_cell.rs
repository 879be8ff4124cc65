//! `IAccessibleTableCell`.

use std::sync::Arc;

use lattice_ia2_core::{CellExtents, Facet, TableCellFacet};

use super::{AccessibleObject, AccessibleRef};
use crate::array::ClientArray;
use crate::status::{BridgeResult, Reply};

impl AccessibleObject {
    fn cell_facet(&self, method: &'static str) -> BridgeResult<Arc<dyn TableCellFacet>> {
        self.facet(method, Facet::TableCell, |node| node.table_cell())
    }

    /// Number of columns the cell spans.
    pub fn column_extent(&self) -> BridgeResult<i32> {
        Ok(self.cell_facet("columnExtent")?.column_extent())
    }

    /// Number of rows the cell spans.
    pub fn row_extent(&self) -> BridgeResult<i32> {
        Ok(self.cell_facet("rowExtent")?.row_extent())
    }

    /// 0-based column of the cell.
    pub fn column_index(&self) -> BridgeResult<i32> {
        Ok(self.cell_facet("columnIndex")?.column_index())
    }

    /// 0-based row of the cell.
    pub fn row_index(&self) -> BridgeResult<i32> {
        Ok(self.cell_facet("rowIndex")?.row_index())
    }

    /// Whether the cell is selected.
    pub fn is_selected(&self) -> BridgeResult<bool> {
        Ok(self.cell_facet("isSelected")?.is_selected())
    }

    /// Position, span and selection in one call.
    pub fn row_column_extents(&self) -> BridgeResult<CellExtents> {
        Ok(self.cell_facet("rowColumnExtents")?.row_column_extents())
    }

    /// Header cells of this cell's column.
    pub fn column_header_cells(&self) -> BridgeResult<ClientArray<AccessibleRef>> {
        let headers = self.cell_facet("columnHeaderCells")?.column_header_cells();
        self.context.wrap_all(headers)
    }

    /// Header cells of this cell's row.
    pub fn row_header_cells(&self) -> BridgeResult<ClientArray<AccessibleRef>> {
        let headers = self.cell_facet("rowHeaderCells")?.row_header_cells();
        self.context.wrap_all(headers)
    }

    /// The containing table.
    pub fn table(&self) -> BridgeResult<Reply<AccessibleRef>> {
        let table = self.cell_facet("table")?.table();
        self.wrap_optional(table)
    }
}
