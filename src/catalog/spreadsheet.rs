use crate::error::{CuratorError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use image_curator_common::CsvTable;
use std::path::Path;

/// 先頭シートを表として読み込む（1行目がヘッダー）
pub fn read_first_sheet(path: &Path) -> Result<CsvTable> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| CuratorError::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CuratorError::EmptyCatalog(path.display().to_string()))?
        .map_err(|e| CuratorError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => return Ok(CsvTable::default()),
    };

    let records = rows
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|record| record.iter().any(|c| !c.is_empty()))
        .collect();

    Ok(CsvTable { headers, records })
}

/// セル値を文字列化（整数値の浮動小数は `.0` を付けない）
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String(" A1 ".into())), "A1");
        assert_eq!(cell_to_string(&Data::Float(100.0)), "100");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }
}
