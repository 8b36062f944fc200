//! 商品カタログ読み込みモジュール
//!
//! CSVまたはExcel/ODSから `amp` / `supplier_product_code` / `title` 列を読み、
//! プロセス中は一度だけ読み込んだものを使い回す。

mod spreadsheet;

use crate::error::{CuratorError, Result};
use image_curator_common::types::{COLUMN_IDENTIFIER, COLUMN_SUPPLIER_CODE, COLUMN_TITLE};
use image_curator_common::{parse_csv_str, CatalogRow, CsvTable};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// 読み込み済みカタログ
#[derive(Debug, Clone)]
pub struct Catalog {
    source: PathBuf,
    rows: Vec<CatalogRow>,
}

impl Catalog {
    /// ファイルから読み込み
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CuratorError::CatalogNotFound(path.display().to_string()));
        }

        let table = if is_spreadsheet(path) {
            spreadsheet::read_first_sheet(path)?
        } else {
            let content = std::fs::read_to_string(path)?;
            parse_csv_str(&content)?
        };

        let catalog = Self::from_table(table, path)?;
        debug!(source = %path.display(), rows = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// 表から行を組み立てる（識別子が空の行は除外）
    pub fn from_table(table: CsvTable, source: &Path) -> Result<Self> {
        if table.headers.is_empty() {
            return Err(CuratorError::EmptyCatalog(source.display().to_string()));
        }

        let column = |name: &str| {
            table
                .column(name)
                .map_err(|e| CuratorError::InvalidCatalog(format!("{}: {}", source.display(), e)))
        };
        let id_col = column(COLUMN_IDENTIFIER)?;
        let code_col = column(COLUMN_SUPPLIER_CODE)?;
        let title_col = column(COLUMN_TITLE)?;

        let mut rows = Vec::with_capacity(table.records.len());
        for (line, record) in table.records.iter().enumerate() {
            let row = CatalogRow::from_raw(
                &cell(record, id_col),
                &cell(record, code_col),
                &cell(record, title_col),
            );
            if row.identifier.is_empty() {
                warn!(record = line + 1, "skipping catalog record without identifier");
                continue;
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(CuratorError::EmptyCatalog(source.display().to_string()));
        }

        Ok(Self {
            source: source.to_path_buf(),
            rows,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&CatalogRow> {
        self.rows.get(index).ok_or(CuratorError::RowOutOfRange {
            index,
            count: self.rows.len(),
        })
    }

    /// 識別子から行番号と行を引く（最初の一致）
    pub fn find_by_identifier(&self, identifier: &str) -> Option<(usize, &CatalogRow)> {
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.identifier == identifier)
    }
}

fn cell(record: &[String], idx: usize) -> String {
    record.get(idx).cloned().unwrap_or_default()
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}
