//! 保存状況の集計

use crate::catalog::Catalog;
use crate::error::Result;
use crate::store::SelectionStore;
use indicatif::{ProgressBar, ProgressStyle};

/// 1行分の保存状況
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowStatus {
    pub index: usize,
    pub identifier: String,
    pub saved: usize,
}

#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    pub rows: Vec<RowStatus>,
}

impl StatusReport {
    /// 1枚以上保存済みの行数
    pub fn saved_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.saved > 0).count()
    }

    pub fn total_images(&self) -> usize {
        self.rows.iter().map(|r| r.saved).sum()
    }

    pub fn pending(&self) -> impl Iterator<Item = &RowStatus> {
        self.rows.iter().filter(|r| r.saved == 0)
    }
}

/// 端末用のプログレスバー
pub fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// カタログ全行について保存済み枚数を数える
pub fn summarize(catalog: &Catalog, store: &SelectionStore, bar: &ProgressBar) -> Result<StatusReport> {
    let mut rows = Vec::with_capacity(catalog.len());

    for (index, row) in catalog.rows().iter().enumerate() {
        bar.set_message(row.identifier.clone());
        let saved = store.list_existing(&row.identifier)?.len();
        rows.push(RowStatus {
            index,
            identifier: row.identifier.clone(),
            saved,
        });
        bar.inc(1);
    }

    bar.finish_and_clear();
    Ok(StatusReport { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_curator_common::CsvTable;
    use std::path::Path;
    use tempfile::tempdir;

    #[test]
    fn test_summarize() {
        let table = CsvTable {
            headers: vec!["amp".into(), "supplier_product_code".into(), "title".into()],
            records: vec![
                vec!["A1".into(), "S1".into(), "x".into()],
                vec!["A2".into(), "S2".into(), "y".into()],
                vec!["A3".into(), "S3".into(), "z".into()],
            ],
        };
        let catalog = Catalog::from_table(table, Path::new("mem.csv")).unwrap();

        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("A1-1.jpg"), b"1").unwrap();
        std::fs::write(dir.path().join("A1-2.jpg"), b"2").unwrap();
        std::fs::write(dir.path().join("A3-1.png"), b"3").unwrap();

        let store = SelectionStore::new(dir.path().to_path_buf());
        let report = summarize(&catalog, &store, &ProgressBar::hidden()).unwrap();

        assert_eq!(report.saved_rows(), 2);
        assert_eq!(report.total_images(), 3);
        let pending: Vec<_> = report.pending().map(|r| r.identifier.as_str()).collect();
        assert_eq!(pending, vec!["A2"]);
    }
}
