//! カタログ行の型定義

use serde::{Deserialize, Serialize};

/// カタログ上の列名
pub const COLUMN_IDENTIFIER: &str = "amp";
pub const COLUMN_SUPPLIER_CODE: &str = "supplier_product_code";
pub const COLUMN_TITLE: &str = "title";

/// カタログの1行（読み込み後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRow {
    /// 主キー（amp）。ファイル名の接頭辞と保存名の基点
    pub identifier: String,
    /// 仕入先コードの先頭セグメント
    pub secondary_code: String,
    pub title: String,
}

impl CatalogRow {
    /// 生の列値から行を組み立てる
    pub fn from_raw(identifier: &str, supplier_code: &str, title: &str) -> Self {
        Self {
            identifier: identifier.trim().to_string(),
            secondary_code: derive_secondary_code(supplier_code),
            title: title.trim().to_string(),
        }
    }
}

/// `supplier_product_code` を `_` で区切った先頭を返す
pub fn derive_secondary_code(raw: &str) -> String {
    raw.trim()
        .split('_')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
