//! Image Curator Common Library
//!
//! カタログ行・保存ファイル名・行ナビゲーションなど、
//! ファイルシステムに依存しない型とユーティリティ

pub mod types;
pub mod error;
pub mod parser;
pub mod naming;
pub mod navigation;

pub use types::{CatalogRow, derive_secondary_code};
pub use error::{Error, Result};
pub use parser::{parse_csv_line, parse_csv_str, CsvTable};
pub use naming::{parse_rank, selection_file_name, selection_prefix};
pub use navigation::{Navigator, Step};
