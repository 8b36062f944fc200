use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuratorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("カタログファイルが見つかりません: {0}")]
    CatalogNotFound(String),

    #[error("カタログが空です: {0}")]
    EmptyCatalog(String),

    #[error("カタログの形式が不正: {0}")]
    InvalidCatalog(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("フォルダが見つかりません: {0}")]
    DirectoryNotFound(String),

    #[error("画像読み込みエラー: {path}: {reason}")]
    ImageRead { path: String, reason: String },

    #[error("行番号が範囲外です: {index} (全{count}行)")]
    RowOutOfRange { index: usize, count: usize },

    #[error("識別子がカタログにありません: {0}")]
    UnknownIdentifier(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] image_curator_common::Error),
}

impl CuratorError {
    /// セッションを続行できない設定系のエラーか
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CuratorError::Config(_)
                | CuratorError::CatalogNotFound(_)
                | CuratorError::EmptyCatalog(_)
                | CuratorError::InvalidCatalog(_)
                | CuratorError::Spreadsheet(_)
                | CuratorError::DirectoryNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CuratorError>;
