//! 保存ファイル名の規約
//!
//! 選択済み画像は `{identifier}-{rank}{.ext}` で保存される。
//! 名前の組み立てと順位の読み取りはここに閉じ込め、呼び出し側は形式を知らない。

/// 識別子に属する保存ファイルの接頭辞
pub fn selection_prefix(identifier: &str) -> String {
    format!("{}-", identifier)
}

/// 保存ファイル名を組み立てる（`extension` はドットなし、大文字小文字はそのまま）
pub fn selection_file_name(identifier: &str, rank: usize, extension: &str) -> String {
    if extension.is_empty() {
        format!("{}-{}", identifier, rank)
    } else {
        format!("{}-{}.{}", identifier, rank, extension)
    }
}

/// ファイル名の語幹から順位を読み取る
///
/// `{identifier}-` に続く部分が数字でなければ `None`。
pub fn parse_rank(identifier: &str, stem: &str) -> Option<u32> {
    stem.strip_prefix(&selection_prefix(identifier))?
        .parse()
        .ok()
}
