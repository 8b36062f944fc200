//! 選択画像の保存
//!
//! 出力フォルダに `{identifier}-{rank}{.ext}` 形式でコピーする。
//! 保存は常に全置換: 先に既存ファイルを消してから新しい順位で書き込む。
//! 削除と書き込みの間でプロセスが落ちると一部だけ残ることがある。

mod assignment;

pub use assignment::PriorityAssignment;

use crate::error::Result;
use crate::matcher::ImageRef;
use image_curator_common::{parse_rank, selection_file_name, selection_prefix};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// 保存済みの選択画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedImage {
    /// ファイル名から読んだ順位（読めなければ0）
    pub rank: u32,
    pub image: ImageRef,
}

#[derive(Debug, Clone)]
pub struct SelectionStore {
    output_dir: PathBuf,
}

impl SelectionStore {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 選択を保存し、書き込んだ枚数を返す
    ///
    /// 空の選択でも既存ファイルは削除される。
    pub fn save(&self, identifier: &str, assignment: &PriorityAssignment) -> Result<usize> {
        std::fs::create_dir_all(&self.output_dir)?;

        let removed = self.clear(identifier)?;
        if assignment.is_empty() {
            info!(identifier, removed, "selection cleared, nothing to write");
            return Ok(0);
        }

        let ranked = assignment.ranked();
        for (idx, image) in ranked.iter().enumerate() {
            let dest = self
                .output_dir
                .join(selection_file_name(identifier, idx + 1, &image.extension()));
            std::fs::copy(&image.path, &dest)?;
            debug!(from = %image.path.display(), to = %dest.display(), "copied");
        }

        info!(identifier, removed, written = ranked.len(), "selection saved");
        Ok(ranked.len())
    }

    /// 識別子の保存ファイルをすべて削除し、削除した数を返す
    pub fn clear(&self, identifier: &str) -> Result<usize> {
        let mut removed = 0;
        for path in self.persisted_files(identifier)? {
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(removed)
    }

    /// 保存済みの選択を順位の昇順で返す（出力フォルダが無ければ空）
    pub fn list_existing(&self, identifier: &str) -> Result<Vec<PersistedImage>> {
        let mut persisted: Vec<PersistedImage> = self
            .persisted_files(identifier)?
            .iter()
            .map(|path| {
                let image = ImageRef::from_path(path);
                let rank = parse_rank(identifier, &image.stem()).unwrap_or(0);
                PersistedImage { rank, image }
            })
            .collect();

        persisted.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then_with(|| a.image.file_name.cmp(&b.image.file_name))
        });
        Ok(persisted)
    }

    /// 読めないエントリがあればエラー（消し残しを見逃さないため）
    fn persisted_files(&self, identifier: &str) -> Result<Vec<PathBuf>> {
        if !self.output_dir.is_dir() {
            return Ok(Vec::new());
        }

        let prefix = selection_prefix(identifier);
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.output_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.path().is_file() && entry.file_name().to_string_lossy().starts_with(&prefix) {
                files.push(entry.path().to_path_buf());
            }
        }
        Ok(files)
    }
}
