//! 候補画像の検索
//!
//! 入力フォルダ直下を設定順に走査し、ファイル名が識別子または仕入先コードで
//! 始まる画像を集める。並びはフォルダ順＋ファイルシステムの列挙順のまま。

mod types;

pub use types::{Dimensions, ImageRef};

use crate::error::{CuratorError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Clone)]
pub struct ImageMatcher {
    input_dirs: Vec<PathBuf>,
}

impl ImageMatcher {
    pub fn new(input_dirs: Vec<PathBuf>) -> Self {
        Self { input_dirs }
    }

    pub fn input_dirs(&self) -> &[PathBuf] {
        &self.input_dirs
    }

    /// すべての入力フォルダが存在するか確認
    pub fn check_directories(&self) -> Result<()> {
        for dir in &self.input_dirs {
            if !dir.is_dir() {
                return Err(CuratorError::DirectoryNotFound(dir.display().to_string()));
            }
        }
        Ok(())
    }

    /// 識別子・仕入先コードに一致する画像を返す（一致なしは空のVec）
    pub fn find(&self, identifier: &str, secondary_code: &str) -> Result<Vec<ImageRef>> {
        let prefixes: Vec<String> = [identifier, secondary_code]
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        let mut images = Vec::new();

        for dir in &self.input_dirs {
            if !dir.is_dir() {
                return Err(CuratorError::DirectoryNotFound(dir.display().to_string()));
            }

            for entry in WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)  // 直下のみ
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                        continue;
                    }
                };
                let path = entry.path();
                if path.is_file() && matches_candidate(path, &prefixes) {
                    images.push(ImageRef::from_path(path));
                }
            }
        }

        debug!(identifier, secondary_code, found = images.len(), "image search finished");
        Ok(images)
    }
}

/// 対応する画像拡張子か（大文字小文字を区別しない）
pub fn is_image_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

fn matches_candidate(path: &Path, prefixes: &[String]) -> bool {
    let has_image_ext = path
        .extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false);
    if !has_image_ext {
        return false;
    }

    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_lowercase(),
        None => return false,
    };
    prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
}

/// 画像ヘッダーを読んで寸法を取得
///
/// 壊れた・読めない画像は `ImageRead` を返す。呼び出し側はその1枚だけ飛ばす。
pub fn probe(image: &ImageRef) -> Result<Dimensions> {
    image::image_dimensions(&image.path)
        .map(|(width, height)| Dimensions { width, height })
        .map_err(|e| CuratorError::ImageRead {
            path: image.path.display().to_string(),
            reason: e.to_string(),
        })
}
