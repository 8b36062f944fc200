use crate::error::{CuratorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 商品カタログ（CSV/XLSX）
    pub catalog_path: PathBuf,
    /// 候補画像を探すフォルダ（この順で走査）
    pub input_dirs: Vec<PathBuf>,
    /// 選択画像の保存先
    pub output_dir: PathBuf,
    /// 優先度の上限（0は未選択）
    pub max_priority: u32,
    /// 一覧表示の列数
    pub gallery_columns: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data.csv"),
            input_dirs: vec![
                PathBuf::from("crawled_images"),
                PathBuf::from("gandomi_images"),
            ],
            output_dir: PathBuf::from("selected_images"),
            max_priority: 30,
            gallery_columns: 3,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み（無ければデフォルト）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CuratorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("image-curator").join("config.json"))
    }

    /// コマンドライン指定で一時的に上書き
    pub fn with_overrides(
        mut self,
        catalog: Option<PathBuf>,
        inputs: Vec<PathBuf>,
        output: Option<PathBuf>,
    ) -> Self {
        if let Some(catalog) = catalog {
            self.catalog_path = catalog;
        }
        if !inputs.is_empty() {
            self.input_dirs = inputs;
        }
        if let Some(output) = output {
            self.output_dir = output;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_dirs.is_empty() {
            return Err(CuratorError::Config("input_dirs が空です".into()));
        }
        if self.max_priority == 0 {
            return Err(CuratorError::Config("max_priority は1以上にしてください".into()));
        }
        if self.gallery_columns == 0 {
            return Err(CuratorError::Config("gallery_columns は1以上にしてください".into()));
        }
        Ok(())
    }
}
