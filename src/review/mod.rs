//! レビューセッション
//!
//! 操作 → 状態変更 → 行・候補・保存済みの再取得 → 表示、を明示的なループで回す。
//! 端末UIは `prompt` モジュール、ここは表示に依存しない部分。

pub mod prompt;

use crate::catalog::Catalog;
use crate::error::{CuratorError, Result};
use crate::matcher::{probe, Dimensions, ImageMatcher, ImageRef};
use crate::store::{PersistedImage, PriorityAssignment, SelectionStore};
use image_curator_common::{CatalogRow, Navigator, Step};
use tracing::warn;

/// 寸法を読めた候補画像
#[derive(Debug, Clone)]
pub struct Candidate {
    pub image: ImageRef,
    pub dimensions: Dimensions,
}

/// 現在行の表示用データ
#[derive(Debug, Clone)]
pub struct RowView {
    pub index: usize,
    pub row_count: usize,
    pub row: CatalogRow,
    pub candidates: Vec<Candidate>,
    /// 読めなかった画像と理由（優先度入力の対象外）
    pub unreadable: Vec<(ImageRef, String)>,
    pub persisted: Vec<PersistedImage>,
}

impl RowView {
    /// 候補が1枚も見つからなかった
    pub fn has_no_images(&self) -> bool {
        self.candidates.is_empty() && self.unreadable.is_empty()
    }
}

/// オペレーター操作
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Goto(usize),
    Previous,
    Next,
    Save(PriorityAssignment),
    Quit,
}

/// 操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Navigated(Step),
    /// 保存後に次の行へ進んだ結果を含む（`Step::AtEnd` なら全行完了）
    Saved {
        identifier: String,
        count: usize,
        step: Step,
    },
    Quit,
}

pub struct ReviewSession<'a> {
    catalog: &'a Catalog,
    matcher: ImageMatcher,
    store: SelectionStore,
    nav: Navigator,
}

impl<'a> ReviewSession<'a> {
    /// 入力フォルダの存在を確認してセッションを開始
    pub fn new(
        catalog: &'a Catalog,
        matcher: ImageMatcher,
        store: SelectionStore,
        start_row: usize,
    ) -> Result<Self> {
        matcher.check_directories()?;

        let mut nav = Navigator::new(catalog.len())
            .ok_or_else(|| CuratorError::EmptyCatalog(catalog.source().display().to_string()))?;
        nav.set(start_row);

        Ok(Self {
            catalog,
            matcher,
            store,
            nav,
        })
    }

    pub fn index(&self) -> usize {
        self.nav.index()
    }

    pub fn current_row(&self) -> Result<&'a CatalogRow> {
        self.catalog.get(self.nav.index())
    }

    /// 現在行の候補と保存済みを取り直す
    pub fn view(&self) -> Result<RowView> {
        let row = self.current_row()?;
        let images = self.matcher.find(&row.identifier, &row.secondary_code)?;

        let mut candidates = Vec::with_capacity(images.len());
        let mut unreadable = Vec::new();
        for image in images {
            match probe(&image) {
                Ok(dimensions) => candidates.push(Candidate { image, dimensions }),
                Err(e) => {
                    warn!(file = %image.path.display(), error = %e, "skipping unreadable image");
                    unreadable.push((image, e.to_string()));
                }
            }
        }

        let persisted = self.store.list_existing(&row.identifier)?;

        Ok(RowView {
            index: self.nav.index(),
            row_count: self.nav.row_count(),
            row: row.clone(),
            candidates,
            unreadable,
            persisted,
        })
    }

    pub fn apply(&mut self, action: Action) -> Result<Outcome> {
        let outcome = match action {
            Action::Goto(index) => Outcome::Navigated(Step::Moved(self.nav.set(index))),
            Action::Previous => Outcome::Navigated(self.nav.retreat()),
            Action::Next => Outcome::Navigated(self.nav.advance()),
            Action::Save(assignment) => {
                let identifier = self.current_row()?.identifier.clone();
                let count = self.store.save(&identifier, &assignment)?;
                let step = self.nav.advance();
                Outcome::Saved {
                    identifier,
                    count,
                    step,
                }
            }
            Action::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }
}
