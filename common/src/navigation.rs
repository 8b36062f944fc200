//! 行ナビゲーション
//!
//! レビュー中のカタログ行番号を保持する。範囲の保証はこの型自身が持ち、
//! 呼び出し側で丸める必要はない。プロセス終了で状態は失われる。

/// 移動結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// 指定の行へ移動した
    Moved(usize),
    /// 先頭行にいるため戻れない
    AtStart,
    /// 最終行にいるため進めない
    AtEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    index: usize,
    row_count: usize,
}

impl Navigator {
    /// 行数0では作れない
    pub fn new(row_count: usize) -> Option<Self> {
        (row_count > 0).then_some(Self { index: 0, row_count })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.row_count
    }

    /// 行を直接指定（範囲外は端に丸める）。実際の行番号を返す
    pub fn set(&mut self, index: usize) -> usize {
        self.index = index.min(self.row_count - 1);
        self.index
    }

    pub fn advance(&mut self) -> Step {
        if self.is_last() {
            return Step::AtEnd;
        }
        self.index += 1;
        Step::Moved(self.index)
    }

    pub fn retreat(&mut self) -> Step {
        if self.is_first() {
            return Step::AtStart;
        }
        self.index -= 1;
        Step::Moved(self.index)
    }
}
