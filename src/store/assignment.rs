use crate::matcher::ImageRef;

/// 画像ごとの優先度（1が最優先、0は未選択）
///
/// 追加順を保持する。同じ優先度が並んだときはこの順で順位が決まる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityAssignment {
    entries: Vec<(ImageRef, u32)>,
}

impl PriorityAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// 優先度を設定。0なら選択解除。既存の画像は元の位置のまま値だけ更新
    pub fn set(&mut self, image: ImageRef, priority: u32) {
        let existing = self.entries.iter().position(|(i, _)| *i == image);
        match (existing, priority) {
            (Some(idx), 0) => {
                self.entries.remove(idx);
            }
            (Some(idx), p) => self.entries[idx].1 = p,
            (None, 0) => {}
            (None, p) => self.entries.push((image, p)),
        }
    }

    pub fn get(&self, image: &ImageRef) -> Option<u32> {
        self.entries
            .iter()
            .find(|(i, _)| i == image)
            .map(|(_, p)| *p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ImageRef, u32)> {
        self.entries.iter()
    }

    /// 優先度の昇順に並べた画像（安定ソート）
    pub fn ranked(&self) -> Vec<&ImageRef> {
        let mut sorted: Vec<&(ImageRef, u32)> = self.entries.iter().collect();
        sorted.sort_by_key(|(_, priority)| *priority);
        sorted.into_iter().map(|(image, _)| image).collect()
    }
}

impl FromIterator<(ImageRef, u32)> for PriorityAssignment {
    fn from_iter<T: IntoIterator<Item = (ImageRef, u32)>>(iter: T) -> Self {
        let mut assignment = Self::new();
        for (image, priority) in iter {
            assignment.set(image, priority);
        }
        assignment
    }
}
