use serde::{Deserialize, Serialize};
use std::fmt;

/// 変更件数（staged / unstaged それぞれに1つ）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    /// 新規ファイル数
    pub new: usize,
    /// 変更ファイル数（リネームを含む）
    pub modified: usize,
    /// 削除ファイル数
    pub deleted: usize,
}

impl ChangeCounts {
    /// 新しいChangeCountsを作成
    pub fn new(new: usize, modified: usize, deleted: usize) -> Self {
        Self {
            new,
            modified,
            deleted,
        }
    }

    /// 全て0かチェック
    pub fn is_empty(&self) -> bool {
        self.new == 0 && self.modified == 0 && self.deleted == 0
    }

    /// 表示用の要約文字列（`+new ~modified -deleted`、空なら""）
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChangeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "+{} ~{} -{}", self.new, self.modified, self.deleted)
    }
}
