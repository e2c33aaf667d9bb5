use serde::{Deserialize, Serialize};

/// ステータステーブルの1行（全て表示用に切り詰め済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRow {
    pub name: String,
    pub branch: String,
    pub ref_label: String,
    pub staged: String,
    pub unstaged: String,
    pub location: String,
}

/// 収集中に発生したエラー
///
/// `index` は1始まりで、行のプレースホルダ `See Error: N` と対応する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub index: usize,
    pub message: String,
    pub detail: String,
}

/// 1回のステータス収集の結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub rows: Vec<StatusRow>,
    pub errors: Vec<ErrorEntry>,
    /// キャンセルにより一部のみ収集された場合true
    #[serde(default)]
    pub partial: bool,
}

impl StatusReport {
    /// エラーがあるかチェック
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// インデックスでエラーを検索
    pub fn error(&self, index: usize) -> Option<&ErrorEntry> {
        self.errors.iter().find(|e| e.index == index)
    }
}

/// 行に埋め込むエラー参照テキスト
pub fn error_placeholder(index: usize) -> String {
    format!("See Error: {}", index)
}
