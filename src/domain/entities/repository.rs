use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// 登録済みリポジトリの記述子
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// 表示名（通常はディレクトリ名）
    pub name: String,

    /// ワーキングコピーの場所
    pub location: PathBuf,

    /// グルーピング用タグ（空文字列は未設定として扱う）
    #[serde(
        default,
        serialize_with = "serialize_tag",
        deserialize_with = "deserialize_tag"
    )]
    pub tag: Option<String>,
}

impl RepositoryDescriptor {
    /// 新しいRepositoryDescriptorを作成
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            tag: None,
        }
    }

    /// タグを設定（空文字列はNone）
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tag = if tag.is_empty() { None } else { Some(tag) };
        self
    }

    /// 場所のディレクトリ名から記述子を作成
    pub fn from_location(location: impl Into<PathBuf>) -> Self {
        let location = location.into();
        let name = Self::name_for(&location);
        Self::new(name, location)
    }

    /// タグを&strで取得
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn name_for(location: &Path) -> String {
        location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.display().to_string())
    }
}

fn serialize_tag<S: Serializer>(tag: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tag.as_deref().unwrap_or(""))
}

fn deserialize_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.filter(|t| !t.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_location_uses_directory_name() {
        let repo = RepositoryDescriptor::from_location("/home/dev/projects/edge");
        assert_eq!(repo.name, "edge");
        assert_eq!(repo.location, PathBuf::from("/home/dev/projects/edge"));
        assert!(repo.tag().is_none());
    }

    #[test]
    fn test_empty_tag_is_none() {
        let repo = RepositoryDescriptor::new("a", "/a").with_tag("");
        assert!(repo.tag.is_none());
        let repo = RepositoryDescriptor::new("a", "/a").with_tag("api");
        assert_eq!(repo.tag(), Some("api"));
    }

    #[test]
    fn test_json_round_trip_writes_empty_tag() {
        let repo = RepositoryDescriptor::new("edge", "/src/edge");
        let json = serde_json::to_string(&repo).unwrap();
        assert_eq!(json, r#"{"name":"edge","location":"/src/edge","tag":""}"#);

        let parsed: RepositoryDescriptor =
            serde_json::from_str(r#"{"name":"edge","location":"/src/edge"}"#).unwrap();
        assert_eq!(parsed, repo);

        let parsed: RepositoryDescriptor =
            serde_json::from_str(r#"{"name":"sdk","location":"/src/sdk","tag":"api"}"#).unwrap();
        assert_eq!(parsed.tag(), Some("api"));
    }
}
