use crate::common::error::GitfanError;

/// gitfan全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use gitfan::common::result::GitfanResult;
/// use gitfan::common::error::GitfanError;
///
/// fn example_function() -> GitfanResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> GitfanResult<()> {
///     Err(GitfanError::config_error("Something went wrong", None))
/// }
/// ```
pub type GitfanResult<T> = Result<T, GitfanError>;

/// OptionをGitfanResultに変換するためのヘルパー
pub trait OptionExt<T> {
    /// Noneの場合にConfigErrorを返す
    ///
    /// # Examples
    ///
    /// ```
    /// use gitfan::common::result::{GitfanResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: GitfanResult<String> = none_value.ok_or_config_error("not configured");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_config_error(self, message: impl Into<String>) -> GitfanResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_config_error(self, message: impl Into<String>) -> GitfanResult<T> {
        self.ok_or_else(|| GitfanError::config_error(message, None))
    }
}
