pub mod change_counts;
pub mod tag_selector;

pub use change_counts::ChangeCounts;
pub use tag_selector::{split_tag_prefix, TagSelector, TagSelectorError};
