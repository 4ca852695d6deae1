use thiserror::Error;

/// Problems with a configured item list
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("item #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate item name '{0}'")]
    DuplicateName(String),

    #[error("current item '{0}' is not in the item list")]
    UnknownCurrent(String),

    #[error("no items configured")]
    NoItems,
}
