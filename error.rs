use std::fmt::Display;

/// Errors surfaced by [`crate::Btree`] operations.
///
/// Both variants are raised locally by the core insertion/lookup algorithm;
/// neither wraps a lower-layer error, so there are no `From` impls here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BtreeError {
    DuplicateKey,
    KeyNotFound,
}
impl Display for BtreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey => f.write_str("key already present in the tree"),
            Self::KeyNotFound => f.write_str("key not found in the tree"),
        }
    }
}
impl std::error::Error for BtreeError {}

pub type Result<T> = std::result::Result<T, BtreeError>;
