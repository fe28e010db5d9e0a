use crate::IdKind;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot dlopen(3) {filename}: {reason}")]
    LibraryNotFound { filename: String, reason: String },
    #[error("cannot dlsym(3) {0}")]
    SymbolNotFound(String),
    #[error("owner '{0}' contains a nul byte")]
    InvalidOwner(String),
    #[error("username {0} not supported")]
    UnsupportedOwner(String),
    #[error("cannot read {kind} ranges for {owner}")]
    NoRanges { kind: IdKind, owner: String },
}
