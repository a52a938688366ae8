use thiserror::Error;

/// Scratch memory for the DP rows or decoded codepoints could not be obtained.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("failed to allocate {bytes} bytes of scratch memory")]
pub struct AllocError {
    pub bytes: usize,
}

/// An operand of a UTF-8 entry point is not well-formed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid UTF-8 at byte offset {offset}")]
pub struct Utf8Error {
    pub offset: usize,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Alloc(#[from] AllocError),
    #[error(transparent)]
    Utf8(#[from] Utf8Error),
}

impl Error {
    /// The sentinel a distance entry point reports for this error.
    pub fn distance_sentinel(&self) -> crate::Cost {
        match self {
            Error::Alloc(_) => crate::ALLOC_FAILURE,
            Error::Utf8(_) => crate::INVALID_UTF8,
        }
    }
}
