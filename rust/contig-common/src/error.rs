use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    #[cold]
    pub fn memory_exhausted(bytes: usize) -> Error {
        Error(ErrorKind::MemoryExhausted { bytes }.into())
    }

    #[cold]
    pub fn capacity_overflow() -> Error {
        Error(ErrorKind::CapacityOverflow.into())
    }

    #[cold]
    pub fn dest_too_small(needed: usize, available: usize) -> Error {
        Error(ErrorKind::DestTooSmall { needed, available }.into())
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("memory allocation of {bytes} bytes failed")]
    MemoryExhausted { bytes: usize },

    #[error("requested capacity exceeds the addressable byte range")]
    CapacityOverflow,

    #[error("destination is too small: {needed} elements needed, {available} available")]
    DestTooSmall { needed: usize, available: usize },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
