use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataIoError {
    #[error("End of data: needed {needed} more byte(s), {available} available")]
    EndOfData { needed: usize, available: usize },
    #[error("Pointer checksum broken: {0:#x}")]
    PointerChecksumBroken(u64),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Data corruption: {0}")]
    DataCorruption(String),
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl DataIoError {
    pub fn end_of_data(needed: usize, available: usize) -> Self {
        DataIoError::EndOfData { needed, available }
    }

    pub fn is_end_of_data(&self) -> bool {
        matches!(self, DataIoError::EndOfData { .. })
    }
}

// A short read from a stream is the same condition as running off a buffer.
impl From<io::Error> for DataIoError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            DataIoError::EndOfData {
                needed: 1,
                available: 0,
            }
        } else {
            DataIoError::Io(err)
        }
    }
}

impl From<DataIoError> for String {
    fn from(error: DataIoError) -> Self {
        error.to_string()
    }
}

pub type Result<T> = std::result::Result<T, DataIoError>;
