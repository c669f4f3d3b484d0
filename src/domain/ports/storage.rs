use core::fmt;

/// Error type for the configuration store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// No record stored under the path
    NotFound,
    /// Record does not fit the destination buffer
    BufferTooSmall,
    /// Path does not fit the storage layout
    PathTooLong,
    /// No free slot left for a new record
    Full,
    /// Underlying device reported an error
    DriverError,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound => write!(f, "record not found"),
            StorageError::BufferTooSmall => write!(f, "buffer too small"),
            StorageError::PathTooLong => write!(f, "path too long"),
            StorageError::Full => write!(f, "storage full"),
            StorageError::DriverError => write!(f, "storage driver error"),
        }
    }
}

/// Path-keyed record store holding actor configuration.
pub trait ConfigStorage {
    /// Check if a record exists at `path`
    fn exists(&mut self, path: &str) -> bool;

    /// Read the record at `path` into `buffer`, returning its length
    fn read(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Replace the record at `path`
    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError>;
}

impl<T: ConfigStorage + ?Sized> ConfigStorage for &mut T {
    fn exists(&mut self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn read(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        (**self).read(path, buffer)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        (**self).write(path, data)
    }
}
