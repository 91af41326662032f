use crate::error::FetchError;
use crate::process::ProcessEntry;

/// Process table size of a small fixed-table kernel.
pub const NPROC: usize = 64;

/// Source of process table snapshots, normally the kernel.
pub trait ProcessTable {
    /// Largest number of entries one snapshot can hold.
    fn capacity(&self) -> Result<usize, FetchError> {
        Ok(NPROC)
    }

    /// Copies the current process table into `buffer` and returns how many
    /// leading entries are valid. Implementations never write past
    /// `buffer.len()` and return at most that many.
    fn fetch(&mut self, buffer: &mut [ProcessEntry]) -> Result<usize, FetchError>;
}

impl<T: ProcessTable + ?Sized> ProcessTable for &mut T {
    fn capacity(&self) -> Result<usize, FetchError> {
        (**self).capacity()
    }

    fn fetch(&mut self, buffer: &mut [ProcessEntry]) -> Result<usize, FetchError> {
        (**self).fetch(buffer)
    }
}
