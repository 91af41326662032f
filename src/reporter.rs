use std::ffi::OsString;
use std::io::Write;

use tracing::debug;

use crate::cli;
use crate::error::{FetchError, ReportError};
use crate::process::{ProcState, ProcessEntry};

pub mod monitoring;
pub mod table;

pub use monitoring::ProcfsTable;
pub use table::ProcessTable;

/// Prints one snapshot of a process table.
#[derive(Debug)]
pub struct Reporter<T> {
    table: T,
    capacity: Option<usize>,
}

impl<T: ProcessTable> Reporter<T> {
    /// `capacity` overrides the buffer size the table asks for.
    pub fn new(table: T, capacity: Option<usize>) -> Self {
        Reporter { table, capacity }
    }

    /// Validates `args`, fetches a snapshot and writes one row per process to
    /// `out`. Returns the number of rows written.
    ///
    /// On a usage error the usage line is written to `out` and the table is
    /// never queried. Any other error leaves `out` untouched.
    pub fn run<I, A, W>(&mut self, args: I, out: &mut W) -> Result<usize, ReportError>
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString> + Clone,
        W: Write,
    {
        if let Err(err) = cli::parse(args) {
            writeln!(out, "{}", cli::usage())?;
            out.flush()?;
            return Err(err);
        }

        let capacity = match self.capacity {
            Some(capacity) => capacity,
            None => self.table.capacity()?,
        };
        let mut buffer = vec![ProcessEntry::default(); capacity].into_boxed_slice();
        let count = self.table.fetch(&mut buffer)?;
        if count > buffer.len() {
            return Err(FetchError::Overrun {
                count,
                capacity: buffer.len(),
            }
            .into());
        }
        debug!(count, capacity = buffer.len(), "snapshot fetched");

        // Every row is checked before the first one is printed.
        let rows = buffer[..count]
            .iter()
            .map(format_row)
            .collect::<Result<Vec<_>, _>>()?;

        for row in &rows {
            writeln!(out, "{}", row)?;
        }
        out.flush()?;

        Ok(rows.len())
    }
}

/// Renders `pid ppid state size name`.
pub fn format_row(entry: &ProcessEntry) -> Result<String, ReportError> {
    let state = ProcState::try_from(entry.state).map_err(|code| ReportError::InvalidState {
        pid: entry.pid,
        code,
    })?;

    Ok(format!(
        "{} {} {} {} {}",
        entry.pid, entry.ppid, state, entry.size, entry.name
    ))
}
