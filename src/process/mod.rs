use procfs::{
    process::Process as ProcfsProcess,
    ProcError,
};

mod state;

pub use state::{ProcState, UNKNOWN_STATE};

/// Longest process name kept in a snapshot, in bytes.
pub const NAME_LEN: usize = 16;

/// One row of a process table snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub ppid: u32,
    /// Raw lifecycle code as reported; see [`ProcState`].
    pub state: u8,
    /// Memory footprint in bytes.
    pub size: u64,
    pub name: String,
}

impl ProcessEntry {
    pub fn new(pid: u32, ppid: u32, state: u8, size: u64, name: &str) -> Self {
        ProcessEntry {
            pid,
            ppid,
            state,
            size,
            name: short_name(name),
        }
    }
}

// Names are printed as a single column, so whitespace is folded and the
// result is cut to NAME_LEN bytes without splitting a character.
fn short_name(name: &str) -> String {
    let mut short = String::with_capacity(NAME_LEN);
    for c in name.chars() {
        let c = if c.is_whitespace() { '_' } else { c };
        if short.len() + c.len_utf8() > NAME_LEN {
            break;
        }
        short.push(c);
    }
    short
}

// Conversion from a live /proc entry

impl TryFrom<&ProcfsProcess> for ProcessEntry {
    type Error = ProcError;

    fn try_from(procfs_proc: &ProcfsProcess) -> Result<Self, Self::Error> {
        let stat = procfs_proc.stat()?;
        let state = ProcState::from_linux(stat.state).map_or(UNKNOWN_STATE, ProcState::code);

        Ok(ProcessEntry::new(
            stat.pid as u32,
            stat.ppid as u32,
            state,
            stat.vsize,
            &stat.comm,
        ))
    }
}
