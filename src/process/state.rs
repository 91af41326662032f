use std::fmt;

/// Code written by a collaborator that could not classify a process.
/// It is deliberately outside the valid range so the reporter rejects it.
pub const UNKNOWN_STATE: u8 = u8::MAX;

/// Lifecycle state of a process, ordered by its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProcState {
    Unused = 0,
    Embryo = 1,
    Sleeping = 2,
    Runnable = 3,
    Running = 4,
    Zombie = 5,
}

impl ProcState {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcState::Unused => "UNUSED",
            ProcState::Embryo => "EMBRYO",
            ProcState::Sleeping => "SLEEPING",
            ProcState::Runnable => "RUNNABLE",
            ProcState::Running => "RUNNING",
            ProcState::Zombie => "ZOMBIE",
        }
    }

    /// Maps the single-character state from `/proc/[pid]/stat`.
    ///
    /// Blocked, idle, stopped and traced tasks all count as sleeping: none of
    /// them can be picked by the scheduler until something wakes them.
    pub fn from_linux(state: char) -> Option<Self> {
        match state {
            'R' => Some(ProcState::Running),
            'S' | 'D' | 'I' | 'T' | 't' | 'W' | 'P' | 'K' => Some(ProcState::Sleeping),
            'Z' | 'X' | 'x' => Some(ProcState::Zombie),
            _ => None,
        }
    }
}

impl TryFrom<u8> for ProcState {
    /// The rejected code.
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ProcState::Unused),
            1 => Ok(ProcState::Embryo),
            2 => Ok(ProcState::Sleeping),
            3 => Ok(ProcState::Runnable),
            4 => Ok(ProcState::Running),
            5 => Ok(ProcState::Zombie),
            other => Err(other),
        }
    }
}

impl fmt::Display for ProcState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
