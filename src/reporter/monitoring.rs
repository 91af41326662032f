use std::path::PathBuf;

use procfs::ProcError;
use tracing::warn;

use crate::error::FetchError;
use crate::process::ProcessEntry;
use crate::reporter::table::ProcessTable;

/// Room for processes started between sizing the buffer and reading it.
pub const SPAWN_HEADROOM: usize = 64;

/// Process table backed by a procfs mount.
#[derive(Debug, Clone)]
pub struct ProcfsTable {
    root: PathBuf,
}

impl ProcfsTable {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProcfsTable { root: root.into() }
    }
}

impl ProcessTable for ProcfsTable {
    // Linux has no fixed process table, so the buffer is sized from the
    // processes alive right now.
    fn capacity(&self) -> Result<usize, FetchError> {
        let live = procfs::process::all_processes_with_root(&self.root)?.count();
        Ok(live + SPAWN_HEADROOM)
    }

    // Reads the procfs root in directory order and fills the buffer front to
    // back. Processes beyond the buffer are counted but not read.
    fn fetch(&mut self, buffer: &mut [ProcessEntry]) -> Result<usize, FetchError> {
        let procfs_processes = procfs::process::all_processes_with_root(&self.root)?;

        let mut written = 0;
        let mut left_out = 0;

        for p in procfs_processes {
            let procfs_proc = match p {
                Ok(p) => p,
                Err(_) => continue, // Skip listing errors
            };

            if written == buffer.len() {
                left_out += 1;
                continue;
            }

            match ProcessEntry::try_from(&procfs_proc) {
                Ok(entry) => {
                    buffer[written] = entry;
                    written += 1;
                }
                // The process exited between listing and reading its stat
                Err(ProcError::NotFound(_)) => {}
                Err(e) => {
                    warn!(pid = procfs_proc.pid, error = %e, "could not read process");
                }
            }
        }

        if left_out > 0 {
            warn!(
                capacity = buffer.len(),
                left_out,
                "process table larger than snapshot buffer, output is incomplete"
            );
        }

        Ok(written)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::add_process;
    use super::*;
    use crate::process::{ProcState, UNKNOWN_STATE};
    use std::fs;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn sorted(mut entries: Vec<ProcessEntry>) -> Vec<ProcessEntry> {
        entries.sort_by_key(|e| e.pid);
        entries
    }

    #[test]
    fn reads_fixture_tree() {
        let root = TempDir::new().unwrap();
        add_process(root.path(), 1, "init", 'S', 0, 4096);
        add_process(root.path(), 42, "sh", 'R', 1, 8192);
        add_process(root.path(), 43, "defunct", 'Z', 42, 0);
        // not a process directory
        fs::create_dir_all(root.path().join("sys")).unwrap();
        fs::write(root.path().join("uptime"), "1.0 1.0\n").unwrap();

        let mut table = ProcfsTable::new(root.path());
        let mut buffer = vec![ProcessEntry::default(); 8];
        let n = table.fetch(&mut buffer).unwrap();

        assert_eq!(n, 3);
        let entries = sorted(buffer[..n].to_vec());
        assert_eq!(
            entries,
            vec![
                ProcessEntry::new(1, 0, ProcState::Sleeping.code(), 4096, "init"),
                ProcessEntry::new(42, 1, ProcState::Running.code(), 8192, "sh"),
                ProcessEntry::new(43, 42, ProcState::Zombie.code(), 0, "defunct"),
            ]
        );
        // untouched slots stay at their defaults
        assert!(buffer[n..].iter().all(|e| *e == ProcessEntry::default()));
    }

    #[test]
    fn comm_with_spaces_and_parens() {
        let root = TempDir::new().unwrap();
        add_process(root.path(), 7, "Web (Content)", 'S', 1, 1);

        let mut buffer = vec![ProcessEntry::default(); 2];
        let n = ProcfsTable::new(root.path()).fetch(&mut buffer).unwrap();

        assert_eq!(n, 1);
        assert_eq!(buffer[0].name, "Web_(Content)");
    }

    #[test]
    fn unknown_linux_state_is_passed_on_as_invalid_code() {
        let root = TempDir::new().unwrap();
        add_process(root.path(), 5, "odd", 'Q', 1, 1);

        let mut buffer = vec![ProcessEntry::default(); 2];
        let n = ProcfsTable::new(root.path()).fetch(&mut buffer).unwrap();

        assert_eq!(n, 1);
        assert_eq!(buffer[0].state, UNKNOWN_STATE);
    }

    #[test]
    fn vanished_processes_are_skipped() {
        let root = TempDir::new().unwrap();
        add_process(root.path(), 1, "init", 'S', 0, 4096);
        // listed but without a stat file, as if it exited mid-scan
        fs::create_dir_all(root.path().join("99")).unwrap();

        let mut buffer = vec![ProcessEntry::default(); 4];
        let n = ProcfsTable::new(root.path()).fetch(&mut buffer).unwrap();

        assert_eq!(n, 1);
        assert_eq!(buffer[0].pid, 1);
    }

    #[test]
    fn stops_at_capacity() {
        let root = TempDir::new().unwrap();
        for pid in 1..=5 {
            add_process(root.path(), pid, "worker", 'S', 1, 0);
        }

        let mut buffer = vec![ProcessEntry::default(); 3];
        let n = ProcfsTable::new(root.path()).fetch(&mut buffer).unwrap();

        assert_eq!(n, 3);
        assert!(buffer.iter().all(|e| (1..=5).contains(&e.pid)));
    }

    #[test]
    fn truncation_is_logged_as_warning() {
        let root = TempDir::new().unwrap();
        for pid in 1..=5 {
            add_process(root.path(), pid, "worker", 'S', 1, 0);
        }

        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let mut buffer = vec![ProcessEntry::default(); 3];
        let n = tracing::subscriber::with_default(subscriber, || {
            ProcfsTable::new(root.path()).fetch(&mut buffer).unwrap()
        });

        assert_eq!(n, 3);
        let text = log.text();
        assert!(text.contains("WARN"));
        assert!(text.contains("output is incomplete"));
        assert!(text.contains("left_out=2"));
    }

    #[test]
    fn capacity_covers_every_live_process() {
        let root = TempDir::new().unwrap();
        for pid in 1..=100 {
            add_process(root.path(), pid, "worker", 'S', 1, 0);
        }
        fs::create_dir_all(root.path().join("sys")).unwrap();

        let table = ProcfsTable::new(root.path());
        assert_eq!(table.capacity().unwrap(), 100 + SPAWN_HEADROOM);
    }

    #[test]
    fn missing_root_is_a_fetch_failure() {
        let root = TempDir::new().unwrap();
        let mut table = ProcfsTable::new(root.path().join("absent"));
        let mut buffer = vec![ProcessEntry::default(); 4];

        assert!(matches!(table.fetch(&mut buffer), Err(FetchError::Procfs(_))));
    }
}
