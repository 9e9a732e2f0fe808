use mediapool_core::{collect_descendants, FolderId, FolderIndex, MediaPool};

use crate::config::OrganizeOptions;
use crate::organizer::{organize_media, OrganizeReport};

/// Stage of an organize run, surfaced to whatever front end drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Analyzing,
    Moving,
    Pruning,
    Done,
    Error,
}

impl Phase {
    /// The label text shown while this phase runs.
    pub fn message(&self) -> &'static str {
        match self {
            Phase::Idle => "Ready",
            Phase::Analyzing => "Analyzing files...",
            Phase::Moving => "Moving files...",
            Phase::Pruning => "Removing empty folders...",
            Phase::Done => "Complete",
            Phase::Error => "Error",
        }
    }
}

/// Callback seam for progress display. The default implementation
/// ignores everything, so listeners override only what they show.
pub trait ProgressListener {
    fn phase_changed(&mut self, phase: Phase) {
        let _ = phase;
    }
}

/// Listener for headless runs.
pub struct NullProgress;

impl ProgressListener for NullProgress {}

/// Relays phase changes into the controller's own fields and onward to
/// the caller's listener.
struct Relay<'a> {
    phase: &'a mut Phase,
    status: &'a mut String,
    inner: &'a mut dyn ProgressListener,
}

impl ProgressListener for Relay<'_> {
    fn phase_changed(&mut self, phase: Phase) {
        *self.phase = phase;
        *self.status = phase.message().to_string();
        self.inner.phase_changed(phase);
    }
}

/// Drives organize runs against one pool. Holds the confirmed folder
/// selection plus the phase and status line a front end would display,
/// and keeps the report of the last completed run.
pub struct Controller<P: MediaPool> {
    pool: P,
    selected: Vec<FolderId>,
    phase: Phase,
    status: String,
    last_report: Option<OrganizeReport>,
}

impl<P: MediaPool> Controller<P> {
    pub fn new(pool: P) -> Self {
        Self {
            pool,
            selected: Vec::new(),
            phase: Phase::Idle,
            status: Phase::Idle.message().to_string(),
            last_report: None,
        }
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut P {
        &mut self.pool
    }

    pub fn into_pool(self) -> P {
        self.pool
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn selected_folders(&self) -> &[FolderId] {
        &self.selected
    }

    pub fn last_report(&self) -> Option<&OrganizeReport> {
        self.last_report.as_ref()
    }

    /// Confirm a folder-picker selection. Each path resolves through the
    /// index and expands to the folder plus every descendant beneath it;
    /// unknown paths are logged and skipped. Returns how many folders
    /// ended up selected.
    pub fn confirm_selection(&mut self, paths: &[String]) -> usize {
        let index = FolderIndex::build(&self.pool);
        let mut selected = Vec::new();
        for path in paths {
            match index.resolve(path) {
                Some(folder) => {
                    selected.push(folder);
                    selected.extend(collect_descendants(&self.pool, folder));
                }
                None => log::warn!("Selected folder not found: {path}"),
            }
        }
        self.selected = selected;
        self.selected.len()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Run the pipeline over the confirmed selection (or the scope the
    /// options dictate). Phases are mirrored into this controller and
    /// forwarded to `listener`; afterwards the status line carries the
    /// completion totals or the error text.
    pub fn organize(&mut self, options: &OrganizeOptions, listener: &mut dyn ProgressListener) -> &str {
        let result = {
            let mut relay = Relay {
                phase: &mut self.phase,
                status: &mut self.status,
                inner: listener,
            };
            organize_media(&mut self.pool, &self.selected, options, &mut relay)
        };
        match result {
            Ok(report) => {
                self.phase = Phase::Done;
                self.status = report.status_line();
                self.last_report = Some(report);
            }
            Err(err) => {
                self.phase = Phase::Error;
                self.status = format!("Error: {err}");
                self.last_report = None;
            }
        }
        &self.status
    }
}
