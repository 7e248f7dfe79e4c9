//! # Scan Session
//!
//! Reads a set of startup files, extracts their definitions on a pool of
//! worker threads, and merges the results into one [`Inventory`].
//!
//! ## Concurrency Model
//!
//! ```text
//!  files[0..n] ──► AtomicUsize "next" ◄── worker 1 ─┐
//!                                    ◄── worker 2 ─┼─► mpsc (index, outcome)
//!                                    ◄── worker k ─┘          │
//!                                                             ▼
//!                                    coordinator: buffer by index, merge 0,1,2..
//! ```
//!
//! Workers pull file indices and send back `(index, outcome)`. Only the
//! coordinating thread touches the [`InventoryBuilder`], and it merges in
//! file order, so the inventory depends only on the file list, the order
//! and the file contents; never on thread timing.
//!
//! Cancellation is checked by each worker before it starts a file. Files
//! already started are finished and merged.

use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use crate::error::ScanError;
use crate::inventory::{Inventory, InventoryBuilder};
use crate::model::{Dialect, SourceFile};
use crate::parser::{parse_source, FileExtraction};

/// Order in which files are merged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileOrder {
    /// Caller order, i.e. sourcing order
    #[default]
    AsGiven,
    /// Sorted by path
    Lexicographic,
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Use this dialect for every file instead of detecting it
    pub dialect: Option<Dialect>,
    /// Worker threads; 0 means one per available CPU
    pub jobs: usize,
    pub order: FileOrder,
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            dialect: None,
            jobs: 0,
            order: FileOrder::AsGiven,
            cancel: None,
        }
    }
}

impl ScanOptions {
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn workers(&self, files: usize) -> usize {
        let jobs = match self.jobs {
            0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            n => n,
        };
        jobs.clamp(1, files.max(1))
    }
}

/// Result of a completed (or cancelled) scan
#[derive(Debug, Default)]
pub struct ScanReport {
    pub inventory: Inventory,
    /// Per-file and per-candidate problems, in file order
    pub diagnostics: Vec<ScanError>,
    /// Files whose bytes were read
    pub files_read: usize,
    /// Set when cancellation left some files unscanned
    pub cancelled: bool,
}

/// Outcome of one file, produced on a worker thread
#[derive(Debug)]
struct FileOutcome {
    read: bool,
    result: Result<FileExtraction, ScanError>,
}

/// Scan files on disk.
///
/// # Returns
///
/// The report, or [`ScanError::NoInputAvailable`] when not a single file
/// could be read.
pub fn scan_paths(paths: &[PathBuf], options: &ScanOptions) -> Result<ScanReport, ScanError> {
    let mut paths = paths.to_vec();
    if options.order == FileOrder::Lexicographic {
        paths.sort();
    }

    let report = run(&paths, options, |path| match std::fs::read(path) {
        Ok(bytes) => {
            let source = SourceFile::from_bytes(path.clone(), &bytes);
            FileOutcome {
                read: true,
                result: parse_source(&source, options.dialect),
            }
        }
        Err(source) => FileOutcome {
            read: false,
            result: Err(ScanError::Io {
                path: path.clone(),
                source,
            }),
        },
    });

    if report.files_read == 0 && !report.cancelled {
        for diagnostic in &report.diagnostics {
            warn!("{}", diagnostic);
        }
        return Err(ScanError::NoInputAvailable);
    }
    Ok(report)
}

/// Scan files already in memory.
pub fn scan_sources(mut sources: Vec<SourceFile>, options: &ScanOptions) -> ScanReport {
    if options.order == FileOrder::Lexicographic {
        sources.sort_by(|a, b| a.path.cmp(&b.path));
    }

    run(&sources, options, |source| FileOutcome {
        read: true,
        result: parse_source(source, options.dialect),
    })
}

fn run<T, F>(files: &[T], options: &ScanOptions, work: F) -> ScanReport
where
    T: Sync,
    F: Fn(&T) -> FileOutcome + Sync,
{
    let workers = options.workers(files.len());
    debug!("scanning {} files with {} workers", files.len(), workers);

    let next = AtomicUsize::new(0);
    let mut builder = InventoryBuilder::new();
    let mut report = ScanReport::default();
    let mut merged = 0;

    thread::scope(|scope| {
        let (tx, rx) = mpsc::channel::<(usize, FileOutcome)>();

        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            let work = &work;
            scope.spawn(move || loop {
                if options.is_cancelled() {
                    break;
                }
                let index = next.fetch_add(1, Ordering::SeqCst);
                let Some(file) = files.get(index) else {
                    break;
                };
                if tx.send((index, work(file))).is_err() {
                    break;
                }
            });
        }
        drop(tx);

        // Outcomes arrive in completion order; merge strictly in file order
        let mut pending: BTreeMap<usize, FileOutcome> = BTreeMap::new();
        for (index, outcome) in rx {
            pending.insert(index, outcome);
            while let Some(outcome) = pending.remove(&merged) {
                merge(&mut builder, &mut report, outcome);
                merged += 1;
            }
        }
    });

    report.cancelled = merged < files.len();
    report.inventory = builder.finalize();
    info!(
        "scanned {} of {} files: {} definitions, {} diagnostics{}",
        report.files_read,
        files.len(),
        report.inventory.len(),
        report.diagnostics.len(),
        if report.cancelled { " (cancelled)" } else { "" }
    );
    report
}

fn merge(builder: &mut InventoryBuilder, report: &mut ScanReport, outcome: FileOutcome) {
    if outcome.read {
        report.files_read += 1;
    }
    match outcome.result {
        Ok(extraction) => {
            builder.extend(extraction.definitions);
            report.diagnostics.extend(extraction.diagnostics);
        }
        Err(err) => report.diagnostics.push(err),
    }
}
