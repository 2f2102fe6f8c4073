//! Lazy scan over many archives.
//!
//! Each file is opened, indexed and closed before any of its lines are
//! yielded, so an event never refers to a half-read archive. Failures are
//! yielded as events too and the scan carries on with the next file.

use crate::error::FormatError;
use crate::format::format_record;
use crate::labels::TypeNameTable;
use crate::matcher::MatchPattern;
use crate::package::index::TgiRecord;
use crate::package::Package;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Emit each matching file's name once instead of its lines.
    pub names_only: bool,
    /// Attach the source path to every line.
    pub with_filename: bool,
}

#[derive(Debug)]
pub enum ScanEvent {
    Line {
        path: Option<Rc<Path>>,
        record: TgiRecord,
        text: String,
    },
    FileName(Rc<Path>),
    Failed {
        path: Rc<Path>,
        error: FormatError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub files_matched: usize,
    pub lines_matched: usize,
}

impl ScanSummary {
    /// grep convention: 0 on a match, 1 on none, 2 if any file was unreadable.
    pub fn exit_code(&self) -> i32 {
        if self.files_failed > 0 {
            2
        } else if self.files_matched > 0 {
            0
        } else {
            1
        }
    }
}

struct OpenFile {
    path: Rc<Path>,
    records: std::vec::IntoIter<TgiRecord>,
    matched: bool,
}

pub struct Scanner<'a, I> {
    paths: I,
    pattern: MatchPattern,
    table: &'a TypeNameTable,
    options: ScanOptions,
    current: Option<OpenFile>,
    summary: ScanSummary,
}

impl<'a, I> Scanner<'a, I>
where
    I: Iterator<Item = PathBuf>,
{
    pub fn new<P>(paths: P, pattern: MatchPattern, table: &'a TypeNameTable, options: ScanOptions) -> Self
    where
        P: IntoIterator<IntoIter = I>,
    {
        Self {
            paths: paths.into_iter(),
            pattern,
            table,
            options,
            current: None,
            summary: ScanSummary::default(),
        }
    }

    /// Totals so far; final once the iterator is exhausted.
    pub fn summary(&self) -> ScanSummary {
        self.summary
    }

    fn next_record_event(&mut self) -> Option<ScanEvent> {
        let file = self.current.as_mut()?;
        let (table, pattern) = (self.table, &self.pattern);
        let hit = file.records.by_ref().find_map(|record| {
            let text = format_record(&record, table);
            pattern.matches(&text).then_some((record, text))
        });
        let Some((record, text)) = hit else {
            self.current = None;
            return None;
        };

        self.summary.lines_matched += 1;
        if !file.matched {
            file.matched = true;
            self.summary.files_matched += 1;
        }
        if self.options.names_only {
            // First hit decides; the rest of the index is skipped.
            let path = Rc::clone(&file.path);
            self.current = None;
            return Some(ScanEvent::FileName(path));
        }
        let path = self.options.with_filename.then(|| Rc::clone(&file.path));
        Some(ScanEvent::Line { path, record, text })
    }

    fn open_next(&mut self) -> Option<Option<ScanEvent>> {
        let path: Rc<Path> = Rc::from(self.paths.next()?);
        debug!("Scanning {}", path.display());

        let package = match Package::open(&path) {
            Ok(package) => package,
            Err(error) => {
                warn!("Skipping {}: {}", path.display(), error);
                self.summary.files_failed += 1;
                return Some(Some(ScanEvent::Failed { path, error }));
            }
        };
        self.summary.files_scanned += 1;
        debug!("{}: {} index entries", path.display(), package.records.len());

        // Any readable archive, even an empty one, matches an empty pattern.
        if self.options.names_only && self.pattern.is_empty() {
            self.summary.files_matched += 1;
            return Some(Some(ScanEvent::FileName(path)));
        }

        self.current = Some(OpenFile {
            path,
            records: package.records.into_iter(),
            matched: false,
        });
        Some(None)
    }
}

impl<'a, I> Iterator for Scanner<'a, I>
where
    I: Iterator<Item = PathBuf>,
{
    type Item = ScanEvent;

    fn next(&mut self) -> Option<ScanEvent> {
        loop {
            if let Some(event) = self.next_record_event() {
                return Some(event);
            }
            if let Some(event) = self.open_next()? {
                return Some(event);
            }
        }
    }
}
