//! Browsing session: the single owner of loaded records and view state.
//!
//! Each interaction runs one full recomputation pass:
//! load -> tag options -> filter -> navigator reconcile -> normalize on demand.
//!
//! # Error Handling Strategy
//!
//! - **Partial loads**: skipped JSONL lines are kept as [`Diagnostic`]s on the session
//! - **Fatal loads**: an unreadable file or unsupported top-level shape returns an error
//!   and leaves the previously loaded state untouched
//! - **Empty results**: zero records or zero matches are reported through
//!   [`SessionView`], never as errors

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::filters::{FilterState, TagSelection, filter_indices, tag_options};
use crate::models::{NormalizedEntry, Record, TagField};
use crate::navigator::NavigationState;
use crate::normalizer::normalize;
use crate::parsers::{Diagnostic, LoadReport, SourceFormat, read_records};

/// What the entry view should show right now
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView<'a> {
    /// Nothing was loaded (or the file held no records)
    NoRecords,
    /// Records are loaded but none pass the current filters
    NoMatches,
    Entry { record: &'a Record, entry: NormalizedEntry },
}

#[derive(Debug, Clone)]
pub struct Session {
    source: Option<PathBuf>,
    format: Option<SourceFormat>,
    records: Vec<Record>,
    diagnostics: Vec<Diagnostic>,
    filter: FilterState,
    tag1_options: Vec<TagSelection>,
    tag2_options: Vec<TagSelection>,
    filtered: Vec<usize>,
    navigation: NavigationState,
}

impl Session {
    pub fn new() -> Self {
        let mut session = Self {
            source: None,
            format: None,
            records: Vec::new(),
            diagnostics: Vec::new(),
            filter: FilterState::new(),
            tag1_options: Vec::new(),
            tag2_options: Vec::new(),
            filtered: Vec::new(),
            navigation: NavigationState::default(),
        };
        session.rebuild();
        session
    }

    /// Create a session from a file on disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its top-level JSON is neither an
    /// object nor an array.
    pub fn open(path: &Path) -> Result<Self> {
        let mut session = Self::new();
        session.load(path)?;
        Ok(session)
    }

    /// Build a session from an already parsed report
    ///
    /// # Errors
    ///
    /// Returns the fatal diagnostic's message if the report carries one.
    pub fn from_report(report: LoadReport, source: Option<PathBuf>) -> Result<Self> {
        let mut session = Self::new();
        session.apply_report(report, source)?;
        Ok(session)
    }

    /// Build a session from records already in memory
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut session = Self::new();
        session.replace_records(records, Vec::new(), None, None);
        session
    }

    /// Load (or replace) the session's file
    ///
    /// Filters reset to their first option and navigation returns to the first entry.
    /// On error the current state is kept as it was.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let report = read_records(path);
        self.apply_report(report, Some(path.to_path_buf()))
    }

    /// Re-read the current file from disk
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = self.source.clone() else {
            bail!("No file loaded");
        };
        self.load(&path)
    }

    pub fn apply_report(&mut self, report: LoadReport, source: Option<PathBuf>) -> Result<()> {
        if let Some(fatal) = report.fatal_diagnostic() {
            warn!(diagnostic = %fatal, "Load rejected, keeping previous state");
            bail!("{}", fatal);
        }

        let LoadReport { records, diagnostics, format } = report;
        self.replace_records(records, diagnostics, format, source);
        Ok(())
    }

    fn replace_records(
        &mut self,
        records: Vec<Record>,
        diagnostics: Vec<Diagnostic>,
        format: Option<SourceFormat>,
        source: Option<PathBuf>,
    ) {
        info!(records = records.len(), skipped = diagnostics.len(), "Session loaded");
        self.records = records;
        self.diagnostics = diagnostics;
        self.format = format;
        self.source = source;
        self.rebuild();
    }

    /// Recompute tag options and reset filters and navigation for fresh records
    fn rebuild(&mut self) {
        self.tag1_options = tag_options(&self.records, TagField::Tag1);
        self.tag2_options = tag_options(&self.records, TagField::Tag2);
        self.navigation = NavigationState::new(0);
        self.reset_filters();
    }

    fn refilter(&mut self) {
        self.filtered = filter_indices(&self.records, &self.filter);
        self.navigation.reconcile(self.filtered.len());
        debug!(
            matches = self.filtered.len(),
            index = self.navigation.index(),
            "Filters applied"
        );
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn format(&self) -> Option<SourceFormat> {
        self.format
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn tag_options(&self, field: TagField) -> &[TagSelection] {
        match field {
            TagField::Tag1 => &self.tag1_options,
            TagField::Tag2 => &self.tag2_options,
        }
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn set_filter(&mut self, field: TagField, selection: TagSelection) {
        self.filter.set(field, selection);
        self.refilter();
    }

    pub fn cycle_filter(&mut self, field: TagField, forward: bool) {
        let options = match field {
            TagField::Tag1 => &self.tag1_options,
            TagField::Tag2 => &self.tag2_options,
        };
        self.filter.cycle(field, options, forward);
        self.refilter();
    }

    /// Back to the first offered option of each tag (All, or unavailable)
    pub fn reset_filters(&mut self) {
        self.filter = FilterState {
            tag1: self.tag1_options[0].clone(),
            tag2: self.tag2_options[0].clone(),
        };
        self.refilter();
    }

    pub fn step_forward(&mut self) -> bool {
        self.navigation.step_forward()
    }

    pub fn step_back(&mut self) -> bool {
        self.navigation.step_back()
    }

    pub fn step_by(&mut self, delta: isize) -> bool {
        self.navigation.step_by(delta)
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        self.navigation.jump_to(index)
    }

    pub fn first(&mut self) -> bool {
        self.navigation.first()
    }

    pub fn last(&mut self) -> bool {
        self.navigation.last()
    }

    pub fn current_record(&self) -> Option<&Record> {
        let position = self.navigation.current()?;
        self.filtered.get(position).map(|&idx| &self.records[idx])
    }

    pub fn current_entry(&self) -> Option<NormalizedEntry> {
        self.current_record().map(normalize)
    }

    pub fn view(&self) -> SessionView<'_> {
        if self.records.is_empty() {
            return SessionView::NoRecords;
        }

        match self.current_record() {
            Some(record) => SessionView::Entry { record, entry: normalize(record) },
            None => SessionView::NoMatches,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
