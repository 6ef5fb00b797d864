//! Plain-text interchange format.
//!
//! ```text
//! [MAIN]
//! FEM_OK=OK
//! FEM_CAN=Cancel
//!
//! [INTRO]
//! INTRO1=Welcome
//! ```
//!
//! Lines are trimmed and blank lines are skipped. A `[NAME]` line opens a table in formats with
//! multiple tables, every other line is `key=text`, split at the first `=`. A leading byte order
//! mark is ignored.

use std::{
    fmt::{self, Write as _},
    path::{Path, PathBuf},
};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    archive::{Archive, Table},
    encoding::EncodingResolver,
    key::KeyRule,
    version::Version,
};

/// One classified line of an interchange file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `[NAME]`
    Header(&'a str),

    /// `key=text`, neither side trimmed
    Entry(&'a str, &'a str),

    /// A line that is neither a header nor holds a `=`
    NoSeparator(&'a str),
}

/// Split `text` into numbered, trimmed, non-blank lines.
///
/// Headers are only recognized when `has_tables` is set, otherwise they are ordinary lines.
pub fn lines(text: &str, has_tables: bool) -> impl Iterator<Item = (usize, Line<'_>)> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    text.lines().enumerate().filter_map(move |(i, line)| {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let header = line
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .filter(|_| has_tables);

        let kind = match header {
            Some(name) => Line::Header(name),
            None => match line.split_once('=') {
                Some((key, value)) => Line::Entry(key, value),
                None => Line::NoSeparator(line),
            },
        };
        Some((i + 1, kind))
    })
}

/// Why a line was rejected
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ImportErrorKind {
    /// The key does not follow the format's key rule
    #[error("invalid key {key:?}: {message}")]
    InvalidKey {
        /// The rejected key
        key: String,
        /// The rule that was broken
        message: &'static str,
    },

    /// The line holds no `=`
    #[error("missing '=' separator")]
    #[diagnostic(help("entries are written as key=text"))]
    MissingSeparator,

    /// An entry appeared before the first `[NAME]` header
    #[error("entry outside of a table")]
    #[diagnostic(help("start the file with a [MAIN] line"))]
    MissingTable,

    /// A `[NAME]` header with an unusable name
    #[error("invalid table name {0:?}")]
    InvalidTableName(String),

    /// The file could not be read at all, reported on line 0
    #[error("unreadable file: {0}")]
    Unreadable(String),
}

/// A rejected line of an interchange file
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ImportError {
    /// 1-based line number
    pub line: usize,

    /// What is wrong with it
    pub kind: ImportErrorKind,
}

/// Entries and errors of one parsed file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// Every valid entry
    pub archive: Archive,

    /// Every rejected line, in file order
    pub errors: Vec<ImportError>,
}

impl Parsed {
    /// Whether every line was accepted.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

fn is_valid_header(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_graphic() && b != b'[' && b != b']')
}

/// Parse an interchange file.
///
/// Without tables every entry lands in `MAIN`. Keys are checked against `rule`, later
/// duplicates replace earlier ones.
pub fn parse(text: &str, has_tables: bool, rule: KeyRule) -> Parsed {
    let mut parsed = Parsed::default();
    let mut current: Option<String> = if has_tables {
        None
    } else {
        Some(crate::version::MAIN_TABLE.to_string())
    };

    for (line, kind) in lines(text, has_tables) {
        let error = |kind| ImportError { line, kind };

        match kind {
            Line::Header(name) => {
                let name = name.trim();
                if is_valid_header(name) {
                    parsed.archive.table_mut(name);
                    current = Some(name.to_string());
                } else {
                    parsed
                        .errors
                        .push(error(ImportErrorKind::InvalidTableName(name.to_string())));
                    current = None;
                }
            }
            Line::NoSeparator(_) => parsed.errors.push(error(ImportErrorKind::MissingSeparator)),
            Line::Entry(key, value) => {
                let key = key.trim();
                if let Err(message) = rule.validate(key) {
                    parsed.errors.push(error(ImportErrorKind::InvalidKey {
                        key: key.to_string(),
                        message,
                    }));
                    continue;
                }

                match &current {
                    Some(table) => {
                        parsed
                            .archive
                            .table_mut(table)
                            .insert(key.to_string(), value.trim().to_string());
                    }
                    None => parsed.errors.push(error(ImportErrorKind::MissingTable)),
                }
            }
        }
    }

    parsed
}

/// Render one table, keys sorted, with a `[name]` header line when `with_header` is set.
pub fn format_table(name: &str, table: &Table, with_header: bool) -> String {
    let mut out = String::new();
    if with_header {
        let _ = writeln!(out, "[{name}]");
    }

    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    for (key, text) in entries {
        let _ = writeln!(out, "{key}={text}");
    }

    out
}

/// Render an archive, tables sorted by name and separated by a blank line.
///
/// Without tables only the `MAIN` table is written.
pub fn format(archive: &Archive, has_tables: bool) -> String {
    if !has_tables {
        return archive
            .get(crate::version::MAIN_TABLE)
            .map(|table| format_table(crate::version::MAIN_TABLE, table, false))
            .unwrap_or_default();
    }

    let mut names: Vec<&String> = archive.keys().collect();
    names.sort();
    names
        .into_iter()
        .map(|name| format_table(name, &archive[name], true))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of importing several files at once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchImport<C> {
    /// Entries of every file without errors, later files overwriting earlier ones
    pub archive: Archive,

    /// Errors of the rejected files, tagged with the file they came from
    pub errors: Vec<(C, ImportError)>,

    /// Number of files whose entries were imported
    pub imported: usize,
}

impl<C: Clone> BatchImport<C> {
    /// Whether every file was imported.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn add(&mut self, source: C, parsed: Parsed) {
        if parsed.is_clean() {
            self.archive.merge(parsed.archive, true);
            self.imported += 1;
        } else {
            self.errors
                .extend(parsed.errors.into_iter().map(|e| (source.clone(), e)));
        }
    }
}

impl<C> Default for BatchImport<C> {
    fn default() -> Self {
        Self {
            archive: Archive::default(),
            errors: Vec::new(),
            imported: 0,
        }
    }
}

impl<C: fmt::Display> fmt::Display for BatchImport<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (source, error) in &self.errors {
            writeln!(f, "{source}: {error}")?;
        }
        Ok(())
    }
}

/// Parse several files, keeping only the entries of files that parse without any error.
pub fn import_batch<C, S>(
    sources: impl IntoIterator<Item = (C, S)>,
    has_tables: bool,
    rule: KeyRule,
) -> BatchImport<C>
where
    C: Clone,
    S: AsRef<str>,
{
    let mut batch = BatchImport::default();
    for (source, text) in sources {
        batch.add(source, parse(text.as_ref(), has_tables, rule));
    }
    batch
}

/// Read and import interchange files for an archive of `version`.
///
/// Files that are not UTF-8 are decoded with the legacy code pages of [`EncodingResolver`]. A
/// file that cannot be read is reported on line 0 and the other files are still imported.
pub fn import_files<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
    version: Version,
) -> BatchImport<PathBuf> {
    let resolver = EncodingResolver::default();
    let mut batch = BatchImport::default();

    for path in paths {
        let path = path.as_ref();
        let parsed = match std::fs::read(path) {
            Ok(data) => {
                debug!("read {}", path.display());
                parse(
                    &resolver.decode(&data),
                    version.has_multiple_tables(),
                    version.key_rule(),
                )
            }
            Err(e) => Parsed {
                archive: Archive::default(),
                errors: vec![ImportError {
                    line: 0,
                    kind: ImportErrorKind::Unreadable(e.to_string()),
                }],
            },
        };
        batch.add(path.to_path_buf(), parsed);
    }

    for (path, error) in &batch.errors {
        warn!("{}: {error}", path.display());
    }
    batch
}
