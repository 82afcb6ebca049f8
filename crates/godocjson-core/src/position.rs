//! Source position tracking for declarations
//!
//! Positions are opaque offsets into a [`FileSet`], in the same scheme the Go
//! toolchain uses: every file occupies the range `base..=base + size`, and
//! offset `0` means "no position".

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for positions; files > 4GB are unsupported

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque position inside a [`FileSet`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Pos(pub u32);

impl Pos {
    /// The "no position" value
    pub const NONE: Pos = Pos(0);

    /// Returns true unless this is [`Pos::NONE`]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved source location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// File name as recorded in the file set
    pub filename: String,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, in bytes
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// Maps declaration positions to file and line
pub trait PositionResolver {
    /// Resolve `pos`, or `None` if it does not belong to any known file
    fn resolve(&self, pos: Pos) -> Option<Position>;
}

/// One file registered in a [`FileSet`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    /// File name
    pub name: String,
    /// Position of the first byte
    pub base: u32,
    /// File size in bytes
    pub size: u32,
    /// Byte offset of the first character of each line
    #[serde(default)]
    pub lines: Vec<u32>,
}

impl SourceFile {
    /// Position one past the last byte; `None` if the file does not fit in
    /// the position space
    #[must_use]
    pub const fn end(&self) -> Option<u32> {
        self.base.checked_add(self.size)
    }

    /// Returns true if `pos` falls inside this file (the end-of-file position included)
    ///
    /// A file whose range overflows the position space contains nothing.
    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        self.end()
            .is_some_and(|end| pos.0 >= self.base && pos.0 <= end)
    }

    /// Position of the byte at `offset`, or `None` past the end of the file
    #[must_use]
    pub fn pos(&self, offset: u32) -> Option<Pos> {
        if offset > self.size {
            return None;
        }
        self.base.checked_add(offset).map(Pos)
    }

    /// Position of the first byte of 1-based `line`
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<Pos> {
        let offset = *self.lines.get(line.checked_sub(1)?)?;
        self.pos(offset)
    }

    fn position(&self, pos: Pos) -> Position {
        let offset = pos.0 - self.base;
        // Index of the last line starting at or before `offset`
        let line = self.lines.partition_point(|&start| start <= offset);
        let column = match line {
            0 => offset as usize + 1,
            n => offset.saturating_sub(self.lines[n - 1]) as usize + 1,
        };
        Position {
            filename: self.name.clone(),
            line: line.max(1),
            column,
        }
    }
}

/// An ordered set of source files sharing one position space
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSet {
    /// Registered files, in registration order
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

impl FileSet {
    /// Create an empty file set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Base for the next registered file
    ///
    /// Saturates at `u32::MAX` once the position space is used up.
    #[must_use]
    pub fn next_base(&self) -> u32 {
        self.files.last().map_or(1, |file| {
            file.end()
                .and_then(|end| end.checked_add(1))
                .unwrap_or(u32::MAX)
        })
    }

    /// Register a file with a precomputed line table
    pub fn add_file(&mut self, name: impl Into<String>, size: u32, lines: Vec<u32>) -> &SourceFile {
        let base = self.next_base();
        let index = self.files.len();
        self.files.push(SourceFile {
            name: name.into(),
            base,
            size,
            lines,
        });
        &self.files[index]
    }

    /// Register a file, computing its line table from `source`
    pub fn add_source(&mut self, name: impl Into<String>, source: &str) -> &SourceFile {
        let mut lines = vec![0];
        lines.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i as u32 + 1)
                .filter(|&start| (start as usize) < source.len()),
        );
        self.add_file(name, source.len() as u32, lines)
    }

    /// Look up a file by name
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&SourceFile> {
        self.files.iter().find(|file| file.name == name)
    }

    /// The file containing `pos`, if any
    #[must_use]
    pub fn file_for(&self, pos: Pos) -> Option<&SourceFile> {
        if !pos.is_valid() {
            return None;
        }
        self.files.iter().find(|file| file.contains(pos))
    }
}

impl PositionResolver for FileSet {
    fn resolve(&self, pos: Pos) -> Option<Position> {
        self.file_for(pos).map(|file| file.position(pos))
    }
}

impl<R: PositionResolver + ?Sized> PositionResolver for &R {
    fn resolve(&self, pos: Pos) -> Option<Position> {
        (**self).resolve(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bases_are_contiguous() {
        let mut fset = FileSet::new();
        fset.add_source("a.go", "package a\n");
        fset.add_source("b.go", "package a\n\nfunc F() {}\n");

        assert_eq!(fset.files[0].base, 1);
        assert_eq!(fset.files[1].base, 1 + 10 + 1);
    }

    #[test]
    fn test_resolve_line_and_column() {
        let mut fset = FileSet::new();
        let file = fset.add_source("add.go", "package calc\n\nfunc Add(a, b int) int {\n}\n");
        let func_pos = file.line_start(3).unwrap();
        let name_pos = file.pos(file.lines[2] + 5).unwrap();

        let position = fset.resolve(func_pos).unwrap();
        assert_eq!(position.filename, "add.go");
        assert_eq!(position.line, 3);
        assert_eq!(position.column, 1);

        let position = fset.resolve(name_pos).unwrap();
        assert_eq!(position.line, 3);
        assert_eq!(position.column, 6);
    }

    #[test]
    fn test_resolve_picks_the_right_file() {
        let mut fset = FileSet::new();
        fset.add_source("a.go", "package a\n");
        let second = fset.add_source("b.go", "package a\nvar X = 1\n");
        let pos = second.line_start(2).unwrap();

        let position = fset.resolve(pos).unwrap();
        assert_eq!(position.filename, "b.go");
        assert_eq!(position.line, 2);
    }

    #[test]
    fn test_no_position_does_not_resolve() {
        let mut fset = FileSet::new();
        fset.add_source("a.go", "package a\n");

        assert!(fset.resolve(Pos::NONE).is_none());
        assert!(fset.resolve(Pos(10_000)).is_none());
    }

    #[test]
    fn test_line_start_out_of_range() {
        let mut fset = FileSet::new();
        let file = fset.add_source("a.go", "package a\n");

        assert!(file.line_start(0).is_none());
        assert!(file.line_start(2).is_none());
    }

    #[test]
    fn test_file_at_end_of_position_space() {
        let json = r#"{"files":[{"name":"big.go","base":4294967290,"size":10,"lines":[0]}]}"#;
        let mut fset: FileSet = serde_json::from_str(json).unwrap();

        assert!(fset.files[0].end().is_none());
        assert!(fset.resolve(Pos(u32::MAX)).is_none());
        assert!(fset.resolve(Pos(4_294_967_291)).is_none());
        assert!(fset.files[0].line_start(1).is_some());
        assert!(fset.files[0].pos(11).is_none());
        assert_eq!(fset.next_base(), u32::MAX);

        let next = fset.add_file("after.go", 10, vec![0]);
        assert!(next.pos(1).is_none());
    }

    #[test]
    fn test_unsorted_line_table_does_not_panic() {
        let json = r#"{"files":[{"name":"x.go","base":1,"size":20,"lines":[0,15,5]}]}"#;
        let fset: FileSet = serde_json::from_str(json).unwrap();

        assert_eq!(fset.resolve(Pos(8)).unwrap().filename, "x.go");
    }

    #[test]
    fn test_deserialize_file_set() {
        let json = r#"{"files":[{"name":"x.go","base":1,"size":20,"lines":[0,10]}]}"#;
        let fset: FileSet = serde_json::from_str(json).unwrap();

        let position = fset.resolve(Pos(12)).unwrap();
        assert_eq!(position.filename, "x.go");
        assert_eq!(position.line, 2);
        assert_eq!(position.column, 2);
    }
}
