//! Textual board snapshots and file persistence
//!
//! Format: first line is the width, second line the height, then `height`
//! lines of exactly `width` characters, each `0` (dead) or `1` (alive).

use super::patterns::PATTERNS;
use super::{Board, CellState};
use crate::error::{LifeError, LifeResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Board contents with declared dimensions, as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major cell values, 0 or 1
    pub rows: Vec<Vec<u8>>,
}

impl Snapshot {
    pub fn new(width: usize, height: usize, rows: Vec<Vec<u8>>) -> Self {
        Self { width, height, rows }
    }

    pub fn from_board(board: &Board) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            rows: board
                .rows()
                .map(|row| row.iter().map(|c| c.as_digit()).collect())
                .collect(),
        }
    }

    /// Check the declared dimensions and values, and build the board they describe
    pub fn to_board(&self) -> LifeResult<Board> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::invalid_dimension(self.width, self.height));
        }
        if self.rows.len() != self.height {
            return Err(LifeError::malformed(format!(
                "declared height {} but found {} rows",
                self.height,
                self.rows.len()
            )));
        }

        let mut cells = Vec::with_capacity(self.height);
        for (row_idx, row) in self.rows.iter().enumerate() {
            if row.len() != self.width {
                return Err(LifeError::malformed(format!(
                    "row {} has {} cells, declared width is {}",
                    row_idx,
                    row.len(),
                    self.width
                )));
            }
            let parsed = row
                .iter()
                .enumerate()
                .map(|(col_idx, &value)| {
                    CellState::from_digit(value).ok_or_else(|| {
                        LifeError::malformed(format!(
                            "invalid cell value {} at ({}, {}); only 0 and 1 are allowed",
                            value, row_idx, col_idx
                        ))
                    })
                })
                .collect::<LifeResult<Vec<_>>>()?;
            cells.push(parsed);
        }

        Board::from_rows(cells)
    }

    /// Parse the textual format
    pub fn parse(content: &str) -> LifeResult<Self> {
        let mut lines = content.lines();

        let width = parse_header(lines.next(), "width")?;
        let height = parse_header(lines.next(), "height")?;
        if width <= 0 || height <= 0 {
            return Err(LifeError::InvalidDimension { width, height });
        }
        let (width, height) = (width as usize, height as usize);

        // The header is untrusted: rows are only allocated as they are read
        let mut rows = Vec::new();
        for row_idx in 0..height {
            let line = lines.next().ok_or_else(|| {
                LifeError::malformed(format!(
                    "declared height {} but found {} rows",
                    height, row_idx
                ))
            })?;
            rows.push(parse_row(line, row_idx, width)?);
        }

        if let Some(extra) = lines.find(|line| !line.trim().is_empty()) {
            return Err(LifeError::malformed(format!(
                "unexpected content after {} rows: {:?}",
                height, extra
            )));
        }

        Ok(Self { width, height, rows })
    }

    /// Render the textual format, one trailing newline per line.
    ///
    /// The snapshot is validated first, so a hand-built one with bad dimensions
    /// or values is rejected rather than written as a different board.
    pub fn to_text(&self) -> LifeResult<String> {
        let board = self.to_board()?;
        let mut result = String::with_capacity(board.cells().len() + board.height() + 16);
        result.push_str(&format!("{}\n{}\n", board.width(), board.height()));

        for row in board.rows() {
            result.extend(row.iter().map(|cell| cell.as_char()));
            result.push('\n');
        }

        Ok(result)
    }
}

fn parse_header(line: Option<&str>, name: &str) -> LifeResult<i64> {
    let line = line.ok_or_else(|| LifeError::malformed(format!("missing {} header", name)))?;
    line.trim().parse::<i64>().map_err(|_| {
        LifeError::malformed(format!("{} header {:?} is not a decimal integer", name, line))
    })
}

fn parse_row(line: &str, row_idx: usize, width: usize) -> LifeResult<Vec<u8>> {
    let len = line.chars().count();
    if len != width {
        return Err(LifeError::malformed(format!(
            "row {} has length {}, expected {}",
            row_idx, len, width
        )));
    }

    line.chars()
        .enumerate()
        .map(|(col_idx, ch)| {
            CellState::from_char(ch).map(CellState::as_digit).ok_or_else(|| {
                LifeError::malformed(format!(
                    "invalid character {:?} at ({}, {}); only '0' and '1' are allowed",
                    ch, row_idx, col_idx
                ))
            })
        })
        .collect()
}

/// Storage for board snapshots
pub trait PersistenceAdapter {
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
    fn load(&self) -> Result<Snapshot>;
}

/// Snapshot stored in a single text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceAdapter for FileStore {
    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        save_snapshot_to_file(snapshot, &self.path)
    }

    fn load(&self) -> Result<Snapshot> {
        load_snapshot_from_file(&self.path)
    }
}

/// Load a snapshot from a text file
pub fn load_snapshot_from_file<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;

    let snapshot = Snapshot::parse(&content)
        .with_context(|| format!("Failed to parse snapshot file: {}", path.display()))?;
    debug!(
        path = %path.display(),
        width = snapshot.width,
        height = snapshot.height,
        "snapshot read"
    );
    Ok(snapshot)
}

/// Save a snapshot to a text file, creating parent directories as needed
pub fn save_snapshot_to_file<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = snapshot
        .to_text()
        .with_context(|| format!("Refusing to write invalid snapshot to {}", path.display()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write snapshot to file: {}", path.display()))?;
    debug!(path = %path.display(), "snapshot written");

    Ok(())
}

/// Write every built-in pattern as `<name>.txt` into a directory
pub fn write_pattern_library<P: AsRef<Path>>(output_dir: P) -> Result<Vec<PathBuf>> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut written = Vec::with_capacity(PATTERNS.len());
    for pattern in PATTERNS {
        let board = pattern
            .to_board()
            .with_context(|| format!("Pattern {} does not fit its board", pattern.name))?;
        let path = dir.join(format!("{}.txt", pattern.name));
        save_snapshot_to_file(&Snapshot::from_board(&board), &path)?;
        written.push(path);
    }

    info!(dir = %dir.display(), count = written.len(), "pattern library written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = Snapshot::parse("3\n2\n010\n101\n").unwrap();

        assert_eq!(snapshot.width, 3);
        assert_eq!(snapshot.height, 2);
        assert_eq!(snapshot.rows, vec![vec![0, 1, 0], vec![1, 0, 1]]);

        let board = snapshot.to_board().unwrap();
        assert_eq!(board.population(), 3);
        assert_eq!(board.get(1, 2), CellState::Alive);
    }

    #[test]
    fn test_snapshot_to_text() {
        let board = Board::with_alive(3, 3, &[(0, 1), (1, 0), (1, 2), (2, 1)]).unwrap();
        let text = Snapshot::from_board(&board).to_text().unwrap();

        assert_eq!(text, "3\n3\n010\n101\n010\n");
    }

    #[test]
    fn test_text_round_trip() {
        let original = "4\n2\n0110\n1001\n";
        let snapshot = Snapshot::parse(original).unwrap();
        assert_eq!(snapshot.to_text().unwrap(), original);
    }

    #[test]
    fn test_crlf_and_trailing_blank_lines() {
        let snapshot = Snapshot::parse("2\r\n2\r\n10\r\n01\r\n\r\n\n").unwrap();
        assert_eq!(snapshot.rows, vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn test_malformed_text() {
        let cases = [
            "",                       // no header
            "3\n",                    // no height
            "three\n1\n000\n",        // non-numeric width
            "3\n2\n000\n",            // too few rows
            "3\n1\n0000\n",           // row too long
            "3\n1\n00\n",             // row too short
            "3\n1\n0x0\n",            // bad character
            "3\n1\n010\n111\n",       // too many rows
        ];
        for case in cases {
            assert!(
                matches!(Snapshot::parse(case), Err(LifeError::MalformedSnapshot(_))),
                "expected malformed for {:?}",
                case
            );
        }
    }

    #[test]
    fn test_huge_height_header_is_malformed() {
        for content in ["1\n9223372036854775807\n0\n", "1\n100000000000\n0\n"] {
            assert!(
                matches!(Snapshot::parse(content), Err(LifeError::MalformedSnapshot(_))),
                "expected malformed for {:?}",
                content
            );
        }
    }

    #[test]
    fn test_huge_width_header_is_malformed() {
        let result = Snapshot::parse("9223372036854775807\n1\n0\n");
        assert!(matches!(result, Err(LifeError::MalformedSnapshot(_))));
    }

    #[test]
    fn test_to_text_rejects_invalid_values() {
        let snapshot = Snapshot::new(2, 1, vec![vec![0, 2]]);
        assert!(matches!(snapshot.to_text(), Err(LifeError::MalformedSnapshot(_))));

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.txt");
        assert!(save_snapshot_to_file(&snapshot, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_non_positive_header() {
        assert_eq!(
            Snapshot::parse("0\n2\n"),
            Err(LifeError::InvalidDimension { width: 0, height: 2 })
        );
        assert_eq!(
            Snapshot::parse("2\n-1\n"),
            Err(LifeError::InvalidDimension { width: 2, height: -1 })
        );
    }

    #[test]
    fn test_to_board_validation() {
        let wrong_width = Snapshot::new(3, 1, vec![vec![0, 1]]);
        assert!(matches!(wrong_width.to_board(), Err(LifeError::MalformedSnapshot(_))));

        let wrong_height = Snapshot::new(2, 2, vec![vec![0, 1]]);
        assert!(matches!(wrong_height.to_board(), Err(LifeError::MalformedSnapshot(_))));

        let bad_value = Snapshot::new(2, 1, vec![vec![0, 2]]);
        assert!(matches!(bad_value.to_board(), Err(LifeError::MalformedSnapshot(_))));

        let empty = Snapshot::new(0, 0, vec![]);
        assert!(matches!(empty.to_board(), Err(LifeError::InvalidDimension { .. })));
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested/board.txt"));

        let board = Board::with_alive(5, 3, &[(0, 0), (2, 4), (1, 2)]).unwrap();
        store.save(&Snapshot::from_board(&board)).unwrap();

        let loaded = store.load().unwrap().to_board().unwrap();
        assert_eq!(loaded, board);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        let err = load_snapshot_from_file(temp_dir.path().join("absent.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read snapshot file"));
    }

    #[test]
    fn test_write_pattern_library() {
        let temp_dir = tempdir().unwrap();
        let written = write_pattern_library(temp_dir.path()).unwrap();

        assert_eq!(written.len(), PATTERNS.len());
        assert!(temp_dir.path().join("glider.txt").exists());
        assert!(temp_dir.path().join("blinker.txt").exists());

        let glider = load_snapshot_from_file(temp_dir.path().join("glider.txt"))
            .unwrap()
            .to_board()
            .unwrap();
        assert_eq!(glider.width(), 8);
        assert_eq!(glider.population(), 5);
    }
}
