//! Jagged occupancy grids and the CSV files they are read from.
//!
//! ```text,ignore
//!   b,b,b,b,b      row 0, length 5
//!   b, , ,b        row 1, length 4
//!                  row 2, length 0
//!   b,b, ,,        row 3, length 2 (trailing empties dropped)
//! ```
//!
//! Rows keep their own length. Every read goes through `Grid::cell` which
//! treats anything outside a row as empty.

use std::fmt;
use std::fs;
use std::path::Path;

use glam::IVec2;
use log::{debug, info};

use crate::WorldError;
use crate::token::{Token, TokenTable};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Token>>,
    /// Longest row, used for bounds of the whole map
    width: usize,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<Token>>) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Parse comma separated rows. Cell names are interned in to `tokens`.
    pub fn from_csv(src: &str, tokens: &mut TokenTable) -> Self {
        let rows = src.lines().map(|line| parse_row(line, tokens)).collect();
        Self::from_rows(rows)
    }

    /// Read and parse a grid file. A missing or unreadable file is an error,
    /// malformed cells are not (they are just names).
    pub fn load(path: &Path, tokens: &mut TokenTable) -> Result<Self, WorldError> {
        let src = fs::read_to_string(path).map_err(|e| WorldError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let grid = Self::from_csv(&src, tokens);
        info!(
            "Loaded grid {:?}: {} rows, widest {}",
            path,
            grid.height(),
            grid.width()
        );
        debug!("{grid}");
        Ok(grid)
    }

    /// The token at column `x`, row `y`. Negative, missing or short rows read
    /// as `Token::EMPTY`.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Token {
        if x < 0 || y < 0 {
            return Token::EMPTY;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(Token::EMPTY)
    }

    #[inline]
    pub fn cell_at(&self, cell: IVec2) -> Token {
        self.cell(cell.x, cell.y)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row_len(&self, y: usize) -> usize {
        self.rows.get(y).map_or(0, |r| r.len())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Token]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}

fn parse_row(line: &str, tokens: &mut TokenTable) -> Vec<Token> {
    let mut row: Vec<Token> = line.split(',').map(|cell| tokens.intern(cell)).collect();
    let len = row
        .iter()
        .rposition(|t| !t.is_empty())
        .map_or(0, |last| last + 1);
    row.truncate(len);
    row
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid has {} rows:", self.rows.len())?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "Row {i}: length={}, tokens=", self.row_len(i))?;
            for (j, t) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", t.index())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::token::{Token, TokenTable};
    use std::path::Path;

    const JAGGED: &str = "b,b,b,b,b\nb, , ,b\n\nb,b, ,,\n  ,  ,s  \n";

    #[test]
    fn trailing_empties_dropped_and_blank_rows_kept() {
        let mut tokens = TokenTable::new();
        let grid = Grid::from_csv(JAGGED, &mut tokens);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.row_len(0), 5);
        assert_eq!(grid.row_len(1), 4);
        assert_eq!(grid.row_len(2), 0);
        assert_eq!(grid.row_len(3), 2);
        // leading empties are kept so `s` stays in column 2
        assert_eq!(grid.row_len(4), 3);
        assert_eq!(grid.width(), 5);

        let b = tokens.get("b").unwrap();
        let s = tokens.get("s").unwrap();
        assert_eq!(grid.cell(0, 1), b);
        assert_eq!(grid.cell(1, 1), Token::EMPTY);
        assert_eq!(grid.cell(2, 4), s);
    }

    #[test]
    fn short_rows_read_as_empty() {
        let mut tokens = TokenTable::new();
        let grid = Grid::from_csv(JAGGED, &mut tokens);
        // Row 1 is 4 long, column 4 exists in row 0 only
        assert_eq!(grid.cell(4, 1), Token::EMPTY);
        assert_eq!(grid.cell(0, 2), Token::EMPTY);
        assert_eq!(grid.cell(100, 0), Token::EMPTY);
        assert_eq!(grid.cell(0, 100), Token::EMPTY);
        assert_eq!(grid.cell(-1, 0), Token::EMPTY);
        assert_eq!(grid.cell(0, -1), Token::EMPTY);
    }

    #[test]
    fn empty_source() {
        let mut tokens = TokenTable::new();
        let grid = Grid::from_csv("", &mut tokens);
        assert_eq!(grid.height(), 0);
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.cell(0, 0), Token::EMPTY);
        assert_eq!(grid.rows().count(), 0);
    }

    #[test]
    fn display_lists_rows() {
        let mut tokens = TokenTable::new();
        let grid = Grid::from_csv("a,,a\n", &mut tokens);
        let out = grid.to_string();
        assert!(out.starts_with("Grid has 1 rows:"));
        assert!(out.contains("Row 0: length=3, tokens=1,0,1"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut tokens = TokenTable::new();
        let res = Grid::load(Path::new("/definitely/not/here.csv"), &mut tokens);
        assert!(res.is_err());
    }
}
