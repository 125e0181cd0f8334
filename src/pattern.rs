use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

pub const FOREGROUND: char = 'O';
pub const BACKGROUND: char = '.';

/// An immutable rectangular grid of booleans.
///
/// Patterns are both the targets handed to the solver and the readable
/// output of a solved view. `true` cells are foreground (`O`), `false`
/// cells are background (`.`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// Parse a block of `O`/`.` lines.
    ///
    /// Leading and trailing blank lines are dropped and each line is
    /// trimmed before its characters are read.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut rows = Vec::new();

        for (line_idx, line) in text.trim().lines().enumerate() {
            let mut row = Vec::new();
            for (col_idx, ch) in line.trim().chars().enumerate() {
                match ch {
                    FOREGROUND => row.push(true),
                    BACKGROUND => row.push(false),
                    _ => {
                        return Err(FormatError::UnrecognizedChar {
                            line: line_idx + 1,
                            column: col_idx + 1,
                            ch,
                        })
                    }
                }
            }
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, FormatError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(FormatError::Empty);
        }

        let mut cells = Vec::with_capacity(height * width);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(FormatError::RaggedRows {
                    line: idx + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Pattern {
            height,
            width,
            cells,
        })
    }

    /// Build a pattern by evaluating `f(row, col)` for every cell.
    ///
    /// Panics if either dimension is zero.
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        assert!(height > 0 && width > 0, "pattern must be at least 1x1");
        let mut cells = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                cells.push(f(row, col));
            }
        }
        Pattern {
            height,
            width,
            cells,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(
            row < self.height && col < self.width,
            "cell ({}, {}) outside {}x{} pattern",
            row,
            col,
            self.height,
            self.width
        );
        self.cells[row * self.width + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.width)
    }

    pub fn count_foreground(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

impl FromStr for Pattern {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                let symbol = if cell { FOREGROUND } else { BACKGROUND };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_blank_lines_and_indentation() {
        let text = "\n\n    O.O\n    .O.\n\n";
        let pattern = Pattern::parse(text).unwrap();

        assert_eq!(pattern.dimensions(), (2, 3));
        assert!(pattern.get(0, 0));
        assert!(!pattern.get(0, 1));
        assert!(pattern.get(0, 2));
        assert!(pattern.get(1, 1));
        assert_eq!(pattern.count_foreground(), 3);
    }

    #[test]
    fn test_display_round_trip() {
        let text = "OO..\n.OO.\n..OO\n";
        let pattern = Pattern::parse(text).unwrap();

        assert_eq!(pattern.to_string(), text);
        assert_eq!(Pattern::parse(&pattern.to_string()).unwrap(), pattern);
    }

    #[test]
    fn test_unrecognized_char_reports_position() {
        let err = Pattern::parse("O.\n.x").unwrap_err();
        assert_eq!(
            err,
            FormatError::UnrecognizedChar {
                line: 2,
                column: 2,
                ch: 'x'
            }
        );
    }

    #[test]
    fn test_lowercase_o_is_not_foreground() {
        // 'o' only appears in direct renderings, never in targets
        assert!(matches!(
            Pattern::parse("o"),
            Err(FormatError::UnrecognizedChar { ch: 'o', .. })
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Pattern::parse("OOO\nOO\nOOO").unwrap_err();
        assert_eq!(
            err,
            FormatError::RaggedRows {
                line: 2,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_interior_blank_line_is_ragged() {
        assert!(matches!(
            Pattern::parse("O.\n\n.O"),
            Err(FormatError::RaggedRows { line: 2, found: 0, .. })
        ));
    }

    #[test]
    fn test_empty_text_rejected() {
        assert_eq!(Pattern::parse("   \n \n"), Err(FormatError::Empty));
        assert_eq!(Pattern::from_rows(vec![]), Err(FormatError::Empty));
        assert_eq!(Pattern::from_rows(vec![vec![]]), Err(FormatError::Empty));
    }

    #[test]
    fn test_from_fn_matches_parse() {
        let diagonal = Pattern::from_fn(2, 2, |r, c| r == c);
        assert_eq!(diagonal, "O.\n.O".parse::<Pattern>().unwrap());
    }
}
