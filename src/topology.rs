//! Neighbor topology built from a configuration-supplied offset pattern.
//!
//! A pattern is a sequence of groups separated by `/`. Each group reads
//! `<row_offset> <col_offset> c<count>`: for a cell at `(r, c)` it adds the
//! candidates `(r + row_offset, c + col_offset + i)` for `i in 0..count`.
//! Candidates outside the grid or equal to the origin are dropped. There is no
//! wraparound.

use crate::error::PatternError;
use std::fmt;
use std::str::FromStr;

/// One row run of candidate neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborGroup {
    pub row_offset: i64,
    pub col_offset: i64,
    pub count: usize,
}

/// Parsed neighbor pattern, uniform across the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NeighborPattern {
    groups: Vec<NeighborGroup>,
}

impl NeighborPattern {
    pub fn new(groups: Vec<NeighborGroup>) -> Self {
        Self { groups }
    }

    /// The 8-connected neighborhood.
    pub fn moore() -> Self {
        Self::new(vec![
            NeighborGroup { row_offset: -1, col_offset: -1, count: 3 },
            NeighborGroup { row_offset: 0, col_offset: -1, count: 3 },
            NeighborGroup { row_offset: 1, col_offset: -1, count: 3 },
        ])
    }

    /// The 4-connected neighborhood.
    pub fn von_neumann() -> Self {
        Self::new(vec![
            NeighborGroup { row_offset: -1, col_offset: 0, count: 1 },
            NeighborGroup { row_offset: 0, col_offset: -1, count: 3 },
            NeighborGroup { row_offset: 1, col_offset: 0, count: 1 },
        ])
    }

    pub fn groups(&self) -> &[NeighborGroup] {
        &self.groups
    }

    /// Upper bound on the neighbor count of any cell (origin hits already excluded).
    pub fn max_degree(&self) -> usize {
        self.groups
            .iter()
            .map(|group| {
                let end = group.col_offset as i128 + group.count as i128;
                let covers_origin = group.row_offset == 0 && group.col_offset <= 0 && end > 0;
                group.count - usize::from(covers_origin)
            })
            .fold(0, usize::saturating_add)
    }

    /// Neighbor ids of the cell at `(row, col)` on a `rows x cols` grid, in emission order.
    ///
    /// Offsets and counts may be arbitrarily large; each group is clipped to the grid
    /// before it is walked.
    pub fn neighbors_of(&self, row: usize, col: usize, rows: usize, cols: usize) -> Vec<usize> {
        let mut neighbors = Vec::new();
        let (origin_row, origin_col) = (row as i128, col as i128);
        for group in &self.groups {
            let check_row = origin_row + group.row_offset as i128;
            if check_row < 0 || check_row >= rows as i128 {
                continue;
            }
            let first = origin_col + group.col_offset as i128;
            let start = first.max(0);
            let end = (first + group.count as i128).min(cols as i128);
            for check_col in start..end {
                if check_row == origin_row && check_col == origin_col {
                    continue;
                }
                neighbors.push(check_row as usize * cols + check_col as usize);
            }
        }
        neighbors
    }
}

impl FromStr for NeighborPattern {
    type Err = PatternError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let mut groups = Vec::new();
        for (index, raw) in pattern.split('/').enumerate() {
            let group = raw.trim();
            // A trailing separator or an empty pattern contributes nothing.
            if group.is_empty() {
                continue;
            }
            groups.push(parse_group(index, group)?);
        }
        Ok(Self { groups })
    }
}

fn parse_group(index: usize, group: &str) -> Result<NeighborGroup, PatternError> {
    let err = |token: &str, reason: &'static str| PatternError {
        group: index,
        token: token.to_string(),
        reason,
    };
    let tokens: Vec<&str> = group.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(err(group, "expected `<row_offset> <col_offset> c<count>`"));
    }
    let row_offset = tokens[0]
        .parse::<i64>()
        .map_err(|_| err(tokens[0], "row offset is not an integer"))?;
    let col_offset = tokens[1]
        .parse::<i64>()
        .map_err(|_| err(tokens[1], "column offset is not an integer"))?;
    let count = tokens[2]
        .strip_prefix('c')
        .ok_or_else(|| err(tokens[2], "missing `c` count marker"))?
        .parse::<usize>()
        .map_err(|_| err(tokens[2], "count is not a non-negative integer"))?;
    Ok(NeighborGroup { row_offset, col_offset, count })
}

impl fmt::Display for NeighborPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{} {} c{}", group.row_offset, group.col_offset, group.count)?;
        }
        Ok(())
    }
}
