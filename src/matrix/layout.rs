//! Index-to-offset mappings for rank-2 storage.

use std::fmt;
use std::str::FromStr;

use crate::error::MatprodError;

/// Maps a logical `(row, col)` pair to a position in a flat buffer.
///
/// Implementations must be bijections from `[0, rows) x [0, cols)` onto
/// `[0, rows * cols)`; parallel row views rely on distinct pairs never
/// sharing an offset.
pub trait Layout: Copy + Default + Send + Sync + 'static {
    const KIND: LayoutKind;

    fn offset(row: usize, col: usize, rows: usize, cols: usize) -> usize;

    /// Distance in elements between `(i, j)` and `(i, j + 1)`.
    fn col_stride(rows: usize, cols: usize) -> usize;
}

/// Row-major storage: `offset = i * cols + j`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMajor;

/// Column-major storage: `offset = j * rows + i`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColMajor;

/// Row-major under its runtime name, as used by layout dispatch.
pub type LayoutRight = RowMajor;
/// Column-major under its runtime name.
pub type LayoutLeft = ColMajor;

impl Layout for RowMajor {
    const KIND: LayoutKind = LayoutKind::Right;

    #[inline(always)]
    fn offset(row: usize, col: usize, _rows: usize, cols: usize) -> usize {
        row * cols + col
    }

    #[inline(always)]
    fn col_stride(_rows: usize, _cols: usize) -> usize {
        1
    }
}

impl Layout for ColMajor {
    const KIND: LayoutKind = LayoutKind::Left;

    #[inline(always)]
    fn offset(row: usize, col: usize, rows: usize, _cols: usize) -> usize {
        col * rows + row
    }

    #[inline(always)]
    fn col_stride(rows: usize, _cols: usize) -> usize {
        rows
    }
}

/// Runtime name of a layout, used to pick a monomorphised kernel from
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Row-major
    Right,
    /// Column-major
    Left,
}

impl LayoutKind {
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Right => "right",
            LayoutKind::Left => "left",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutKind {
    type Err = MatprodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "right" | "row-major" | "row" => Ok(LayoutKind::Right),
            "left" | "col-major" | "column-major" | "col" => Ok(LayoutKind::Left),
            other => Err(MatprodError::InvalidArgument {
                op: "layout",
                msg: format!("unknown layout '{other}', expected 'right' or 'left'"),
            }),
        }
    }
}
