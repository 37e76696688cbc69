//! Rank-2 matrix storage.
//!
//! `DenseMatrix<L>` owns a flat `f64` buffer; the layout tag `L` decides
//! whether that buffer is row-major (`RowMajor`, a.k.a. "Right") or
//! column-major (`ColMajor`, "Left"). Kernels only talk to the `(i, j)`
//! accessor, so swapping a layout is a type change, not a code change.

pub mod dense;
pub mod layout;

pub use dense::{DenseMatrix, RowMut};
pub use layout::{ColMajor, Layout, LayoutKind, LayoutLeft, LayoutRight, RowMajor};
