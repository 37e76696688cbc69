//! Dense rank-2 `f64` container with a compile-time storage layout.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use rayon::prelude::*;

use super::layout::{Layout, LayoutKind};
use crate::error::{MatprodError, Result};

/// A rows × cols matrix whose physical order is chosen by `L`.
///
/// Extents are fixed at construction. Element access goes through `(i, j)`
/// pairs, so code written against `DenseMatrix<L>` never sees the physical
/// order.
///
/// # Example
///
/// ```
/// use matprod::matrix::{ColMajor, DenseMatrix};
///
/// let mut m = DenseMatrix::<ColMajor>::new("M", 2, 3).unwrap();
/// m[(1, 2)] = 4.0;
/// assert_eq!(m.get(1, 2), 4.0);
/// assert_eq!(m.as_slice()[2 * 2 + 1], 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<L: Layout> {
    name: String,
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    _layout: PhantomData<L>,
}

impl<L: Layout> DenseMatrix<L> {
    /// Allocate a zero-filled matrix.
    ///
    /// Fails with [`MatprodError::Allocation`] if `rows * cols` overflows or
    /// the buffer can't be reserved.
    pub fn new(name: impl Into<String>, rows: usize, cols: usize) -> Result<Self> {
        let name = name.into();
        let alloc_err = |name: &str| MatprodError::Allocation {
            name: name.to_string(),
            rows,
            cols,
        };

        let len = rows.checked_mul(cols).ok_or_else(|| alloc_err(&name))?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| alloc_err(&name))?;
        data.resize(len, 0.0);

        Ok(Self {
            name,
            rows,
            cols,
            data,
            _layout: PhantomData,
        })
    }

    /// Allocate and set every element to `f(i, j)`.
    pub fn from_fn(
        name: impl Into<String>,
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self> {
        let mut m = Self::new(name, rows, cols)?;
        for i in 0..rows {
            for j in 0..cols {
                m.set(i, j, f(i, j));
            }
        }
        Ok(m)
    }

    /// Copy the logical contents into a matrix with another layout.
    pub fn to_layout<M: Layout>(&self) -> Result<DenseMatrix<M>> {
        DenseMatrix::from_fn(self.name.clone(), self.rows, self.cols, |i, j| {
            self.get(i, j)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Size along dimension 0 (rows) or 1 (cols).
    ///
    /// # Panics
    ///
    /// Panics if `dim >= 2`.
    pub fn extent(&self, dim: usize) -> usize {
        match dim {
            0 => self.rows,
            1 => self.cols,
            _ => panic!("{}: dimension {} out of range for rank 2", self.name, dim),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn layout(&self) -> LayoutKind {
        L::KIND
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(
            i < self.rows && j < self.cols,
            "{}: ({}, {}) outside {}x{}",
            self.name,
            i,
            j,
            self.rows,
            self.cols
        );
        L::offset(i, j, self.rows, self.cols)
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.offset(i, j)]
    }

    #[inline(always)]
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        let offset = self.offset(i, j);
        &mut self.data[offset]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        *self.get_mut(i, j) = value;
    }

    fn check(&self, i: usize, j: usize) -> Result<usize> {
        if i < self.rows && j < self.cols {
            Ok(L::offset(i, j, self.rows, self.cols))
        } else {
            Err(MatprodError::IndexOutOfBounds {
                name: self.name.clone(),
                row: i,
                col: j,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Checked read; errors instead of relying on the caller's range guarantee.
    pub fn try_get(&self, i: usize, j: usize) -> Result<f64> {
        self.check(i, j).map(|offset| self.data[offset])
    }

    /// Checked write access.
    pub fn try_get_mut(&mut self, i: usize, j: usize) -> Result<&mut f64> {
        let offset = self.check(i, j)?;
        Ok(&mut self.data[offset])
    }

    /// Physical buffer in layout order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Parallel iterator over mutable views of each logical row.
    ///
    /// Works for any layout: a column-major row is a strided view. Rows are
    /// disjoint, so each view can be written from its own task.
    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = RowMut<'_>> + '_ {
        let (rows, cols) = (self.rows, self.cols);
        let stride = L::col_stride(rows, cols);
        let base = SendPtr(self.data.as_mut_ptr());

        (0..rows).into_par_iter().map(move |i| RowMut {
            index: i,
            // wrapping_add: an empty row never dereferences its pointer
            ptr: base.get().wrapping_add(L::offset(i, 0, rows, cols)),
            len: cols,
            stride,
            _marker: PhantomData,
        })
    }
}

impl<L: Layout> Index<(usize, usize)> for DenseMatrix<L> {
    type Output = f64;

    #[inline(always)]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[self.offset(i, j)]
    }
}

impl<L: Layout> IndexMut<(usize, usize)> for DenseMatrix<L> {
    #[inline(always)]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        self.get_mut(i, j)
    }
}

#[derive(Clone, Copy)]
struct SendPtr(*mut f64);

// SAFETY: only used to hand out disjoint row views of a buffer that is
// mutably borrowed for the lifetime of those views.
unsafe impl Send for SendPtr {}
unsafe impl Sync for SendPtr {}

impl SendPtr {
    // Method access keeps closures capturing the whole wrapper, not the
    // raw pointer field.
    #[inline(always)]
    fn get(self) -> *mut f64 {
        self.0
    }
}

/// Mutable view of one logical row of a [`DenseMatrix`].
pub struct RowMut<'a> {
    index: usize,
    ptr: *mut f64,
    len: usize,
    stride: usize,
    _marker: PhantomData<&'a mut [f64]>,
}

// SAFETY: a RowMut is the only handle to its elements while it lives.
unsafe impl Send for RowMut<'_> {}

impl RowMut<'_> {
    /// Row index within the parent matrix.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn get(&self, j: usize) -> f64 {
        assert!(j < self.len, "column {} out of range for row of {}", j, self.len);
        // SAFETY: j < len, and (index, j) maps inside the parent buffer.
        unsafe { *self.ptr.add(j * self.stride) }
    }

    #[inline(always)]
    pub fn get_mut(&mut self, j: usize) -> &mut f64 {
        assert!(j < self.len, "column {} out of range for row of {}", j, self.len);
        // SAFETY: as in `get`; no other view covers (index, j).
        unsafe { &mut *self.ptr.add(j * self.stride) }
    }
}
