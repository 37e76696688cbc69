//! The matrix-product kernel.
//!
//! One rayon task per output row; inside a task the `j` and `k` loops run
//! sequentially. `A` and `B` are read through their `(i, j)` accessors, so
//! any combination of operand layouts goes through the same code and only
//! the memory access pattern changes.

pub mod product;

pub use product::{check_shapes, matrix_product, try_matrix_product};
