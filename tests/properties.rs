use matprod::init::RandomStream;
use matprod::{ColMajor, DenseMatrix, MatprodError, RowMajor, fill, matrix_product, try_matrix_product};
use proptest::prelude::*;

fn filled<L: matprod::Layout>(stream: &mut RandomStream, name: &str, rows: usize, cols: usize) -> DenseMatrix<L> {
    let mut m = DenseMatrix::<L>::new(name, rows, cols).unwrap();
    fill(stream, &mut m);
    m
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Swapping A's or B's physical layout never changes C
    #[test]
    fn prop_layout_independence(
        m in 1usize..12,
        n in 1usize..12,
        k in 1usize..12,
        seed in any::<u64>(),
    ) {
        let mut stream = RandomStream::new(seed);
        let alpha = stream.next_scalar();
        let a: DenseMatrix<RowMajor> = filled(&mut stream, "A", m, k);
        let b: DenseMatrix<ColMajor> = filled(&mut stream, "B", k, n);
        let beta = stream.next_scalar();
        let c0: DenseMatrix<RowMajor> = filled(&mut stream, "C", m, n);

        let a_left: DenseMatrix<ColMajor> = a.to_layout().unwrap();
        let b_right: DenseMatrix<RowMajor> = b.to_layout().unwrap();

        let mut c1 = c0.clone();
        let mut c2 = c0.clone();
        matrix_product(alpha, &a, &b, beta, &mut c1);
        matrix_product(alpha, &a_left, &b_right, beta, &mut c2);

        prop_assert_eq!(c1.as_slice(), c2.as_slice());
    }

    /// alpha = 0 leaves C scaled by beta, whatever A and B hold
    #[test]
    fn prop_alpha_zero(
        m in 1usize..10,
        n in 1usize..10,
        k in 1usize..10,
        beta in 0.0f64..4.0,
        seed in any::<u64>(),
    ) {
        let mut stream = RandomStream::new(seed);
        let a: DenseMatrix<ColMajor> = filled(&mut stream, "A", m, k);
        let b: DenseMatrix<RowMajor> = filled(&mut stream, "B", k, n);
        let c0: DenseMatrix<RowMajor> = filled(&mut stream, "C", m, n);

        let mut c = c0.clone();
        matrix_product(0.0, &a, &b, beta, &mut c);

        for (old, new) in c0.as_slice().iter().zip(c.as_slice()) {
            prop_assert_eq!(*new, old * beta);
        }
    }

    /// Any mismatched triple is rejected and C is left alone
    #[test]
    fn prop_shape_mismatch_rejected(
        a_rows in 1usize..6,
        a_cols in 1usize..6,
        b_rows in 1usize..6,
        b_cols in 1usize..6,
        c_rows in 1usize..6,
        c_cols in 1usize..6,
    ) {
        let consistent = a_rows == c_rows && b_cols == c_cols && a_cols == b_rows;
        let a = DenseMatrix::<RowMajor>::new("A", a_rows, a_cols).unwrap();
        let b = DenseMatrix::<ColMajor>::new("B", b_rows, b_cols).unwrap();
        let mut c = DenseMatrix::<RowMajor>::from_fn("C", c_rows, c_cols, |_, _| 1.5).unwrap();

        let result = try_matrix_product(1.0, &a, &b, 2.0, &mut c);

        if consistent {
            prop_assert!(result.is_ok());
            // A and B are zero, so every element becomes 1.5 * 2.0
            prop_assert!(c.as_slice().iter().all(|&x| x == 3.0));
        } else {
            let is_shape_error = matches!(result, Err(MatprodError::ShapeMismatch { .. }));
            prop_assert!(is_shape_error);
            prop_assert!(c.as_slice().iter().all(|&x| x == 1.5));
        }
    }

    /// Fills depend on the seed and position only
    #[test]
    fn prop_fill_reproducible(rows in 0usize..20, cols in 0usize..20, seed in any::<u64>()) {
        let x: DenseMatrix<RowMajor> = filled(&mut RandomStream::new(seed), "X", rows, cols);
        let y: DenseMatrix<ColMajor> = filled(&mut RandomStream::new(seed), "X", rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                prop_assert_eq!(x.get(i, j).to_bits(), y.get(i, j).to_bits());
                prop_assert!((0.0..1.0).contains(&x.get(i, j)));
            }
        }
    }
}
