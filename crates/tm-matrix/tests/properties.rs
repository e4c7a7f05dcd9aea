use proptest::prelude::*;
use tm_matrix::{CpuBackend, KernelConfig, Matrix, NaiveBackend};

fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(-100.0f64..100.0, rows * cols)
        .prop_map(move |data| Matrix::from_vec(rows, cols, data).unwrap())
}

fn operands() -> impl Strategy<Value = (Matrix, Matrix)> {
    (0usize..24, 0usize..24, 0usize..24)
        .prop_flat_map(|(m, k, n)| (matrix(m, k), matrix(k, n)))
}

proptest! {
    #[test]
    fn blocked_agrees_with_naive((a, b) in operands(), block in 1usize..9) {
        let backend = CpuBackend::with_config(
            KernelConfig::default().with_block_size(block).with_parallel_min_rows(0),
        ).unwrap();
        let got = a.matmul(&b, &backend).unwrap();
        let expected = a.matmul(&b, &NaiveBackend::new()).unwrap();

        prop_assert_eq!(got.shape(), expected.shape());
        for (x, y) in got.as_slice().iter().zip(expected.as_slice()) {
            prop_assert!((x - y).abs() <= 1e-9 * y.abs().max(1.0), "{} vs {}", x, y);
        }
    }

    #[test]
    fn right_identity_is_exact(a in (1usize..20, 1usize..20).prop_flat_map(|(r, c)| matrix(r, c))) {
        let id = Matrix::identity(a.cols()).unwrap();
        prop_assert_eq!(tm_matrix::multiply(&a, &id).unwrap(), a);
    }
}
