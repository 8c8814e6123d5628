//! Pure matrix operations.
//!
//! Arithmetic wraps on `i64` overflow.

use matrix_dispatch_types::compute::{ComputeRequest, ComputeResponse, Matrix as WireMatrix};
use matrix_dispatch_types::{Matrix, Operation};

use crate::ComputeError;

/// Runs the requested operation, folding any validation error into the
/// response.
pub fn compute(request: ComputeRequest) -> ComputeResponse {
    match evaluate(request) {
        Ok(result) => ComputeResponse::success(result),
        Err(e) => ComputeResponse::failure(e.to_string()),
    }
}

/// Runs the requested operation.
pub fn evaluate(request: ComputeRequest) -> Result<Matrix, ComputeError> {
    let operation: Operation = request
        .operation
        .parse()
        .map_err(|_| ComputeError::UnsupportedOperation)?;

    let a = operand(request.matrix_a)?;
    match operation {
        Operation::Add => add(&a, &operand(request.matrix_b)?),
        Operation::Multiply => multiply(&a, &operand(request.matrix_b)?),
        Operation::Transpose => Ok(transpose(&a)),
    }
}

fn operand(wire: Option<WireMatrix>) -> Result<Matrix, ComputeError> {
    match wire {
        Some(wire) => Matrix::try_from(wire).map_err(|_| ComputeError::RaggedMatrix),
        None => Ok(Matrix::default()),
    }
}

/// Elementwise sum of two same-shaped, non-empty matrices.
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix, ComputeError> {
    if a.is_empty() || b.is_empty() || a.shape() != b.shape() {
        return Err(ComputeError::AdditionMismatch);
    }
    Ok(Matrix::from_fn(a.rows(), a.cols(), |i, j| {
        a.get(i, j).wrapping_add(b.get(i, j))
    }))
}

/// Matrix product of an r x k and a k x c matrix.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, ComputeError> {
    if a.is_empty() || b.is_empty() || a.cols() != b.rows() {
        return Err(ComputeError::MultiplicationMismatch);
    }
    Ok(Matrix::from_fn(a.rows(), b.cols(), |i, j| {
        let mut sum = 0i64;
        for k in 0..a.cols() {
            sum = sum.wrapping_add(a.get(i, k).wrapping_mul(b.get(k, j)));
        }
        sum
    }))
}

/// Swaps rows and columns. The transpose of an empty matrix is empty.
pub fn transpose(a: &Matrix) -> Matrix {
    Matrix::from_fn(a.cols(), a.rows(), |i, j| a.get(j, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: Vec<Vec<i64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    fn request(op: &str, a: Vec<Vec<i64>>, b: Option<Vec<Vec<i64>>>) -> ComputeRequest {
        ComputeRequest {
            operation: op.to_string(),
            matrix_a: Some(WireMatrix::from_rows(a)),
            matrix_b: b.map(WireMatrix::from_rows),
        }
    }

    #[test]
    fn test_add_is_cellwise() {
        let a = m(vec![vec![1, -2, 3], vec![4, 5, 6]]);
        let b = m(vec![vec![10, 20, 30], vec![-4, 0, 7]]);
        let sum = add(&a, &b).unwrap();

        assert_eq!(sum.shape(), (2, 3));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(sum.get(i, j), a.get(i, j) + b.get(i, j));
            }
        }
    }

    #[test]
    fn test_add_mismatch() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
        assert_eq!(add(&a, &b), Err(ComputeError::AdditionMismatch));
        assert_eq!(add(&Matrix::default(), &Matrix::default()), Err(ComputeError::AdditionMismatch));
    }

    #[test]
    fn test_multiply_shape_and_dot_products() {
        let a = m(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let b = m(vec![vec![7, 8], vec![9, 10], vec![11, 12]]);
        let product = multiply(&a, &b).unwrap();

        assert_eq!(product.shape(), (2, 2));
        for i in 0..2 {
            for j in 0..2 {
                let expected: i64 = (0..3).map(|k| a.get(i, k) * b.get(k, j)).sum();
                assert_eq!(product.get(i, j), expected);
            }
        }
        assert_eq!(product.into_rows(), vec![vec![58, 64], vec![139, 154]]);
    }

    #[test]
    fn test_multiply_mismatch() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![1, 2, 3]]);
        assert_eq!(multiply(&a, &b), Err(ComputeError::MultiplicationMismatch));
        assert_eq!(multiply(&a, &Matrix::default()), Err(ComputeError::MultiplicationMismatch));
    }

    #[test]
    fn test_multiply_wraps_on_overflow() {
        let a = m(vec![vec![i64::MAX]]);
        let b = m(vec![vec![2]]);
        assert_eq!(multiply(&a, &b).unwrap().get(0, 0), i64::MAX.wrapping_mul(2));
    }

    #[test]
    fn test_transpose_round_trip() {
        let shapes = [
            vec![vec![1]],
            vec![vec![1, 2, 3]],
            vec![vec![1], vec![2], vec![3]],
            vec![vec![1, 2, 3], vec![4, 5, 6]],
        ];
        for rows in shapes {
            let a = m(rows);
            let t = transpose(&a);
            assert_eq!(t.shape(), (a.cols(), a.rows()));
            assert_eq!(transpose(&t), a);
        }
    }

    #[test]
    fn test_transpose_empty() {
        assert!(transpose(&Matrix::default()).is_empty());
    }

    #[test]
    fn test_transpose_scenario() {
        let response = compute(request("transpose", vec![vec![1, 2, 3], vec![4, 5, 6]], None));
        assert_eq!(response.error, "");
        assert_eq!(response.result_rows(), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
    }

    #[test]
    fn test_add_scenario_mismatch() {
        let response = compute(request(
            "add",
            vec![vec![1, 1]],
            Some(vec![vec![2, 2], vec![3, 3]]),
        ));
        assert_eq!(response.error, "matrices dimensions do not match for addition");
        assert!(response.result_rows().is_empty());
    }

    #[test]
    fn test_unsupported_operation() {
        let response = compute(request("divide", vec![vec![1]], None));
        assert_eq!(response.error, "unsupported operation");
        assert!(response.result.is_none());
    }

    #[test]
    fn test_ragged_operand() {
        let response = compute(request("transpose", vec![vec![1, 2], vec![3]], None));
        assert_eq!(response.error, "matrix rows must have equal length");
    }

    #[test]
    fn test_missing_second_operand_is_a_mismatch() {
        let response = compute(request("multiply", vec![vec![1, 2]], None));
        assert_eq!(response.error, "matrices dimensions do not match for multiplication");
    }
}
