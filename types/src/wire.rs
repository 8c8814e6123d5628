//! Conversions between the generated protobuf messages and domain types.

use crate::compute::{ComputeRequest, ComputeResponse, Matrix as WireMatrix, Row};
use crate::{Error, Matrix, Operation};

impl WireMatrix {
    /// Builds a wire matrix from raw rows. Ragged rows are carried as-is.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Self {
        Self {
            rows: rows.into_iter().map(|values| Row { values }).collect(),
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.rows.iter().map(|row| row.values.clone()).collect()
    }
}

impl From<Matrix> for WireMatrix {
    fn from(matrix: Matrix) -> Self {
        Self::from_rows(matrix.into_rows())
    }
}

impl TryFrom<WireMatrix> for Matrix {
    type Error = Error;

    fn try_from(wire: WireMatrix) -> Result<Self, Self::Error> {
        Matrix::from_rows(wire.rows.into_iter().map(|row| row.values).collect())
    }
}

impl ComputeRequest {
    pub fn new(operation: Operation, a: Matrix, b: Option<Matrix>) -> Self {
        Self {
            operation: operation.as_str().to_string(),
            matrix_a: Some(a.into()),
            matrix_b: b.map(Into::into),
        }
    }
}

impl ComputeResponse {
    pub fn success(result: Matrix) -> Self {
        Self {
            result: Some(result.into()),
            error: String::new(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            result: None,
            error: error.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Result rows, empty when the response carries an error.
    pub fn result_rows(&self) -> Vec<Vec<i64>> {
        self.result.as_ref().map(WireMatrix::to_rows).unwrap_or_default()
    }
}
