//! Domain matrix and operation types.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A rectangular matrix of `i64` values, stored row by row.
///
/// Every row has the same length. The empty matrix has zero rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vec<i64>>,
    cols: usize,
}

impl Matrix {
    /// Builds a matrix from its rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, Error> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(Error::RaggedMatrix);
        }
        Ok(Self { rows, cols })
    }

    /// Builds a `rows` x `cols` matrix whose cell `(i, j)` is `f(i, j)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> i64) -> Self {
        let rows = (0..rows)
            .map(|i| (0..cols).map(|j| f(i, j)).collect())
            .collect();
        Self { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Returns the value at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> i64 {
        self.rows[i][j]
    }

    pub fn as_rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<i64>> {
        self.rows
    }
}

/// The closed set of operations a worker can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Multiply,
    Transpose,
}

impl Operation {
    /// Wire name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Multiply => "multiply",
            Operation::Transpose => "transpose",
        }
    }

    /// Number of matrix operands the operation consumes.
    pub fn operands(&self) -> usize {
        match self {
            Operation::Add | Operation::Multiply => 2,
            Operation::Transpose => 1,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "multiply" => Ok(Operation::Multiply),
            "transpose" => Ok(Operation::Transpose),
            other => Err(Error::UnknownOperation(other.to_string())),
        }
    }
}
