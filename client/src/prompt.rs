//! Interactive collection of a compute request.

use std::io::{self, BufRead, Write};

use matrix_dispatch_types::compute::{ComputeRequest, ComputeResponse, Matrix};
use matrix_dispatch_types::Operation;
use tonic::Status;

/// Prompts for an operation and its operands.
///
/// The operation name is sent as typed; the worker rejects unknown names.
/// Matrix B is only read for operations that take two operands.
pub fn collect_request<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<ComputeRequest> {
    write!(out, "Enter operation (add, multiply, transpose): ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let operation = line.trim().to_string();

    writeln!(
        out,
        "Enter Matrix A (enter rows; separate numbers by spaces, empty line to finish):"
    )?;
    let matrix_a = read_matrix(input, out)?;

    let binary = operation
        .parse::<Operation>()
        .is_ok_and(|op| op.operands() == 2);
    let matrix_b = if binary {
        writeln!(out, "Enter Matrix B (same format as Matrix A):")?;
        Some(Matrix::from_rows(read_matrix(input, out)?))
    } else {
        None
    };

    Ok(ComputeRequest {
        operation,
        matrix_a: Some(Matrix::from_rows(matrix_a)),
        matrix_b,
    })
}

/// Reads whitespace-separated rows until a blank line or end of input.
///
/// Tokens that are not integers become 0 and a warning is written to `out`.
pub fn read_matrix<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Vec<Vec<i64>>> {
    let mut rows = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        let mut row = Vec::new();
        for token in trimmed.split_whitespace() {
            match token.parse::<i64>() {
                Ok(value) => row.push(value),
                Err(_) => {
                    writeln!(out, "Invalid number '{}', using 0.", token)?;
                    row.push(0);
                }
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Prints the outcome of a request.
///
/// In-band errors and call failures are both printed as `Error: <message>`.
/// A call failure is also returned so the process exits unsuccessfully.
pub fn report<W: Write>(
    outcome: Result<ComputeResponse, Status>,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        Ok(response) if response.is_error() => writeln!(out, "Error: {}", response.error)?,
        Ok(response) => {
            writeln!(out, "Result:")?;
            write!(out, "{}", format_matrix(&response.result_rows()))?;
        }
        Err(status) => {
            writeln!(out, "Error: {}", status.message())?;
            return Err(status.into());
        }
    }
    Ok(())
}

/// Renders one row per line, as `[1 2 3]`.
pub fn format_matrix(rows: &[Vec<i64>]) -> String {
    let mut text = String::new();
    for row in rows {
        let cells: Vec<String> = row.iter().map(i64::to_string).collect();
        text.push('[');
        text.push_str(&cells.join(" "));
        text.push_str("]\n");
    }
    text
}
