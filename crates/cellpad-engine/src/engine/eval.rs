//! Formula evaluation against a grid snapshot.
//!
//! A range resolves to the cells between its two endpoints in storage order,
//! not to a rectangular block: `A1:B2` on a three-column grid covers
//! `A1 B1 C1 A2 B2`. When `end` comes before `start` the run is empty.

use regex::Regex;
use std::sync::OnceLock;

use super::cell::Cell;
use super::formula::{Formula, FormulaRange, Function, parse_formula};
use super::grid::Grid;
use crate::error::EvalError;

/// Leading numeric prefix accepted by the coercion rule.
fn numeric_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("numeric prefix regex must compile")
    })
}

/// Coerce cell text to a number.
///
/// Leading whitespace is skipped and the longest numeric prefix is used
/// (`"12abc"` is 12). Text with no numeric prefix coerces to 0.
pub fn coerce(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let Some(m) = numeric_prefix_re().find(trimmed) else {
        return 0.0;
    };
    match m.as_str().parse::<f64>() {
        Ok(n) if !n.is_nan() => n,
        _ => 0.0,
    }
}

/// Resolve a range to its cells in storage order.
pub fn resolve_range<'g>(grid: &'g Grid, range: &FormulaRange) -> Result<Vec<&'g Cell>, EvalError> {
    let start = grid
        .position_of(&range.start)
        .ok_or_else(|| EvalError::UnresolvedAddress(range.start.clone()))?;
    let end = grid
        .position_of(&range.end)
        .ok_or_else(|| EvalError::UnresolvedAddress(range.end.clone()))?;

    if end < start {
        return Ok(Vec::new());
    }
    Ok(grid.cells().skip(start).take(end - start + 1).collect())
}

/// Apply an aggregate to already-coerced values.
pub fn aggregate(function: Function, values: &[f64]) -> Result<f64, EvalError> {
    let sum = || values.iter().sum::<f64>();
    match function {
        Function::Sum => Ok(sum()),
        Function::Avg => {
            if values.is_empty() {
                Err(EvalError::DivisionByEmptyRange)
            } else {
                Ok(sum() / values.len() as f64)
            }
        }
        Function::Max => values
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or(EvalError::EmptyRange),
        Function::Min => values
            .iter()
            .copied()
            .reduce(f64::min)
            .ok_or(EvalError::EmptyRange),
        Function::Cnt => Ok(values.iter().filter(|v| **v != 0.0).count() as f64),
    }
}

/// Evaluate a parsed formula against the grid.
pub fn evaluate_formula(grid: &Grid, formula: &Formula) -> Result<f64, EvalError> {
    let cells = resolve_range(grid, &formula.range)?;
    let values: Vec<f64> = cells.iter().map(|c| coerce(&c.text)).collect();
    let result = aggregate(formula.function, &values);
    tracing::debug!(
        formula = %formula,
        cells = values.len(),
        ok = result.is_ok(),
        "evaluated formula"
    );
    result
}

/// Parse and evaluate a formula string against the grid.
pub fn evaluate(grid: &Grid, formula: &str) -> Result<f64, EvalError> {
    let parsed = parse_formula(formula)?;
    evaluate_formula(grid, &parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(texts: &[&[&str]]) -> Grid {
        Grid::from_texts(texts).unwrap()
    }

    #[test]
    fn test_coerce_follows_leading_prefix() {
        assert_eq!(coerce("5"), 5.0);
        assert_eq!(coerce("  3.5"), 3.5);
        assert_eq!(coerce("12abc"), 12.0);
        assert_eq!(coerce("-4e2x"), -400.0);
        assert_eq!(coerce(".5"), 0.5);
        assert_eq!(coerce("1."), 1.0);
        assert_eq!(coerce("abc"), 0.0);
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce("NaN"), 0.0);
        assert_eq!(coerce("1,000"), 1.0);
        assert_eq!(coerce("Infinity"), f64::INFINITY);
    }

    #[test]
    fn test_sum_single_cell() {
        let grid = grid_with(&[&["5"]]);
        assert_eq!(evaluate(&grid, "=SUM(A1:A1)"), Ok(5.0));
    }

    #[test]
    fn test_avg_two_cells() {
        let grid = grid_with(&[&["2", "4"]]);
        assert_eq!(evaluate(&grid, "=AVG(A1:B1)"), Ok(3.0));
    }

    #[test]
    fn test_cnt_counts_non_zero_only() {
        let grid = grid_with(&[&["0", "abc", "7"]]);
        assert_eq!(evaluate(&grid, "=CNT(A1:C1)"), Ok(1.0));
    }

    #[test]
    fn test_range_follows_storage_order() {
        let grid = grid_with(&[&["1", "2", "3"], &["4", "5", "6"]]);
        // B1..A2 covers B1 C1 A2, not a rectangle.
        assert_eq!(evaluate(&grid, "=SUM(B1:A2)"), Ok(9.0));
        assert_eq!(evaluate(&grid, "=SUM(A1:B2)"), Ok(15.0));
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let grid = grid_with(&[&["1", "2"]]);
        assert_eq!(evaluate(&grid, "=MAX(B1:A1)"), Err(EvalError::EmptyRange));
        assert_eq!(evaluate(&grid, "=MIN(B1:A1)"), Err(EvalError::EmptyRange));
        assert_eq!(evaluate(&grid, "=SUM(B1:A1)"), Ok(0.0));
        assert_eq!(evaluate(&grid, "=CNT(B1:A1)"), Ok(0.0));
        assert_eq!(
            evaluate(&grid, "=AVG(B1:A1)"),
            Err(EvalError::DivisionByEmptyRange)
        );
    }

    #[test]
    fn test_max_min_with_coercion() {
        let grid = grid_with(&[&["-3", "x", "8"]]);
        assert_eq!(evaluate(&grid, "=MAX(A1:C1)"), Ok(8.0));
        assert_eq!(evaluate(&grid, "=MIN(A1:C1)"), Ok(-3.0));
    }

    #[test]
    fn test_unresolved_address() {
        let grid = grid_with(&[&["1", "2"]]);
        assert_eq!(
            evaluate(&grid, "=SUM(A1:C1)"),
            Err(EvalError::UnresolvedAddress("C1".to_string()))
        );
        assert_eq!(
            evaluate(&grid, "=SUM(A0:A1)"),
            Err(EvalError::UnresolvedAddress("A0".to_string()))
        );
    }

    #[test]
    fn test_endpoints_resolve_by_exact_address() {
        let grid = grid_with(&[&["5"]]);
        assert!(grid.get_cell("A01").is_err());
        assert_eq!(
            evaluate(&grid, "=SUM(A01:A1)"),
            Err(EvalError::UnresolvedAddress("A01".to_string()))
        );
        assert_eq!(
            evaluate(&grid, "=SUM(A1:A001)"),
            Err(EvalError::UnresolvedAddress("A001".to_string()))
        );
    }

    #[test]
    fn test_not_a_formula() {
        let grid = grid_with(&[&["1"]]);
        assert_eq!(evaluate(&grid, "hello"), Err(EvalError::NotAFormula));
    }

    #[test]
    fn test_aggregate_direct() {
        assert_eq!(aggregate(Function::Sum, &[]), Ok(0.0));
        assert_eq!(aggregate(Function::Avg, &[1.0, 2.0, 6.0]), Ok(3.0));
        assert_eq!(aggregate(Function::Cnt, &[0.0, -1.0, 0.0]), Ok(1.0));
    }
}
