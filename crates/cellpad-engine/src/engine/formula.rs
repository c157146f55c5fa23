//! Range formula parsing.
//!
//! Formulas have the shape `=FN(START:END)`. The function is the three
//! characters after `=`, uppercased; anything after them up to the `(` is
//! ignored, so `=sum(A1:A3)` and `=SUMMARY(A1:A3)` both select `SUM`.
//! The range is the first parenthesised group.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::address::Address;
use crate::error::EvalError;

/// An aggregate function a formula may name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sum,
    Avg,
    Max,
    Min,
    Cnt,
}

/// A formula function with its code and a one-line summary for help text.
pub struct Builtin {
    pub code: &'static str,
    pub function: Function,
    pub description: &'static str,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        code: "SUM",
        function: Function::Sum,
        description: "Sum of values in the range",
    },
    Builtin {
        code: "AVG",
        function: Function::Avg,
        description: "Average of values in the range",
    },
    Builtin {
        code: "MAX",
        function: Function::Max,
        description: "Largest value in the range",
    },
    Builtin {
        code: "MIN",
        function: Function::Min,
        description: "Smallest value in the range",
    },
    Builtin {
        code: "CNT",
        function: Function::Cnt,
        description: "Count of non-zero values in the range",
    },
];

impl Function {
    /// Look up a function by its three-letter code (already uppercased).
    pub fn from_code(code: &str) -> Option<Function> {
        BUILTINS.iter().find(|b| b.code == code).map(|b| b.function)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Function::Sum => "SUM",
            Function::Avg => "AVG",
            Function::Max => "MAX",
            Function::Min => "MIN",
            Function::Cnt => "CNT",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Two endpoints of a storage-order run of cells, kept as written.
///
/// Endpoints are resolved against the grid by exact address, so `A01`
/// is well-formed here but names no cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaRange {
    pub start: String,
    pub end: String,
}

impl fmt::Display for FormulaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// A parsed range formula.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
    pub function: Function,
    pub range: FormulaRange,
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "={}({})", self.function, self.range)
    }
}

/// Regex that matches the first parenthesised group of a formula.
fn group_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^)]+)\)").expect("formula group regex must compile"))
}

/// Parse `=FN(START:END)`, checking the prefix, then the function code,
/// then the range, in that order.
pub fn parse_formula(formula: &str) -> Result<Formula, EvalError> {
    let Some(body) = formula.strip_prefix('=') else {
        return Err(EvalError::NotAFormula);
    };

    let code: String = body.chars().take(3).collect::<String>().to_uppercase();
    let function = Function::from_code(&code).ok_or(EvalError::UnknownFunction(code))?;

    let group = group_re()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| EvalError::MalformedRange("missing (START:END)".to_string()))?;

    let range = parse_range(group)?;
    Ok(Formula { function, range })
}

/// Parse `START:END`. Exactly one `:`, both sides well-formed addresses.
pub fn parse_range(group: &str) -> Result<FormulaRange, EvalError> {
    let mut parts = group.split(':');
    let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(EvalError::MalformedRange(group.to_string()));
    };
    if Address::parse(start).is_none() || Address::parse(end).is_none() {
        return Err(EvalError::MalformedRange(group.to_string()));
    }
    Ok(FormulaRange {
        start: start.to_string(),
        end: end.to_string(),
    })
}

impl FromStr for Formula {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_formula(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let f = parse_formula("=SUM(A1:B3)").unwrap();
        assert_eq!(f.function, Function::Sum);
        assert_eq!(f.range.start, "A1");
        assert_eq!(f.range.end, "B3");
        assert_eq!(f.to_string(), "=SUM(A1:B3)");
    }

    #[test]
    fn test_function_code_is_case_insensitive() {
        assert_eq!(parse_formula("=avg(A1:A2)").unwrap().function, Function::Avg);
        assert_eq!(parse_formula("=Cnt(A1:A2)").unwrap().function, Function::Cnt);
    }

    #[test]
    fn test_only_three_characters_select_the_function() {
        assert_eq!(parse_formula("=MAXIMUM(A1:A2)").unwrap().function, Function::Max);
    }

    #[test]
    fn test_not_a_formula() {
        assert_eq!(parse_formula("hello"), Err(EvalError::NotAFormula));
        assert_eq!(parse_formula(" =SUM(A1:A2)"), Err(EvalError::NotAFormula));
        assert_eq!(parse_formula(""), Err(EvalError::NotAFormula));
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            parse_formula("=FOO(A1:A2)"),
            Err(EvalError::UnknownFunction("FOO".to_string()))
        );
        assert_eq!(
            parse_formula("=SU"),
            Err(EvalError::UnknownFunction("SU".to_string()))
        );
    }

    #[test]
    fn test_function_checked_before_range() {
        assert!(matches!(
            parse_formula("=XYZ"),
            Err(EvalError::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_malformed_range() {
        for bad in [
            "=SUM",
            "=SUM()",
            "=SUM(A1)",
            "=SUM(A1:B2:C3)",
            "=SUM(a1:b2)",
            "=SUM(A1:)",
            "=SUM(A1 :B2)",
        ] {
            assert!(
                matches!(parse_formula(bad), Err(EvalError::MalformedRange(_))),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_first_group_is_used() {
        let f = parse_formula("=MIN(A1:A2) (B1:B2)").unwrap();
        assert_eq!(f.range.end, "A2");
    }

    #[test]
    fn test_range_keeps_endpoints_as_written() {
        let range = parse_range("A01:B2").unwrap();
        assert_eq!(range.start, "A01");
        assert_eq!(range.to_string(), "A01:B2");
    }

    #[test]
    fn test_builtins_cover_every_function() {
        for b in BUILTINS {
            assert_eq!(Function::from_code(b.code), Some(b.function));
            assert_eq!(b.function.code(), b.code);
            assert!(!b.description.is_empty());
        }
        assert_eq!(BUILTINS.len(), 5);
    }

    #[test]
    fn test_from_str() {
        let f: Formula = "=CNT(C1:C9)".parse().unwrap();
        assert_eq!(f.function, Function::Cnt);
    }
}
