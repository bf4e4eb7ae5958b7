//! Typed error messages. Nothing here is ever propagated as a Lisp value —
//! evaluation never produces a Result; a failed primitive or special form
//! diagnoses through [`crate::interpreter::Interpreter::fail`] and returns
//! nil. These enums exist so that message text is generated consistently
//! (via `Display`) instead of by ad hoc `format!` calls scattered across
//! every builtin.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("unbound symbol: {0}")]
    UnboundSymbol(String),
    #[error("cannot apply")]
    CannotApply,
    #[error("{0}: expected {1} argument(s), got {2}")]
    Arity(String, String, usize),
    #[error("{0}: type mismatch")]
    TypeMismatch(String),
    #[error("division by zero")]
    DivideByZero,
    #[error("apply failed")]
    ApplyFailed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("unmatched )")]
    UnmatchedParen,
    #[error("EOF inside list")]
    EofInList,
    #[error("EOF inside string")]
    EofInString,
    #[error("string too long")]
    StringTooLong,
    #[error("empty token")]
    EmptyToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_error_formats_function_and_counts() {
        let msg = EvalError::Arity("car".into(), "1".into(), 2).to_string();
        assert_eq!(msg, "car: expected 1 argument(s), got 2");
    }
}
