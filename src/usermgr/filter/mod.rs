//! Record filtering.
//!
//! A filter is a boolean expression, compiled once per listing and then
//! evaluated once per record with the record bound to the variable `user`. The expression language is not ours: it comes
//! from an [`ExpressionEvaluator`], with [`jinja::JinjaEvaluator`] as the
//! production implementation.
//!
//! Filtering is all-or-nothing. If evaluation fails for any record, no records
//! are returned and the error is handed back for display.

use crate::model::{UserRecord, Users};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub mod jinja;

/// Name the record is bound to inside filter expressions.
pub const BINDING_NAME: &str = "user";

/// Variables visible to an expression.
pub type Bindings<'a> = BTreeMap<&'a str, &'a UserRecord>;

/// A filter expression could not be evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("invalid filter `{expression}`: {message}")]
pub struct EvalError {
    pub expression: String,
    pub message: String,
}

impl EvalError {
    pub fn new(expression: &str, message: impl Into<String>) -> Self {
        Self {
            expression: expression.to_string(),
            message: message.into(),
        }
    }
}

/// An expression ready to run against many sets of bindings.
pub trait CompiledFilter {
    fn matches(&self, bindings: &Bindings<'_>) -> Result<bool, EvalError>;
}

/// Evaluates a boolean expression against named bindings.
pub trait ExpressionEvaluator {
    /// Parse `expression`. Syntax errors surface here, before any record is seen.
    fn compile<'e>(
        &'e self,
        expression: &'e str,
    ) -> Result<Box<dyn CompiledFilter + 'e>, EvalError>;

    /// One-shot compile and match.
    fn evaluate(&self, expression: &str, bindings: &Bindings<'_>) -> Result<bool, EvalError> {
        self.compile(expression)?.matches(bindings)
    }
}

/// Keep the records for which `expression` is truthy.
///
/// A blank expression returns `records` untouched. Any evaluation error
/// discards everything: the result is an empty map plus the error.
pub fn filter_records<E: ExpressionEvaluator + ?Sized>(
    evaluator: &E,
    records: Users,
    expression: &str,
) -> (Users, Option<EvalError>) {
    if expression.trim().is_empty() {
        return (records, None);
    }

    let compiled = match evaluator.compile(expression) {
        Ok(compiled) => compiled,
        Err(e) => return (Users::new(), Some(e)),
    };

    let mut kept = Users::new();
    for (username, record) in records {
        let matched = {
            let bindings = Bindings::from([(BINDING_NAME, &record)]);
            compiled.matches(&bindings)
        };
        match matched {
            Ok(true) => {
                kept.insert(username, record);
            }
            Ok(false) => {}
            Err(e) => return (Users::new(), Some(e)),
        }
    }

    (kept, None)
}
