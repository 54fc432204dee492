use super::{Bindings, CompiledFilter, EvalError, ExpressionEvaluator};
use minijinja::{Environment, Expression};

/// Filter expressions written in minijinja's expression syntax:
///
/// ```text
/// user.state == "enabled"
/// "admin" in user.groups
/// user.email is endingwith("@example.com") and not user.locked
/// ```
///
/// Missing fields are undefined, which is falsy. Syntax errors, unknown
/// filters/tests and invalid operations are reported as [`EvalError`].
pub struct JinjaEvaluator {
    env: Environment<'static>,
}

impl JinjaEvaluator {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }
}

impl Default for JinjaEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEvaluator for JinjaEvaluator {
    fn compile<'e>(
        &'e self,
        expression: &'e str,
    ) -> Result<Box<dyn CompiledFilter + 'e>, EvalError> {
        let compiled = self
            .env
            .compile_expression_owned(expression.to_string())
            .map_err(|e| EvalError::new(expression, e.to_string()))?;
        Ok(Box::new(JinjaFilter {
            expression,
            compiled,
        }))
    }
}

struct JinjaFilter<'e> {
    expression: &'e str,
    compiled: Expression<'e, 'static>,
}

impl CompiledFilter for JinjaFilter<'_> {
    fn matches(&self, bindings: &Bindings<'_>) -> Result<bool, EvalError> {
        let value = self
            .compiled
            .eval(bindings)
            .map_err(|e| EvalError::new(self.expression, e.to_string()))?;
        Ok(value.is_true())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_records, BINDING_NAME};
    use crate::model::{UserRecord, Users};

    fn alice() -> UserRecord {
        UserRecord::new("alice")
            .with_field("email", "alice@example.com")
            .with_field("state", "enabled")
            .with_field("age", 34)
            .with_field(
                "groups",
                serde_yaml::Value::Sequence(vec!["admin".into(), "editors".into()]),
            )
    }

    fn eval(expression: &str, record: &UserRecord) -> Result<bool, EvalError> {
        let bindings = Bindings::from([(BINDING_NAME, record)]);
        JinjaEvaluator::new().evaluate(expression, &bindings)
    }

    #[test]
    fn compares_fields() {
        let user = alice();
        assert!(eval(r#"user.state == "enabled""#, &user).unwrap());
        assert!(!eval(r#"user.state == "disabled""#, &user).unwrap());
        assert!(eval("user.age > 30", &user).unwrap());
        assert!(eval(r#"user.username == "alice""#, &user).unwrap());
    }

    #[test]
    fn membership_and_tests() {
        let user = alice();
        assert!(eval(r#""admin" in user.groups"#, &user).unwrap());
        assert!(!eval(r#""owners" in user.groups"#, &user).unwrap());
        assert!(eval(r#"user.email is endingwith("@example.com")"#, &user).unwrap());
    }

    #[test]
    fn missing_field_is_falsy() {
        let user = alice();
        assert!(!eval(r#"user.nickname == "ally""#, &user).unwrap());
        assert!(!eval("user.nickname", &user).unwrap());
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = eval("user.age >", &alice()).unwrap_err();
        assert_eq!(err.expression, "user.age >");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn compiled_filter_is_reused_across_records() {
        let evaluator = JinjaEvaluator::new();
        let compiled = evaluator.compile("user.age > 30").unwrap();
        let bob = UserRecord::new("bob").with_field("age", 20);

        assert!(compiled
            .matches(&Bindings::from([(BINDING_NAME, &alice())]))
            .unwrap());
        assert!(!compiled
            .matches(&Bindings::from([(BINDING_NAME, &bob)]))
            .unwrap());
    }

    #[test]
    fn integer_keyed_mappings_are_indexable() {
        let codes: serde_yaml::Value = serde_yaml::from_str("{1: one}").unwrap();
        let user = alice().with_field("codes", codes);

        assert!(eval(r#"user.codes[1] == "one""#, &user).unwrap());
    }

    #[test]
    fn data_dependent_failure_empties_the_listing() {
        let mut records = Users::new();
        records.insert("alice".into(), alice());
        records.insert(
            "bob".into(),
            UserRecord::new("bob").with_field("age", "unknown"),
        );

        let (kept, error) = filter_records(&JinjaEvaluator::new(), records, "user.age + 1 > 30");

        assert!(kept.is_empty());
        assert!(error.is_some());
    }
}
