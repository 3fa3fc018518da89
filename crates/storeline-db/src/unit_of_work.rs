//! # Unit of Work
//!
//! An ordered list of write statements applied inside one transaction.
//! Either every step lands or none does.
//!
//! ```text
//! place order:
//!   1. INSERT INTO Orders ...                 (any row count)
//!   2. UPDATE Product SET numberOfUnits - n   (exactly one row)
//!        │
//!        ├── step fails / wrong row count ──► ROLLBACK, error returned
//!        └── all steps ok ───────────────────► COMMIT
//! ```
//!
//! Committed through [`Database::commit`](crate::Database::commit).

use crate::statement::Statement;

/// Row-count requirement attached to a step.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expectation {
    Any,
    ExactlyOne { entity: String, key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Step {
    pub(crate) statement: Statement,
    pub(crate) expect: Expectation,
}

/// Write statements committed all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitOfWork {
    steps: Vec<Step>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a step with no row-count requirement.
    pub fn write(mut self, statement: Statement) -> Self {
        self.steps.push(Step {
            statement,
            expect: Expectation::Any,
        });
        self
    }

    /// Adds a step that must affect exactly one row. Any other count rolls
    /// the whole unit back with `DbError::NotFound { entity, key }`.
    pub fn write_one(
        mut self,
        statement: Statement,
        entity: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        self.steps.push(Step {
            statement,
            expect: Expectation::ExactlyOne {
                entity: entity.into(),
                key: key.into(),
            },
        });
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_keep_order() {
        let work = UnitOfWork::new()
            .write(Statement::new("INSERT INTO Orders VALUES ($1)").bind(1_i64))
            .write_one(Statement::new("UPDATE Product SET x = 1"), "Product", "1/Bread");

        assert_eq!(work.len(), 2);
        let steps = work.into_steps();
        assert_eq!(steps[0].expect, Expectation::Any);
        assert!(matches!(steps[1].expect, Expectation::ExactlyOne { .. }));
    }

    #[test]
    fn test_new_is_empty() {
        assert!(UnitOfWork::new().is_empty());
    }
}
