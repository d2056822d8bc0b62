//! Tree-walking evaluation of calculator expressions

use crate::denter::calc::{Expr, Operator};
use crate::denter::error::DenterError;

impl Expr {
    /// Evaluate the expression with checked 64-bit arithmetic.
    pub fn eval(&self) -> Result<i64, DenterError> {
        match self {
            Expr::Int { value, .. } => Ok(*value),
            Expr::Operation {
                operator,
                line,
                column,
                lhs,
                rhs,
            } => {
                let op = Operator::from_name(operator).ok_or_else(|| {
                    DenterError::UnknownOperator {
                        operator: operator.clone(),
                        line: *line,
                        column: *column,
                    }
                })?;
                let lhs = lhs.eval()?;
                let rhs = rhs.eval()?;

                let result = match op {
                    Operator::Add => lhs.checked_add(rhs),
                    Operator::Sub => lhs.checked_sub(rhs),
                    Operator::Multiply => lhs.checked_mul(rhs),
                };
                result.ok_or_else(|| DenterError::Overflow {
                    operator: operator.clone(),
                    line: *line,
                    column: *column,
                })
            }
        }
    }
}
