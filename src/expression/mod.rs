//! Best-effort evaluator for the formulas users type into the calculator form.
//!
//! This is a preview tool: it draws the background curve and the overlay points that the solver
//! trace does not carry. It is not the solver's parser and must never be used to judge a
//! solver result.

mod ast;
mod error;
mod eval;
mod lexer;
mod parser;

pub use error::ExprError;

/// A formula compiled once and sampled at many points.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    ast: ast::Expr,
}

impl Expression {
    /// Parse a formula such as `x^3 - 2*x - 5`, `sin x = 0.5`, or `ln(x) + pi`.
    pub fn parse(src: &str) -> Result<Self, ExprError> {
        let ast = parser::parse_expr(src.trim())?;
        Ok(Self {
            source: src.to_owned(),
            ast,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Value at `x`, or `None` on division by zero, a domain error, or a non-finite result.
    pub fn sample(&self, x: f64) -> Option<f64> {
        eval::eval_at(&self.ast, x).ok()
    }
}

/// One-shot parse and evaluate. `None` means "no value here"; it is never an error to surface.
pub fn evaluate(expr: &str, x: f64) -> Option<f64> {
    Expression::parse(expr).ok()?.sample(x)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/mod.rs"]
mod tests;
