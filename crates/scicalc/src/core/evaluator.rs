//! AST evaluator and the engine seam used by the input controller

use crate::core::parser::{AstNode, Parser};
use crate::core::{Arithmetic, CalcError, CalcResult, Complex, Function, Matrix, Value};
use std::fmt;

/// Black-box expression engine consulted on every submit outside EQN mode
///
/// Implementations must report every failure through `Err`; the controller
/// turns any error into its syntax-error display and stays usable.
pub trait ExpressionEngine: fmt::Debug {
    /// Evaluates a complete expression
    fn evaluate(&mut self, text: &str) -> CalcResult<Value>;

    /// Display text for a value at the given number of significant digits
    fn format(&self, value: &Value, precision: usize) -> String {
        value.format(precision)
    }
}

/// Evaluator for AST expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<Value> {
        match node {
            AstNode::Number(n) => Ok(Value::Scalar(*n)),
            AstNode::Symbol(name) => Self::constant(name),
            AstNode::Call { name, args } => {
                let function =
                    Function::from_name(name).ok_or_else(|| CalcError::UnknownSymbol(name.clone()))?;
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<CalcResult<Vec<_>>>()?;
                Arithmetic::check_finite(function.apply(&args)?)
            }
            AstNode::Matrix(rows) => self.evaluate_matrix(rows),
            AstNode::Negate(inner) => Ok(Arithmetic::negate(&self.evaluate(inner)?)),
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                Arithmetic::apply(&left_val, *op, &right_val)
            }
        }
    }

    /// Evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<Value> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }

    fn constant(name: &str) -> CalcResult<Value> {
        match name {
            "pi" => Ok(Value::Scalar(std::f64::consts::PI)),
            "e" => Ok(Value::Scalar(std::f64::consts::E)),
            "i" => Ok(Value::Complex(Complex::I)),
            _ => Err(CalcError::UnknownSymbol(name.to_string())),
        }
    }

    fn evaluate_matrix(&self, rows: &[Vec<AstNode>]) -> CalcResult<Value> {
        let values = rows
            .iter()
            .map(|row| row.iter().map(|e| self.evaluate(e)).collect::<CalcResult<Vec<_>>>())
            .collect::<CalcResult<Vec<_>>>()?;

        // Nested form: [[1, 2], [3, 4]]
        if let [row] = values.as_slice() {
            if row.iter().all(|v| matches!(v, Value::Matrix(m) if m.is_vector())) {
                let stacked = row
                    .iter()
                    .filter_map(|v| match v {
                        Value::Matrix(m) => Some(m.data()[0].clone()),
                        _ => None,
                    })
                    .collect();
                return Ok(Matrix::new(stacked)?.into());
            }
        }

        let mut numbers = Vec::with_capacity(values.len());
        for row in &values {
            let reals = row
                .iter()
                .map(|v| {
                    v.as_scalar().ok_or_else(|| {
                        CalcError::unsupported(format!("{} inside a matrix", v.type_name()))
                    })
                })
                .collect::<CalcResult<Vec<f64>>>()?;
            numbers.push(reals);
        }

        if numbers.len() == 1 {
            let single = numbers.pop().unwrap_or_default();
            return Ok(Matrix::vector(single)?.into());
        }
        Ok(Matrix::new(numbers)?.into())
    }
}

impl ExpressionEngine for Evaluator {
    fn evaluate(&mut self, text: &str) -> CalcResult<Value> {
        self.evaluate_str(text)
    }
}
