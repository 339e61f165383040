//! Binary operations over engine values
//!
//! Reals are promoted to complex numbers when mixed with them; matrices
//! combine element-wise, by scaling, or by matrix product.

use crate::core::{CalcError, CalcResult, Complex, Matrix, Value};

/// Largest integer exponent accepted for matrix powers
const MAX_MATRIX_POWER: f64 = 1024.0;

/// Type-safe operation enum - compile-time guarantee of valid operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Modulo (%)
    Modulo,
    /// Power (^)
    Power,
}

impl Operation {
    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "^",
        }
    }
}

/// Value arithmetic used by the evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct Arithmetic;

impl Arithmetic {
    /// Applies `op` to two values
    pub fn apply(lhs: &Value, op: Operation, rhs: &Value) -> CalcResult<Value> {
        let result = match op {
            Operation::Add => Self::add(lhs, rhs)?,
            Operation::Subtract => Self::subtract(lhs, rhs)?,
            Operation::Multiply => Self::multiply(lhs, rhs)?,
            Operation::Divide => Self::divide(lhs, rhs)?,
            Operation::Modulo => Self::modulo(lhs, rhs)?,
            Operation::Power => Self::power(lhs, rhs)?,
        };
        Self::check_finite(result)
    }

    /// Addition: a + b
    pub fn add(lhs: &Value, rhs: &Value) -> CalcResult<Value> {
        match (lhs, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a + b)),
            (Value::Matrix(a), Value::Matrix(b)) => Ok(a.zip_with(b, |x, y| x + y)?.into()),
            (Value::Matrix(m), Value::Scalar(s)) | (Value::Scalar(s), Value::Matrix(m)) => {
                Ok(m.map(|x| x + s).into())
            }
            _ => Ok(Value::from(Self::complex(lhs, "+")? + Self::complex(rhs, "+")?)),
        }
    }

    /// Subtraction: a - b
    pub fn subtract(lhs: &Value, rhs: &Value) -> CalcResult<Value> {
        Self::add(lhs, &Self::negate(rhs))
    }

    /// Multiplication: a * b (matrix product for two matrices)
    pub fn multiply(lhs: &Value, rhs: &Value) -> CalcResult<Value> {
        match (lhs, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a * b)),
            (Value::Matrix(a), Value::Matrix(b)) => Self::matrix_product(a, b),
            (Value::Matrix(m), Value::Scalar(s)) | (Value::Scalar(s), Value::Matrix(m)) => {
                Ok(m.map(|x| x * s).into())
            }
            _ => Ok(Value::from(Self::complex(lhs, "*")? * Self::complex(rhs, "*")?)),
        }
    }

    /// Division: a / b
    pub fn divide(lhs: &Value, rhs: &Value) -> CalcResult<Value> {
        match (lhs, rhs) {
            (_, Value::Scalar(b)) if *b == 0.0 => Err(CalcError::DivisionByZero),
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a / b)),
            (Value::Matrix(m), Value::Scalar(s)) => Ok(m.map(|x| x / s).into()),
            (_, Value::Matrix(_)) => Err(CalcError::unsupported("division by a matrix")),
            _ => Ok(Value::from(
                Self::complex(lhs, "/")?.checked_div(Self::complex(rhs, "/")?)?,
            )),
        }
    }

    /// Modulo: a % b (reals only)
    pub fn modulo(lhs: &Value, rhs: &Value) -> CalcResult<Value> {
        match (lhs, rhs) {
            (Value::Scalar(_), Value::Scalar(b)) if *b == 0.0 => Err(CalcError::DivisionByZero),
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a % b)),
            _ => Err(CalcError::unsupported(format!(
                "{} % {}",
                lhs.type_name(),
                rhs.type_name()
            ))),
        }
    }

    /// Power: a ^ b
    ///
    /// A negative real raised to a fractional power gives the principal
    /// complex root.
    pub fn power(lhs: &Value, rhs: &Value) -> CalcResult<Value> {
        match (lhs, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) if *a < 0.0 && b.fract() != 0.0 => {
                Ok(Complex::from_real(*a).pow(Complex::from_real(*b)).into())
            }
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a.powf(*b))),
            (Value::Matrix(m), Value::Scalar(n))
                if (0.0..=MAX_MATRIX_POWER).contains(n) && n.fract() == 0.0 =>
            {
                Ok(m.powi(*n as u32)?.into())
            }
            (Value::Matrix(_), _) | (_, Value::Matrix(_)) => Err(CalcError::unsupported(
                "matrix power needs a non-negative integer exponent",
            )),
            _ => Ok(Self::complex(lhs, "^")?
                .pow(Self::complex(rhs, "^")?)
                .into()),
        }
    }

    /// Unary negation
    #[must_use]
    pub fn negate(value: &Value) -> Value {
        match value {
            Value::Scalar(x) => Value::Scalar(-x),
            Value::Complex(z) => Value::Complex(-*z),
            Value::Matrix(m) => Value::Matrix(m.map(|x| -x)),
        }
    }

    fn complex(value: &Value, symbol: &str) -> CalcResult<Complex> {
        match value {
            Value::Scalar(x) => Ok(Complex::from_real(*x)),
            Value::Complex(z) => Ok(*z),
            Value::Matrix(_) => Err(CalcError::unsupported(format!(
                "matrix with complex operand in '{symbol}'"
            ))),
        }
    }

    fn matrix_product(a: &Matrix, b: &Matrix) -> CalcResult<Value> {
        match (a.is_vector(), b.is_vector()) {
            // Dot product
            (true, true) => {
                if a.cols() != b.cols() {
                    return Err(CalcError::dimension(format!(
                        "{} vs {}",
                        a.shape(),
                        b.shape()
                    )));
                }
                let dot: f64 = a.data()[0].iter().zip(&b.data()[0]).map(|(x, y)| x * y).sum();
                Ok(Value::Scalar(dot))
            }
            (false, true) => Ok(a.matmul(&b.to_column())?.into()),
            _ => Ok(a.to_2d().matmul(b)?.into()),
        }
    }

    /// Rejects NaN and infinite results
    pub(crate) fn check_finite(value: Value) -> CalcResult<Value> {
        let finite = match &value {
            Value::Scalar(x) => x.is_finite(),
            Value::Complex(z) => z.re.is_finite() && z.im.is_finite(),
            Value::Matrix(m) => m.data().iter().flatten().all(|x| x.is_finite()),
        };
        if finite {
            Ok(value)
        } else {
            Err(CalcError::InvalidResult(format!("non-finite {}", value.type_name())))
        }
    }
}
