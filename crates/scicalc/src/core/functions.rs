//! Built-in functions callable from expressions

use crate::core::{CalcError, CalcResult, Complex, Value};

/// Functions the evaluator knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Sine (radians)
    Sin,
    /// Cosine (radians)
    Cos,
    /// Tangent (radians)
    Tan,
    /// Inverse sine
    Asin,
    /// Inverse cosine
    Acos,
    /// Inverse tangent
    Atan,
    /// Square root; negative reals give an imaginary result
    Sqrt,
    /// Natural logarithm, or `log(x, base)`
    Log,
    /// Base-10 logarithm
    Log10,
    /// Exponential
    Exp,
    /// Absolute value (modulus for complex numbers)
    Abs,
}

impl Function {
    /// Looks up a function by its expression name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sqrt" => Self::Sqrt,
            "log" => Self::Log,
            "log10" => Self::Log10,
            "exp" => Self::Exp,
            "abs" => Self::Abs,
            _ => return None,
        };
        Some(function)
    }

    /// Expression name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Exp => "exp",
            Self::Abs => "abs",
        }
    }

    /// Accepted argument counts (inclusive)
    #[must_use]
    pub const fn arity(&self) -> (usize, usize) {
        match self {
            Self::Log => (1, 2),
            _ => (1, 1),
        }
    }

    /// Applies the function to already evaluated arguments
    pub fn apply(&self, args: &[Value]) -> CalcResult<Value> {
        let (min, max) = self.arity();
        if args.len() < min || args.len() > max {
            return Err(CalcError::parse(format!(
                "{}() takes {} argument(s), got {}",
                self.name(),
                max,
                args.len()
            )));
        }
        if let [value, base] = args {
            let num = self.apply_one(value)?;
            let den = self.apply_one(base)?;
            return crate::core::Arithmetic::divide(&num, &den);
        }
        self.apply_one(&args[0])
    }

    fn apply_one(&self, arg: &Value) -> CalcResult<Value> {
        match arg {
            Value::Scalar(x) => Ok(self.apply_real(*x)),
            Value::Complex(z) => self.apply_complex(*z),
            Value::Matrix(_) => Err(CalcError::unsupported(format!(
                "{}() of a matrix",
                self.name()
            ))),
        }
    }

    fn apply_real(&self, x: f64) -> Value {
        match self {
            Self::Sin => Value::Scalar(x.sin()),
            Self::Cos => Value::Scalar(x.cos()),
            Self::Tan => Value::Scalar(x.tan()),
            Self::Asin if x.abs() > 1.0 => Value::from(Complex::from_real(x).asin()),
            Self::Asin => Value::Scalar(x.asin()),
            Self::Acos if x.abs() > 1.0 => Value::from(Complex::from_real(x).acos()),
            Self::Acos => Value::Scalar(x.acos()),
            Self::Atan => Value::Scalar(x.atan()),
            Self::Sqrt if x < 0.0 => Value::from(Complex::new(0.0, (-x).sqrt())),
            Self::Sqrt => Value::Scalar(x.sqrt()),
            Self::Log if x < 0.0 => Value::from(Complex::from_real(x).ln()),
            Self::Log => Value::Scalar(x.ln()),
            Self::Log10 if x < 0.0 => Value::from(log10(Complex::from_real(x))),
            Self::Log10 => Value::Scalar(x.log10()),
            Self::Exp => Value::Scalar(x.exp()),
            Self::Abs => Value::Scalar(x.abs()),
        }
    }

    fn apply_complex(&self, z: Complex) -> CalcResult<Value> {
        let result = match self {
            Self::Sqrt => z.sqrt(),
            Self::Log => z.ln(),
            Self::Asin => z.asin(),
            Self::Acos => z.acos(),
            Self::Log10 => log10(z),
            Self::Exp => z.exp(),
            Self::Abs => Complex::from_real(z.norm()),
            _ => {
                return Err(CalcError::unsupported(format!(
                    "{}() of a complex number",
                    self.name()
                )))
            }
        };
        Ok(Value::from(result))
    }
}

fn log10(z: Complex) -> Complex {
    let ln = z.ln();
    Complex::new(
        ln.re / std::f64::consts::LN_10,
        ln.im / std::f64::consts::LN_10,
    )
}
