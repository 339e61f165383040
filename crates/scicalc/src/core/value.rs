//! Engine values and their display formatting
//!
//! A value is a real scalar, a complex number or a matrix. Scalars are the
//! only values that take part in memory accumulation.

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Exponent below which scalars switch to exponential notation
const LOWER_EXP: i32 = -3;
/// Exponent at or above which scalars switch to exponential notation
const UPPER_EXP: i32 = 5;

/// A complex number in rectangular form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex {
    /// The imaginary unit
    pub const I: Self = Self { re: 0.0, im: 1.0 };

    /// Creates a complex number from its parts
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Lifts a real number
    #[must_use]
    pub const fn from_real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Modulus
    #[must_use]
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Argument in radians
    #[must_use]
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Returns true if the imaginary part is exactly zero
    #[must_use]
    pub fn is_real(self) -> bool {
        self.im == 0.0
    }

    /// Division, rejecting a zero divisor
    pub fn checked_div(self, rhs: Self) -> CalcResult<Self> {
        let denom = rhs.re * rhs.re + rhs.im * rhs.im;
        if denom == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Ok(Self::new(
            (self.re * rhs.re + self.im * rhs.im) / denom,
            (self.im * rhs.re - self.re * rhs.im) / denom,
        ))
    }

    /// Natural logarithm (principal branch)
    #[must_use]
    pub fn ln(self) -> Self {
        Self::new(self.norm().ln(), self.arg())
    }

    /// Complex exponential
    #[must_use]
    pub fn exp(self) -> Self {
        let r = self.re.exp();
        Self::new(r * self.im.cos(), r * self.im.sin())
    }

    /// Principal square root
    #[must_use]
    pub fn sqrt(self) -> Self {
        let r = self.norm().sqrt();
        let theta = self.arg() / 2.0;
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Inverse sine (principal branch): `-i ln(iz + sqrt(1 - z^2))`
    #[must_use]
    pub fn asin(self) -> Self {
        let root = (Self::from_real(1.0) - self * self).sqrt();
        Self::new(0.0, -1.0) * (Self::I * self + root).ln()
    }

    /// Inverse cosine (principal branch): `pi/2 - asin(z)`
    #[must_use]
    pub fn acos(self) -> Self {
        Self::from_real(std::f64::consts::FRAC_PI_2) - self.asin()
    }

    /// Raises to a complex power
    ///
    /// Small integer exponents use repeated multiplication so that `i^2`
    /// comes out as exactly `-1`.
    #[must_use]
    pub fn pow(self, exponent: Self) -> Self {
        if exponent.is_real() && exponent.re.fract() == 0.0 && exponent.re.abs() <= 64.0 {
            let n = exponent.re as i32;
            let mut acc = Self::from_real(1.0);
            for _ in 0..n.unsigned_abs() {
                acc = acc * self;
            }
            if n < 0 {
                return Self::from_real(1.0)
                    .checked_div(acc)
                    .unwrap_or(Self::new(f64::NAN, f64::NAN));
            }
            return acc;
        }
        if self.re == 0.0 && self.im == 0.0 {
            return Self::from_real(0.0);
        }
        (exponent * self.ln()).exp()
    }

    /// Formats both parts with the given number of significant digits
    #[must_use]
    pub fn format(self, precision: usize) -> String {
        if self.is_real() {
            return format_number(self.re, precision);
        }
        let im = match format_number(self.im.abs(), precision).as_str() {
            "1" => String::from("i"),
            digits => format!("{digits}i"),
        };
        if self.re == 0.0 {
            return if self.im < 0.0 { format!("-{im}") } else { im };
        }
        let sign = if self.im < 0.0 { '-' } else { '+' };
        format!("{} {sign} {im}", format_number(self.re, precision))
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

/// A rectangular matrix of reals
///
/// A matrix built from a single bracket row (`[1, 2, 3]`) is one-dimensional:
/// it renders as a flat list and acts as a row or column as needed in
/// products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
    flat: bool,
}

impl Matrix {
    /// Creates a two-dimensional matrix, checking that it is rectangular
    pub fn new(rows: Vec<Vec<f64>>) -> CalcResult<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(CalcError::parse("Empty matrix"));
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(CalcError::dimension("rows of unequal length"));
        }
        Ok(Self { rows, flat: false })
    }

    /// Creates a one-dimensional matrix
    pub fn vector(values: Vec<f64>) -> CalcResult<Self> {
        if values.is_empty() {
            return Err(CalcError::parse("Empty matrix"));
        }
        Ok(Self {
            rows: vec![values],
            flat: true,
        })
    }

    /// Creates an `n x n` identity matrix
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let rows = (0..n)
            .map(|r| (0..n).map(|c| if r == c { 1.0 } else { 0.0 }).collect())
            .collect();
        Self { rows, flat: false }
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    #[must_use]
    pub fn cols(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Returns true for a one-dimensional matrix
    #[must_use]
    pub fn is_vector(&self) -> bool {
        self.flat
    }

    /// Returns true if the matrix is square
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Row data
    #[must_use]
    pub fn data(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Shape as `RxC` text for error messages
    #[must_use]
    pub fn shape(&self) -> String {
        if self.flat {
            format!("[{}]", self.cols())
        } else {
            format!("{}x{}", self.rows(), self.cols())
        }
    }

    /// Applies `f` to every element
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().copied().map(&f).collect())
                .collect(),
            flat: self.flat,
        }
    }

    /// Combines two same-shaped matrices element by element
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> CalcResult<Self> {
        if self.rows() != other.rows() || self.cols() != other.cols() {
            return Err(CalcError::dimension(format!(
                "{} vs {}",
                self.shape(),
                other.shape()
            )));
        }
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| f(*x, *y)).collect())
            .collect();
        Ok(Self {
            rows,
            flat: self.flat && other.flat,
        })
    }

    /// Matrix product of two-dimensional matrices
    pub fn matmul(&self, other: &Self) -> CalcResult<Self> {
        if self.cols() != other.rows() {
            return Err(CalcError::dimension(format!(
                "cannot multiply {} by {}",
                self.shape(),
                other.shape()
            )));
        }
        let rows = (0..self.rows())
            .map(|r| {
                (0..other.cols())
                    .map(|c| {
                        (0..self.cols())
                            .map(|k| self.rows[r][k] * other.rows[k][c])
                            .sum()
                    })
                    .collect()
            })
            .collect();
        Ok(Self { rows, flat: false })
    }

    /// The same data as a column (`n x 1`) matrix
    #[must_use]
    pub fn to_column(&self) -> Self {
        let rows = self.rows.iter().flatten().map(|x| vec![*x]).collect();
        Self { rows, flat: false }
    }

    /// The same data viewed as a two-dimensional matrix
    #[must_use]
    pub fn to_2d(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            flat: false,
        }
    }

    /// Non-negative integer power of a square matrix
    pub fn powi(&self, exponent: u32) -> CalcResult<Self> {
        if self.flat || !self.is_square() {
            return Err(CalcError::dimension(format!(
                "power of non-square matrix {}",
                self.shape()
            )));
        }
        let mut acc = Self::identity(self.rows());
        for _ in 0..exponent {
            acc = acc.matmul(self)?;
        }
        Ok(acc)
    }

    /// Bracket text that the parser reads back as the same matrix
    #[must_use]
    pub fn to_literal(&self) -> String {
        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| join_numbers(row))
            .collect();
        format!("[{}]", rows.join("; "))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flat {
            return write!(f, "[{}]", join_numbers(&self.rows[0]));
        }
        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| format!("[{}]", join_numbers(row)))
            .collect();
        write!(f, "[{}]", rows.join(", "))
    }
}

fn join_numbers(row: &[f64]) -> String {
    row.iter()
        .map(|x| display_number(*x))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A value produced by the expression engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Real scalar
    Scalar(f64),
    /// Complex number with a non-zero imaginary part
    Complex(Complex),
    /// Matrix of reals
    Matrix(Matrix),
}

impl Default for Value {
    fn default() -> Self {
        Self::Scalar(0.0)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Complex> for Value {
    fn from(value: Complex) -> Self {
        Self::Complex(value).normalize()
    }
}

impl From<Matrix> for Value {
    fn from(value: Matrix) -> Self {
        Self::Matrix(value)
    }
}

impl Value {
    /// Collapses a complex value with zero imaginary part to a scalar
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::Complex(c) if c.is_real() => Self::Scalar(c.re),
            other => other,
        }
    }

    /// Returns true for a plain real scalar
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns true for a matrix
    #[must_use]
    pub const fn is_matrix(&self) -> bool {
        matches!(self, Self::Matrix(_))
    }

    /// The real scalar, if this is one
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// Short type name for error messages
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "number",
            Self::Complex(_) => "complex",
            Self::Matrix(_) => "matrix",
        }
    }

    /// Display text: numbers to `precision` significant digits, matrices
    /// in their bracketed form
    #[must_use]
    pub fn format(&self, precision: usize) -> String {
        match self {
            Self::Scalar(x) => format_number(*x, precision),
            Self::Complex(c) => c.format(precision),
            Self::Matrix(m) => m.to_string(),
        }
    }

    /// Expression text that evaluates back to this value
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            Self::Scalar(x) => display_number(*x),
            Self::Complex(c) => format!("{} + {}i", display_number(c.re), display_number(c.im)),
            Self::Matrix(m) => m.to_literal(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(x) => f.write_str(&display_number(*x)),
            Self::Complex(c) => f.write_str(&c.format(17)),
            Self::Matrix(m) => write!(f, "{m}"),
        }
    }
}

/// Formats a scalar to `precision` significant digits
///
/// Exponential notation is used when the decimal exponent is below -3 or
/// at least 5; trailing zeros are trimmed.
#[must_use]
pub fn format_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return display_number(value);
    }
    if value == 0.0 {
        return String::from("0");
    }
    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(LOWER_EXP..UPPER_EXP).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{}", trim_fraction(mantissa), exponent.abs());
    }
    let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}"))
}

/// Shortest text that reads back as the same `f64`
///
/// Negative zero prints as `0`; very large or very small magnitudes use
/// exponential notation (`1e+21`, `1.5e-7`).
#[must_use]
pub fn display_number(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return String::from("0");
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    format!("{value}")
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== format_number tests =====

    #[test]
    fn test_format_integer() {
        assert_eq!(format_number(4.0, 10), "4");
        assert_eq!(format_number(-12.0, 10), "-12");
    }

    #[test]
    fn test_format_repeating_fraction() {
        assert_eq!(format_number(1.0 / 3.0, 10), "0.3333333333");
        assert_eq!(format_number(2.0 / 3.0, 10), "0.6666666667");
    }

    #[test]
    fn test_format_float_noise_is_hidden() {
        assert_eq!(format_number(0.1 + 0.2, 10), "0.3");
    }

    #[test]
    fn test_format_large_uses_exponent() {
        assert_eq!(format_number(123_456.0, 10), "1.23456e+5");
        assert_eq!(format_number(99_999.0, 10), "99999");
    }

    #[test]
    fn test_format_small_uses_exponent() {
        assert_eq!(format_number(0.001, 10), "0.001");
        assert_eq!(format_number(0.0001, 10), "1e-4");
    }

    #[test]
    fn test_format_zero_and_negative_zero() {
        assert_eq!(format_number(0.0, 10), "0");
        assert_eq!(format_number(-0.0, 10), "0");
    }

    // ===== display_number tests =====

    #[test]
    fn test_display_number_shortest() {
        assert_eq!(display_number(2.0), "2");
        assert_eq!(display_number(-1.5), "-1.5");
        assert_eq!(display_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_display_number_negative_zero() {
        assert_eq!(display_number(-0.0), "0");
    }

    #[test]
    fn test_display_number_extremes() {
        assert_eq!(display_number(1e21), "1e+21");
        assert_eq!(display_number(1.5e-7), "1.5e-7");
        assert_eq!(display_number(f64::INFINITY), "Infinity");
    }

    // ===== Complex tests =====

    #[test]
    fn test_complex_format() {
        assert_eq!(Complex::new(2.0, 3.0).format(10), "2 + 3i");
        assert_eq!(Complex::new(2.0, -3.0).format(10), "2 - 3i");
        assert_eq!(Complex::new(0.0, 1.0).format(10), "i");
        assert_eq!(Complex::new(0.0, -2.0).format(10), "-2i");
        assert_eq!(Complex::new(5.0, 0.0).format(10), "5");
    }

    #[test]
    fn test_complex_i_squared_is_minus_one() {
        let result = Complex::I.pow(Complex::from_real(2.0));
        assert_eq!(result, Complex::new(-1.0, 0.0));
    }

    #[test]
    fn test_complex_sqrt_of_negative() {
        let root = Complex::from_real(-4.0).sqrt();
        assert!(root.re.abs() < 1e-12);
        assert!((root.im - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_complex_division() {
        let q = Complex::new(1.0, 1.0).checked_div(Complex::I).unwrap();
        assert_eq!(q, Complex::new(1.0, -1.0));
        assert_eq!(
            Complex::I.checked_div(Complex::from_real(0.0)),
            Err(CalcError::DivisionByZero)
        );
    }

    // ===== Matrix tests =====

    #[test]
    fn test_matrix_display() {
        let m = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.to_string(), "[[1, 2], [3, 4]]");
        let v = Matrix::vector(vec![1.0, 2.5, 3.0]).unwrap();
        assert_eq!(v.to_string(), "[1, 2.5, 3]");
    }

    #[test]
    fn test_matrix_rejects_ragged_rows() {
        let result = Matrix::new(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(CalcError::DimensionMismatch(_))));
    }

    #[test]
    fn test_matrix_product() {
        let a = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::new(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
        let p = a.matmul(&b).unwrap();
        assert_eq!(p.data(), &[vec![19.0, 22.0], vec![43.0, 50.0]]);
    }

    #[test]
    fn test_matrix_power() {
        let a = Matrix::new(vec![vec![1.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let p = a.powi(5).unwrap();
        assert_eq!(p.data(), &[vec![8.0, 5.0], vec![5.0, 3.0]]);
        assert_eq!(a.powi(0).unwrap(), Matrix::identity(2));
    }

    #[test]
    fn test_matrix_literal() {
        let m = Matrix::new(vec![vec![1.0, -2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.to_literal(), "[1, -2; 3, 4]");
    }

    // ===== Value tests =====

    #[test]
    fn test_value_normalize() {
        assert_eq!(Value::from(Complex::new(3.0, 0.0)), Value::Scalar(3.0));
        assert!(matches!(Value::from(Complex::I), Value::Complex(_)));
    }

    #[test]
    fn test_value_scalar_queries() {
        assert!(Value::Scalar(1.0).is_scalar());
        assert!(!Value::from(Complex::I).is_scalar());
        assert_eq!(Value::Scalar(2.5).as_scalar(), Some(2.5));
        assert_eq!(Value::default(), Value::Scalar(0.0));
    }

    #[test]
    fn test_value_literal() {
        assert_eq!(Value::Scalar(-4.0).to_literal(), "-4");
        assert_eq!(Value::from(Complex::new(1.0, -2.0)).to_literal(), "1 + -2i");
    }
}
