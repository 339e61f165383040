//! Guided equation solver
//!
//! A session walks through type selection, one coefficient per submit, and
//! then reveals the roots one submit at a time:
//!
//! ```text
//! SelectType --"1"--> GetA --> GetB --> GetC --(solve)--> ShowX1 --> ShowX2 --> done
//!      \--"2"--> done (cubic stub)
//! ```

use crate::core::value::display_number;
use std::fmt;
use tracing::debug;

/// Shown when a session starts
pub const TYPE_PROMPT: &str = "1:Quad(ax²+bx+c) 2:Cubic";
/// Shown for an unrecognised type selection
pub const SELECT_RETRY: &str = "Select 1 or 2";
/// Shown when the cubic path is selected
pub const CUBIC_STUB: &str = "Cubic Not Impl";
/// Shown after the last root
pub const SOLVED: &str = "Eqn Solved. AC to exit";

/// Position within a solving sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Waiting for `1` (quadratic) or `2` (cubic)
    SelectType,
    /// Waiting for coefficient `a`
    GetA,
    /// Waiting for coefficient `b`
    GetB,
    /// Waiting for coefficient `c`
    GetC,
    /// First root shown; next submit shows the second
    ShowX1,
    /// Second root shown; next submit ends the session
    ShowX2,
}

/// Equation family chosen at [`Step::SelectType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationKind {
    /// `ax² + bx + c = 0`
    Quadratic,
    /// Cubic (not implemented)
    Cubic,
}

/// A computed root
#[derive(Debug, Clone, PartialEq)]
pub enum Root {
    /// Real root
    Real(f64),
    /// Complex root, already rendered as `"re + imi"`
    Complex(String),
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(x) => f.write_str(&display_number(*x)),
            Self::Complex(text) => f.write_str(text),
        }
    }
}

/// What the controller should do after a session step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Input consumed; show the text and keep the session
    Prompt(String),
    /// Input rejected; show the text, keep the session and the input
    Retry(String),
    /// Input consumed; show the text and drop the session
    Done(String),
}

impl Transition {
    /// Text to display
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Prompt(text) | Self::Retry(text) | Self::Done(text) => text,
        }
    }
}

/// An in-progress solving sequence
#[derive(Debug, Clone, PartialEq)]
pub struct EquationSession {
    step: Step,
    kind: Option<EquationKind>,
    a: f64,
    b: f64,
    c: f64,
    roots: Option<(Root, Root)>,
}

impl Default for EquationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EquationSession {
    /// Creates a session waiting for the type selection
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: Step::SelectType,
            kind: None,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            roots: None,
        }
    }

    /// Current step
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Selected equation family
    #[must_use]
    pub fn kind(&self) -> Option<EquationKind> {
        self.kind
    }

    /// Coefficients entered so far (unset ones are zero)
    #[must_use]
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Computed roots, once `c` has been entered
    #[must_use]
    pub fn roots(&self) -> Option<&(Root, Root)> {
        self.roots.as_ref()
    }

    /// Consumes one submitted entry
    ///
    /// `root_decimals` is the number of decimals used for each part of a
    /// complex root.
    pub fn advance(&mut self, input: &str, root_decimals: usize) -> Transition {
        let transition = match self.step {
            Step::SelectType => self.select_type(input),
            Step::GetA => match parse_coefficient(input) {
                Some(a) => {
                    self.a = a;
                    self.step = Step::GetB;
                    Transition::Prompt("b?".into())
                }
                None => Transition::Retry("Invalid a".into()),
            },
            Step::GetB => match parse_coefficient(input) {
                Some(b) => {
                    self.b = b;
                    self.step = Step::GetC;
                    Transition::Prompt("c?".into())
                }
                None => Transition::Retry("Invalid b".into()),
            },
            Step::GetC => match parse_coefficient(input) {
                Some(c) => {
                    self.c = c;
                    let (x1, x2) = solve_quadratic(self.a, self.b, self.c, root_decimals);
                    let shown = format!("X1={x1}");
                    self.roots = Some((x1, x2));
                    self.step = Step::ShowX1;
                    Transition::Prompt(shown)
                }
                None => Transition::Retry("Invalid c".into()),
            },
            Step::ShowX1 => {
                self.step = Step::ShowX2;
                let x2 = self.roots.as_ref().map(|(_, x2)| x2.to_string()).unwrap_or_default();
                Transition::Prompt(format!("X2={x2}"))
            }
            Step::ShowX2 => Transition::Done(SOLVED.into()),
        };
        debug!(step = ?self.step, outcome = ?transition, "equation step");
        transition
    }

    fn select_type(&mut self, input: &str) -> Transition {
        match input {
            "1" => {
                self.kind = Some(EquationKind::Quadratic);
                self.step = Step::GetA;
                Transition::Prompt("a?".into())
            }
            "2" => {
                self.kind = Some(EquationKind::Cubic);
                Transition::Done(CUBIC_STUB.into())
            }
            _ => Transition::Prompt(SELECT_RETRY.into()),
        }
    }
}

/// Roots of `ax² + bx + c = 0`
///
/// `a == 0` is not special-cased: the division by zero surfaces as
/// `Infinity`/`NaN` roots.
#[must_use]
pub fn solve_quadratic(a: f64, b: f64, c: f64, decimals: usize) -> (Root, Root) {
    let d = b * b - 4.0 * a * c;

    if d > 0.0 {
        let x1 = (-b + d.sqrt()) / (2.0 * a);
        let x2 = (-b - d.sqrt()) / (2.0 * a);
        (Root::Real(x1), Root::Real(x2))
    } else if d == 0.0 {
        let x = -b / (2.0 * a);
        (Root::Real(x), Root::Real(x))
    } else {
        let real = without_negative_zero(-b / (2.0 * a));
        let imag = without_negative_zero((-d).sqrt() / (2.0 * a));
        (
            Root::Complex(format!("{real:.decimals$} + {imag:.decimals$}i")),
            Root::Complex(format!("{real:.decimals$} - {imag:.decimals$}i")),
        )
    }
}

fn without_negative_zero(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}

/// Reads the leading decimal number of a coefficient entry
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"3abc"` reads as 3; text with no numeric prefix is rejected.
#[must_use]
pub fn parse_coefficient(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_digits = digits_from(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_digits = digits_from(exp_start);
        if exp_digits > 0 {
            end = exp_start + exp_digits;
        }
    }

    s[..end].parse().ok()
}
