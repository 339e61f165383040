//! Scientific calculator input state machine
//!
//! Models the keypad of a handheld scientific calculator: key presses build
//! an expression, `SHIFT`/`ALPHA` alter the next key only, `MODE` cycles
//! COMP, CMPLX, MAT and EQN, and `EQUALS` either evaluates through an
//! expression engine or drives the guided quadratic solver.
//!
//! # Example
//!
//! ```rust
//! use scicalc::prelude::*;
//!
//! let mut calc = InputController::new();
//! for key in ["2", "PLUS", "2", "M+"] {
//!     calc.handle_key(key);
//! }
//! assert_eq!(calc.result(), "M = 4");
//!
//! // Previous answer is substituted for `Ans`
//! for key in ["AC", "ANS", "X2", "EQUALS"] {
//!     calc.handle_key(key);
//! }
//! assert_eq!(calc.result(), "16");
//!
//! // The bundled engine can be used on its own
//! let value = Evaluator::new().evaluate_str("sqrt(-4)").unwrap();
//! assert_eq!(value.format(10), "2i");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod core;
pub mod driver;
pub mod equation;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::CalcConfig;
    pub use crate::controller::{InputController, Key, Mode, Modifier, Modifiers};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{
        CalcError, CalcResult, Complex, Evaluator, ExpressionEngine, Matrix, Operation, Value,
    };
    pub use crate::driver::{CalculatorDriver, Frame, Transcript};
    pub use crate::equation::{EquationKind, EquationSession, Root, Step, Transition};
}
