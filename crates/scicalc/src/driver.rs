//! Key-driven calculator driver
//!
//! Scenario logic is written once against [`CalculatorDriver`] and run on
//! any implementation: the bare [`InputController`] or a recording
//! [`Transcript`].

use crate::controller::{InputController, Key, EQN_ENTRY_PROMPT};
use serde::{Deserialize, Serialize};

/// Abstract driver for keypad interactions
///
/// # Example
///
/// ```rust
/// use scicalc::prelude::*;
///
/// let mut driver = InputController::new();
/// driver.press_all(&["6", "MULTIPLY", "7", "EQUALS"]);
/// assert_eq!(driver.result(), "42");
/// ```
pub trait CalculatorDriver {
    /// Presses one key by label
    fn press(&mut self, label: &str);

    /// Expression display, including modifier markers
    fn expression(&self) -> String;

    /// Result display
    fn result(&self) -> String;

    /// Presses each key in order
    fn press_all(&mut self, labels: &[&str]) {
        for label in labels {
            self.press(label);
        }
    }

    /// Clears the expression with `AC`
    fn clear(&mut self) {
        self.press("AC");
    }
}

impl CalculatorDriver for InputController {
    fn press(&mut self, label: &str) {
        self.handle_key(label);
    }

    fn expression(&self) -> String {
        Self::expression(self)
    }

    fn result(&self) -> String {
        Self::result(self).to_string()
    }
}

/// Display state captured after one key press
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Label of the key pressed
    pub key: String,
    /// Expression display after the key
    pub expression: String,
    /// Result display after the key
    pub result: String,
}

/// Driver that records a [`Frame`] for every key it presses
#[derive(Debug, Default)]
pub struct Transcript {
    controller: InputController,
    frames: Vec<Frame>,
}

impl Transcript {
    /// Creates a transcript over a fresh controller
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcript over an existing controller
    #[must_use]
    pub fn with_controller(controller: InputController) -> Self {
        Self {
            controller,
            frames: Vec::new(),
        }
    }

    /// Recorded frames, oldest first
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The most recent frame
    #[must_use]
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// The wrapped controller
    #[must_use]
    pub fn controller(&self) -> &InputController {
        &self.controller
    }

    /// Consumes the transcript, returning the recorded frames
    #[must_use]
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl CalculatorDriver for Transcript {
    fn press(&mut self, label: &str) {
        let key = Key::from_label(label);
        self.controller.press(key.clone());
        self.frames.push(Frame {
            key: key.label().to_string(),
            expression: self.controller.expression(),
            result: self.controller.result().to_string(),
        });
    }

    fn expression(&self) -> String {
        self.controller.expression()
    }

    fn result(&self) -> String {
        self.controller.result().to_string()
    }
}

// ===== Driver scenarios =====
// These work with ANY CalculatorDriver implementation

/// Verifies basic arithmetic through the keypad
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.press_all(&["2", "PLUS", "3", "EQUALS"]);
    assert_eq!(driver.result(), "5");
    driver.clear();

    driver.press_all(&["4", "2", "MULTIPLY", "(", "3", "PLUS", "7", ")", "EQUALS"]);
    assert_eq!(driver.result(), "420");
    driver.clear();

    driver.press_all(&["2", "0", "DIVIDE", "4", "EQUALS"]);
    assert_eq!(driver.result(), "5");
    driver.clear();
}

/// Verifies shifted keys and the modifier markers
pub fn verify_modifiers<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press("SHIFT");
    assert_eq!(driver.expression(), "S ");
    driver.press("ALPHA");
    assert_eq!(driver.expression(), "A S ");
    driver.press("SIN");
    assert_eq!(driver.expression(), "asin(");
    driver.press("SIN");
    assert_eq!(driver.expression(), "asin(sin(");
    driver.clear();
}

/// Verifies the last-answer placeholder
pub fn verify_ans<D: CalculatorDriver>(driver: &mut D) {
    driver.press_all(&["5", "EQUALS", "AC", "ANS", "X2", "EQUALS"]);
    assert_eq!(driver.expression(), "Ans^2");
    assert_eq!(driver.result(), "25");
    driver.clear();
}

/// Verifies memory accumulation
pub fn verify_memory<D: CalculatorDriver>(driver: &mut D) {
    driver.press("ON");
    driver.press_all(&["2", "PLUS", "2", "M+"]);
    assert_eq!(driver.result(), "M = 4");
    driver.press_all(&["AC", "1", "M+"]);
    assert_eq!(driver.result(), "M = 5");
    driver.press("ON");
}

/// Verifies engine errors show as a syntax error
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    driver.press_all(&["1", "DIVIDE", "0", "EQUALS"]);
    assert_eq!(driver.result(), "Syntax Error");
    driver.clear();

    driver.press_all(&["PLUS", "EQUALS"]);
    assert_eq!(driver.result(), "Syntax Error");
    driver.clear();
}

/// Verifies a full quadratic solve, ending back in COMP mode
pub fn verify_quadratic<D: CalculatorDriver>(driver: &mut D) {
    driver.press("ON");
    driver.press_all(&["MODE", "MODE", "MODE"]);
    assert_eq!(driver.result(), EQN_ENTRY_PROMPT);

    let steps: [(&[&str], &str); 7] = [
        (&[], "1:Quad(ax²+bx+c) 2:Cubic"),
        (&["1"], "a?"),
        (&["1"], "b?"),
        (&["MINUS", "3"], "c?"),
        (&["2"], "X1=2"),
        (&[], "X2=1"),
        (&[], "Eqn Solved. AC to exit"),
    ];
    for (keys, shown) in steps {
        driver.press_all(keys);
        driver.press("EQUALS");
        assert_eq!(driver.result(), shown);
        assert_eq!(driver.expression(), "");
    }
    driver.press("ON");
}

/// Runs every scenario
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_modifiers(driver);
    verify_ans(driver);
    verify_memory(driver);
    verify_error_handling(driver);
    verify_quadratic(driver);
}
