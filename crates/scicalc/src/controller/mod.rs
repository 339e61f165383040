//! Keypad input controller
//!
//! Turns discrete key presses into an expression buffer and a single result
//! display, tracking the calculator mode, the one-shot modifiers, the last
//! answer, the memory register and any equation session in progress.

pub mod key;
pub mod state;

pub use key::Key;
pub use state::{Mode, Modifier, Modifiers};

use crate::config::CalcConfig;
use crate::core::value::display_number;
use crate::core::{Evaluator, ExpressionEngine, Value};
use crate::equation::{EquationSession, Transition, TYPE_PROMPT};
use tracing::{debug, warn};

/// Shown when entering EQN mode or clearing inside it
pub const EQN_ENTRY_PROMPT: &str = "EQN Mode: Press = to start";
/// Shown when the expression engine rejects an expression
pub const SYNTAX_ERROR: &str = "Syntax Error";
/// Shown when no expression engine is attached
pub const ENGINE_MISSING: &str = "Error: Math lib missing";

/// Calculator input state machine
#[derive(Debug)]
pub struct InputController {
    expression: String,
    result: String,
    mode: Mode,
    ans: Value,
    modifiers: Modifiers,
    memory: f64,
    equation: Option<EquationSession>,
    engine: Option<Box<dyn ExpressionEngine>>,
    config: CalcConfig,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    /// Creates a controller backed by the bundled [`Evaluator`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(Box::new(Evaluator::new()))
    }

    /// Creates a controller backed by a custom engine
    #[must_use]
    pub fn with_engine(engine: Box<dyn ExpressionEngine>) -> Self {
        Self::build(Some(engine))
    }

    /// Creates a controller with no engine attached
    ///
    /// Every submit outside EQN mode then reports [`ENGINE_MISSING`].
    #[must_use]
    pub fn without_engine() -> Self {
        Self::build(None)
    }

    /// Replaces the display configuration
    #[must_use]
    pub fn with_config(mut self, config: CalcConfig) -> Self {
        self.config = config;
        self
    }

    fn build(engine: Option<Box<dyn ExpressionEngine>>) -> Self {
        Self {
            expression: String::new(),
            result: String::from("0"),
            mode: Mode::default(),
            ans: Value::default(),
            modifiers: Modifiers::default(),
            memory: 0.0,
            equation: None,
            engine,
            config: CalcConfig::default(),
        }
    }

    // ===== Accessors =====

    /// Expression display, prefixed with the active modifier markers
    #[must_use]
    pub fn expression(&self) -> String {
        format!("{}{}", self.modifiers.prefix(), self.expression)
    }

    /// Expression buffer without modifier markers
    #[must_use]
    pub fn raw_expression(&self) -> &str {
        &self.expression
    }

    /// Result display
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Current mode
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Last successful answer
    #[must_use]
    pub fn ans(&self) -> &Value {
        &self.ans
    }

    /// Memory register
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Whether SHIFT is armed
    #[must_use]
    pub fn shift_active(&self) -> bool {
        self.modifiers.shift
    }

    /// Whether ALPHA is armed
    #[must_use]
    pub fn alpha_active(&self) -> bool {
        self.modifiers.alpha
    }

    /// Modifier flags
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Equation session in progress
    #[must_use]
    pub fn equation(&self) -> Option<&EquationSession> {
        self.equation.as_ref()
    }

    /// Whether an expression engine is attached
    #[must_use]
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Display configuration
    #[must_use]
    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    // ===== Key handling =====

    /// Handles a key by its label
    pub fn handle_key(&mut self, label: &str) {
        self.press(Key::from_label(label));
    }

    /// Handles one key press
    pub fn press(&mut self, key: Key) {
        debug!(key = %key, mode = %self.mode, "key");
        let held = self.modifiers.snapshot();

        match &key {
            Key::Shift | Key::Alpha => {
                if let Some(modifier) = Modifier::toggled_by(&key) {
                    self.modifiers.toggle(modifier);
                }
                return;
            }
            Key::Mode => {
                self.cycle_mode();
                return;
            }
            Key::On => {
                self.reset();
                return;
            }
            Key::AllClear => self.all_clear(),
            Key::Delete => {
                self.expression.pop();
            }
            Key::Equals => self.submit(false),
            Key::MemoryPlus if !held.shift => self.submit(true),
            other => {
                if let Some(text) = other.insertion(held.shift) {
                    self.expression.push_str(text);
                }
            }
        }

        self.modifiers.release(&key);
    }

    /// Clears the expression and any equation session
    pub fn all_clear(&mut self) {
        self.expression.clear();
        self.equation = None;
        self.result = if self.mode == Mode::Eqn {
            EQN_ENTRY_PROMPT.to_string()
        } else {
            String::from("0")
        };
    }

    /// Returns every piece of state to power-on defaults
    pub fn reset(&mut self) {
        self.expression.clear();
        self.result = String::from("0");
        self.mode = Mode::Comp;
        self.modifiers.clear();
        self.ans = Value::default();
        self.memory = 0.0;
        self.equation = None;
        debug!("reset");
    }

    /// Advances to the next mode in the ring
    pub fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
        self.expression.clear();
        self.equation = None;
        self.result = if self.mode == Mode::Eqn {
            EQN_ENTRY_PROMPT.to_string()
        } else {
            format!("Mode: {}", self.mode)
        };
        debug!(mode = %self.mode, "mode changed");
    }

    /// Submits the expression buffer
    ///
    /// In EQN mode the buffer goes to the equation session instead of the
    /// engine. With `add_to_memory`, a real result is added to memory.
    pub fn submit(&mut self, add_to_memory: bool) {
        if self.mode == Mode::Eqn {
            let input = self.expression.clone();
            self.advance_equation(&input);
            return;
        }

        let Some(engine) = self.engine.as_mut() else {
            self.result = ENGINE_MISSING.to_string();
            return;
        };

        let text = substitute_ans(&self.expression, &self.ans);
        match engine.evaluate(&text) {
            Ok(value) => {
                self.result = match &value {
                    Value::Matrix(m) => m.to_string(),
                    other => engine.format(other, self.config.precision),
                };
                if add_to_memory {
                    if let Some(x) = value.as_scalar() {
                        self.memory += x;
                        self.result = format!("M = {}", display_number(self.memory));
                    }
                }
                debug!(expression = %text, result = %self.result, "evaluated");
                self.ans = value;
            }
            Err(e) => {
                warn!(expression = %text, error = %e, "evaluation failed");
                self.result = SYNTAX_ERROR.to_string();
            }
        }
    }

    /// Feeds one entry to the equation session, starting one if needed
    pub fn advance_equation(&mut self, input: &str) {
        let Some(mut session) = self.equation.take() else {
            self.equation = Some(EquationSession::new());
            self.result = TYPE_PROMPT.to_string();
            self.expression.clear();
            return;
        };

        match session.advance(input, self.config.root_decimals) {
            Transition::Prompt(text) => {
                self.result = text;
                self.expression.clear();
                self.equation = Some(session);
            }
            Transition::Retry(text) => {
                self.result = text;
                self.equation = Some(session);
            }
            Transition::Done(text) => {
                self.result = text;
                self.expression.clear();
            }
        }
    }
}

/// Replaces every `Ans` with the parenthesised answer literal
fn substitute_ans(expression: &str, ans: &Value) -> String {
    if expression.contains("Ans") {
        expression.replace("Ans", &format!("({})", ans.to_literal()))
    } else {
        expression.to_string()
    }
}
