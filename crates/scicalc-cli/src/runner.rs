//! Key sequence runner

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{Reporter, Screen};
use scicalc::driver::{CalculatorDriver, Transcript};
use scicalc::prelude::InputController;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Words that end a REPL session
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Drives a calculator from CLI input
#[derive(Debug)]
pub struct KeyRunner {
    config: CliConfig,
}

impl KeyRunner {
    /// Create a runner for the given configuration
    #[must_use]
    pub const fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Fresh controller built from the configuration
    #[must_use]
    pub fn controller(&self) -> InputController {
        let controller = if self.config.engine {
            InputController::new()
        } else {
            InputController::without_engine()
        };
        controller.with_config(self.config.calculator.clone())
    }

    fn reporter(&self) -> Reporter {
        Reporter::new(self.config.format, self.config.color.should_color())
    }

    /// Presses every key in order and captures the final screen
    #[must_use]
    pub fn run(&self, keys: &[String], trace: bool) -> Screen {
        let mut transcript = Transcript::with_controller(self.controller());
        for key in keys {
            transcript.press(key);
        }
        info!(keys = keys.len(), "key sequence finished");
        let screen = Screen::capture(transcript.controller(), None);
        Screen {
            frames: trace.then(|| transcript.into_frames()),
            ..screen
        }
    }

    /// Runs a key sequence and writes the result
    pub fn run_and_report(&self, keys: &[String], trace: bool, out: &mut impl Write) -> CliResult<()> {
        let screen = self.run(keys, trace);
        self.reporter().display(out, &screen)
    }

    /// Reads whitespace-separated key sequences line by line
    ///
    /// State carries over between lines. Blank lines are skipped; `exit`
    /// or `quit` ends the session.
    pub fn repl(&self, input: impl BufRead, out: &mut impl Write) -> CliResult<usize> {
        let reporter = self.reporter();
        let mut controller = self.controller();
        let mut lines = 0;

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if EXIT_WORDS.contains(&trimmed) {
                debug!("repl exit requested");
                break;
            }
            controller.press_all(&trimmed.split_whitespace().collect::<Vec<_>>());
            reporter.display(out, &Screen::capture(&controller, None))?;
            out.flush()?;
            lines += 1;
        }

        info!(lines, "repl finished");
        Ok(lines)
    }

    /// Writes the named key table
    pub fn keys(&self, out: &mut impl Write) -> CliResult<()> {
        self.reporter().keys(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use crate::output::OutputFormat;
    use scicalc::config::CalcConfig;

    fn runner() -> KeyRunner {
        KeyRunner::new(CliConfig::new().with_color(ColorChoice::Never))
    }

    fn keys(labels: &[&str]) -> Vec<String> {
        labels.iter().map(ToString::to_string).collect()
    }

    // ===== run =====

    #[test]
    fn test_run_evaluates() {
        let screen = runner().run(&keys(&["2", "PLUS", "2", "EQUALS"]), false);
        assert_eq!(screen.expression, "2+2");
        assert_eq!(screen.result, "4");
        assert_eq!(screen.mode, "COMP");
        assert!(screen.frames.is_none());
    }

    #[test]
    fn test_run_with_trace() {
        let screen = runner().run(&keys(&["SHIFT", "SIN"]), true);
        let frames = screen.frames.unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].expression, "S ");
        assert_eq!(frames[1].expression, "asin(");
    }

    #[test]
    fn test_run_without_engine() {
        let config = CliConfig::new().with_engine(false);
        let screen = KeyRunner::new(config).run(&keys(&["1", "EQUALS"]), false);
        assert_eq!(screen.result, "Error: Math lib missing");
    }

    #[test]
    fn test_run_uses_calculator_config() {
        let config = CliConfig::new().with_calculator(CalcConfig::new().with_precision(3));
        let screen = KeyRunner::new(config).run(&keys(&["2", "DIVIDE", "3", "EQUALS"]), false);
        assert_eq!(screen.result, "0.667");
    }

    #[test]
    fn test_run_and_report_json() {
        let config = CliConfig::new().with_format(OutputFormat::Json);
        let mut out = Vec::new();
        KeyRunner::new(config)
            .run_and_report(&keys(&["5", "M+"]), false, &mut out)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["result"], "M = 5");
        assert_eq!(value["memory"], 5.0);
    }

    // ===== repl =====

    #[test]
    fn test_repl_keeps_state_between_lines() {
        let input = "2 PLUS 3 EQUALS\n\nAC ANS X2 EQUALS\n";
        let mut out = Vec::new();
        let lines = runner().repl(input.as_bytes(), &mut out).unwrap();
        assert_eq!(lines, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "2+3\n5\nAns^2\n25\n");
    }

    #[test]
    fn test_repl_exit_word() {
        let input = "1 EQUALS\nquit\n2 EQUALS\n";
        let mut out = Vec::new();
        let lines = runner().repl(input.as_bytes(), &mut out).unwrap();
        assert_eq!(lines, 1);
        assert!(!String::from_utf8(out).unwrap().contains('2'));
    }

    #[test]
    fn test_keys_table() {
        let mut out = Vec::new();
        runner().keys(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("AC"));
    }
}
