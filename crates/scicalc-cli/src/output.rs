//! Output formatting for calculator displays

use crate::error::CliResult;
use console::style;
use scicalc::controller::{InputController, Key};
use scicalc::driver::Frame;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format for displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Final display state of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    /// Expression display, including modifier markers
    pub expression: String,
    /// Result display
    pub result: String,
    /// Calculator mode
    pub mode: String,
    /// Memory register
    pub memory: f64,
    /// Per-key frames, when traced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<Frame>>,
}

impl Screen {
    /// Captures the controller's current display
    #[must_use]
    pub fn capture(controller: &InputController, frames: Option<Vec<Frame>>) -> Self {
        Self {
            expression: controller.expression(),
            result: controller.result().to_string(),
            mode: controller.mode().to_string(),
            memory: controller.memory(),
            frames,
        }
    }
}

/// Writes displays in the configured format
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    format: OutputFormat,
    use_color: bool,
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub const fn new(format: OutputFormat, use_color: bool) -> Self {
        Self { format, use_color }
    }

    /// Writes one screen
    pub fn display(&self, out: &mut impl Write, screen: &Screen) -> CliResult<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, screen)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                if let Some(frames) = &screen.frames {
                    for frame in frames {
                        writeln!(out, "{}", self.frame_line(frame))?;
                    }
                }
                writeln!(out, "{}", screen.expression)?;
                writeln!(out, "{}", self.emphasize(&screen.result))?;
            }
        }
        Ok(())
    }

    /// Writes the named key table
    pub fn keys(&self, out: &mut impl Write) -> CliResult<()> {
        match self.format {
            OutputFormat::Json => {
                let table: Vec<_> = Key::NAMED
                    .iter()
                    .map(|k| serde_json::json!({ "key": k.label(), "description": k.description() }))
                    .collect();
                serde_json::to_writer(&mut *out, &table)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                for key in &Key::NAMED {
                    writeln!(out, "{:<10} {}", key.label(), key.description())?;
                }
            }
        }
        Ok(())
    }

    fn frame_line(&self, frame: &Frame) -> String {
        let key = format!("{:<10}", frame.key);
        let key = if self.use_color {
            style(key).cyan().to_string()
        } else {
            key
        };
        format!("{key} {:<24} {}", frame.expression, frame.result)
    }

    fn emphasize(&self, text: &str) -> String {
        if self.use_color {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample(frames: Option<Vec<Frame>>) -> Screen {
        Screen {
            expression: "2+2".into(),
            result: "4".into(),
            mode: "COMP".into(),
            memory: 0.0,
            frames,
        }
    }

    fn render(reporter: Reporter, screen: &Screen) -> String {
        let mut out = Vec::new();
        reporter.display(&mut out, screen).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_display() {
        let text = render(Reporter::new(OutputFormat::Text, false), &sample(None));
        assert_eq!(text, "2+2\n4\n");
    }

    #[test]
    fn test_text_display_with_frames() {
        let frames = vec![Frame {
            key: "2".into(),
            expression: "2".into(),
            result: "0".into(),
        }];
        let text = render(Reporter::new(OutputFormat::Text, false), &sample(Some(frames)));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("2 "));
        assert!(lines[0].ends_with(" 0"));
    }

    #[test]
    fn test_json_display() {
        let json = render(Reporter::new(OutputFormat::Json, false), &sample(None));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"], "4");
        assert_eq!(value["mode"], "COMP");
        assert!(value.get("frames").is_none());
    }

    #[test]
    fn test_key_table() {
        let mut out = Vec::new();
        Reporter::new(OutputFormat::Text, false).keys(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), Key::NAMED.len());
        assert!(text.contains("EQUALS"));

        let mut out = Vec::new();
        Reporter::new(OutputFormat::Json, false).keys(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(Key::NAMED.len()));
    }

    #[test]
    fn test_capture() {
        let mut calc = InputController::new();
        calc.handle_key("SHIFT");
        let display = Screen::capture(&calc, None);
        assert_eq!(display.expression, "S ");
        assert_eq!(display.result, "0");
    }

    #[test]
    fn test_format_serde() {
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
    }
}
