//! Key vocabulary
//!
//! Key labels are an open set: the named keys below have dedicated
//! behavior, every other label is typed into the expression as-is.

use std::fmt;

/// A key press understood by the input controller
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// `AC`: clear the expression and any equation session
    AllClear,
    /// `DEL`: remove the last character
    Delete,
    /// `EQUALS`: submit the expression
    Equals,
    /// `M+`: submit and add to memory (`;` under shift)
    MemoryPlus,
    /// `ANS`: last answer placeholder
    Ans,
    /// `PLUS`
    Plus,
    /// `MINUS`
    Minus,
    /// `MULTIPLY`
    Multiply,
    /// `DIVIDE`
    Divide,
    /// `SHIFT`: one-shot shift modifier
    Shift,
    /// `ALPHA`: one-shot alpha modifier
    Alpha,
    /// `MODE`: advance to the next calculator mode
    Mode,
    /// `ON`: full reset
    On,
    /// `SIN` (`asin` under shift)
    Sin,
    /// `COS` (`acos` under shift)
    Cos,
    /// `TAN` (`atan` under shift)
    Tan,
    /// `LOG`: base-10 logarithm
    Log,
    /// `LN`: natural logarithm (`e^` under shift)
    Ln,
    /// `SQRT`
    Sqrt,
    /// `X2`: square
    Square,
    /// `POW`
    Pow,
    /// `EXP`: Euler's number
    Exp,
    /// `(` (`[` under shift)
    OpenParen,
    /// `)` (`]` under shift)
    CloseParen,
    /// `SD` (`,` under shift)
    Sd,
    /// `ENG` (`i` under shift)
    Eng,
    /// Any other label, typed verbatim
    Literal(String),
}

impl Key {
    /// Every named key, in keypad order
    pub const NAMED: [Key; 26] = [
        Key::AllClear,
        Key::Delete,
        Key::Equals,
        Key::MemoryPlus,
        Key::Ans,
        Key::Plus,
        Key::Minus,
        Key::Multiply,
        Key::Divide,
        Key::Shift,
        Key::Alpha,
        Key::Mode,
        Key::On,
        Key::Sin,
        Key::Cos,
        Key::Tan,
        Key::Log,
        Key::Ln,
        Key::Sqrt,
        Key::Square,
        Key::Pow,
        Key::Exp,
        Key::OpenParen,
        Key::CloseParen,
        Key::Sd,
        Key::Eng,
    ];

    /// Parses a key label; unknown labels become [`Key::Literal`]
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "AC" => Self::AllClear,
            "DEL" => Self::Delete,
            "EQUALS" => Self::Equals,
            "M+" => Self::MemoryPlus,
            "ANS" => Self::Ans,
            "PLUS" => Self::Plus,
            "MINUS" => Self::Minus,
            "MULTIPLY" => Self::Multiply,
            "DIVIDE" => Self::Divide,
            "SHIFT" => Self::Shift,
            "ALPHA" => Self::Alpha,
            "MODE" => Self::Mode,
            "ON" => Self::On,
            "SIN" => Self::Sin,
            "COS" => Self::Cos,
            "TAN" => Self::Tan,
            "LOG" => Self::Log,
            "LN" => Self::Ln,
            "SQRT" => Self::Sqrt,
            "X2" => Self::Square,
            "POW" => Self::Pow,
            "EXP" => Self::Exp,
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            "SD" => Self::Sd,
            "ENG" => Self::Eng,
            other => Self::Literal(other.to_string()),
        }
    }

    /// The label this key is pressed with
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::AllClear => "AC",
            Self::Delete => "DEL",
            Self::Equals => "EQUALS",
            Self::MemoryPlus => "M+",
            Self::Ans => "ANS",
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Multiply => "MULTIPLY",
            Self::Divide => "DIVIDE",
            Self::Shift => "SHIFT",
            Self::Alpha => "ALPHA",
            Self::Mode => "MODE",
            Self::On => "ON",
            Self::Sin => "SIN",
            Self::Cos => "COS",
            Self::Tan => "TAN",
            Self::Log => "LOG",
            Self::Ln => "LN",
            Self::Sqrt => "SQRT",
            Self::Square => "X2",
            Self::Pow => "POW",
            Self::Exp => "EXP",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Sd => "SD",
            Self::Eng => "ENG",
            Self::Literal(text) => text.as_str(),
        }
    }

    /// Text appended to the expression, given the shift state
    ///
    /// `None` for keys that do not type anything (control keys, and `SD`/`ENG`
    /// without shift).
    #[must_use]
    pub fn insertion(&self, shift: bool) -> Option<&str> {
        let text = match self {
            Self::Ans => "Ans",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::MemoryPlus if shift => ";",
            Self::Sin => pick(shift, "asin(", "sin("),
            Self::Cos => pick(shift, "acos(", "cos("),
            Self::Tan => pick(shift, "atan(", "tan("),
            Self::Log => "log10(",
            Self::Ln => pick(shift, "e^", "log("),
            Self::Sqrt => "sqrt(",
            Self::Square => "^2",
            Self::Pow => "^",
            Self::Exp => "e",
            Self::OpenParen => pick(shift, "[", "("),
            Self::CloseParen => pick(shift, "]", ")"),
            Self::Sd if shift => ",",
            Self::Eng if shift => "i",
            Self::Literal(text) => text.as_str(),
            _ => return None,
        };
        Some(text)
    }

    /// Short description for key listings
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AllClear => "clear expression and equation session",
            Self::Delete => "delete last character",
            Self::Equals => "evaluate / advance equation solver",
            Self::MemoryPlus => "evaluate and add to memory (shift: ';')",
            Self::Ans => "insert last answer",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Multiply => "'*'",
            Self::Divide => "'/'",
            Self::Shift => "toggle shift for the next key",
            Self::Alpha => "toggle alpha for the next key",
            Self::Mode => "cycle COMP -> CMPLX -> MAT -> EQN",
            Self::On => "full reset",
            Self::Sin => "sin( (shift: asin()",
            Self::Cos => "cos( (shift: acos()",
            Self::Tan => "tan( (shift: atan()",
            Self::Log => "log10(",
            Self::Ln => "log( (shift: e^)",
            Self::Sqrt => "sqrt(",
            Self::Square => "^2",
            Self::Pow => "^",
            Self::Exp => "e",
            Self::OpenParen => "( (shift: [)",
            Self::CloseParen => ") (shift: ])",
            Self::Sd => "shift: ','",
            Self::Eng => "shift: imaginary unit i",
            Self::Literal(_) => "typed verbatim",
        }
    }
}

const fn pick<'a>(shift: bool, shifted: &'a str, plain: &'a str) -> &'a str {
    if shift {
        shifted
    } else {
        plain
    }
}

impl From<&str> for Key {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_labels_round_trip() {
        for key in Key::NAMED {
            assert_eq!(Key::from_label(key.label()), key);
        }
    }

    #[test]
    fn test_unknown_label_is_literal() {
        assert_eq!(Key::from_label("7"), Key::Literal("7".into()));
        assert_eq!(Key::from_label("."), Key::Literal(".".into()));
        assert_eq!(Key::from("ac"), Key::Literal("ac".into()));
    }

    #[test]
    fn test_operator_insertions() {
        assert_eq!(Key::Plus.insertion(false), Some("+"));
        assert_eq!(Key::Minus.insertion(true), Some("-"));
        assert_eq!(Key::Multiply.insertion(false), Some("*"));
        assert_eq!(Key::Divide.insertion(false), Some("/"));
        assert_eq!(Key::Ans.insertion(false), Some("Ans"));
    }

    #[test]
    fn test_shift_sensitive_insertions() {
        assert_eq!(Key::Sin.insertion(false), Some("sin("));
        assert_eq!(Key::Sin.insertion(true), Some("asin("));
        assert_eq!(Key::Cos.insertion(true), Some("acos("));
        assert_eq!(Key::Tan.insertion(true), Some("atan("));
        assert_eq!(Key::Ln.insertion(false), Some("log("));
        assert_eq!(Key::Ln.insertion(true), Some("e^"));
        assert_eq!(Key::OpenParen.insertion(true), Some("["));
        assert_eq!(Key::CloseParen.insertion(true), Some("]"));
        assert_eq!(Key::MemoryPlus.insertion(true), Some(";"));
    }

    #[test]
    fn test_shift_only_keys() {
        assert_eq!(Key::Sd.insertion(false), None);
        assert_eq!(Key::Sd.insertion(true), Some(","));
        assert_eq!(Key::Eng.insertion(false), None);
        assert_eq!(Key::Eng.insertion(true), Some("i"));
        assert_eq!(Key::MemoryPlus.insertion(false), None);
    }

    #[test]
    fn test_control_keys_insert_nothing() {
        for key in [Key::AllClear, Key::Delete, Key::Equals, Key::Shift, Key::Alpha, Key::Mode, Key::On] {
            assert_eq!(key.insertion(false), None, "{key}");
            assert_eq!(key.insertion(true), None, "{key}");
        }
    }

    #[test]
    fn test_every_named_key_is_described() {
        for key in Key::NAMED {
            assert!(!key.description().is_empty());
        }
    }
}
