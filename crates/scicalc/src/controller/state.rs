//! Calculator mode ring and the one-shot modifiers

use crate::controller::key::Key;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level operating context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Standard computation
    #[default]
    Comp,
    /// Complex numbers
    Cmplx,
    /// Matrices
    Mat,
    /// Guided equation solving
    Eqn,
}

impl Mode {
    /// Ring order followed by the MODE key
    pub const RING: [Mode; 4] = [Mode::Comp, Mode::Cmplx, Mode::Mat, Mode::Eqn];

    /// The mode after this one in the ring
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Comp => Self::Cmplx,
            Self::Cmplx => Self::Mat,
            Self::Mat => Self::Eqn,
            Self::Eqn => Self::Comp,
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Comp => "COMP",
            Self::Cmplx => "CMPLX",
            Self::Mat => "MAT",
            Self::Eqn => "EQN",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two one-shot modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// SHIFT
    Shift,
    /// ALPHA
    Alpha,
}

impl Modifier {
    /// Marker shown in front of the expression while active
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Shift => "S ",
            Self::Alpha => "A ",
        }
    }

    /// The modifier a key toggles, if it is a toggle key
    #[must_use]
    pub const fn toggled_by(key: &Key) -> Option<Self> {
        match key {
            Key::Shift => Some(Self::Shift),
            Key::Alpha => Some(Self::Alpha),
            _ => None,
        }
    }
}

/// One-shot modifier flags
///
/// Consumption is two-phase: [`Modifiers::snapshot`] is taken before a key
/// is dispatched and is the only thing branch logic reads;
/// [`Modifiers::release`] runs once afterwards and clears every set flag
/// the key does not itself toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// SHIFT is armed
    pub shift: bool,
    /// ALPHA is armed
    pub alpha: bool,
}

impl Modifiers {
    /// Whether `modifier` is armed
    #[must_use]
    pub const fn is_active(self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Alpha => self.alpha,
        }
    }

    /// Flips `modifier`, leaving the other untouched
    pub fn toggle(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Shift => self.shift = !self.shift,
            Modifier::Alpha => self.alpha = !self.alpha,
        }
    }

    /// Copy of the current flags for dispatch to read
    #[must_use]
    pub const fn snapshot(self) -> Self {
        self
    }

    /// Clears every armed modifier that `key` does not toggle
    pub fn release(&mut self, key: &Key) {
        let own = Modifier::toggled_by(key);
        if self.shift && own != Some(Modifier::Shift) {
            self.shift = false;
        }
        if self.alpha && own != Some(Modifier::Alpha) {
            self.alpha = false;
        }
    }

    /// Clears both flags
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Display prefix: shift marker first, alpha marker in front of it
    #[must_use]
    pub fn prefix(self) -> String {
        let mut prefix = String::new();
        if self.alpha {
            prefix.push_str(Modifier::Alpha.marker());
        }
        if self.shift {
            prefix.push_str(Modifier::Shift.marker());
        }
        prefix
    }
}
