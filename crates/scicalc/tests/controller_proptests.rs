//! Property-based tests for the input controller

use proptest::prelude::*;
use scicalc::prelude::*;

// ===== Strategy definitions =====

/// Any named key except the three that leave the modifiers alone
fn consuming_key_strategy() -> impl Strategy<Value = Key> {
    prop::sample::select(
        Key::NAMED
            .iter()
            .filter(|k| !matches!(k, Key::Shift | Key::Alpha | Key::Mode))
            .cloned()
            .collect::<Vec<_>>(),
    )
}

/// Any key label, named or literal
fn label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(Key::NAMED.to_vec()).prop_map(|k| k.label().to_string()),
        "[0-9.]",
        "[a-z²π]{1,3}",
    ]
}

/// Labels biased toward the keys that open, advance and close equation sessions
fn session_label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(vec!["EQUALS", "MODE", "AC", "ON", "1", "2"])
            .prop_map(String::from),
        2 => label_strategy(),
    ]
}

fn controller_after(labels: &[String]) -> InputController {
    let mut calc = InputController::new();
    for label in labels {
        calc.handle_key(label);
    }
    calc
}

// ===== DEL =====

proptest! {
    /// DEL removes at most one character and never panics
    #[test]
    fn prop_delete_shrinks_by_one_char(labels in prop::collection::vec(label_strategy(), 0..20)) {
        let mut calc = controller_after(&labels);
        let before = calc.raw_expression().chars().count();
        calc.handle_key("DEL");
        let after = calc.raw_expression().chars().count();
        prop_assert_eq!(after, before.saturating_sub(1));
    }
}

// ===== Modifiers =====

proptest! {
    /// Shift armed before a consuming key is clear afterwards
    #[test]
    fn prop_shift_consumed(key in consuming_key_strategy(), prefix in prop::collection::vec(label_strategy(), 0..8)) {
        let mut calc = controller_after(&prefix);
        if !calc.shift_active() {
            calc.handle_key("SHIFT");
        }
        calc.press(key);
        prop_assert!(!calc.shift_active());
    }

    /// Alpha armed before a consuming key is clear afterwards
    #[test]
    fn prop_alpha_consumed(key in consuming_key_strategy(), prefix in prop::collection::vec(label_strategy(), 0..8)) {
        let mut calc = controller_after(&prefix);
        if !calc.alpha_active() {
            calc.handle_key("ALPHA");
        }
        calc.press(key);
        prop_assert!(!calc.alpha_active());
    }

    /// SHIFT toggles shift and leaves alpha untouched
    #[test]
    fn prop_shift_toggles_only_shift(prefix in prop::collection::vec(label_strategy(), 0..8)) {
        let mut calc = controller_after(&prefix);
        let before = calc.modifiers();
        calc.handle_key("SHIFT");
        prop_assert_eq!(calc.shift_active(), !before.shift);
        prop_assert_eq!(calc.alpha_active(), before.alpha);
    }

    /// ALPHA toggles alpha and leaves shift untouched
    #[test]
    fn prop_alpha_toggles_only_alpha(prefix in prop::collection::vec(label_strategy(), 0..8)) {
        let mut calc = controller_after(&prefix);
        let before = calc.modifiers();
        calc.handle_key("ALPHA");
        prop_assert_eq!(calc.alpha_active(), !before.alpha);
        prop_assert_eq!(calc.shift_active(), before.shift);
    }

    /// The expression display is the raw buffer behind the markers
    #[test]
    fn prop_expression_ends_with_buffer(labels in prop::collection::vec(label_strategy(), 0..20)) {
        let calc = controller_after(&labels);
        let shown = calc.expression();
        prop_assert!(shown.ends_with(calc.raw_expression()));
        prop_assert_eq!(shown.len() - calc.raw_expression().len(), calc.modifiers().prefix().len());
    }
}

// ===== Modes =====

proptest! {
    /// Four MODE presses return to the starting mode, clearing as they go
    #[test]
    fn prop_mode_ring_closes(prefix in prop::collection::vec(label_strategy(), 0..12)) {
        let mut calc = controller_after(&prefix);
        let start = calc.mode();
        for _ in 0..4 {
            calc.handle_key("MODE");
            prop_assert_eq!(calc.raw_expression(), "");
            prop_assert!(calc.equation().is_none());
        }
        prop_assert_eq!(calc.mode(), start);
    }

    /// An equation session only exists in EQN mode, whatever keys came before
    #[test]
    fn prop_session_implies_eqn_mode(labels in prop::collection::vec(session_label_strategy(), 0..60)) {
        let mut calc = InputController::new();
        for label in &labels {
            calc.handle_key(label);
            prop_assert!(
                calc.equation().is_none() || calc.mode() == Mode::Eqn,
                "session outside EQN after {:?} in {:?}",
                label,
                calc.mode()
            );
        }
    }

    /// ON always returns to power-on state
    #[test]
    fn prop_on_resets(labels in prop::collection::vec(label_strategy(), 0..20)) {
        let mut calc = controller_after(&labels);
        calc.handle_key("ON");
        prop_assert_eq!(calc.mode(), Mode::Comp);
        prop_assert_eq!(calc.expression(), "");
        prop_assert_eq!(calc.result(), "0");
        prop_assert_eq!(calc.memory(), 0.0);
        prop_assert!(calc.equation().is_none());
    }
}

// ===== Equation coefficients =====

proptest! {
    /// Real roots of (x - p)(x - q) are recovered
    #[test]
    fn prop_quadratic_integer_roots(p in -20i32..20, q in -20i32..20) {
        prop_assume!(p != q);
        let b = -(p + q);
        let c = p * q;
        let mut calc = InputController::new();
        for key in ["MODE", "MODE", "MODE", "EQUALS", "1", "EQUALS", "1", "EQUALS"] {
            calc.handle_key(key);
        }
        calc.handle_key(&b.to_string());
        calc.handle_key("EQUALS");
        calc.handle_key(&c.to_string());
        calc.handle_key("EQUALS");
        let x1 = calc.result().trim_start_matches("X1=").to_string();
        calc.handle_key("EQUALS");
        let x2 = calc.result().trim_start_matches("X2=").to_string();
        let mut roots = [x1, x2];
        roots.sort();
        let mut expected = [p.max(q).to_string(), p.min(q).to_string()];
        expected.sort();
        prop_assert_eq!(roots, expected);
    }
}
