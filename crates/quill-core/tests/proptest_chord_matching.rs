#![forbid(unsafe_code)]

//! Property tests for chord matching.
//!
//! Validates:
//! - A chord matches an event exactly when every modifier requirement
//!   is met exactly (no subset matching).
//! - Case folding applies only to the character key, never to
//!   modifiers.
//! - A chord and its shifted variant never match the same event.

use proptest::prelude::*;

use quill_core::{Chord, KeyCode, KeyEvent, Modifiers};

fn modifiers_strategy() -> impl Strategy<Value = Modifiers> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(shift, alt, ctrl, super_key)| {
            let mut m = Modifiers::NONE;
            if shift {
                m |= Modifiers::SHIFT;
            }
            if alt {
                m |= Modifiers::ALT;
            }
            if ctrl {
                m |= Modifiers::CTRL;
            }
            if super_key {
                m |= Modifiers::SUPER;
            }
            m
        },
    )
}

fn chord_strategy() -> impl Strategy<Value = Chord> {
    (proptest::char::range('a', 'z'), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(c, accel, shift, alt)| {
            let mut chord = if accel {
                Chord::accel(KeyCode::Char(c))
            } else {
                Chord::new(KeyCode::Char(c))
            };
            if shift {
                chord = chord.with_shift();
            }
            if alt {
                chord = chord.with_alt();
            }
            chord
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn match_is_exact_on_modifiers(
        chord in chord_strategy(),
        mods in modifiers_strategy(),
        c in proptest::char::range('a', 'z'),
    ) {
        let event = KeyEvent::new(KeyCode::Char(c)).with_modifiers(mods);
        let matched = chord.matches(&event);

        let key_ok = matches!(chord.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c));
        let accel_held = mods.contains(Modifiers::CTRL) || mods.contains(Modifiers::SUPER);
        let expected = key_ok
            && accel_held == chord.accel
            && mods.contains(Modifiers::SHIFT) == chord.shift
            && mods.contains(Modifiers::ALT) == chord.alt;

        prop_assert_eq!(matched, expected);
    }

    #[test]
    fn uppercase_event_matches_lowercase_chord(
        c in proptest::char::range('a', 'z'),
        mods in modifiers_strategy(),
    ) {
        let lower = Chord { code: KeyCode::Char(c), accel: false, shift: false, alt: false };
        let upper_event =
            KeyEvent::new(KeyCode::Char(c.to_ascii_uppercase())).with_modifiers(mods);
        let lower_event = KeyEvent::new(KeyCode::Char(c)).with_modifiers(mods);
        prop_assert_eq!(lower.matches(&upper_event), lower.matches(&lower_event));
    }

    #[test]
    fn shifted_and_unshifted_chords_are_disjoint(
        c in proptest::char::range('a', 'z'),
        mods in modifiers_strategy(),
    ) {
        let plain = Chord::accel(KeyCode::Char(c));
        let shifted = Chord::accel(KeyCode::Char(c)).with_shift();
        let event = KeyEvent::new(KeyCode::Char(c)).with_modifiers(mods);
        prop_assert!(!(plain.matches(&event) && shifted.matches(&event)));
    }
}
