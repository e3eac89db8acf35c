//! Property tests for pin reservation

use l293d_core::registry::{PIN_MAX, PIN_MIN};
use l293d_core::{PinError, PinRegistry};
use proptest::prelude::*;

fn valid_pin() -> impl Strategy<Value = u8> {
    PIN_MIN..=PIN_MAX
}

fn invalid_pin() -> impl Strategy<Value = u8> {
    prop_oneof![Just(0u8), (PIN_MAX + 1)..=u8::MAX]
}

/// Three distinct valid pins
fn distinct_triple() -> impl Strategy<Value = [u8; 3]> {
    (valid_pin(), valid_pin(), valid_pin())
        .prop_filter("pins must be distinct", |(a, b, c)| a != b && b != c && a != c)
        .prop_map(|(a, b, c)| [a, b, c])
}

proptest! {
    #[test]
    fn out_of_range_pin_is_rejected(
        triple in distinct_triple(),
        bad in invalid_pin(),
        slot in 0usize..3,
    ) {
        let mut pins = triple;
        pins[slot] = bad;

        let mut registry = PinRegistry::new();
        prop_assert_eq!(registry.reserve(&pins), Err(PinError::InvalidPin(bad)));
        prop_assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_within_triple_is_in_use(
        pin in valid_pin(),
        other in valid_pin(),
        slots in prop_oneof![Just((0usize, 1usize)), Just((0, 2)), Just((1, 2))],
    ) {
        prop_assume!(pin != other);
        let mut pins = [other; 3];
        pins[slots.0] = pin;
        pins[slots.1] = pin;

        let mut registry = PinRegistry::new();
        let err = registry.reserve(&pins).unwrap_err();
        prop_assert!(matches!(err, PinError::PinInUse(_)));
        prop_assert!(registry.is_empty());
    }

    #[test]
    fn distinct_valid_triple_is_reserved(pins in distinct_triple()) {
        let mut registry = PinRegistry::new();
        prop_assert!(registry.reserve(&pins).is_ok());
        for pin in pins {
            prop_assert!(registry.is_reserved(pin));
        }
        prop_assert_eq!(registry.len(), 3);
    }

    #[test]
    fn overlapping_triple_fails_without_side_effects(
        first in distinct_triple(),
        second in distinct_triple(),
    ) {
        let mut registry = PinRegistry::new();
        registry.reserve(&first).unwrap();

        let overlaps = second.iter().any(|p| first.contains(p));
        let result = registry.reserve(&second);

        if overlaps {
            let conflict = second.iter().copied().find(|p| first.contains(p)).unwrap();
            prop_assert_eq!(result, Err(PinError::PinInUse(conflict)));
            prop_assert_eq!(registry.len(), 3);
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(registry.len(), 6);
        }
    }

    #[test]
    fn no_pin_held_twice(triples in proptest::collection::vec(distinct_triple(), 1..12)) {
        let mut registry = PinRegistry::new();
        let mut held: Vec<u8> = Vec::new();

        for pins in triples {
            if registry.reserve(&pins).is_ok() {
                held.extend_from_slice(&pins);
            }
        }

        let mut sorted = held.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), held.len());
        prop_assert_eq!(registry.len(), held.len());
    }
}

#[test]
fn second_motor_scenario() {
    let mut registry = PinRegistry::new();
    registry.reserve(&[1, 2, 3]).unwrap();

    for pin in [1, 2, 3] {
        assert_eq!(
            registry.reserve(&[pin, 10, 11]),
            Err(PinError::PinInUse(pin))
        );
    }
    assert!(registry.reserve(&[4, 5, 6]).is_ok());
}
