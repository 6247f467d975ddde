//! The conflict-resolution arbiter: a pure, total, deterministic comparison
//! of two `(generation, last_update_time)` pairs under a configured policy.
//! No I/O, no allocation — everything else in this core treats it as a
//! black box it can call freely while holding locks.

use serde::{Deserialize, Serialize};

/// Which field breaks ties first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Policy {
    /// Higher generation wins; ties broken by higher last-update-time.
    GenerationThenTime,
    /// Higher last-update-time wins; ties broken by higher generation.
    TimeThenGeneration,
}

/// The outcome of comparing a "left" candidate against a "right" one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Winner {
    Left,
    Right,
    Equal,
}

/// Compares two candidate versions under `policy`. `Equal` means the two
/// are indistinguishable under the policy, not that every field matches.
pub fn resolve(
    policy: Policy,
    left_gen: u16,
    left_lut: u64,
    right_gen: u16,
    right_lut: u64,
) -> Winner {
    let (left_primary, left_secondary, right_primary, right_secondary) = match policy {
        Policy::GenerationThenTime => {
            (left_gen as u64, left_lut, right_gen as u64, right_lut)
        }
        Policy::TimeThenGeneration => {
            (left_lut, left_gen as u64, right_lut, right_gen as u64)
        }
    };

    match left_primary.cmp(&right_primary) {
        std::cmp::Ordering::Greater => Winner::Left,
        std::cmp::Ordering::Less => Winner::Right,
        std::cmp::Ordering::Equal => match left_secondary.cmp(&right_secondary) {
            std::cmp::Ordering::Greater => Winner::Left,
            std::cmp::Ordering::Less => Winner::Right,
            std::cmp::Ordering::Equal => Winner::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn generation_breaks_ties_on_time() {
        assert_eq!(
            resolve(Policy::GenerationThenTime, 5, 100, 5, 100),
            Winner::Equal
        );
        assert_eq!(
            resolve(Policy::GenerationThenTime, 5, 50, 4, 999),
            Winner::Left
        );
        assert_eq!(
            resolve(Policy::GenerationThenTime, 4, 999, 5, 50),
            Winner::Right
        );
    }

    #[test]
    fn time_priority_breaks_ties_on_generation() {
        assert_eq!(
            resolve(Policy::TimeThenGeneration, 4, 300, 9, 300),
            Winner::Left
        );
        assert_eq!(
            resolve(Policy::TimeThenGeneration, 4, 250, 9, 300),
            Winner::Right
        );
    }

    proptest! {
        #[test]
        fn reflexive(policy in prop_oneof![Just(Policy::GenerationThenTime), Just(Policy::TimeThenGeneration)],
                      g in any::<u16>(), t in any::<u64>()) {
            prop_assert_eq!(resolve(policy, g, t, g, t), Winner::Equal);
        }

        #[test]
        fn antisymmetric(policy in prop_oneof![Just(Policy::GenerationThenTime), Just(Policy::TimeThenGeneration)],
                          lg in any::<u16>(), lt in any::<u64>(),
                          rg in any::<u16>(), rt in any::<u64>()) {
            let forward = resolve(policy, lg, lt, rg, rt);
            let backward = resolve(policy, rg, rt, lg, lt);
            match forward {
                Winner::Left => prop_assert_eq!(backward, Winner::Right),
                Winner::Right => prop_assert_eq!(backward, Winner::Left),
                Winner::Equal => prop_assert_eq!(backward, Winner::Equal),
            }
        }
    }
}
