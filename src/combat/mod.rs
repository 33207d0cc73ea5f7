//! Combat rule engine: type-matchup eligibility plus randomized confirmation
//!
//! Resolution is two-staged. `eligibility` is a pure function of the two
//! kinds and only says which side *may* die; `confirm` then draws dice for
//! each eligible side. The dice source is injected so tests can pin rolls.

use rand::Rng;

use crate::entity::NpcKind;

/// Which sides of an encounter may die, by the kind matchup alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Eligibility {
    pub defender: bool,
    pub attacker: bool,
}

/// Fixed cyclic dominance: Knight > Orc, Bear > Knight, Orc > Bear.
///
/// Same-kind encounters are neutral. Both flags derive from the static kind
/// pair; no state, no locking.
pub fn eligibility(attacker: NpcKind, defender: NpcKind) -> Eligibility {
    Eligibility {
        defender: attacker.prey() == defender,
        attacker: defender.prey() == attacker,
    }
}

/// Confirmed outcome of one encounter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verdict {
    pub defender_died: bool,
    pub attacker_died: bool,
}

impl Verdict {
    pub fn any(self) -> bool {
        self.defender_died || self.attacker_died
    }
}

/// Randomized confirmation of an eligibility result.
///
/// For each eligible side, two independent dice are drawn; the eligible side
/// dies only if the opposing roll is strictly greater than its own. The two
/// eligibility checks use independent draws, never reused.
pub fn confirm(elig: Eligibility, dice: &mut dyn FnMut() -> u8) -> Verdict {
    let mut verdict = Verdict::default();

    if elig.defender {
        let attacker_roll = dice();
        let defender_roll = dice();
        verdict.defender_died = attacker_roll > defender_roll;
    }

    if elig.attacker {
        let attacker_roll = dice();
        let defender_roll = dice();
        verdict.attacker_died = defender_roll > attacker_roll;
    }

    verdict
}

/// Uniform draw in [1, 6]
pub fn roll_d6<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(1..=6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligibility_truth_table() {
        use NpcKind::*;
        for attacker in NpcKind::ALL {
            for defender in NpcKind::ALL {
                let elig = eligibility(attacker, defender);
                assert_eq!(elig.defender, attacker.prey() == defender);
                assert_eq!(elig.attacker, defender.prey() == attacker);
            }
        }

        // spot checks on the cycle
        assert_eq!(
            eligibility(Knight, Orc),
            Eligibility { defender: true, attacker: false }
        );
        assert_eq!(
            eligibility(Orc, Knight),
            Eligibility { defender: false, attacker: true }
        );
        assert_eq!(
            eligibility(Bear, Bear),
            Eligibility { defender: false, attacker: false }
        );
    }

    fn pinned(rolls: Vec<u8>) -> impl FnMut() -> u8 {
        let mut iter = rolls.into_iter();
        move || iter.next().unwrap()
    }

    #[test]
    fn test_confirm_requires_strictly_greater_roll() {
        let elig = Eligibility { defender: true, attacker: false };

        let verdict = confirm(elig, &mut pinned(vec![6, 1]));
        assert!(verdict.defender_died);

        let verdict = confirm(elig, &mut pinned(vec![1, 6]));
        assert!(!verdict.defender_died);

        // equal rolls spare the eligible side
        let verdict = confirm(elig, &mut pinned(vec![4, 4]));
        assert!(!verdict.defender_died);
    }

    #[test]
    fn test_confirm_attacker_side_is_symmetric() {
        let elig = Eligibility { defender: false, attacker: true };

        // attacker roll 1, defender roll 6: eligible attacker dies
        let verdict = confirm(elig, &mut pinned(vec![1, 6]));
        assert!(verdict.attacker_died);
        assert!(!verdict.defender_died);

        let verdict = confirm(elig, &mut pinned(vec![6, 1]));
        assert!(!verdict.attacker_died);
    }

    #[test]
    fn test_confirm_neutral_matchup_draws_no_dice() {
        let mut dice = || panic!("neutral matchup must not roll");
        let verdict = confirm(Eligibility::default(), &mut dice);
        assert!(!verdict.any());
    }

    #[test]
    fn test_roll_d6_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let roll = roll_d6(&mut rng);
            assert!((1..=6).contains(&roll));
        }
    }
}
