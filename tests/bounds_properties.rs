//! Property tests for the map-bounds invariant

use proptest::prelude::*;

use wildmarch::entity::{Npc, NpcKind};

const BOUND: f64 = 100.0;

proptest! {
    /// Position stays within bounds after any sequence of moves, however
    /// large the deltas.
    #[test]
    fn position_stays_in_bounds(
        start_x in 0.0..=BOUND,
        start_y in 0.0..=BOUND,
        deltas in prop::collection::vec((-250.0..250.0f64, -250.0..250.0f64), 0..64),
    ) {
        let mut npc = Npc::new(NpcKind::Knight, "Rover", start_x, start_y, BOUND).unwrap();
        for (dx, dy) in deltas {
            npc.advance(dx, dy, BOUND);
            let pos = npc.pos();
            prop_assert!((0.0..=BOUND).contains(&pos.x));
            prop_assert!((0.0..=BOUND).contains(&pos.y));
        }
    }

    /// Construction fails outside the bound on either axis.
    #[test]
    fn construction_rejects_outside_bound(
        x in prop_oneof![-1000.0..-0.001, (BOUND + 0.001)..1000.0],
        y in 0.0..=BOUND,
    ) {
        prop_assert!(Npc::new(NpcKind::Orc, "Stray", x, y, BOUND).is_err());
        prop_assert!(Npc::new(NpcKind::Orc, "Stray", y, x, BOUND).is_err());
    }

    /// Construction succeeds anywhere inside the bound.
    #[test]
    fn construction_accepts_inside_bound(x in 0.0..=BOUND, y in 0.0..=BOUND) {
        prop_assert!(Npc::new(NpcKind::Bear, "Settler", x, y, BOUND).is_ok());
    }
}
