use battleship_agent::{
    BoatDirection, BoatType, Field, FieldPosition, GuessData, HitStatus, BOATS, FIELD_COLS,
    FIELD_ROWS, TOTAL_BOAT_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn random_fleet(seed: u64) -> Field {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut field = Field::new(FieldPosition::Empty);
    for boat in BOATS {
        field.place_boat_randomly(&mut rng, boat);
    }
    field
}

fn direction() -> impl Strategy<Value = BoatDirection> {
    prop::sample::select(BoatDirection::ALL.to_vec())
}

fn boat() -> impl Strategy<Value = BoatType> {
    prop::sample::select(BOATS.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placement_is_exact_or_untouched(
        seed in any::<u64>(),
        row in 0..FIELD_ROWS + 2,
        col in 0..FIELD_COLS + 2,
        dir in direction(),
        boat in boat(),
    ) {
        let mut field = Field::new(FieldPosition::Empty);
        // A partially filled field so overlaps are exercised too.
        let mut rng = SmallRng::seed_from_u64(seed);
        field.place_boat_randomly(&mut rng, BoatType::Medium);
        let before = field.clone();
        let boat_cells = field.cells_matching(FieldPosition::Boat(boat)).count_ones();

        match field.add_boat(row, col, dir, boat) {
            Ok(()) => {
                let after = field.cells_matching(FieldPosition::Boat(boat)).count_ones();
                prop_assert_eq!(after, boat_cells + boat.size());
                prop_assert_eq!(
                    field.cells_matching(FieldPosition::Empty).count_ones(),
                    before.cells_matching(FieldPosition::Empty).count_ones() - boat.size()
                );
            }
            Err(_) => prop_assert_eq!(field, before),
        }
    }

    #[test]
    fn random_fleet_covers_eighteen_cells(seed in any::<u64>()) {
        let field = random_fleet(seed);
        for boat in BOATS {
            prop_assert_eq!(
                field.cells_matching(FieldPosition::Boat(boat)).count_ones(),
                boat.size()
            );
        }
        prop_assert_eq!(field.boat_states(), 0b1111);
    }

    #[test]
    fn empty_cells_never_cost_lives(
        seed in any::<u64>(),
        row in 0..FIELD_ROWS as u8,
        col in 0..FIELD_COLS as u8,
    ) {
        let mut field = random_fleet(seed);
        let lives_before: Vec<u8> = BOATS.iter().map(|b| field.lives(*b)).collect();
        let mut guess = GuessData::new(row, col);
        let previous = field.register_enemy_attack(&mut guess).unwrap();
        let lives_after: Vec<u8> = BOATS.iter().map(|b| field.lives(*b)).collect();

        match previous {
            FieldPosition::Boat(boat) => {
                prop_assert!(guess.hit.is_hit());
                prop_assert_eq!(field.lives(boat), boat.lives() - 1);
                prop_assert_eq!(field.at(row as usize, col as usize), Ok(FieldPosition::Hit));
            }
            _ => {
                prop_assert_eq!(guess.hit, HitStatus::Miss);
                prop_assert_eq!(lives_before, lives_after);
            }
        }
    }

    #[test]
    fn attacking_every_cell_sinks_the_fleet(seed in any::<u64>()) {
        let mut field = random_fleet(seed);
        let mut sunk = Vec::new();
        for row in 0..FIELD_ROWS as u8 {
            for col in 0..FIELD_COLS as u8 {
                let mut guess = GuessData::new(row, col);
                field.register_enemy_attack(&mut guess).unwrap();
                if let HitStatus::Sunk(boat) = guess.hit {
                    sunk.push(boat);
                }
            }
        }
        sunk.sort_by_key(|b| b.index());
        prop_assert_eq!(sunk, BOATS.to_vec());
        prop_assert_eq!(field.boat_states(), 0);
        prop_assert_eq!(field.cells_matching(FieldPosition::Hit).count_ones(), TOTAL_BOAT_CELLS);
    }
}
