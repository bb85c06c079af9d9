//! Property suites over reachable states: checker conservation, the
//! maximal-dice-usage law, bar-entry priority, and the
//! generate-then-apply round trip.

use proptest::prelude::*;

use gammon_core::moves::generator::candidate_moves;
use gammon_core::{DiceRng, GameState, GameVariant, MoveSequence, Phase, Player};

/// Drive a seeded game forward `turns` transitions and return the state
/// if it is still mid-game in the moving phase.
fn reachable_moving_state(seed: u64, turns: usize) -> Option<GameState> {
    let mut rng = DiceRng::new(seed);
    let mut state = GameState::new(GameVariant::Standard, None)
        .ok()?
        .roll_for_first(&mut rng)
        .ok()?;

    for step in 0..turns {
        if state.is_over() {
            return None;
        }
        state = match state.phase() {
            Phase::Rolling => state.roll_turn(&mut rng).ok()?,
            Phase::Moving => {
                let legal = state.legal_moves();
                let choice: MoveSequence = if legal.is_empty() {
                    MoveSequence::new()
                } else {
                    legal[step % legal.len()].clone()
                };
                state.make_move(&choice, &mut rng).ok()?
            }
            _ => return None,
        };
    }

    if state.phase() == Phase::Moving {
        Some(state)
    } else {
        state.roll_turn(&mut rng).ok()
    }
}

proptest! {
    #[test]
    fn prop_checker_conservation(seed in 0u64..300, turns in 0usize..80) {
        if let Some(state) = reachable_moving_state(seed, turns) {
            state.check_invariants().unwrap();
            for player in Player::both() {
                prop_assert_eq!(state.board().total_checkers(player), 15);
            }
        }
    }

    #[test]
    fn prop_occupied_slots_have_one_owner(seed in 0u64..300, turns in 0usize..80) {
        if let Some(state) = reachable_moving_state(seed, turns) {
            // A slot stores a single stack; owners may not mix, so each
            // side's view of any point must exclude the other's.
            for point in 1..=24u8 {
                let white = state.board().checkers_at(Player::White, point);
                let black = state.board().opponent_checkers_at(Player::White, point);
                prop_assert!(white == 0 || black == 0);
            }
        }
    }

    #[test]
    fn prop_generation_is_deterministic(seed in 0u64..300, turns in 0usize..80) {
        if let Some(state) = reachable_moving_state(seed, turns) {
            prop_assert_eq!(state.legal_moves(), state.legal_moves());
        }
    }

    #[test]
    fn prop_no_sequence_can_be_extended(seed in 0u64..300, turns in 0usize..60) {
        if let Some(state) = reachable_moving_state(seed, turns) {
            let player = state.current_player();
            for sequence in state.legal_moves() {
                let mut board = *state.board();
                let mut remaining: Vec<u8> = state.unused_dice().to_vec();
                for mv in &sequence {
                    board.apply_move(player, mv.from, mv.to);
                    let position = remaining.iter().position(|&die| die == mv.die).unwrap();
                    remaining.remove(position);
                }

                for die in remaining {
                    prop_assert!(
                        candidate_moves(&board, player, die).is_empty(),
                        "sequence extendable with die {}", die
                    );
                }
            }
        }
    }

    #[test]
    fn prop_bar_entry_comes_first(seed in 0u64..300, turns in 0usize..80) {
        if let Some(state) = reachable_moving_state(seed, turns) {
            if state.board().bar_count(state.current_player()) > 0 {
                for sequence in state.legal_moves() {
                    prop_assert!(sequence[0].is_bar_entry());
                }
            }
        }
    }

    #[test]
    fn prop_generated_sequences_round_trip(seed in 0u64..200, turns in 0usize..60) {
        if let Some(state) = reachable_moving_state(seed, turns) {
            let mut rng = DiceRng::new(seed);
            for sequence in state.legal_moves() {
                let next = state.make_move(&sequence, &mut rng);
                prop_assert!(next.is_ok());
                next.unwrap().check_invariants().unwrap();
            }
        }
    }

    #[test]
    fn prop_pass_only_when_forced(seed in 0u64..200, turns in 0usize..60) {
        if let Some(state) = reachable_moving_state(seed, turns) {
            let mut rng = DiceRng::new(seed);
            let pass = state.make_move(&[], &mut rng);
            if state.legal_moves().is_empty() {
                prop_assert!(pass.is_ok());
            } else {
                prop_assert!(pass.is_err());
            }
        }
    }
}
