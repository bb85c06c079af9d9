//! Exhaustive legal-move generation.
//!
//! ## Contract
//!
//! Given a board, a player and the multiset of remaining die values,
//! [`legal_sequences`] returns every *maximal* legal move sequence: a
//! player must use as many dice as legally possible, and when exactly two
//! distinct dice were rolled but only one can be played, the higher die
//! wins. A double contributes four identical entries to the multiset.
//!
//! The search is a plain recursive backtracker over a cloned board: the
//! space is tiny (at most four dice, at most 24 origins), so there is no
//! memoization. Output order is deterministic for fixed inputs.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::board::{Board, BEAR_OFF, OWN_BAR};
use crate::core::{DiceValues, Player};

use super::{Move, MoveSequence};

/// Candidate moves for a single die value.
///
/// Bar entries take absolute priority: while the player has a checker on
/// the bar, entering (own-perspective destination `25 - die`) is the only
/// kind of move available. Otherwise every occupied point offers its
/// ordinary destination (unless guarded by two or more opposing checkers)
/// and, once all checkers are home, bear-offs: exact-pip, or over-count
/// when no checker remains on a higher home point.
#[must_use]
pub fn candidate_moves(board: &Board, player: Player, die: u8) -> SmallVec<[Move; 8]> {
    let mut moves = SmallVec::new();

    if board.bar_count(player) > 0 {
        let entry = 25 - die;
        if !board.is_blocked(player, entry) {
            let hit = board.opponent_checkers_at(player, entry) == 1;
            moves.push(Move::new(OWN_BAR, entry as i8, die, hit));
        }
        return moves;
    }

    let can_bear_off = board.all_home(player);
    for from in 1..=24u8 {
        if board.checkers_at(player, from) == 0 {
            continue;
        }

        let to = from as i8 - die as i8;
        if to >= 1 && !board.is_blocked(player, to as u8) {
            let hit = board.opponent_checkers_at(player, to as u8) == 1;
            moves.push(Move::new(from, to, die, hit));
        }

        if can_bear_off && from <= 6 {
            let exact = die == from;
            let over_count =
                die > from && (from + 1..=6).all(|point| board.checkers_at(player, point) == 0);
            if exact || over_count {
                moves.push(Move::new(from, BEAR_OFF, die, false));
            }
        }
    }
    moves
}

/// Every maximal legal move sequence for the given dice multiset.
///
/// Returns an empty vector when no move is possible at all (a forced
/// pass). Sequences are returned in application order; unordered
/// duplicates are removed.
#[must_use]
pub fn legal_sequences(board: &Board, player: Player, dice: &[u8]) -> Vec<MoveSequence> {
    let mut results = Vec::new();
    let mut best_len = 0;
    let mut current = MoveSequence::new();
    let mut remaining: DiceValues = SmallVec::from_slice(dice);
    search(
        board,
        player,
        &mut remaining,
        &mut current,
        &mut results,
        &mut best_len,
    );

    let mut seen: FxHashSet<MoveSequence> = FxHashSet::default();
    let mut maximal: Vec<MoveSequence> = results
        .into_iter()
        .filter(|sequence| sequence.len() == best_len)
        .filter(|sequence| seen.insert(canonical_key(sequence)))
        .collect();

    // Single-number-playable rule: with two distinct dice and only
    // length-1 plays available, the higher die must be used if it can be.
    if dice.len() == 2 && dice[0] != dice[1] && best_len == 1 {
        let higher = dice[0].max(dice[1]);
        if maximal.iter().any(|sequence| sequence[0].die == higher) {
            maximal.retain(|sequence| sequence[0].die == higher);
        }
    }

    maximal
}

fn canonical_key(sequence: &MoveSequence) -> MoveSequence {
    let mut key = sequence.clone();
    key.sort_by_key(|mv| (mv.from, mv.to, mv.die, mv.hit));
    key
}

fn search(
    board: &Board,
    player: Player,
    remaining: &mut DiceValues,
    current: &mut MoveSequence,
    results: &mut Vec<MoveSequence>,
    best_len: &mut usize,
) {
    let mut extended = false;
    let mut tried: SmallVec<[u8; 4]> = SmallVec::new();

    for index in 0..remaining.len() {
        let die = remaining[index];
        if tried.contains(&die) {
            continue;
        }
        tried.push(die);

        for mv in candidate_moves(board, player, die) {
            extended = true;
            let mut next = *board;
            next.apply_move(player, mv.from, mv.to);

            remaining.remove(index);
            current.push(mv);
            search(&next, player, remaining, current, results, best_len);
            current.pop();
            remaining.insert(index, die);
        }
    }

    // Dice exhausted or nothing playable: this branch is complete.
    if !extended && !current.is_empty() {
        if current.len() > *best_len {
            *best_len = current.len();
            results.clear();
        }
        if current.len() == *best_len {
            results.push(current.clone());
        }
    }
}
