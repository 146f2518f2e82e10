//! RNG module - randomized tile generation
//!
//! Every random decision the game makes goes through a single injected
//! generator, consulted in a fixed order per spawn:
//!
//! 1. tile kind (one to three draws, ruleset dependent)
//! 2. base value (number and multiply tiles only)
//! 3. heavy trigger and doubling coins (heavy ruleset, countdown at zero)
//! 4. the empty cell (drawn by the grid)
//!
//! Seeding the generator therefore replays a game exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{
    Ruleset, TileKind, HEAVY_BASE_VALUE, HEAVY_MAX_VALUE, HEAVY_SPAWN_CHANCE, SPAWN_TWO_CHANCE,
};

/// Default generator type used by the game
pub type GameRng = StdRng;

/// Create a deterministic generator from a seed
pub fn seeded(seed: u64) -> GameRng {
    StdRng::seed_from_u64(seed)
}

/// Pick the kind of a newly spawned tile.
///
/// Start tiles and the classic/heavy/home rulesets always spawn numbers.
pub fn spawn_kind<R: Rng + ?Sized>(ruleset: Ruleset, initial: bool, rng: &mut R) -> TileKind {
    if initial {
        return TileKind::Number;
    }
    match ruleset {
        Ruleset::Log => {
            if rng.gen_bool(0.8) {
                TileKind::Number
            } else if rng.gen_bool(0.3) {
                TileKind::Multiply
            } else if rng.gen_bool(0.5) {
                TileKind::Log
            } else {
                TileKind::Root
            }
        }
        Ruleset::Sqrt => {
            if rng.gen_bool(0.8) {
                TileKind::Number
            } else if rng.gen_bool(0.4) {
                TileKind::Multiply
            } else {
                TileKind::Root
            }
        }
        Ruleset::Classic | Ruleset::Heavy | Ruleset::Home => TileKind::Number,
    }
}

/// Base value for a freshly spawned tile of `kind`
pub fn spawn_value<R: Rng + ?Sized>(kind: TileKind, rng: &mut R) -> u64 {
    match kind {
        TileKind::Log | TileKind::Cursor => 0,
        TileKind::Root => 2,
        TileKind::Number | TileKind::Multiply => {
            if rng.gen_bool(SPAWN_TWO_CHANCE) {
                2
            } else {
                4
            }
        }
    }
}

/// Roll the heavy-spawn trigger (only meaningful once the countdown hit zero)
pub fn heavy_triggered<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(HEAVY_SPAWN_CHANCE)
}

/// Random heavy value: 16, doubled on each successful coin flip, at most 512
pub fn heavy_value<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    let mut value = HEAVY_BASE_VALUE;
    while value < HEAVY_MAX_VALUE && rng.gen_bool(0.5) {
        value *= 2;
    }
    value
}
