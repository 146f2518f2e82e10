//! Merge rules - what a sliding tile and the tile it runs into turn into
//!
//! Dispatch is keyed on the stationary tile's kind first, then on the sliding
//! tile's kind. [`merge_rule`] is pure and never touches randomness, so it can
//! back move-availability checks; [`result_of_merging`] builds the new tile and
//! may draw from the generator (a log of zero spawns a random heavy tile).
//!
//! Scores: a merged tile is worth its own value unless it comes from an
//! inverse operation (root, log), in which case it refunds whatever was
//! invested beyond the synthesized cost of its new value. The tile's score is
//! always folded into its accumulated score before it is returned, floored at
//! zero; a log first resets the accumulated score to the synthesized cost, so
//! it ends at `max(0, 2 * synthesized - invested)`.

use rand::Rng;

use crate::rng::heavy_value;
use crate::tile::Tile;
use crate::types::{TileKind, CURSOR_MERGE_VALUE};

/// Which row of the dispatch table applies to a pair of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// A cursor turns any non-cursor target into a 2048
    Cursor,
    /// Equal multiply tiles combine into their product
    MultiplySquare,
    /// Equal root tiles combine into a deeper root
    RootDeepen,
    /// A multiply tile scales a number
    Multiply,
    /// A root tile takes the n-th root of a number
    Root,
    /// A log tile replaces a number by its base-2 logarithm
    Log,
    /// Equal numbers add up
    Add,
}

/// Find the rule for `from` sliding into `to`, if any
pub fn merge_rule(from: &Tile, to: &Tile) -> Option<MergeRule> {
    use TileKind::*;

    match (to.kind, from.kind) {
        (Cursor, _) => None,
        (_, Cursor) => Some(MergeRule::Cursor),

        (Multiply, Multiply)
            if from.value == to.value && from.value.checked_mul(to.value).is_some() =>
        {
            Some(MergeRule::MultiplySquare)
        }
        (Multiply, _) => None,

        (Log, _) => None,

        (Root, Root) if from.value == to.value && from.value.checked_add(to.value).is_some() => {
            Some(MergeRule::RootDeepen)
        }
        (Root, _) => None,

        (Number, Multiply) if from.value.checked_mul(to.value).is_some() => {
            Some(MergeRule::Multiply)
        }
        (Number, Root) if is_nth_rootable(from.value, to.value) => Some(MergeRule::Root),
        (Number, Log) if is_loggable(to.value) => Some(MergeRule::Log),
        (Number, Number) if from.value == to.value && from.value.checked_add(to.value).is_some() => {
            Some(MergeRule::Add)
        }
        (Number, _) => None,
    }
}

/// Whether `from` sliding into `to` would produce a tile
pub fn can_merge(from: &Tile, to: &Tile) -> bool {
    merge_rule(from, to).is_some()
}

/// Synthesize the tile produced by `from` sliding into `to`.
///
/// The result is unplaced; the caller decides where it lands.
pub fn result_of_merging<R: Rng + ?Sized>(from: &Tile, to: &Tile, rng: &mut R) -> Option<Tile> {
    let rule = merge_rule(from, to)?;
    let combined = from.accumulated_score.saturating_add(to.accumulated_score);

    let mut merged = match rule {
        MergeRule::Cursor => Tile::new(TileKind::Number, CURSOR_MERGE_VALUE, false),
        MergeRule::MultiplySquare => {
            Tile::new(TileKind::Multiply, from.value * to.value, false)
                .with_accumulated_score(combined)
        }
        MergeRule::RootDeepen => {
            Tile::new(TileKind::Root, from.value + to.value, false).with_accumulated_score(combined)
        }
        MergeRule::Multiply => {
            Tile::new(TileKind::Number, from.value * to.value, to.heavy)
                .with_accumulated_score(combined)
        }
        MergeRule::Add => {
            Tile::new(TileKind::Number, from.value + to.value, false)
                .with_accumulated_score(combined)
        }
        MergeRule::Root => {
            let tile = Tile::new(TileKind::Number, nth_root(from.value, to.value), to.heavy)
                .with_accumulated_score(combined);
            refund(tile, synthesized_accumulated_score(&tile), combined)
        }
        MergeRule::Log => {
            // A log restarts the investment at the synthesized cost; the
            // refund is still folded in below, floored at zero.
            if to.value == 0 {
                let tile = Tile::new(TileKind::Number, heavy_value(rng), true);
                refund(tile, 0, combined)
            } else {
                let tile = Tile::new(TileKind::Number, log2_round(to.value) as u64, to.heavy)
                    .with_accumulated_score(combined);
                let synthesized = synthesized_accumulated_score(&tile);
                refund(tile.with_accumulated_score(synthesized), synthesized, combined)
            }
        }
    };

    let accumulated = i128::from(merged.accumulated_score) + i128::from(merged.score);
    merged.accumulated_score = u64::try_from(accumulated.max(0)).unwrap_or(u64::MAX);
    Some(merged)
}

/// Score an inverse operation: the tile earns (usually loses) the difference
/// between the synthesized cost of its new value and what was invested.
fn refund(mut tile: Tile, synthesized: u64, combined: u64) -> Tile {
    let delta = i128::from(synthesized) - i128::from(combined);
    tile.score = i64::try_from(delta).unwrap_or(i64::MIN);
    tile
}

/// Score that building `tile.value = 2^n` by doubling from base tiles would
/// have earned (`2^n * (n - 2)`, floored at 0), clamped to what the tile
/// actually accumulated.
pub fn synthesized_accumulated_score(tile: &Tile) -> u64 {
    let n = i128::from(log2_round(tile.value));
    let built = ((1i128 << n) * (n - 2)).max(0);
    let built = u64::try_from(built).unwrap_or(u64::MAX);
    tile.accumulated_score.min(built)
}

/// Base-2 logarithm rounded to the nearest integer; 0 and 1 map to 0
pub fn log2_round(x: u64) -> u32 {
    if x <= 1 {
        return 0;
    }
    let floor = x.ilog2();
    if x.is_power_of_two() {
        return floor;
    }
    // x >= 2^(floor + 1/2)  <=>  x^2 >= 2^(2 * floor + 1)
    let squared = u128::from(x) * u128::from(x);
    if squared >= 1u128 << (2 * floor + 1) {
        floor + 1
    } else {
        floor
    }
}

/// Whether `x` has an exact integer `n`-th root
pub fn is_nth_rootable(n: u64, x: u64) -> bool {
    if x == 0 {
        return true;
    }
    if n == 0 {
        return false;
    }
    if x.is_power_of_two() {
        return u64::from(x.ilog2()) % n == 0;
    }
    exact_pow(integer_root(n, x), n) == Some(x)
}

/// Integer `n`-th root of `x`; exact whenever [`is_nth_rootable`] holds
pub fn nth_root(n: u64, x: u64) -> u64 {
    if x == 0 || n == 0 {
        return x;
    }
    if x.is_power_of_two() {
        return 1u64 << (u64::from(x.ilog2()) / n);
    }
    integer_root(n, x)
}

/// Whether a log tile can act on `x`: values up to 1, or powers of two
/// whose exponent is itself a power of two
pub fn is_loggable(x: u64) -> bool {
    if x <= 1 {
        return true;
    }
    x.is_power_of_two() && x.ilog2().is_power_of_two()
}

/// Largest `r` with `r^n <= x`
fn integer_root(n: u64, x: u64) -> u64 {
    if n == 1 || x <= 1 {
        return x;
    }
    let (mut lo, mut hi) = (1u64, x.min(1u64 << 32));
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        match exact_pow(mid, n) {
            Some(p) if p <= x => lo = mid,
            _ => hi = mid - 1,
        }
    }
    lo
}

/// `base^exp` without overflow, `None` when it does not fit in a u64
fn exact_pow(base: u64, exp: u64) -> Option<u64> {
    if base <= 1 || exp == 0 {
        return Some(if exp == 0 { 1 } else { base });
    }
    let exp = u32::try_from(exp).ok().filter(|&e| e < 64)?;
    base.checked_pow(exp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log2_round() {
        assert_eq!(log2_round(0), 0);
        assert_eq!(log2_round(1), 0);
        assert_eq!(log2_round(2), 1);
        assert_eq!(log2_round(1024), 10);
        assert_eq!(log2_round(3), 2); // 1.58 rounds up
        assert_eq!(log2_round(5), 2); // 2.32 rounds down
        assert_eq!(log2_round(6), 3); // 2.58 rounds up
        assert_eq!(log2_round(u64::MAX), 64);
    }

    #[test]
    fn test_nth_rootable_powers_of_two() {
        assert!(is_nth_rootable(2, 16));
        assert!(is_nth_rootable(4, 16));
        assert!(!is_nth_rootable(3, 16));
        assert!(is_nth_rootable(2, 1));
        assert!(is_nth_rootable(2, 0));
        assert!(!is_nth_rootable(2, 8));
    }

    #[test]
    fn test_nth_rootable_exact_integers() {
        assert!(is_nth_rootable(2, 9));
        assert!(is_nth_rootable(3, 27));
        assert!(!is_nth_rootable(2, 10));
        // 3^40 fits in a u64 and must not be misclassified by rounding.
        let big = 3u64.pow(40);
        assert!(is_nth_rootable(2, big));
        assert_eq!(nth_root(2, big), 3u64.pow(20));
        assert!(!is_nth_rootable(2, big + 2));
    }

    #[test]
    fn test_nth_root_values() {
        assert_eq!(nth_root(2, 16), 4);
        assert_eq!(nth_root(4, 65536), 16);
        assert_eq!(nth_root(2, 0), 0);
        assert_eq!(nth_root(2, 1), 1);
        assert_eq!(nth_root(3, 125), 5);
    }

    #[test]
    fn test_rootable_with_huge_root_degree() {
        assert!(!is_nth_rootable(128, 3));
        assert!(is_nth_rootable(128, 1));
        assert!(!is_nth_rootable(64, 1 << 32));
    }

    #[test]
    fn test_loggable() {
        assert!(is_loggable(0));
        assert!(is_loggable(1));
        assert!(is_loggable(2));
        assert!(is_loggable(4));
        assert!(is_loggable(16));
        assert!(is_loggable(256));
        assert!(is_loggable(65536));
        assert!(!is_loggable(8));
        assert!(!is_loggable(32));
        assert!(!is_loggable(3));
    }

    #[test]
    fn test_synthesized_accumulated_score() {
        let rich = |value| Tile::new(TileKind::Number, value, false).with_accumulated_score(u64::MAX);
        assert_eq!(synthesized_accumulated_score(&rich(0)), 0);
        assert_eq!(synthesized_accumulated_score(&rich(2)), 0);
        assert_eq!(synthesized_accumulated_score(&rich(4)), 0);
        assert_eq!(synthesized_accumulated_score(&rich(8)), 8);
        assert_eq!(synthesized_accumulated_score(&rich(16)), 32);
        assert_eq!(synthesized_accumulated_score(&rich(2048)), 2048 * 9);

        // Never more than what was actually accumulated.
        let poor = Tile::new(TileKind::Number, 2048, false).with_accumulated_score(100);
        assert_eq!(synthesized_accumulated_score(&poor), 100);
    }

    #[test]
    fn test_log_accumulated_score_is_reset_then_refunded() {
        let log = Tile::new(TileKind::Log, 0, false);
        let mut rng = crate::rng::seeded(0);

        // 256 built from 2s: synthesized cost of 8 is 8, refund is 8 - 1536.
        let rich = Tile::new(TileKind::Number, 256, false).with_accumulated_score(1536);
        let merged = result_of_merging(&log, &rich, &mut rng).unwrap();
        assert_eq!(merged.value, 8);
        assert_eq!(merged.score, 8 - 1536);
        assert_eq!(merged.accumulated_score, 0);

        // Little invested: 2 * 8 - 10 survives the floor.
        let cheap = Tile::new(TileKind::Number, 256, false).with_accumulated_score(10);
        let merged = result_of_merging(&log, &cheap, &mut rng).unwrap();
        assert_eq!(merged.score, -2);
        assert_eq!(merged.accumulated_score, 6);
    }

    #[test]
    fn test_exact_pow_overflow() {
        assert_eq!(exact_pow(2, 63), Some(1 << 63));
        assert_eq!(exact_pow(2, 64), None);
        assert_eq!(exact_pow(1, 1_000_000), Some(1));
        assert_eq!(exact_pow(7, 0), Some(1));
    }
}
