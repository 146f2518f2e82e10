//! Merge rule tests: the dispatch table and score bookkeeping.

use tui_tiles::core::{can_merge, merge_rule, result_of_merging, seeded, MergeRule, Tile};
use tui_tiles::types::TileKind;

fn tile(kind: TileKind, value: u64) -> Tile {
    Tile::new(kind, value, false)
}

#[test]
fn test_dispatch_table() {
    use TileKind::*;

    let cases = [
        // (from, to, rule)
        (tile(Number, 8), tile(Number, 8), Some(MergeRule::Add)),
        (tile(Number, 8), tile(Number, 4), None),
        (tile(Multiply, 2), tile(Number, 8), Some(MergeRule::Multiply)),
        (tile(Number, 8), tile(Multiply, 2), None),
        (tile(Multiply, 3), tile(Multiply, 3), Some(MergeRule::MultiplySquare)),
        (tile(Multiply, 3), tile(Multiply, 2), None),
        (tile(Root, 2), tile(Number, 64), Some(MergeRule::Root)),
        (tile(Root, 2), tile(Number, 32), None),
        (tile(Root, 2), tile(Root, 2), Some(MergeRule::RootDeepen)),
        (tile(Log, 0), tile(Number, 16), Some(MergeRule::Log)),
        (tile(Log, 0), tile(Number, 8), None),
        (tile(Log, 0), tile(Log, 0), None),
        (tile(Number, 2), tile(Log, 0), None),
        (tile(Cursor, 0), tile(Multiply, 2), Some(MergeRule::Cursor)),
        (tile(Number, 2), tile(Cursor, 0), None),
        (tile(Cursor, 0), tile(Cursor, 0), None),
    ];
    for (from, to, rule) in cases {
        assert_eq!(merge_rule(&from, &to), rule, "{from:?} into {to:?}");
        assert_eq!(can_merge(&from, &to), rule.is_some());
    }
}

#[test]
fn test_add_folds_score_into_accumulated() {
    let from = tile(TileKind::Number, 8).with_accumulated_score(8);
    let to = tile(TileKind::Number, 8).with_accumulated_score(8);
    let merged = result_of_merging(&from, &to, &mut seeded(0)).unwrap();
    assert_eq!(merged.value, 16);
    assert_eq!(merged.score, 16);
    assert_eq!(merged.accumulated_score, 8 + 8 + 16);
    assert_eq!(merged.position, None);
}

#[test]
fn test_multiply_inherits_heavy() {
    let from = tile(TileKind::Multiply, 4);
    let to = Tile::new(TileKind::Number, 16, true);
    let merged = result_of_merging(&from, &to, &mut seeded(0)).unwrap();
    assert_eq!((merged.value, merged.heavy), (64, true));
}

#[test]
fn test_overflow_means_no_merge() {
    let big = 1u64 << 63;
    assert!(!can_merge(&tile(TileKind::Number, big), &tile(TileKind::Number, big)));
    assert!(!can_merge(&tile(TileKind::Multiply, 4), &tile(TileKind::Number, big)));
}

#[test]
fn test_inverse_merges_never_exceed_investment() {
    let mut rng = seeded(1);
    for exponent in 1..=16u32 {
        let value = 1u64 << exponent;
        let invested = value * u64::from(exponent.saturating_sub(1));
        let target = tile(TileKind::Number, value).with_accumulated_score(invested);

        for slider in [tile(TileKind::Root, 2), tile(TileKind::Log, 0)] {
            let Some(merged) = result_of_merging(&slider, &target, &mut rng) else {
                continue;
            };
            // A refund only ever gives back what was invested.
            assert!(merged.score <= 0, "{slider:?} into {value}");
            assert!(merged.accumulated_score <= invested);
        }
    }
}

#[test]
fn test_log_of_one_is_zero() {
    let merged = result_of_merging(&tile(TileKind::Log, 0), &tile(TileKind::Number, 1), &mut seeded(0)).unwrap();
    assert_eq!((merged.kind, merged.value, merged.heavy), (TileKind::Number, 0, false));
}
