//! Property-based tests for position mapping.

use proptest::prelude::*;
use remap::{Direction, EditKind, PositionMap};
use replay::{LinearMap, Mapper, Tape};

use Direction::{CurrentToOrigin, OriginToCurrent};

// =============================================================================
// Test helpers
// =============================================================================

#[derive(Clone, Copy, Debug)]
struct Op {
    kind: EditKind,
    position: i64,
    length: i64,
}

fn arbitrary_op(span: i64, max_len: i64) -> impl Strategy<Value = Op> {
    (any::<bool>(), 0..span, 1..=max_len).prop_map(|(insert, position, length)| Op {
        kind: if insert { EditKind::Insert } else { EditKind::Delete },
        position,
        length,
    })
}

fn arbitrary_insert(span: i64, max_len: i64) -> impl Strategy<Value = Op> {
    (0..span, 1..=max_len).prop_map(|(position, length)| Op {
        kind: EditKind::Insert,
        position,
        length,
    })
}

fn arbitrary_delete(span: i64, max_len: i64) -> impl Strategy<Value = Op> {
    (0..span, 1..=max_len).prop_map(|(position, length)| Op {
        kind: EditKind::Delete,
        position,
        length,
    })
}

fn build(ops: &[Op]) -> PositionMap {
    let mut map = PositionMap::new();
    for op in ops {
        let result = match op.kind {
            EditKind::Insert => map.insert(op.position, op.length),
            EditKind::Delete => map.delete(op.position, op.length),
        };
        result.expect("generated edits are valid");
    }
    return map;
}

fn build_reference<M: Mapper>(mut mapper: M, ops: &[Op]) -> M {
    for op in ops {
        match op.kind {
            EditKind::Insert => mapper.insert(op.position as u64, op.length as u64),
            EditKind::Delete => mapper.delete(op.position as u64, op.length as u64),
        }
    }
    return mapper;
}

// =============================================================================
// Agreement with the reference mappers
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Pruned tree traversal gives the same answers as full linear replay.
    #[test]
    fn matches_linear_replay(
        ops in prop::collection::vec(arbitrary_op(200, 20), 0..120),
    ) {
        let map = build(&ops);
        let linear = build_reference(LinearMap::new(), &ops);

        for p in 0..300i64 {
            prop_assert_eq!(map.map(OriginToCurrent, p), linear.forward(p as u64), "forward {}", p);
            prop_assert_eq!(map.map(CurrentToOrigin, p), linear.backward(p as u64), "backward {}", p);
        }
    }

    /// The tree agrees with a byte-by-byte simulation of the stream.
    #[test]
    fn matches_tape_simulation(
        ops in prop::collection::vec(arbitrary_op(80, 10), 0..60),
    ) {
        let map = build(&ops);
        let tape = build_reference(Tape::new(), &ops);

        for p in 0..200i64 {
            prop_assert_eq!(map.map(OriginToCurrent, p), tape.forward(p as u64), "forward {}", p);
            prop_assert_eq!(map.map(CurrentToOrigin, p), tape.backward(p as u64), "backward {}", p);
        }
    }
}

// =============================================================================
// Mapping laws
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// With no edits, every position maps to itself in both directions.
    #[test]
    fn empty_history_is_identity(p in 0i64..i64::MAX) {
        let map = PositionMap::new();
        prop_assert_eq!(map.map(OriginToCurrent, p), Some(p as u64));
        prop_assert_eq!(map.map(CurrentToOrigin, p), Some(p as u64));
    }

    /// Forward then backward returns the starting origin position.
    #[test]
    fn forward_round_trip(
        ops in prop::collection::vec(arbitrary_op(500, 30), 0..100),
        p in 0i64..800,
    ) {
        let map = build(&ops);
        if let Some(q) = map.map(OriginToCurrent, p) {
            prop_assert_eq!(map.map(CurrentToOrigin, q as i64), Some(p as u64));
        }
    }

    /// Backward then forward returns the starting current position.
    #[test]
    fn backward_round_trip(
        ops in prop::collection::vec(arbitrary_op(500, 30), 0..100),
        q in 0i64..800,
    ) {
        let map = build(&ops);
        if let Some(p) = map.map(CurrentToOrigin, q) {
            prop_assert_eq!(map.map(OriginToCurrent, p as i64), Some(q as u64));
        }
    }

    /// Inserts only ever push origin bytes to the right.
    #[test]
    fn pure_inserts_shift_right(
        ops in prop::collection::vec(arbitrary_insert(500, 30), 1..100),
        p in 0i64..800,
    ) {
        let map = build(&ops);
        let q = map.map(OriginToCurrent, p);
        prop_assert!(q.is_some());
        prop_assert!(q.unwrap() >= p as u64);
    }

    /// Deletes only ever pull surviving origin bytes to the left.
    #[test]
    fn pure_deletes_shift_left(
        ops in prop::collection::vec(arbitrary_delete(500, 30), 1..100),
        p in 0i64..800,
    ) {
        let map = build(&ops);
        if let Some(q) = map.map(OriginToCurrent, p) {
            prop_assert!(q <= p as u64);
        }
    }

    /// A delete on a fresh map removes exactly its range.
    #[test]
    fn single_delete_unmaps_its_range(position in 0i64..1000, length in 1i64..50) {
        let mut map = PositionMap::new();
        map.delete(position, length).unwrap();

        for q in position..position + length {
            prop_assert_eq!(map.map(OriginToCurrent, q), None);
        }
        prop_assert_eq!(map.map(OriginToCurrent, position + length), Some(position as u64));
    }

    /// Every byte removed by the latest delete is unmapped going forward.
    #[test]
    fn deleted_range_is_unmapped(
        ops in prop::collection::vec(arbitrary_op(300, 20), 0..60),
        position in 0i64..300,
        length in 1i64..20,
    ) {
        let before = build(&ops);
        let mut after = build(&ops);
        after.delete(position, length).unwrap();

        // Origin bytes sitting at [position, position + length) just before
        // the delete must have no current position afterwards.
        for q in position..position + length {
            if let Some(origin) = before.map(CurrentToOrigin, q) {
                prop_assert_eq!(after.map(OriginToCurrent, origin as i64), None);
            }
        }
    }

    /// Invalid appends leave every answer unchanged.
    #[test]
    fn invalid_append_is_noop(
        ops in prop::collection::vec(arbitrary_op(200, 20), 0..50),
        position in -50i64..200,
        length in -20i64..=0,
        negative in -50i64..0,
    ) {
        let mut map = build(&ops);
        let before: Vec<_> = (0..250).map(|p| map.map(OriginToCurrent, p)).collect();
        let len_before = map.len();

        prop_assert!(map.insert(position, length).is_err());
        prop_assert!(map.delete(position, length).is_err());
        prop_assert!(map.insert(negative, 5).is_err());
        prop_assert!(map.delete(negative, 5).is_err());

        let after: Vec<_> = (0..250).map(|p| map.map(OriginToCurrent, p)).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(map.len(), len_before);
    }

    /// Positions beyond every edit shift by the net length change.
    #[test]
    fn tail_shifts_by_net_change(
        ops in prop::collection::vec(arbitrary_op(100, 10), 0..50),
    ) {
        let map = build(&ops);
        let net: i64 = ops.iter().map(|op| match op.kind {
            EditKind::Insert => op.length,
            EditKind::Delete => -op.length,
        }).sum();

        // Every edit lies below 100 + 50 * 10 in every coordinate system.
        let p = 10_000i64;
        prop_assert_eq!(map.map(OriginToCurrent, p), Some((p + net) as u64));
    }
}

// =============================================================================
// Balance
// =============================================================================

#[test]
fn long_append_run_stays_shallow() {
    let mut map = PositionMap::new();
    let n = 200_000i64;
    for i in 0..n {
        if i % 3 == 0 {
            map.delete(i % 5000, 1).unwrap();
        } else {
            map.insert(i % 7000, 2).unwrap();
        }
    }

    assert_eq!(map.len(), n as usize);
    let bound = 2 * (usize::BITS - (n as usize + 1).leading_zeros()) as usize;
    assert!(map.depth() <= bound, "depth {} exceeds {}", map.depth(), bound);
}

#[test]
fn queries_below_history_are_cheap() {
    let mut map = PositionMap::new();
    for i in 0..50_000i64 {
        map.insert(1_000_000 + i, 1).unwrap();
    }

    let (mapped, stats) = map.map_with_stats(OriginToCurrent, 42);
    assert_eq!(mapped, Some(42));
    assert_eq!(stats.visited, 0);

    let (mapped, stats) = map.map_with_stats(CurrentToOrigin, 42);
    assert_eq!(mapped, Some(42));
    assert_eq!(stats.visited, 0);
}
