mod solver_tests;

use proptest::prelude::*;

/// Random turn-based arenas as `(owners, finals, edges)`, where `owners[i]` is `true` for
/// player 1 vertices. Edge lists may contain self-loops and parallel edges.
pub(super) fn arena_strategy() -> impl Strategy<Value = (Vec<bool>, Vec<bool>, Vec<(usize, usize)>)>
{
    (1usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(prop::bool::weighted(0.2), n),
            prop::collection::vec((0..n, 0..n), 0..n * 3),
        )
    })
}
