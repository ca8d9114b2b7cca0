use crate::attractor::{AttractorConfig, PredecessorStep};
use crate::game::Player;
use crate::log_region;
use crate::property_graph::VertexId;
use cancel_this::{Cancellable, is_cancelled};
use log::trace;
use std::collections::BTreeSet;

/// Computes the player 1 vertices outside of `win` with at least one move into `win`.
pub struct Player1Predecessors;

/// Computes the player 2 vertices outside of `win` whose every move leads into `win`.
///
/// A player 2 vertex without moves is never attracted.
pub struct Player2Predecessors;

/// Computes the controllable predecessors of `win`, i.e. the union of [`Player1Predecessors`]
/// and [`Player2Predecessors`], both evaluated against the same `win`.
pub struct ControllablePredecessors;

impl PredecessorStep for Player1Predecessors {
    fn step(
        context: &AttractorConfig,
        win: &BTreeSet<VertexId>,
    ) -> Cancellable<BTreeSet<VertexId>> {
        let mut pre = BTreeSet::new();
        for target in win {
            is_cancelled!()?;
            for vertex in context.predecessors(*target) {
                if win.contains(&vertex) || context.owner(vertex) != Some(Player::One) {
                    continue;
                }
                if pre.insert(vertex) {
                    trace!("Player 1 attracted to `{target}` from `{vertex}`.");
                }
            }
        }
        Ok(pre)
    }
}

impl PredecessorStep for Player2Predecessors {
    fn step(
        context: &AttractorConfig,
        win: &BTreeSet<VertexId>,
    ) -> Cancellable<BTreeSet<VertexId>> {
        let mut pre = BTreeSet::new();
        let mut rejected = BTreeSet::new();
        for target in win {
            is_cancelled!()?;
            for vertex in context.predecessors(*target) {
                if win.contains(&vertex)
                    || pre.contains(&vertex)
                    || rejected.contains(&vertex)
                    || context.owner(vertex) != Some(Player::Two)
                {
                    continue;
                }

                let mut moves = context.successors(vertex).peekable();
                let forced = moves.peek().is_some() && moves.all(|t| win.contains(&t));
                if forced {
                    trace!("Player 2 forced into `{target}` from `{vertex}`.");
                    pre.insert(vertex);
                } else {
                    rejected.insert(vertex);
                }
            }
        }
        Ok(pre)
    }
}

impl PredecessorStep for ControllablePredecessors {
    fn step(
        context: &AttractorConfig,
        win: &BTreeSet<VertexId>,
    ) -> Cancellable<BTreeSet<VertexId>> {
        let mut pre = Player1Predecessors::step(context, win)?;
        is_cancelled!()?;
        pre.extend(Player2Predecessors::step(context, win)?);

        trace!("Controllable predecessors computed ({}).", log_region(&pre));
        Ok(pre)
    }
}
