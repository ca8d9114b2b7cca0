use crate::GameResult;
use crate::attractor::{AttractorConfig, WinningRegionOverlay};
use crate::property_graph::VertexId;
use std::collections::BTreeSet;

/// The mutable state of the attractor fixpoint.
#[derive(Clone, Debug)]
pub struct AttractorState {
    pub iteration: usize,
    /// The vertices attracted so far.
    pub win: BTreeSet<VertexId>,
    /// The overlay mirroring `win`, written by every iteration.
    pub overlay: WinningRegionOverlay,
}

impl AttractorState {
    /// The initial state: `win` holds exactly the final vertices and each of them is
    /// marked in a fresh overlay called `overlay_name`.
    pub fn new(config: &AttractorConfig, overlay_name: &str) -> GameResult<AttractorState> {
        let mut overlay = WinningRegionOverlay::new(config.graph.clone(), overlay_name)?;
        for vertex in &config.finals {
            overlay.mark(*vertex);
        }
        Ok(AttractorState {
            iteration: 0,
            win: config.finals.clone(),
            overlay,
        })
    }
}

/// The initial state with an overlay named after the first free variant of
/// [`WinningRegionOverlay::DEFAULT_NAME`].
impl TryFrom<&AttractorConfig> for AttractorState {
    type Error = crate::GameError;

    fn try_from(value: &AttractorConfig) -> GameResult<Self> {
        let name =
            WinningRegionOverlay::free_name(&value.graph, WinningRegionOverlay::DEFAULT_NAME);
        AttractorState::new(value, &name)
    }
}

impl From<AttractorState> for WinningRegionOverlay {
    fn from(value: AttractorState) -> Self {
        value.overlay
    }
}
