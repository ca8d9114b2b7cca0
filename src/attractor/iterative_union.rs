use crate::attractor::{AttractorConfig, AttractorState, PredecessorStep, WinningRegionOverlay};
use crate::{log_region, simple_type_name};
use cancel_this::Cancelled;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::debug;
use std::marker::PhantomData;

/// A helper implementation of [`ComputationStep`] that repeatedly calls a [`PredecessorStep`]
/// function, collecting the results into the current `state` and marking them in its overlay.
///
/// Each step is one fixpoint iteration. The step that finds no new vertices completes the
/// computation and returns the overlay.
pub struct IterativeUnion<S: PredecessorStep>(PhantomData<S>);

impl<S: PredecessorStep> ComputationStep<AttractorConfig, AttractorState, WinningRegionOverlay>
    for IterativeUnion<S>
{
    fn step(
        context: &AttractorConfig,
        state: &mut AttractorState,
    ) -> Completable<WinningRegionOverlay> {
        if state.iteration >= context.max_iterations {
            debug!(
                "[iteration:{}] Union<{}> canceled (exceeded iteration count).",
                state.iteration,
                simple_type_name::<S>()
            );

            return Err(Cancelled::new("AttractorConfig::max_iterations").into());
        } else {
            state.iteration += 1;
        }

        let attracted = S::step(context, &state.win)?;
        if attracted.is_empty() {
            debug!(
                "[iteration:{}] Union<{}> finished with ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_region(&state.win)
            );

            Ok(state.overlay.clone())
        } else {
            for vertex in attracted {
                state.overlay.mark(vertex);
                state.win.insert(vertex);
            }

            debug!(
                "[iteration:{}] Union<{}> increased to ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_region(&state.win)
            );

            Err(Suspended)
        }
    }
}
