//! Cyclic rendezvous for the worker pool.
//!
//! Every worker calls [`PhaseBarrier::wait`] at the same checkpoints. Nobody
//! leaves a checkpoint until all parties have arrived, and the barrier resets
//! itself for the next one. A generation counter tells waiters apart from
//! arrivals at the following checkpoint, so the barrier can be reused any
//! number of times.
//!
//! A failing worker calls [`PhaseBarrier::poison`]; everyone blocked now or
//! later gets [`PipelineError::BarrierPoisoned`] instead of waiting forever
//! for a party that will never arrive.

use parking_lot::{Condvar, Mutex};

use crate::error::{PipelineError, Result};

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    generation: u64,
    poisoned: bool,
}

/// Generation-counted reusable barrier.
#[derive(Debug)]
pub struct PhaseBarrier {
    state: Mutex<BarrierState>,
    released: Condvar,
    parties: usize,
}

impl PhaseBarrier {
    /// Barrier for `parties` participants. Zero is treated as one.
    pub fn new(parties: usize) -> Self {
        Self {
            state: Mutex::new(BarrierState::default()),
            released: Condvar::new(),
            parties: parties.max(1),
        }
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Block until all parties have arrived at this checkpoint.
    ///
    /// Returns the generation that just completed (0 for the first
    /// checkpoint, 1 for the second, ...).
    pub fn wait(&self) -> Result<u64> {
        let mut state = self.state.lock();
        if state.poisoned {
            return Err(PipelineError::BarrierPoisoned);
        }

        let generation = state.generation;
        state.arrived += 1;

        if state.arrived == self.parties {
            state.arrived = 0;
            state.generation += 1;
            self.released.notify_all();
            return Ok(generation);
        }

        while state.generation == generation && !state.poisoned {
            self.released.wait(&mut state);
        }

        if state.generation == generation {
            Err(PipelineError::BarrierPoisoned)
        } else {
            Ok(generation)
        }
    }

    /// Release every current and future waiter with an error.
    pub fn poison(&self) {
        let mut state = self.state.lock();
        state.poisoned = true;
        self.released.notify_all();
    }

    pub fn is_poisoned(&self) -> bool {
        self.state.lock().poisoned
    }
}

/// Poisons the barrier if the owning thread unwinds.
pub(crate) struct PoisonOnPanic<'a>(pub &'a PhaseBarrier);

impl Drop for PoisonOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.poison();
        }
    }
}
