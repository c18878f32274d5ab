//! Multi-threaded tests for the phase barrier.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use marching::{PhaseBarrier, PipelineError};

#[test]
fn test_barrier_is_reusable_across_rounds() {
    const PARTIES: usize = 4;
    const ROUNDS: u64 = 50;

    let barrier = PhaseBarrier::new(PARTIES);
    let counter = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..PARTIES {
            scope.spawn(|| {
                for round in 0..ROUNDS {
                    counter.fetch_add(1, Ordering::SeqCst);
                    assert_eq!(barrier.wait().unwrap(), 2 * round);
                    // Everyone has incremented before anyone leaves
                    let seen = counter.load(Ordering::SeqCst);
                    assert_eq!(seen, PARTIES * (round as usize + 1));
                    assert_eq!(barrier.wait().unwrap(), 2 * round + 1);
                }
            });
        }
    });

    assert_eq!(counter.load(Ordering::SeqCst), PARTIES * ROUNDS as usize);
}

#[test]
fn test_poison_releases_blocked_waiters() {
    let barrier = PhaseBarrier::new(3);

    thread::scope(|scope| {
        let waiters: Vec<_> = (0..2).map(|_| scope.spawn(|| barrier.wait())).collect();

        // The third party never arrives
        barrier.poison();

        for waiter in waiters {
            let result = waiter.join().unwrap();
            assert!(matches!(result, Err(PipelineError::BarrierPoisoned)));
        }
    });

    assert!(barrier.is_poisoned());
    assert!(matches!(barrier.wait(), Err(PipelineError::BarrierPoisoned)));
}
