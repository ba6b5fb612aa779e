//! Property tests for pool acquire/release invariants.

use std::collections::HashSet;

use proptest::prelude::*;
use repool::{AcquireError, Hooks, Pool};

proptest! {
    /// `live == available + in_use` and `live <= capacity` hold after
    /// every operation in an arbitrary acquire/release sequence.
    #[test]
    fn live_count_invariants_hold(
        capacity in 1usize..8,
        ops in proptest::collection::vec(any::<bool>(), 1..64),
    ) {
        let mut pool = Pool::new(capacity, Hooks::new(|| 0u32)).unwrap();
        let mut held = Vec::new();

        for acquire in ops {
            if acquire {
                match pool.acquire() {
                    Ok(resource) => held.push(resource),
                    Err(AcquireError::Exhausted { .. }) => {
                        prop_assert_eq!(pool.live(), capacity);
                    }
                    Err(AcquireError::Closed) => {
                        prop_assert!(false, "pool was never shut down");
                    }
                }
            } else if let Some(resource) = held.pop() {
                prop_assert!(pool.release(resource).is_ok());
            }

            prop_assert_eq!(pool.live(), pool.available() + pool.in_use());
            prop_assert!(pool.live() <= pool.capacity());
            prop_assert_eq!(pool.in_use(), held.len());
        }
    }

    /// With an always-false validator no resource is ever served twice:
    /// every idle candidate is destroyed and replaced by a fresh one.
    #[test]
    fn stale_resources_are_never_served(
        capacity in 1usize..6,
        cycles in 1usize..20,
    ) {
        let mut next = 0u64;
        let hooks = Hooks::new(move || {
            next += 1;
            next
        })
        .validate(|_| false);
        let mut pool = Pool::new(capacity, hooks).unwrap();

        let mut seen = HashSet::new();
        for _ in 0..cycles {
            let resource = pool.acquire().unwrap();
            prop_assert!(seen.insert(*resource));
            prop_assert!(pool.live() <= capacity);
            pool.release(resource).unwrap();
        }
        prop_assert_eq!(pool.stats().invalidated, cycles as u64 - 1);
    }

    /// Shutdown always empties the pool, whatever was checked out.
    #[test]
    fn shutdown_empties_the_pool(
        capacity in 1usize..6,
        checked_out in 0usize..6,
        returned in 0usize..6,
    ) {
        let mut pool = Pool::new(capacity, Hooks::new(|| 0u8)).unwrap();
        let mut held = Vec::new();
        for _ in 0..checked_out.min(capacity) {
            held.push(pool.acquire().unwrap());
        }
        for resource in held.drain(..returned.min(held.len())) {
            pool.release(resource).unwrap();
        }

        pool.shutdown();
        prop_assert_eq!(pool.available(), 0);
        prop_assert_eq!(pool.in_use(), 0);
        prop_assert_eq!(pool.live(), 0);
        prop_assert!(matches!(pool.acquire(), Err(AcquireError::Closed)));
    }
}
