//! Bounded-concurrency batch runner with greedy slot refill.
//!
//! What this module provides:
//! - [`run_bounded`]: drives an async worker over a list of items while keeping
//!   exactly `min(ceiling, remaining)` invocations in flight. Whenever any
//!   in-flight worker resolves, its slot is refilled with the next not-yet-started
//!   item, so slow items never block faster ones behind batch boundaries.
//!
//! Notes:
//! - Everything is polled from a single `FuturesUnordered`, so the workers
//!   interleave cooperatively on the calling task; no worker runs on another
//!   thread and no shared state needs locking.
//! - A failing worker is logged and leaves `None` in its output position. The
//!   batch always runs to completion.
//! - Output order matches input order, not completion order.

use std::fmt::Display;
use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

/// Runs `worker` over `items` with at most `ceiling` invocations in flight.
///
/// Returns one entry per input item, in input order: `Some(value)` for workers
/// that resolved `Ok`, `None` for workers that resolved `Err`.
///
/// A `ceiling` of zero is treated as one.
pub async fn run_bounded<T, U, E, F, Fut>(
    items: Vec<T>,
    ceiling: usize,
    mut worker: F,
) -> Vec<Option<U>>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<U, E>>,
    E: Display,
{
    let ceiling = ceiling.max(1);
    let total = items.len();

    let mut output: Vec<Option<U>> = Vec::with_capacity(total);
    output.resize_with(total, || None);

    // Tag every worker future with the slot it occupies and the index of the
    // item it is processing. Routing both push sites through one closure keeps
    // the futures a single concrete type for `FuturesUnordered`.
    let tag = |slot: usize, index: usize, fut: Fut| async move { (slot, index, fut.await) };

    let mut pending = items.into_iter().enumerate();
    let mut in_flight = FuturesUnordered::new();

    for slot in 0..ceiling.min(total) {
        if let Some((index, item)) = pending.next() {
            in_flight.push(tag(slot, index, worker(item)));
        }
    }

    while let Some((slot, index, result)) = in_flight.next().await {
        match result {
            Ok(value) => output[index] = Some(value),
            Err(error) => debug!(index, %error, "bounded worker failed"),
        }
        // Refill the slot that just freed.
        if let Some((next_index, item)) = pending.next() {
            in_flight.push(tag(slot, next_index, worker(item)));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn ceiling_is_never_exceeded_and_order_is_preserved() {
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items: Vec<usize> = (0..25).collect();
        let results = run_bounded(items, 10, |i| {
            let current = Arc::clone(&current);
            let peak = Arc::clone(&peak);
            async move {
                let now = current.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                // Varying latency so completion order differs from input order.
                tokio::time::sleep(Duration::from_millis(5 + (i as u64 * 7) % 20)).await;
                current.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, String>(i * 2)
            }
        })
        .await;

        assert!(peak.load(Ordering::SeqCst) <= 10);
        assert_eq!(results.len(), 25);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(*result, Some(i * 2));
        }
    }

    #[tokio::test]
    async fn failing_worker_leaves_a_hole_without_aborting_the_batch() {
        let items: Vec<usize> = (0..12).collect();
        let results = run_bounded(items, 4, |i| async move {
            if i == 7 {
                Err("deliberate failure".to_string())
            } else {
                Ok(i)
            }
        })
        .await;

        assert_eq!(results.len(), 12);
        assert_eq!(results[7], None);
        for (i, result) in results.iter().enumerate() {
            if i != 7 {
                assert_eq!(*result, Some(i));
            }
        }
    }

    #[tokio::test]
    async fn fewer_items_than_slots() {
        let results = run_bounded(vec![1, 2, 3], 10, |i| async move { Ok::<_, String>(i + 1) }).await;
        assert_eq!(results, vec![Some(2), Some(3), Some(4)]);
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let results = run_bounded(Vec::<u32>::new(), 10, |i| async move { Ok::<_, String>(i) }).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn zero_ceiling_still_makes_progress() {
        let results = run_bounded(vec![5], 0, |i| async move { Ok::<_, String>(i) }).await;
        assert_eq!(results, vec![Some(5)]);
    }
}
