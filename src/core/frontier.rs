use std::collections::VecDeque;
use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;
use url::Url;

/// A unit of crawl work: a URL paired with the link-depth at which it was
/// first discovered. Owned by the frontier until popped, then by exactly
/// one worker for the duration of one fetch-extract cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub url: Url,
    pub depth: usize,
}

impl WorkItem {
    pub fn new(url: Url, depth: usize) -> Self {
        Self { url, depth }
    }
}

#[derive(Default)]
struct FrontierState {
    queue: VecDeque<WorkItem>,
    in_flight: usize,
}

impl FrontierState {
    fn is_complete(&self) -> bool {
        self.queue.is_empty() && self.in_flight == 0
    }
}

/// Shared FIFO work queue with termination detection.
///
/// The queue alone cannot tell a worker that the crawl is over: an empty
/// queue may still grow if a sibling is mid-fetch. The frontier therefore
/// counts popped-but-unfinished items (`in_flight`) and reports completion
/// only when both the queue and that counter are zero, evaluated under the
/// same lock acquisition as the pop itself.
pub struct Frontier {
    state: Mutex<FrontierState>,
    wake: Notify,
}

/// Result of a single pop attempt.
pub enum PopOutcome {
    /// An item was dequeued; the claim releases it when dropped.
    Item(Claim),
    /// Nothing queued right now, but siblings still hold claims and may
    /// publish more work. Wait, don't exit.
    Idle,
    /// Queue empty and no claims outstanding anywhere: the crawl is done.
    Complete,
}

/// RAII handle for a dequeued item. Dropping the claim decrements the
/// in-flight counter, so the accounting survives any early return in the
/// worker, fetch failures included.
pub struct Claim {
    item: WorkItem,
    frontier: Arc<Frontier>,
}

impl Claim {
    pub fn item(&self) -> &WorkItem {
        &self.item
    }
}

impl Drop for Claim {
    fn drop(&mut self) {
        self.frontier.mark_done();
    }
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            wake: Notify::new(),
        }
    }

    /// Appends an item and wakes parked workers. Never blocks, never fails.
    pub fn push(&self, item: WorkItem) {
        {
            let mut state = self.state.lock();
            trace!("frontier: push {} at depth {}", item.url, item.depth);
            state.queue.push_back(item);
        }
        self.wake.notify_waiters();
    }

    /// Attempts to dequeue the head item. The pop and the completion check
    /// happen under one lock acquisition, so no interleaving of sibling
    /// pushes and pops can produce a false `Complete`.
    pub fn try_pop(self: &Arc<Self>) -> PopOutcome {
        let mut state = self.state.lock();
        match state.queue.pop_front() {
            Some(item) => {
                state.in_flight += 1;
                drop(state);
                PopOutcome::Item(Claim {
                    item,
                    frontier: Arc::clone(self),
                })
            }
            None if state.in_flight == 0 => PopOutcome::Complete,
            None => PopOutcome::Idle,
        }
    }

    /// True iff the queue is empty and no claim is outstanding.
    pub fn is_complete(&self) -> bool {
        self.state.lock().is_complete()
    }

    pub fn queued(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Future that resolves on the next push or on completion. Workers must
    /// register it (pin and enable) *before* calling `try_pop`, otherwise a
    /// notification landing between the pop and the wait would be lost.
    pub fn notified(&self) -> Notified<'_> {
        self.wake.notified()
    }

    fn mark_done(&self) {
        let completed = {
            let mut state = self.state.lock();
            debug_assert!(state.in_flight > 0, "mark_done without a matching pop");
            state.in_flight -= 1;
            state.is_complete()
        };
        if completed {
            // Everyone parked at the rendezvous observes Complete and exits.
            self.wake.notify_waiters();
        }
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn item(path: &str, depth: usize) -> WorkItem {
        WorkItem::new(url(&format!("http://frontier.test/{path}")), depth)
    }

    #[test]
    fn pop_is_fifo() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(item("first", 0));
        frontier.push(item("second", 1));

        let first = match frontier.try_pop() {
            PopOutcome::Item(claim) => claim.item().clone(),
            _ => panic!("expected an item"),
        };
        let second = match frontier.try_pop() {
            PopOutcome::Item(claim) => claim.item().clone(),
            _ => panic!("expected an item"),
        };

        assert_eq!(first, item("first", 0));
        assert_eq!(second, item("second", 1));
    }

    #[test]
    fn empty_frontier_with_no_claims_is_complete() {
        let frontier = Arc::new(Frontier::new());
        assert!(frontier.is_complete());
        assert!(matches!(frontier.try_pop(), PopOutcome::Complete));
    }

    #[test]
    fn outstanding_claim_blocks_completion() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(item("only", 0));

        let claim = match frontier.try_pop() {
            PopOutcome::Item(claim) => claim,
            _ => panic!("expected an item"),
        };

        // Queue is empty but the item is still being processed.
        assert!(!frontier.is_complete());
        assert!(matches!(frontier.try_pop(), PopOutcome::Idle));

        drop(claim);
        assert!(frontier.is_complete());
        assert!(matches!(frontier.try_pop(), PopOutcome::Complete));
    }

    #[test]
    fn claim_drop_releases_even_without_children() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(item("a", 0));
        frontier.push(item("b", 0));

        match frontier.try_pop() {
            PopOutcome::Item(_) => {} // dropped immediately
            _ => panic!("expected an item"),
        }
        match frontier.try_pop() {
            PopOutcome::Item(_) => {}
            _ => panic!("expected an item"),
        }
        assert!(frontier.is_complete());
    }

    #[test]
    fn single_item_goes_to_exactly_one_caller() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(item("contested", 0));

        let first = frontier.try_pop();
        let second = frontier.try_pop();

        assert!(matches!(first, PopOutcome::Item(_)));
        assert!(matches!(second, PopOutcome::Idle));
    }

    #[test]
    fn children_pushed_under_claim_keep_the_crawl_alive() {
        let frontier = Arc::new(Frontier::new());
        frontier.push(item("root", 0));

        let claim = match frontier.try_pop() {
            PopOutcome::Item(claim) => claim,
            _ => panic!("expected an item"),
        };
        frontier.push(item("child", 1));
        drop(claim);

        // The child keeps the frontier incomplete after the parent is done.
        assert!(!frontier.is_complete());
        match frontier.try_pop() {
            PopOutcome::Item(claim) => assert_eq!(claim.item().depth, 1),
            _ => panic!("expected the child"),
        }
        assert!(frontier.is_complete());
    }

    // Four threads drain a synthetic tree, each publishing children while
    // holding its claim. Completion must never be observed while any claim
    // is outstanding, and every node must be popped exactly once.
    #[test]
    fn completion_is_never_observed_with_work_in_flight() {
        const FANOUT: usize = 2;
        const DEPTH: usize = 4;

        let frontier = Arc::new(Frontier::new());
        let popped = Arc::new(AtomicUsize::new(0));
        let counter = Arc::new(AtomicUsize::new(0));
        frontier.push(item("root", 0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let frontier = Arc::clone(&frontier);
            let popped = Arc::clone(&popped);
            let counter = Arc::clone(&counter);
            handles.push(thread::spawn(move || loop {
                match frontier.try_pop() {
                    PopOutcome::Item(claim) => {
                        assert!(!frontier.is_complete());
                        popped.fetch_add(1, Ordering::SeqCst);
                        let depth = claim.item().depth;
                        if depth < DEPTH {
                            for _ in 0..FANOUT {
                                let n = counter.fetch_add(1, Ordering::SeqCst);
                                frontier.push(item(&format!("node/{n}"), depth + 1));
                            }
                        }
                    }
                    PopOutcome::Idle => thread::yield_now(),
                    PopOutcome::Complete => break,
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // Full binary tree of depth 4: 2^5 - 1 nodes.
        assert_eq!(popped.load(Ordering::SeqCst), (1 << (DEPTH + 1)) - 1);
        assert!(frontier.is_complete());
    }

    #[tokio::test]
    async fn push_wakes_a_parked_waiter() {
        let frontier = Arc::new(Frontier::new());

        // A sibling holds a claim, so the waiter sees Idle and parks.
        frontier.push(item("parent", 0));
        let parent = match frontier.try_pop() {
            PopOutcome::Item(claim) => claim,
            _ => panic!("expected an item"),
        };

        let waiter = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move {
                loop {
                    let mut parked = std::pin::pin!(frontier.notified());
                    parked.as_mut().enable();
                    match frontier.try_pop() {
                        PopOutcome::Item(claim) => return claim.item().clone(),
                        PopOutcome::Idle => parked.await,
                        PopOutcome::Complete => panic!("claim still outstanding"),
                    }
                }
            })
        };

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        frontier.push(item("late", 1));
        drop(parent);

        let got = tokio::time::timeout(std::time::Duration::from_secs(5), waiter)
            .await
            .expect("waiter should be woken")
            .unwrap();
        assert_eq!(got, item("late", 1));
    }
}
