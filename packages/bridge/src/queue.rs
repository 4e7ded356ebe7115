//! Single-consumer rendezvous queue.
//!
//! Producers never wait: an item is appended to an unbounded FIFO and a waiting consumer
//! is woken to take it. The consumer waits only while the queue is empty and still live.
//! Items leave the queue only when the consumer pops them, so abandoning a pull never
//! loses one. Ending the queue resolves a waiting consumer to `None`.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tokio::sync::Notify;

struct State<T> {
    pending: VecDeque<T>,
    live: bool,
}

/// Rendezvous queue shared by one producer task and one consumer
pub struct RendezvousQueue<T> {
    state: Mutex<State<T>>,
    /// Wakes the consumer; a wake-up without a waiter is kept for the next pull
    ready: Notify,
}

impl<T> Default for RendezvousQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RendezvousQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                pending: VecDeque::new(),
                live: true,
            }),
            ready: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Offer an item. Returns `false` if the queue has already ended.
    pub fn push(&self, item: T) -> bool {
        {
            let mut state = self.lock();
            if !state.live {
                return false;
            }
            state.pending.push_back(item);
        }
        self.ready.notify_one();
        true
    }

    /// Take the oldest item, waiting for one if the queue is empty.
    ///
    /// Returns `None` once the queue has ended and every pending item was taken.
    /// Dropping the returned future before it completes leaves the queue untouched.
    pub async fn next(&self) -> Option<T> {
        loop {
            {
                let mut state = self.lock();
                if let Some(item) = state.pending.pop_front() {
                    return Some(item);
                }
                if !state.live {
                    return None;
                }
            }
            self.ready.notified().await;
        }
    }

    /// End the queue. Items already pending are still handed out.
    pub fn close(&self) {
        self.lock().live = false;
        self.ready.notify_one();
    }

    /// End the queue and discard pending items.
    pub fn abort(&self) {
        {
            let mut state = self.lock();
            state.live = false;
            state.pending.clear();
        }
        self.ready.notify_one();
    }
}

#[cfg(test)]
impl<T> RendezvousQueue<T> {
    fn is_live(&self) -> bool {
        self.lock().live
    }

    fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }
}
