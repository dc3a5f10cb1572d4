//! Background work for the UI thread.
//!
//! Futures run on the app's tokio runtime and report back over a
//! `std::sync::mpsc` channel that the frame loop polls with `try_recv`.
//! Each task remembers the view generation it was spawned for; once the
//! user navigates away its result is dropped unread.

use std::future::Future;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use tokio::runtime::Handle;

#[derive(Debug, PartialEq, Eq)]
pub enum Poll<T> {
    Waiting,
    Ready(T),
    /// Spawned for a view that is no longer shown, or the task died.
    Stale,
}

pub struct Pending<T> {
    generation: u64,
    rx: Receiver<T>,
}

impl<T: Send + 'static> Pending<T> {
    /// A pending slot plus the sender that completes it.
    pub fn new(generation: u64) -> (Sender<T>, Self) {
        let (tx, rx) = channel();
        (tx, Self { generation, rx })
    }

    pub fn spawn<F>(runtime: &Handle, generation: u64, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, pending) = Self::new(generation);
        runtime.spawn(async move {
            // The receiver is gone when the slot was replaced; nothing to do.
            let _ = tx.send(future.await);
        });
        pending
    }
}

impl<T> Pending<T> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn poll(&self, current_generation: u64) -> Poll<T> {
        if self.generation != current_generation {
            return Poll::Stale;
        }
        match self.rx.try_recv() {
            Ok(value) => Poll::Ready(value),
            Err(TryRecvError::Empty) => Poll::Waiting,
            Err(TryRecvError::Disconnected) => Poll::Stale,
        }
    }
}

/// Poll a slot, emptying it once the task has finished or gone stale.
pub fn take_ready<T>(slot: &mut Option<Pending<T>>, current_generation: u64) -> Option<T> {
    let poll = slot.as_ref()?.poll(current_generation);
    match poll {
        Poll::Waiting => None,
        Poll::Ready(value) => {
            *slot = None;
            Some(value)
        }
        Poll::Stale => {
            *slot = None;
            None
        }
    }
}

/// Like [`take_ready`] for a list of independent tasks.
pub fn drain_ready<T>(tasks: &mut Vec<Pending<T>>, current_generation: u64) -> Vec<T> {
    let mut ready = Vec::new();
    tasks.retain(|task| match task.poll(current_generation) {
        Poll::Waiting => true,
        Poll::Ready(value) => {
            ready.push(value);
            false
        }
        Poll::Stale => false,
    });
    ready
}
