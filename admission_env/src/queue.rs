//! Bounded, typed FIFO queues connecting actors.
//!
//! ```text
//! Producer                   Queue (capacity N)            Consumer
//!   |                           |                             |
//!   |-- send(msg) ------------->|  [waits while N in flight]  |
//!   |                           |------------------------------>| recv() -> msg
//! ```
//!
//! Order is preserved within one queue. A producer facing a full queue waits
//! for the consumer to make room; nothing is dropped and nothing grows past
//! the capacity.

use crate::error::EnvError;
use tokio::sync::mpsc;

/// Creates a named bounded queue.
///
/// A capacity of zero is raised to one.
pub fn bounded<T>(name: &'static str, capacity: usize) -> (QueueSender<T>, QueueReceiver<T>) {
    let capacity = capacity.max(1);
    let (tx, rx) = mpsc::channel(capacity);
    (
        QueueSender { name, tx },
        QueueReceiver { name, capacity, rx },
    )
}

/// Producer half of a queue. Cheap to clone.
pub struct QueueSender<T> {
    name: &'static str,
    tx: mpsc::Sender<T>,
}

impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            tx: self.tx.clone(),
        }
    }
}

impl<T> QueueSender<T> {
    /// Enqueues a message, waiting while the queue is full.
    ///
    /// # Returns
    /// * `Ok(())` - Message enqueued
    /// * `Err(EnvError::QueueClosed)` - The consumer is gone
    pub async fn send(&self, message: T) -> Result<(), EnvError> {
        self.tx
            .send(message)
            .await
            .map_err(|_| EnvError::QueueClosed(self.name))
    }

    /// Returns true once the consumer has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half of a queue.
pub struct QueueReceiver<T> {
    name: &'static str,
    capacity: usize,
    rx: mpsc::Receiver<T>,
}

impl<T> QueueReceiver<T> {
    /// Receives the next message.
    ///
    /// Returns `None` once every sender has been dropped and the queue is
    /// drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Returns the queue name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of messages waiting to be received.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_queue_preserves_order() {
        let (tx, mut rx) = bounded("order", 8);
        for i in 0..5 {
            tx.send(i).await.expect("queue open");
        }
        drop(tx);

        let mut received = Vec::new();
        while let Some(i) = rx.recv().await {
            received.push(i);
        }
        assert_eq!(received, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_queue_blocks_second_producer() {
        let (tx, mut rx) = bounded("registration", 1);
        let first = tx.clone();
        let second = tx.clone();

        first.send("first").await.expect("room for one");

        let pending = tokio::spawn(async move { second.send("second").await });
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Producer is parked, not failed and not dropped
        assert!(!pending.is_finished());
        assert_eq!(rx.len(), 1);

        assert_eq!(rx.recv().await, Some("first"));
        pending
            .await
            .expect("task joins")
            .expect("second send completes once room is made");
        assert_eq!(rx.recv().await, Some("second"));
    }

    #[tokio::test]
    async fn test_send_after_consumer_dropped_reports_closed() {
        let (tx, rx) = bounded::<u8>("mail", 4);
        drop(rx);

        assert!(tx.is_closed());
        match tx.send(1).await {
            Err(EnvError::QueueClosed(name)) => assert_eq!(name, "mail"),
            other => panic!("expected closed queue, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let (_tx, rx) = bounded::<u8>("tiny", 0);
        assert_eq!(rx.capacity(), 1);
        assert!(rx.is_empty());
        assert_eq!(rx.name(), "tiny");
    }
}
