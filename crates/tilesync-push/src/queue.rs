use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

use tilesync_wire::SyncEnvelope;
use tilesync_world::World;

use crate::error::{PushError, Result};
use crate::inbound::{dispatch, DispatchOutcome};

/// Serial mailbox feeding decoded envelopes to the world-owning context.
///
/// Decoding may happen on any thread; mutation of entities may not. The
/// queue splits the two: any thread submits through a [`DispatchHandle`],
/// and the single context that owns the world calls [`drain`] from its own
/// loop (a game tick, typically). Envelopes are dispatched in submission
/// order.
///
/// [`drain`]: DispatchQueue::drain
pub struct DispatchQueue {
    tx: Sender<SyncEnvelope>,
    rx: Receiver<SyncEnvelope>,
}

impl DispatchQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// A cloneable, `Send` handle for submitting envelopes.
    pub fn handle(&self) -> DispatchHandle {
        DispatchHandle {
            tx: self.tx.clone(),
        }
    }

    /// Dispatch everything queued so far, in submission order.
    ///
    /// Never blocks: envelopes submitted while draining are picked up
    /// either in this sweep or the next one.
    pub fn drain(&mut self, world: &mut dyn World) -> DrainReport {
        let mut report = DrainReport::default();
        while let Ok(envelope) = self.rx.try_recv() {
            match dispatch(world, envelope) {
                DispatchOutcome::Delivered => report.delivered += 1,
                DispatchOutcome::Dropped(_) => report.dropped += 1,
            }
        }
        if report.total() > 0 {
            debug!(
                delivered = report.delivered,
                dropped = report.dropped,
                "drained dispatch queue"
            );
        }
        report
    }
}

impl Default for DispatchQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Submission side of a [`DispatchQueue`].
#[derive(Clone)]
pub struct DispatchHandle {
    tx: Sender<SyncEnvelope>,
}

impl DispatchHandle {
    /// Queue an envelope for dispatch on the owning context.
    ///
    /// Never blocks. Fails only once the queue itself has been dropped.
    pub fn submit(&self, envelope: SyncEnvelope) -> Result<()> {
        self.tx
            .send(envelope)
            .map_err(|_| PushError::QueueClosed)
    }
}

/// Counts from one drain sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrainReport {
    /// Envelopes delivered to an entity.
    pub delivered: usize,
    /// Envelopes dropped (dimension mismatch, missing or incapable entity).
    pub dropped: usize,
}

impl DrainReport {
    /// Total envelopes processed in the sweep.
    pub fn total(&self) -> usize {
        self.delivered + self.dropped
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::thread;

    use tilesync_world::{
        BlockEntity, BlockPos, DimensionId, Location, MemoryWorld, SyncSink, Value,
    };

    use super::*;

    /// Sink that records every delivered sequence.
    #[derive(Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<Vec<Value>>>>,
    }

    impl SyncSink for Recorder {
        fn apply_sync_values(&mut self, values: Vec<Value>) {
            self.log.borrow_mut().push(values);
        }
    }

    impl BlockEntity for Recorder {
        fn as_sync_sink(&mut self) -> Option<&mut dyn SyncSink> {
            Some(self)
        }
    }

    fn recorder_world(dim: i32, pos: BlockPos) -> (MemoryWorld, Rc<RefCell<Vec<Vec<Value>>>>) {
        let mut world = MemoryWorld::new(DimensionId(dim));
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.log);
        world.insert(pos, recorder);
        (world, log)
    }

    fn envelope(dim: i32, pos: BlockPos, n: i32) -> SyncEnvelope {
        SyncEnvelope::new(Location::new(DimensionId(dim), pos), vec![Value::Int(n)])
    }

    #[test]
    fn drain_preserves_submission_order() {
        let pos = BlockPos::ORIGIN;
        let (mut world, log) = recorder_world(0, pos);

        let mut queue = DispatchQueue::new();
        let handle = queue.handle();
        for n in 1..=3 {
            handle.submit(envelope(0, pos, n)).expect("submit should succeed");
        }

        let report = queue.drain(&mut world);
        assert_eq!(report.delivered, 3);
        assert_eq!(report.dropped, 0);

        let seen: Vec<Vec<Value>> = log.borrow().clone();
        assert_eq!(
            seen,
            vec![
                vec![Value::Int(1)],
                vec![Value::Int(2)],
                vec![Value::Int(3)],
            ]
        );
    }

    #[test]
    fn submissions_cross_threads() {
        let pos = BlockPos::new(2, 0, 2);
        let (mut world, log) = recorder_world(0, pos);

        let queue = DispatchQueue::new();
        let handle = queue.handle();
        let producer = thread::spawn(move || {
            for n in 10..=12 {
                handle.submit(envelope(0, pos, n)).expect("submit should succeed");
            }
        });
        producer.join().expect("producer thread should finish");

        let mut queue = queue;
        let report = queue.drain(&mut world);
        assert_eq!(report.delivered, 3);
        assert_eq!(log.borrow().len(), 3);
        assert_eq!(log.borrow()[0], vec![Value::Int(10)]);
    }

    #[test]
    fn drain_counts_drops() {
        let pos = BlockPos::ORIGIN;
        let (mut world, log) = recorder_world(0, pos);

        let mut queue = DispatchQueue::new();
        let handle = queue.handle();
        handle.submit(envelope(0, pos, 1)).expect("submit should succeed");
        handle.submit(envelope(5, pos, 2)).expect("submit should succeed");
        handle
            .submit(envelope(0, BlockPos::new(9, 9, 9), 3))
            .expect("submit should succeed");

        let report = queue.drain(&mut world);
        assert_eq!(report, DrainReport { delivered: 1, dropped: 2 });
        assert_eq!(report.total(), 3);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn drain_on_empty_queue_is_a_noop() {
        let (mut world, _log) = recorder_world(0, BlockPos::ORIGIN);
        let mut queue = DispatchQueue::new();
        assert_eq!(queue.drain(&mut world), DrainReport::default());
    }

    #[test]
    fn submit_after_queue_dropped_fails() {
        let queue = DispatchQueue::new();
        let handle = queue.handle();
        drop(queue);

        let err = handle
            .submit(envelope(0, BlockPos::ORIGIN, 1))
            .unwrap_err();
        assert!(matches!(err, PushError::QueueClosed));
    }

    #[test]
    fn second_drain_sees_later_submissions() {
        let pos = BlockPos::ORIGIN;
        let (mut world, log) = recorder_world(0, pos);

        let mut queue = DispatchQueue::new();
        let handle = queue.handle();

        handle.submit(envelope(0, pos, 1)).expect("submit should succeed");
        assert_eq!(queue.drain(&mut world).delivered, 1);

        handle.submit(envelope(0, pos, 2)).expect("submit should succeed");
        assert_eq!(queue.drain(&mut world).delivered, 1);
        assert_eq!(log.borrow().len(), 2);
    }
}
