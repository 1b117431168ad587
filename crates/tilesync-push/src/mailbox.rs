use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use tilesync_wire::SyncEnvelope;
use tilesync_world::World;

use crate::error::{PushError, Result};
use crate::inbound::{dispatch, DispatchOutcome};
use crate::queue::DrainReport;

/// Async counterpart of [`DispatchQueue`] for tokio hosts.
///
/// Same contract: any task submits through an [`AsyncDispatchHandle`], the
/// single task that owns the world consumes. Created as a connected pair,
/// like a tokio channel; the queue closes once every handle is dropped.
///
/// [`DispatchQueue`]: crate::queue::DispatchQueue
pub struct AsyncDispatchQueue {
    rx: UnboundedReceiver<SyncEnvelope>,
}

/// Submission side of an [`AsyncDispatchQueue`].
#[derive(Clone)]
pub struct AsyncDispatchHandle {
    tx: UnboundedSender<SyncEnvelope>,
}

impl AsyncDispatchQueue {
    /// Create a connected handle/queue pair.
    pub fn new() -> (AsyncDispatchHandle, AsyncDispatchQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (AsyncDispatchHandle { tx }, AsyncDispatchQueue { rx })
    }

    /// Await the next envelope.
    ///
    /// Returns `None` once every handle has been dropped and the queue is
    /// empty. Use this to interleave dispatch with other owner-side work.
    pub async fn recv(&mut self) -> Option<SyncEnvelope> {
        self.rx.recv().await
    }

    /// Dispatch everything queued right now, without waiting.
    pub fn drain_now(&mut self, world: &mut dyn World) -> DrainReport {
        let mut report = DrainReport::default();
        while let Ok(envelope) = self.rx.try_recv() {
            tally(&mut report, dispatch(world, envelope));
        }
        report
    }

    /// Receive and dispatch until every handle is dropped.
    ///
    /// Consumes the queue; returns the totals for its whole lifetime.
    pub async fn run(mut self, world: &mut dyn World) -> DrainReport {
        let mut report = DrainReport::default();
        while let Some(envelope) = self.rx.recv().await {
            tally(&mut report, dispatch(world, envelope));
        }
        debug!(
            delivered = report.delivered,
            dropped = report.dropped,
            "dispatch mailbox closed"
        );
        report
    }
}

impl AsyncDispatchHandle {
    /// Queue an envelope for dispatch on the owning task.
    ///
    /// Never blocks or awaits. Fails only once the queue has been dropped.
    pub fn submit(&self, envelope: SyncEnvelope) -> Result<()> {
        self.tx
            .send(envelope)
            .map_err(|_| PushError::QueueClosed)
    }
}

fn tally(report: &mut DrainReport, outcome: DispatchOutcome) {
    match outcome {
        DispatchOutcome::Delivered => report.delivered += 1,
        DispatchOutcome::Dropped(_) => report.dropped += 1,
    }
}
