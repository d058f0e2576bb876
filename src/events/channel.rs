/*!
 * Channel Sink
 * Forwards owned events to another thread or task over flume
 */

use super::{EventSink, SimEvent};
use crate::core::types::{RunOutcome, SimTime};
use crate::process::LiveRow;
use crate::simulation::Statistics;
use flume::{Receiver, Sender};

/// Sends every event as a [`SimEvent`]
///
/// A dropped receiver is not an error for the run; events are discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<SimEvent>,
    snapshots: bool,
}

impl ChannelSink {
    pub fn new(tx: Sender<SimEvent>) -> Self {
        Self { tx, snapshots: true }
    }

    pub fn unbounded() -> (Self, Receiver<SimEvent>) {
        let (tx, rx) = flume::unbounded();
        (Self::new(tx), rx)
    }

    /// Skip live-table events, which dominate the volume
    pub fn without_snapshots(mut self) -> Self {
        self.snapshots = false;
        self
    }

    fn send(&self, event: SimEvent) {
        let _ = self.tx.send(event);
    }
}

impl EventSink for ChannelSink {
    fn on_execute(&mut self, name: &str, time: SimTime) {
        self.send(SimEvent::Execute {
            name: name.to_string(),
            time,
        });
    }

    fn on_snapshot(&mut self, table: &[LiveRow]) {
        if self.snapshots {
            self.send(SimEvent::Snapshot {
                rows: table.to_vec(),
            });
        }
    }

    fn on_statistics(&mut self, statistics: &Statistics) {
        self.send(SimEvent::Statistics {
            statistics: statistics.clone(),
        });
    }

    fn on_done(&mut self, outcome: RunOutcome) {
        self.send(SimEvent::Done { outcome });
    }
}
