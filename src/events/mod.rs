/*!
 * Simulation Events
 * Consumer-side interface for execution, snapshot and statistics events
 */

mod channel;
mod tracing_sink;

pub use channel::ChannelSink;
pub use tracing_sink::TracingSink;

use crate::core::types::{RunOutcome, SimTime};
use crate::process::LiveRow;
use crate::simulation::Statistics;
use serde::{Deserialize, Serialize};

/// Receiver of driver events
///
/// Callbacks run on the driver thread, in strict time order, outside the
/// driver lock. Every method defaults to a no-op.
pub trait EventSink: Send {
    /// One unit of `name` executed, spanning `[time, time + 1)`
    fn on_execute(&mut self, _name: &str, _time: SimTime) {}

    /// Live process table after an execution or an admission merge
    fn on_snapshot(&mut self, _table: &[LiveRow]) {}

    /// Aggregate statistics, emitted once before `on_done`
    fn on_statistics(&mut self, _statistics: &Statistics) {}

    /// Terminal event, emitted exactly once
    fn on_done(&mut self, _outcome: RunOutcome) {}
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn on_execute(&mut self, name: &str, time: SimTime) {
        (**self).on_execute(name, time)
    }

    fn on_snapshot(&mut self, table: &[LiveRow]) {
        (**self).on_snapshot(table)
    }

    fn on_statistics(&mut self, statistics: &Statistics) {
        (**self).on_statistics(statistics)
    }

    fn on_done(&mut self, outcome: RunOutcome) {
        (**self).on_done(outcome)
    }
}

/// Fan out to two sinks, first then second
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn on_execute(&mut self, name: &str, time: SimTime) {
        self.0.on_execute(name, time);
        self.1.on_execute(name, time);
    }

    fn on_snapshot(&mut self, table: &[LiveRow]) {
        self.0.on_snapshot(table);
        self.1.on_snapshot(table);
    }

    fn on_statistics(&mut self, statistics: &Statistics) {
        self.0.on_statistics(statistics);
        self.1.on_statistics(statistics);
    }

    fn on_done(&mut self, outcome: RunOutcome) {
        self.0.on_done(outcome);
        self.1.on_done(outcome);
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {}

/// Owned, serialisable form of a driver event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    Execute { name: String, time: SimTime },
    Snapshot { rows: Vec<LiveRow> },
    Statistics { statistics: Statistics },
    Done { outcome: RunOutcome },
}

impl SimEvent {
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}
