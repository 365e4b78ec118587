//! Diagnostic status output.
//!
//! Everything the controller has to say (link status, frames sent and
//! received, elapsed times, protocol anomalies) is expressed as an [`Event`]
//! and handed to a write-only [`Diagnostics`] sink. The sink decides what to do
//! with it: print a line on a serial console, keep the last few events in RAM,
//! or drop them.
//!
//! With the `log` or `defmt-0-3` feature enabled, every reported event is also
//! forwarded to the corresponding logger at a level matching its [`Severity`].
//!
//! Events are not meant to be machine parsed; hosts interested in results
//! should use the return value of [`Session::step`](crate::session::Session::step).

use core::fmt;

#[cfg(not(feature = "std"))]
use heapless::Deque;
#[cfg(feature = "std")]
use std::collections::VecDeque;

use crate::error::{ConfigError, RadioOp};
use crate::frame::Frame;
use crate::registry::Slot;

/// How much attention an event deserves.
#[derive(PartialEq, Eq, Clone, Copy, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Severity {
    /// Normal operation.
    Info,
    /// Something unexpected that the loop recovered from.
    Warn,
    /// The node runs degraded.
    Error,
}

/// A status report from the controller.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Event {
    /// The transceiver answered the connection check.
    LinkUp,
    /// The transceiver did not answer; the node keeps running without a link.
    LinkDown,
    /// The configuration was rejected; the radio was left unconfigured.
    ConfigRejected(ConfigError),
    /// A transceiver driver call failed.
    RadioFault(RadioOp),
    /// Startup finished, the polling loop is about to run.
    Ready,
    /// A frame is being transmitted.
    Sent(Frame),
    /// Both slots were armed.
    Armed {
        /// Controller time of the start event
        at_ms: u64,
    },
    /// A start event arrived while a measurement was in flight.
    AlreadyArmed,
    /// A frame passed the CRC check.
    Received(Frame),
    /// A slot was resolved.
    Elapsed {
        /// Resolved slot
        slot: Slot,
        /// Elapsed time in ms
        elapsed_ms: u64,
    },
    /// A frame failed the CRC check and was dropped.
    CrcFailed,
    /// An `END` frame without a valid slot digit was dropped.
    MalformedEnd(u8),
    /// An `END` frame for a slot that is not armed.
    OrphanEnd(Slot),
    /// An armed slot timed out and was disarmed.
    Expired {
        /// Disarmed slot
        slot: Slot,
        /// Age of the measurement when it was dropped, in ms
        age_ms: u64,
    },
}

impl Event {
    /// Severity of this event.
    pub fn severity(&self) -> Severity {
        match self {
            Event::LinkDown | Event::ConfigRejected(_) | Event::RadioFault(_) => Severity::Error,
            Event::CrcFailed
            | Event::MalformedEnd(_)
            | Event::OrphanEnd(_)
            | Event::Expired { .. } => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::LinkUp => f.write_str("Connection OK"),
            Event::LinkDown => f.write_str("Connection Error"),
            Event::ConfigRejected(e) => write!(f, "Configuration rejected: {e}"),
            Event::RadioFault(op) => write!(f, "Radio {op} failed"),
            Event::Ready => f.write_str("Tx Mode"),
            Event::Sent(frame) => write!(f, "Sending radio data: {frame}"),
            Event::Armed { .. } => f.write_str("Starting timer..."),
            Event::AlreadyArmed => f.write_str("Timer already running"),
            Event::Received(frame) => write!(f, "Received: {frame}"),
            Event::Elapsed { slot, elapsed_ms } => {
                write!(f, "TIMER {} result: {elapsed_ms} ms.", slot.digit() as char)
            }
            Event::CrcFailed => f.write_str("Data received but CRC failed"),
            Event::MalformedEnd(_) => f.write_str("Received END signal, but no timer INDEX"),
            Event::OrphanEnd(slot) => {
                write!(f, "Received END signal, but TIMER {} is not running", slot.digit() as char)
            }
            Event::Expired { slot, age_ms } => {
                write!(f, "TIMER {} expired after {age_ms} ms", slot.digit() as char)
            }
        }
    }
}

/// A write-only sink for status reports.
pub trait Diagnostics {
    /// Takes one event.
    fn report(&mut self, event: &Event);
}

/// Discards every event.
#[derive(Clone, Copy, Default, Debug)]
pub struct NullSink;

impl Diagnostics for NullSink {
    fn report(&mut self, _event: &Event) {}
}

/// Writes one text line per event, like a serial console.
#[derive(Debug)]
pub struct TextSink<W: fmt::Write> {
    /// Underlying writer
    pub writer: W,
}

impl<W: fmt::Write> TextSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: fmt::Write> Diagnostics for TextSink<W> {
    fn report(&mut self, event: &Event) {
        // A full or broken console must not stall the loop
        let _ = writeln!(self.writer, "{event}");
    }
}

/// Keeps the most recent `N` events, dropping the oldest ones.
#[derive(Debug)]
pub struct EventLog<const N: usize> {
    #[cfg(not(feature = "std"))]
    events: Deque<Event, N>,
    #[cfg(feature = "std")]
    events: VecDeque<Event>,
    dropped: usize,
}

impl<const N: usize> EventLog<N> {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            #[cfg(not(feature = "std"))]
            events: Deque::new(),
            #[cfg(feature = "std")]
            events: VecDeque::with_capacity(N),
            dropped: 0,
        }
    }

    /// Number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no event is retained.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events evicted to make room for newer ones.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Retained events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Removes and returns the oldest retained event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Drops every retained event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<const N: usize> Default for EventLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Diagnostics for EventLog<N> {
    fn report(&mut self, event: &Event) {
        if N == 0 {
            self.dropped += 1;
            return;
        }
        if self.events.len() >= N {
            let _ = self.events.pop_front();
            self.dropped += 1;
        }
        #[cfg(not(feature = "std"))]
        let _ = self.events.push_back(*event);
        #[cfg(feature = "std")]
        self.events.push_back(*event);
    }
}

#[cfg(feature = "std")]
impl Diagnostics for Vec<Event> {
    fn report(&mut self, event: &Event) {
        self.push(*event);
    }
}

/// Forwards an event to the enabled logging backends.
pub(crate) fn forward(event: &Event) {
    #[cfg(feature = "log")]
    {
        match event.severity() {
            Severity::Info => log::info!("{event}"),
            Severity::Warn => log::warn!("{event}"),
            Severity::Error => log::error!("{event}"),
        }
    }
    #[cfg(feature = "defmt-0-3")]
    {
        match event.severity() {
            Severity::Info => defmt::info!("{}", event),
            Severity::Warn => defmt::warn!("{}", event),
            Severity::Error => defmt::error!("{}", event),
        }
    }
    #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
    let _ = event;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write as _;
    use heapless::String;

    #[test]
    fn test_event_lines() {
        let mut line: String<64> = String::new();
        let _ = write!(line, "{}", Event::Sent(Frame::encode_start(0x1f)));
        assert_eq!(line.as_str(), "Sending radio data: START");

        line.clear();
        let elapsed = Event::Elapsed {
            slot: Slot::Second,
            elapsed_ms: 750,
        };
        let _ = write!(line, "{elapsed}");
        assert_eq!(line.as_str(), "TIMER 2 result: 750 ms.");
    }

    #[test]
    fn test_severity() {
        assert_eq!(Event::LinkDown.severity(), Severity::Error);
        assert_eq!(Event::CrcFailed.severity(), Severity::Warn);
        assert_eq!(Event::OrphanEnd(Slot::First).severity(), Severity::Warn);
        assert_eq!(Event::Armed { at_ms: 0 }.severity(), Severity::Info);
        assert!(Severity::Error > Severity::Info);
    }

    #[test]
    fn test_text_sink_writes_lines() {
        let mut sink = TextSink::new(String::<128>::new());
        sink.report(&Event::LinkUp);
        sink.report(&Event::CrcFailed);
        assert_eq!(
            sink.into_inner().as_str(),
            "Connection OK\nData received but CRC failed\n"
        );
    }

    #[test]
    fn test_event_log_drops_oldest() {
        let mut log: EventLog<2> = EventLog::new();
        log.report(&Event::LinkUp);
        log.report(&Event::Ready);
        log.report(&Event::CrcFailed);

        assert_eq!(log.len(), 2);
        assert_eq!(log.dropped(), 1);
        assert_eq!(log.pop(), Some(Event::Ready));
        assert_eq!(log.pop(), Some(Event::CrcFailed));
        assert!(log.is_empty());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_zero_capacity_log_counts_every_event() {
        let mut log: EventLog<0> = EventLog::new();
        log.report(&Event::LinkUp);
        log.report(&Event::Ready);

        assert!(log.is_empty());
        assert_eq!(log.dropped(), 2);
        assert_eq!(log.pop(), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_vec_sink_keeps_every_event() {
        let mut sink: Vec<Event> = Vec::new();
        for _ in 0..40 {
            sink.report(&Event::CrcFailed);
        }
        sink.report(&Event::LinkDown);

        assert_eq!(sink.len(), 41);
        assert_eq!(sink.last(), Some(&Event::LinkDown));
    }
}
