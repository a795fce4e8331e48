//! The single-threaded cooperative event loop
//!
//! One thread multiplexes three sources with no preemption between them: the
//! X11 connection, the command socket, and a coarse animation-tick timer.
//! Each iteration drains whichever source is ready, handles it to
//! completion, then loops — there is never more than one handler running at
//! a time, which is what lets the pointer grab loop assume nothing else
//! touches the tree while it's active.

use crate::core::Xid;
use anyhow::Result;
use crossbeam_channel::Receiver;
use std::time::{Duration, Instant};

/// Coarsest tick rate for the animation interpolator
const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// One thing for the loop to react to
#[derive(Debug)]
pub(crate) enum Event {
    /// An event arrived on the X11 connection (payload left to the caller,
    /// since decoding it is the display-server boundary's job)
    Server(Xid),
    /// A full request arrived on the command socket
    Command(Vec<u8>),
    /// The animation tick timer fired
    Tick(Instant),
}

/// Sources the loop multiplexes over
pub(crate) struct Sources {
    pub(crate) server:  Receiver<Xid>,
    pub(crate) command: Receiver<Vec<u8>>,
}

/// Block until the next [`Event`] is ready, waking at least every
/// [`TICK_INTERVAL`] even if nothing else arrives so the animator keeps
/// advancing.
pub(crate) fn next_event(sources: &Sources) -> Result<Event> {
    crossbeam_channel::select! {
        recv(sources.server) -> msg => Ok(Event::Server(msg?)),
        recv(sources.command) -> msg => Ok(Event::Command(msg?)),
        default(TICK_INTERVAL) => Ok(Event::Tick(Instant::now())),
    }
}

/// Drain every currently-pending source without blocking, used right after
/// a grab loop ends to catch up on anything that queued up during it.
pub(crate) fn drain_pending(sources: &Sources) -> Vec<Event> {
    let mut events = Vec::new();
    loop {
        match sources.server.try_recv() {
            Ok(xid) => events.push(Event::Server(xid)),
            Err(_) => break,
        }
    }
    loop {
        match sources.command.try_recv() {
            Ok(buf) => events.push(Event::Command(buf)),
            Err(_) => break,
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn next_event_falls_back_to_a_tick_when_idle() {
        let (_server_tx, server_rx) = unbounded();
        let (_command_tx, command_rx) = unbounded();
        let sources = Sources { server: server_rx, command: command_rx };
        assert!(matches!(next_event(&sources).unwrap(), Event::Tick(_)));
    }

    #[test]
    fn next_event_prefers_a_ready_command_over_waiting_for_a_tick() {
        let (_server_tx, server_rx) = unbounded();
        let (command_tx, command_rx) = unbounded();
        command_tx.send(b"hello".to_vec()).unwrap();
        let sources = Sources { server: server_rx, command: command_rx };
        match next_event(&sources).unwrap() {
            Event::Command(buf) => assert_eq!(buf, b"hello"),
            other => panic!("expected a command event, got {other:?}"),
        }
    }
}
