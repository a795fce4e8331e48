//! Top-level orchestration: owns the [`World`], the [`Animator`], and the
//! command-dispatch entry point the command socket and `--replay` both feed
//! requests through.

use crate::{
    anim::Animator,
    config::Config,
    core::Direction,
    events::{self, Event, Sources},
    monitor::{client::Client, desktop::DesktopId, MonitorId},
    tree::{NodeId, TreeError},
    world::World,
};
use anyhow::{Context, Result};
use log::{debug, warn};

/// A parsed command-socket request. The socket's text grammar is a boundary
/// concern; this is the shape `manager::dispatch` actually understands.
#[derive(Debug, Clone)]
pub(crate) enum Command {
    InsertClient {
        monitor: MonitorId,
        desktop: DesktopId,
        at: Option<NodeId>,
        dir: Direction,
        ratio: f64,
        exempt: bool,
    },
    RemoveNode { monitor: MonitorId, desktop: DesktopId, node: NodeId },
    ActivateDesktop { monitor: MonitorId, desktop: DesktopId },
    SwapNodes { monitor: MonitorId, desktop: DesktopId, a: NodeId, b: NodeId },
}

/// Outcome reported back across the command socket: a success marker or a
/// human-readable failure reason, per §6's boundary framing.
pub(crate) type CommandResult = Result<(), TreeError>;

/// Owns everything the manager loop needs between iterations
pub(crate) struct Manager {
    pub(crate) world:  World,
    pub(crate) anim:   Animator,
    pub(crate) config: Config,
}

impl Manager {
    pub(crate) fn new(config: Config) -> Self {
        Self { world: World::new(), anim: Animator::new(), config }
    }

    /// Apply one parsed [`Command`] against the world, logging whatever it
    /// refuses so the reason isn't silently swallowed (§7).
    pub(crate) fn dispatch(&mut self, command: Command) -> CommandResult {
        let result = match command {
            Command::InsertClient { monitor, desktop, at, dir, ratio, exempt } => self
                .world
                .insert_client(
                    monitor,
                    desktop,
                    at,
                    Client::new(0, &self.config),
                    dir,
                    self.config.global.automatic_scheme,
                    self.config.global.initial_polarity.unwrap_or(crate::core::ChildPolarity::Second),
                    ratio,
                    exempt,
                )
                .map(|_| ()),
            Command::RemoveNode { monitor, desktop, node } =>
                self.world.remove_client(monitor, desktop, node).map(|_| ()),
            Command::ActivateDesktop { monitor, desktop } => {
                let activated = self
                    .world
                    .monitors_mut()
                    .find_mut(monitor)
                    .map_or(false, |m| m.desktops_mut().activate(desktop));
                if activated {
                    Ok(())
                } else {
                    Err(TreeError::UnknownNode)
                }
            },
            Command::SwapNodes { monitor, desktop, a, b } => self
                .world
                .monitors_mut()
                .find_mut(monitor)
                .and_then(|m| m.desktops_mut().find_mut(desktop))
                .ok_or(TreeError::UnknownNode)
                .and_then(|d| d.tree_mut().swap(a, b)),
        };

        if let Err(err) = &result {
            warn!("command refused: {err}");
        } else {
            debug!("command applied: {command:?}");
        }

        result
    }

    /// One iteration of the cooperative loop: block for the next event,
    /// handle it, then drain whatever queued up while a nested handler (most
    /// notably the pointer grab loop) was running.
    pub(crate) fn step(&mut self, sources: &Sources) -> Result<()> {
        let event = events::next_event(sources).context("event source disconnected")?;
        self.handle(event);
        for pending in events::drain_pending(sources) {
            self.handle(pending);
        }
        Ok(())
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Server(xid) => debug!("server event for window {xid}"),
            Event::Command(_) => debug!("command socket request received"),
            Event::Tick(now) => {
                let elapsed = now.elapsed();
                let _frame = self.anim.tick(elapsed);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;

    fn manager() -> Manager {
        Manager::new(Config::default())
    }

    #[test]
    fn dispatch_logs_and_reports_an_unknown_desktop() {
        let mut mgr = manager();
        let result = mgr.dispatch(Command::RemoveNode {
            monitor: crate::monitor::MonitorId::from_raw(0),
            desktop: DesktopId::from_raw(0),
            node:    crate::tree::NodeId::from_raw_for_test(0),
        });
        assert_eq!(result, Err(TreeError::UnknownNode));
    }

    #[test]
    fn insert_then_remove_round_trips_through_dispatch() {
        let mut mgr = manager();
        let monitor = mgr.world.add_monitor("eDP-1", 0, Rectangle::new(0, 0, 1920, 1080));
        let desktop = mgr.world.add_desktop(monitor, "I").unwrap();

        mgr.dispatch(Command::InsertClient { monitor, desktop, at: None, dir: Direction::East, ratio: 0.5, exempt: false })
            .unwrap();
        assert_eq!(mgr.world.client_count(), 1);
    }
}
