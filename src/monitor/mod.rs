//! Representation and interaction with physical monitors connected to the
//! X-Server, and the desktops/clients they contain

pub(crate) mod client;
pub(crate) mod desktop;
pub(crate) mod monitor;

pub(crate) use monitor::{Monitor, MonitorId, MonitorIdSource, MonitorList};
