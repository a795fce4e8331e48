//! Metadata about an X-window

#![allow(clippy::missing_docs_in_private_items)]

use crate::{
    config::Config,
    core::{Pid, Window, WindowState, MISSING_VALUE},
    geometry::Rectangle,
    stack::StackLayer,
    x::property::SizeHints,
};
use serde::{Deserialize, Serialize};

// ============================= ClientState===========================

/// Current state of the [`Client`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) enum ClientState {
    /// Window is currently tiled
    Tiled,
    /// Window is currently pseudo-tiled
    PsuedoTiled,
    /// Window is currently floating
    Floating,
    /// Window is currently in fullscreen
    Fullscreen,
}

// ============================= IcccmProps ===========================

/// ICCCM window properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) struct IcccmProps {
    /// Request to take focus of the window
    take_focus:    bool,
    input_hint:    bool,
    /// Request to delete window
    delete_window: bool,
}

impl Default for IcccmProps {
    fn default() -> Self {
        Self {
            take_focus:    false,
            input_hint:    true,
            delete_window: false,
        }
    }
}

// =============================== Client =============================

/// Information about a top-level [`Window`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Client {
    window:   Window,
    name:     String,
    class:    String,
    instance: String,

    border_width: usize,
    layer:        StackLayer,
    last_layer:   StackLayer,

    state:              ClientState,
    last_state:         ClientState,
    floating_rectangle: Rectangle,
    tiled_rectangle:    Rectangle,
    size_hints:         SizeHints,
    icccm_props:        IcccmProps,
    wm_flags:           WindowState,

    urgent: bool,
    shown:  bool,

    pid:  Option<Pid>,
    ppid: Option<Pid>,
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.window == other.window
    }
}

impl Default for Client {
    fn default() -> Self {
        Self {
            window:             0,
            name:               String::from(MISSING_VALUE),
            class:              String::from(MISSING_VALUE),
            instance:           String::from(MISSING_VALUE),
            border_width:       1,
            layer:              StackLayer::Normal,
            last_layer:         StackLayer::Normal,
            state:              ClientState::Tiled,
            last_state:         ClientState::Tiled,
            floating_rectangle: Rectangle::zeroed(),
            tiled_rectangle:    Rectangle::zeroed(),
            size_hints:         SizeHints::default(),
            icccm_props:        IcccmProps::default(),
            wm_flags:           WindowState::Hidden,
            urgent:             false,
            shown:              true,
            pid:                None,
            ppid:               None,
        }
    }
}

impl Client {
    /// Create a new [`Client`] wrapping `window`, configured per `config`'s
    /// defaults (border width etc)
    pub(crate) fn new(window: Window, config: &Config) -> Self {
        Self {
            window,
            border_width: config.global.border_width,
            ..Self::default()
        }
    }

    pub(crate) const fn window(&self) -> Window {
        self.window
    }

    pub(crate) const fn state(&self) -> ClientState {
        self.state
    }

    pub(crate) const fn last_state(&self) -> ClientState {
        self.last_state
    }

    /// Record the transition and update the EWMH fullscreen bit. Vacancy and
    /// occlusion side effects are the caller's responsibility (they need the
    /// tree/stacking list this `Client` doesn't have access to).
    pub(crate) fn set_state(&mut self, state: ClientState) {
        self.last_state = self.state;
        self.state = state;
        if matches!(state, ClientState::Fullscreen) {
            self.wm_flags = WindowState::Fullscreen;
        } else if matches!(self.last_state, ClientState::Fullscreen) {
            self.wm_flags = WindowState::Hidden;
        }
    }

    pub(crate) const fn layer(&self) -> StackLayer {
        self.layer
    }

    pub(crate) const fn last_layer(&self) -> StackLayer {
        self.last_layer
    }

    pub(crate) fn set_layer(&mut self, layer: StackLayer) {
        self.last_layer = self.layer;
        self.layer = layer;
        self.wm_flags = match layer {
            StackLayer::Above => WindowState::Above,
            StackLayer::Below => WindowState::Below,
            StackLayer::Normal => WindowState::Hidden,
        };
    }

    pub(crate) const fn border_width(&self) -> usize {
        self.border_width
    }

    pub(crate) const fn size_hints(&self) -> SizeHints {
        self.size_hints
    }

    pub(crate) fn set_size_hints(&mut self, size_hints: SizeHints) {
        self.size_hints = size_hints;
    }

    pub(crate) const fn wm_flags(&self) -> WindowState {
        self.wm_flags
    }

    pub(crate) const fn is_urgent(&self) -> bool {
        self.urgent
    }

    pub(crate) fn set_urgent(&mut self, urgent: bool) {
        self.urgent = urgent;
    }

    pub(crate) fn class(&self) -> &str {
        &self.class
    }

    pub(crate) fn instance(&self) -> &str {
        &self.instance
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_class(&mut self, class: impl Into<String>) {
        self.class = class.into();
    }

    pub(crate) fn set_instance(&mut self, instance: impl Into<String>) {
        self.instance = instance.into();
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) const fn floating_rectangle(&self) -> Rectangle {
        self.floating_rectangle
    }

    pub(crate) fn set_floating_rectangle(&mut self, rect: Rectangle) {
        self.floating_rectangle = rect;
    }

    pub(crate) const fn tiled_rectangle(&self) -> Rectangle {
        self.tiled_rectangle
    }

    pub(crate) fn set_tiled_rectangle(&mut self, rect: Rectangle) {
        self.tiled_rectangle = rect;
    }

    pub(crate) const fn is_floating(&self) -> bool {
        matches!(self.state, ClientState::Floating)
    }

    pub(crate) const fn is_fullscreen(&self) -> bool {
        matches!(self.state, ClientState::Fullscreen)
    }

    pub(crate) const fn is_tiled(&self) -> bool {
        matches!(self.state, ClientState::Tiled)
    }

    pub(crate) const fn is_pseudo_tiled(&self) -> bool {
        matches!(self.state, ClientState::PsuedoTiled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_client_carries_the_configured_border_width() {
        let mut config = Config::default();
        config.global.border_width = 3;
        let client = Client::new(42, &config);
        assert_eq!(client.window(), 42);
        assert_eq!(client.border_width, 3);
    }

    #[test]
    fn set_state_tracks_the_previous_state() {
        let mut client = Client::default();
        client.set_state(ClientState::Floating);
        assert!(client.is_floating());
        assert_eq!(client.last_state, ClientState::Tiled);
    }
}

