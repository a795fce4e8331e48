//! Rule-driven client consequences
//!
//! A [`Rule`] matches an incoming window by class/instance/name; its
//! [`RuleConsequence`] is the set of placement/state overrides to apply once
//! a matching client is about to be managed. Rules sourced from an external
//! command (`external_rules_cmd`) are a boundary concern — this module only
//! covers evaluating and applying consequences already resolved.

#![allow(clippy::missing_docs_in_private_items)]

use crate::{
    core::{AutomaticScheme, ChildPolarity, Direction},
    geometry::Rectangle,
    monitor::client::{Client, ClientState},
    stack::StackLayer,
    tree::{NodeId, Tree, TreeError},
};
use serde::{Deserialize, Serialize};

// =============================== Rule ===============================

/// A rule matched against an incoming client's class/instance/name
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub(crate) struct Rule {
    class:    Option<String>,
    instance: Option<String>,
    name:     Option<String>,
    one_shot: bool,
}

impl Rule {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_class(&mut self, class: impl Into<String>) {
        self.class = Some(class.into());
    }

    pub(crate) fn set_instance(&mut self, instance: impl Into<String>) {
        self.instance = Some(instance.into());
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub(crate) const fn one_shot(&self) -> bool {
        self.one_shot
    }

    pub(crate) fn set_one_shot(&mut self, one_shot: bool) {
        self.one_shot = one_shot;
    }

    /// `true` if every filter this rule sets matches the given client
    /// identity. A `None` filter always matches.
    pub(crate) fn matches(&self, class: &str, instance: &str, name: &str) -> bool {
        self.class.as_deref().map_or(true, |c| c == class)
            && self.instance.as_deref().map_or(true, |i| i == instance)
            && self.name.as_deref().map_or(true, |n| n == name)
    }
}

// ========================= RuleConsequence ==========================

/// What to do with a client once a [`Rule`] has matched it
#[derive(Debug, Clone, Default)]
pub(crate) struct RuleConsequence {
    pub(crate) split_dir:   Option<Direction>,
    pub(crate) split_ratio: Option<f64>,
    pub(crate) layer:       Option<StackLayer>,
    pub(crate) state:       Option<ClientState>,
    pub(crate) rect:        Option<Rectangle>,
    pub(crate) hidden:      Option<bool>,
    pub(crate) sticky:      Option<bool>,
    pub(crate) private:     Option<bool>,
    pub(crate) locked:      Option<bool>,
    pub(crate) marked:      Option<bool>,
    pub(crate) center:      bool,
    pub(crate) follow:      bool,
    pub(crate) focus:       bool,
    pub(crate) manage:      bool,
    /// Exempts the matched client from the desktop's tile-limit coercion
    /// (§4.3.3's "not exempted by rule")
    pub(crate) tile_limit_exempt: bool,
    /// Apply this consequence once and then drop it rather than persisting
    /// it for the client's whole lifetime
    pub(crate) one_shot:    bool,
    /// Applied consequences are forgotten once the client unmaps rather than
    /// being remembered for the next time a matching window appears
    pub(crate) temp:        bool,
}

impl RuleConsequence {
    /// Apply every field this consequence sets to `node`'s client and, for
    /// the node-level flags, to the node itself. Geometry/layer/state are
    /// written straight to the `Client`; `hidden`/`sticky`/`private`/
    /// `locked`/`marked` go through the tree since they're tracked per-node.
    pub(crate) fn apply(&self, tree: &mut Tree, node: NodeId) -> Result<(), TreeError> {
        if let Some(layer) = self.layer {
            if let Some(client) = tree.get_mut(node)?.client_mut() {
                client.set_layer(layer);
            }
        }
        if let Some(state) = self.state {
            if let Some(client) = tree.get_mut(node)?.client_mut() {
                client.set_state(state);
            }
        }
        if let Some(rect) = self.rect {
            if let Some(client) = tree.get_mut(node)?.client_mut() {
                client.set_floating_rectangle(rect);
            }
        }
        if let Some(hidden) = self.hidden {
            tree.set_hidden(node, hidden)?;
        }
        if let Some(sticky) = self.sticky {
            tree.set_sticky(node, sticky)?;
        }
        if let Some(private) = self.private {
            tree.set_private(node, private)?;
        }
        if let Some(locked) = self.locked {
            tree.set_locked(node, locked)?;
        }
        if let Some(marked) = self.marked {
            tree.set_marked(node, marked)?;
        }
        Ok(())
    }
}

/// A client awaiting its rule consequence, e.g. while the external rules
/// command's reply is still in flight. Queued and drained by whatever owns
/// the socket/process boundary; this struct only holds the resolved state.
#[derive(Debug, Clone)]
pub(crate) struct PendingRule {
    pub(crate) window:      crate::core::Window,
    pub(crate) consequence: RuleConsequence,
}

impl PendingRule {
    pub(crate) const fn new(window: crate::core::Window, consequence: RuleConsequence) -> Self {
        Self { window, consequence }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_with_no_filters_matches_everything() {
        let rule = Rule::new();
        assert!(rule.matches("Firefox", "Navigator", "Mozilla Firefox"));
    }

    #[test]
    fn rule_matches_only_the_specified_class() {
        let mut rule = Rule::new();
        rule.set_class("Firefox");
        assert!(rule.matches("Firefox", "anything", "anything"));
        assert!(!rule.matches("Alacritty", "anything", "anything"));
    }

    #[test]
    fn one_shot_consequence_applies_the_floating_state_once() {
        let mut tree = Tree::new();
        let node = tree
            .insert(None, Client::default(), Some(Direction::East), AutomaticScheme::LongestSide, ChildPolarity::Second, 0.5)
            .unwrap();
        let consequence = RuleConsequence {
            state: Some(ClientState::Floating),
            one_shot: true,
            ..RuleConsequence::default()
        };
        consequence.apply(&mut tree, node).unwrap();
        assert!(tree.get(node).unwrap().client().unwrap().is_floating());
    }
}
