//! Multi-key shortcut registration and edge detection.
//!
//! A shortcut is an unordered set of keys that must be held together. The
//! table is re-evaluated on every raw key transition; callbacks fire only when
//! a binding moves into or out of the satisfied state, never while it stays
//! there.

use super::context::InputContext;
use super::events::{Category, InputEvent, Phase};
use super::keys::{canonical_id, normalize_keys};
use super::listeners::Callback;
use super::raw::Disposition;
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Per-binding behavior switches. All default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ShortcutOptions {
    /// Evaluate the binding even while the user is typing into a UI element
    pub allow_while_typing: bool,
    /// Ask the host to suppress the native default action on activation
    pub prevent_default: bool,
    /// Ask the host to stop native propagation on activation
    pub stop_propagation: bool,
    /// Invoke the callback again with an `End` event on release
    pub fire_on_end: bool,
}

/// One registered shortcut.
#[derive(Debug, Clone)]
pub struct ShortcutBinding {
    id: String,
    keys: BTreeSet<String>,
    callback: Callback,
    options: ShortcutOptions,
}

impl ShortcutBinding {
    /// Canonical id: sorted, lower-cased keys joined by `+`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn keys(&self) -> &BTreeSet<String> {
        &self.keys
    }

    pub fn options(&self) -> ShortcutOptions {
        self.options
    }

    fn is_satisfied(&self, held: &HashSet<String>) -> bool {
        self.keys.iter().all(|key| held.contains(key))
    }
}

/// Registered shortcuts plus the set of ids currently active.
#[derive(Debug, Default)]
pub struct ShortcutTable {
    bindings: Vec<ShortcutBinding>,
    active: HashSet<String>,
}

impl ShortcutTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for the key combination.
    ///
    /// Returns the canonical id, or `None` when no usable key remains after
    /// normalization (the call is then a no-op).
    pub fn bind<I, S>(
        &mut self,
        keys: I,
        callback: Callback,
        options: ShortcutOptions,
    ) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = normalize_keys(keys);
        if keys.is_empty() {
            debug!("Ignoring shortcut binding with no keys");
            return None;
        }

        let id = canonical_id(&keys);
        debug!("Bound shortcut {id} ({options:?})");
        self.bindings.push(ShortcutBinding {
            id: id.clone(),
            keys,
            callback,
            options,
        });
        Some(id)
    }

    /// Removes bindings for the key combination.
    ///
    /// With `callback`, only bindings registered with that handler go; without
    /// it, every binding sharing the id goes. Once no binding with the id is
    /// left, the id also leaves the active set, so a later registration starts
    /// inactive. Surviving siblings keep the id active and do not fire again
    /// while the keys stay held. Returns how many bindings were removed.
    pub fn unbind<I, S>(&mut self, keys: I, callback: Option<&Callback>) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = normalize_keys(keys);
        if keys.is_empty() {
            return 0;
        }

        let id = canonical_id(&keys);
        let before = self.bindings.len();
        self.bindings.retain(|binding| {
            let matches = binding.id == id && callback.is_none_or(|cb| binding.callback.same(cb));
            !matches
        });
        if !self.bindings.iter().any(|binding| binding.id == id) {
            self.active.remove(&id);
        }

        let removed = before - self.bindings.len();
        debug!("Unbound {removed} shortcut(s) for {id}");
        removed
    }

    pub fn bindings(&self) -> &[ShortcutBinding] {
        &self.bindings
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    pub fn active_ids(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }

    pub(crate) fn clear_active(&mut self) {
        self.active.clear();
    }

    /// Re-evaluates every binding against the keys held in `input`.
    ///
    /// The `consumed_by_ui` flag comes from the triggering native event;
    /// bindings that don't allow typing are skipped entirely while it is set. Transitions
    /// are judged against the active set as it was before this pass, so every
    /// binding sharing an id fires on the same edge.
    pub fn evaluate(&mut self, input: &InputContext<'_>, timestamp_ms: u64) -> Disposition {
        let mut disposition = Disposition::default();
        let previously_active = self.active.clone();

        for binding in &self.bindings {
            if input.consumed_by_ui() && !binding.options.allow_while_typing {
                continue;
            }

            let satisfied = binding.is_satisfied(input.held_keys());
            let was_active = previously_active.contains(&binding.id);

            let phase = match (satisfied, was_active) {
                (true, false) => {
                    if self.active.insert(binding.id.clone()) {
                        debug!("Shortcut {} activated", binding.id);
                    }
                    disposition.merge(Disposition {
                        prevent_default: binding.options.prevent_default,
                        stop_propagation: binding.options.stop_propagation,
                    });
                    Phase::Begin
                }
                (false, true) => {
                    if self.active.remove(&binding.id) {
                        debug!("Shortcut {} released", binding.id);
                    }
                    if !binding.options.fire_on_end {
                        continue;
                    }
                    Phase::End
                }
                _ => continue,
            };

            let event =
                InputEvent::new(Category::Keyboard, phase, timestamp_ms).with_key(&binding.id);
            binding
                .callback
                .invoke(&event, input, &format!("Shortcut {}", binding.id));
        }

        disposition
    }
}
