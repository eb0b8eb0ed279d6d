//! In-memory collaborator implementations
//!
//! Used by the interactive driver and by tests. `VariableTable` notifies its
//! watchers only when a value actually changes, like a host with real
//! variable watchers would.

use std::collections::{HashMap, HashSet};

use super::{
    HookHost, HookKind, RefreshTrigger, ReservedRegion, ReservedRegionSource, VariableHost,
    WatchToken, Watcher,
};
use crate::error::VariableError;

// ─────────────────────────────────────────────────────────────────────────────
// Variables
// ─────────────────────────────────────────────────────────────────────────────

/// A variable's value and watchers. Watchers outlive unbinding, so a
/// variable that is bound again keeps notifying them.
#[derive(Debug, Default)]
struct Slot {
    bound: bool,
    value: Option<String>,
    watchers: Vec<Watcher>,
}

impl Slot {
    fn notify(&self, name: &str) {
        for watcher in &self.watchers {
            watcher.notify(RefreshTrigger::VariableChanged(name.to_string()));
        }
    }
}

/// Table of named variables with change watchers
#[derive(Debug, Default)]
pub struct VariableTable {
    slots: HashMap<String, Slot>,
    /// Names whose reads fail, for exercising fault isolation
    faulty: HashSet<String>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` without a value
    pub fn define(&mut self, name: &str) {
        self.slots.entry(name.to_string()).or_default().bound = true;
    }

    /// Set a value, binding the variable if needed, and notify watchers on change
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.store(name, Some(value.into()));
    }

    /// Clear a bound variable's value (it stays bound)
    pub fn clear(&mut self, name: &str) {
        if self.is_bound(name) {
            self.store(name, None);
        }
    }

    /// Unbind a variable. Existing watchers stay attached and are notified
    /// that the value is gone, and again once the variable is set.
    pub fn unbind(&mut self, name: &str) -> bool {
        let Some(slot) = self.slots.get_mut(name).filter(|s| s.bound) else {
            return false;
        };
        slot.bound = false;
        if slot.value.take().is_some() {
            slot.notify(name);
        }
        true
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.slots.get(name).is_some_and(|s| s.bound)
    }

    /// Make reads of `name` fail until cleared with `set_faulty(name, false)`
    pub fn set_faulty(&mut self, name: &str, faulty: bool) {
        if faulty {
            self.faulty.insert(name.to_string());
        } else {
            self.faulty.remove(name);
        }
    }

    pub fn watcher_count(&self, name: &str) -> usize {
        self.slots.get(name).map_or(0, |s| s.watchers.len())
    }

    fn store(&mut self, name: &str, value: Option<String>) {
        let slot = self.slots.entry(name.to_string()).or_default();
        let was_bound = std::mem::replace(&mut slot.bound, true);
        if was_bound && slot.value == value {
            return;
        }
        slot.value = value;
        slot.notify(name);
    }
}

impl VariableHost for VariableTable {
    fn value(&self, name: &str) -> Result<Option<String>, VariableError> {
        if self.faulty.contains(name) {
            return Err(VariableError::Read {
                name: name.to_string(),
                reason: "value is not printable".to_string(),
            });
        }
        Ok(self.slots.get(name).and_then(|s| s.value.clone()))
    }

    fn watch(&mut self, name: &str, watcher: Watcher) -> Result<(), VariableError> {
        let slot = self
            .slots
            .get_mut(name)
            .filter(|s| s.bound)
            .ok_or_else(|| VariableError::Unbound {
                name: name.to_string(),
            })?;
        if slot.watchers.iter().all(|w| w.token != watcher.token) {
            slot.watchers.push(watcher);
        }
        Ok(())
    }

    fn unwatch(&mut self, name: &str, token: WatchToken) -> Result<(), VariableError> {
        let slot = self
            .slots
            .get_mut(name)
            .ok_or_else(|| VariableError::Unbound {
                name: name.to_string(),
            })?;
        slot.watchers.retain(|w| w.token != token);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hooks
// ─────────────────────────────────────────────────────────────────────────────

/// Hook registry that records which hooks are installed
#[derive(Debug, Default)]
pub struct HookTable {
    workspace_switch: bool,
    installed: Vec<HookKind>,
}

impl HookTable {
    /// A host without a workspace-switch notification
    pub fn focus_only() -> Self {
        Self::default()
    }

    /// A host exposing a workspace-switch notification (e.g. a tiling WM integration)
    pub fn with_workspaces() -> Self {
        Self {
            workspace_switch: true,
            installed: Vec::new(),
        }
    }

    pub fn installed(&self) -> &[HookKind] {
        &self.installed
    }
}

impl HookHost for HookTable {
    fn supports_workspace_switch(&self) -> bool {
        self.workspace_switch
    }

    fn add_hook(&mut self, kind: HookKind) {
        if !self.installed.contains(&kind) {
            self.installed.push(kind);
        }
    }

    fn remove_hook(&mut self, kind: HookKind) {
        self.installed.retain(|k| *k != kind);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reserved Regions
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed set of reserved regions that can be updated by the owner
#[derive(Debug, Clone, Default)]
pub struct StaticRegions(pub Vec<ReservedRegion>);

impl ReservedRegionSource for StaticRegions {
    fn regions(&self) -> Vec<ReservedRegion> {
        self.0.clone()
    }
}
