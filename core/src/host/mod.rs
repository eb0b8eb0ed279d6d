//! Collaborator interfaces consumed by the statusbar
//!
//! The statusbar never owns the values it displays, the window it is drawn
//! in, or the notifications that wake it up. Each of those lives behind one
//! of the traits below so the engine can run against a real host toolkit or
//! the in-memory implementations in [`memory`].

pub mod memory;

use std::sync::mpsc::Sender;

use crate::error::{SurfaceError, VariableError};
use crate::placement::PlacementStrategy;

// ─────────────────────────────────────────────────────────────────────────────
// Refresh Triggers
// ─────────────────────────────────────────────────────────────────────────────

/// Notification delivered to the statusbar through its trigger channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// A watched variable changed value
    VariableChanged(String),
    /// The shared display list was mutated
    DisplayListChanged,
}

/// Identity of one watch registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchToken(pub u64);

/// A change-notification callback attached to a variable or list
#[derive(Debug, Clone)]
pub struct Watcher {
    pub token: WatchToken,
    tx: Sender<RefreshTrigger>,
}

impl Watcher {
    pub fn new(token: WatchToken, tx: Sender<RefreshTrigger>) -> Self {
        Self { token, tx }
    }

    /// Deliver a trigger; a closed channel means the owner is gone and is ignored
    pub fn notify(&self, trigger: RefreshTrigger) {
        if self.tx.send(trigger).is_err() {
            tracing::trace!(token = self.token.0, "Watcher channel closed");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Variables
// ─────────────────────────────────────────────────────────────────────────────

/// Externally owned, externally mutated status values
pub trait VariableHost {
    /// Current value; `Ok(None)` when the variable is unbound
    fn value(&self, name: &str) -> Result<Option<String>, VariableError>;

    /// Attach a watcher. Fails with [`VariableError::Unbound`] for unknown names.
    fn watch(&mut self, name: &str, watcher: Watcher) -> Result<(), VariableError>;

    /// Detach the watcher registered under `token`
    fn unwatch(&mut self, name: &str, token: WatchToken) -> Result<(), VariableError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Surfaces
// ─────────────────────────────────────────────────────────────────────────────

/// Handle to a floating surface created by a [`SurfaceHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Request to show or update a floating surface
#[derive(Debug, Clone)]
pub struct ShowRequest {
    /// Surfaces are reused per namespace; showing twice replaces the content
    pub namespace: String,
    pub text: String,
    /// Backing buffer rejects direct edits from outside the statusbar
    pub read_only: bool,
    pub x_offset: i32,
    pub left_fringe: u32,
    pub right_fringe: u32,
    /// Evaluated by the host once the text has been measured
    pub placement: PlacementStrategy,
}

/// Host toolkit able to create borderless floating surfaces
pub trait SurfaceHost {
    fn show(&mut self, request: ShowRequest) -> Result<SurfaceHandle, SurfaceError>;
    fn destroy(&mut self, handle: SurfaceHandle) -> Result<(), SurfaceError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Focus / Workspace Hooks
// ─────────────────────────────────────────────────────────────────────────────

/// Host notification the statusbar can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    WorkspaceSwitch,
    FocusChange,
}

/// Events delivered by the host's notification hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    WorkspaceSwitched,
    /// Focus notification; `focused` is the host's focus state after the change
    FocusChanged { focused: bool },
}

/// Host notification registry
pub trait HookHost {
    /// Whether the host exposes a workspace-switch notification
    fn supports_workspace_switch(&self) -> bool;
    fn add_hook(&mut self, kind: HookKind);
    fn remove_hook(&mut self, kind: HookKind);
}

// ─────────────────────────────────────────────────────────────────────────────
// Reserved Regions
// ─────────────────────────────────────────────────────────────────────────────

/// A right-aligned screen-edge region (e.g. tray icons) the overlay must not cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReservedRegion {
    pub icon_count: u32,
    pub icon_min_size: u32,
    pub icon_gap: u32,
}

impl ReservedRegion {
    pub fn width(&self) -> i32 {
        let per_icon = self.icon_min_size.saturating_add(self.icon_gap);
        i32::try_from(self.icon_count.saturating_mul(per_icon)).unwrap_or(i32::MAX)
    }
}

/// Source of reserved regions, queried on every refresh
pub trait ReservedRegionSource {
    fn regions(&self) -> Vec<ReservedRegion>;
}
