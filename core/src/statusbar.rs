//! Statusbar lifecycle
//!
//! `Statusbar` ties the pieces together: it owns the subscription registry,
//! the refresh hook and the overlay state, and routes every trigger (variable
//! change, strip change, focus/workspace event, note command) through
//! [`Statusbar::refresh`].
//!
//! Everything runs on the host's event loop. Watch notifications are queued
//! on a channel and handled by [`Statusbar::process_pending`] in the order
//! the host delivered them.

use std::sync::mpsc::{self, Receiver};

use crate::aggregate::{current_values, render};
use crate::config::{OVERLAY_NAMESPACE, StatusbarConfig};
use crate::display_list::DisplayList;
use crate::hooks::RefreshHook;
use crate::host::{
    HookHost, HookKind, HostEvent, RefreshTrigger, ReservedRegionSource, ShowRequest,
    SurfaceHandle, SurfaceHost, VariableHost,
};
use crate::observer::ValueObserver;
use crate::placement::{PlacementStrategy, reserved_width};

/// Runtime state of the overlay
#[derive(Debug, Default)]
pub struct OverlayState {
    pub enabled: bool,
    pub note: Option<String>,
    /// Text most recently handed to the surface
    pub buffer: String,
    /// Surface owned by the statusbar while enabled
    pub frame: Option<SurfaceHandle>,
}

/// Point-in-time view of the statusbar, for display and inspection
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    pub enabled: bool,
    pub note: Option<String>,
    pub text: String,
    pub hook: Option<HookKind>,
    pub subscribed: Vec<String>,
}

/// Floating statusbar bound to a host's variables, status strip, surfaces and hooks
pub struct Statusbar<V, S, K>
where
    V: VariableHost,
    S: SurfaceHost,
    K: HookHost,
{
    config: StatusbarConfig,
    variables: V,
    list: DisplayList,
    surface: S,
    hooks: K,
    regions: Option<Box<dyn ReservedRegionSource>>,
    observer: ValueObserver,
    rx: Receiver<RefreshTrigger>,
    hook: RefreshHook,
    state: OverlayState,
}

impl<V, S, K> Statusbar<V, S, K>
where
    V: VariableHost,
    S: SurfaceHost,
    K: HookHost,
{
    pub fn new(
        config: StatusbarConfig,
        variables: V,
        list: DisplayList,
        surface: S,
        hooks: K,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let hook = RefreshHook::select(&hooks);
        tracing::debug!(hook = ?hook.kind(), "Selected refresh hook");

        let state = OverlayState {
            note: config.note_text().map(String::from),
            ..Default::default()
        };

        Self {
            config,
            variables,
            list,
            surface,
            hooks,
            regions: None,
            observer: ValueObserver::new(tx),
            rx,
            hook,
            state,
        }
    }

    /// Attach a source of reserved regions the overlay must stay clear of
    pub fn with_reserved_regions(mut self, regions: Box<dyn ReservedRegionSource>) -> Self {
        self.regions = Some(regions);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn enable(&mut self) {
        if self.state.enabled {
            tracing::debug!("Statusbar already enabled");
            return;
        }

        self.hooks.add_hook(self.hook.kind());
        self.hook.reset();
        self.state.enabled = true;

        self.observer.enable(
            &mut self.variables,
            &self.list,
            &self.config.redirected_variables,
            &self.config.watched_variables,
        );

        tracing::info!(
            redirected = ?self.observer.subscribed(),
            hook = ?self.hook.kind(),
            "Statusbar enabled"
        );
        self.refresh();
    }

    pub fn disable(&mut self) {
        if !self.state.enabled {
            tracing::debug!("Statusbar already disabled");
            return;
        }

        self.hooks.remove_hook(self.hook.kind());
        self.observer.disable(
            &mut self.variables,
            &self.list,
            &self.config.redirected_variables,
        );

        if let Some(frame) = self.state.frame.take() {
            if let Err(e) = self.surface.destroy(frame) {
                tracing::warn!(error = %e, "Failed to destroy statusbar surface");
            }
        }
        self.state.buffer.clear();
        self.state.enabled = false;

        // Notifications queued before the watches came off are stale now
        while self.rx.try_recv().is_ok() {}

        tracing::info!("Statusbar disabled");
    }

    /// Flip between enabled and disabled. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        if self.state.enabled {
            self.disable();
        } else {
            self.enable();
        }
        self.state.enabled
    }

    /// Replace the configuration, re-enabling with it if the bar was enabled
    pub fn apply_config(&mut self, config: StatusbarConfig) {
        let was_enabled = self.state.enabled;
        if was_enabled {
            self.disable();
        }
        self.state.note = config.note_text().map(String::from);
        self.config = config;
        if was_enabled {
            self.enable();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_note(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.note = (!text.is_empty()).then_some(text);
        self.refresh();
    }

    pub fn clear_note(&mut self) {
        self.state.note = None;
        self.refresh();
    }

    pub fn note(&self) -> Option<&str> {
        self.state.note.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Triggers
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle every queued watch notification. Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(trigger) = self.rx.try_recv() {
            handled += 1;
            if !self.state.enabled {
                continue;
            }
            match trigger {
                RefreshTrigger::VariableChanged(name) => {
                    tracing::trace!(variable = %name, "Watched variable changed");
                    self.refresh();
                }
                RefreshTrigger::DisplayListChanged => {
                    if self.observer.redirect(
                        &mut self.variables,
                        &self.list,
                        &self.config.redirected_variables,
                        &self.config.watched_variables,
                    ) {
                        self.refresh();
                    }
                }
            }
        }
        handled
    }

    /// Handle a focus or workspace notification from the host
    pub fn handle_host_event(&mut self, event: HostEvent) {
        if self.state.enabled && self.hook.should_refresh(event) {
            tracing::trace!(?event, "Host event triggered refresh");
            self.refresh();
        }
    }

    /// Rebuild the overlay text and ask the surface host to show it
    pub fn refresh(&mut self) {
        if !self.state.enabled {
            return;
        }

        let values = current_values(
            &self.variables,
            &self.config.watched_variables,
            &self.config.redirected_variables,
            self.state.note.as_deref(),
        );
        let text = render(&values, &self.config.separator);

        let reserved = self
            .regions
            .as_ref()
            .map_or(0, |source| reserved_width(&source.regions()));

        let request = ShowRequest {
            namespace: OVERLAY_NAMESPACE.to_string(),
            text: text.clone(),
            read_only: true,
            x_offset: self.config.x_offset,
            left_fringe: self.config.left_fringe,
            right_fringe: self.config.right_fringe,
            placement: PlacementStrategy::bottom_right(reserved),
        };

        match self.surface.show(request) {
            Ok(handle) => {
                tracing::trace!(text = %text, reserved, "Statusbar refreshed");
                self.state.frame = Some(handle);
                self.state.buffer = text;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to show statusbar surface");
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            enabled: self.state.enabled,
            note: self.state.note.clone(),
            text: self.state.buffer.clone(),
            hook: self.state.enabled.then(|| self.hook.kind()),
            subscribed: self
                .observer
                .subscribed()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn config(&self) -> &StatusbarConfig {
        &self.config
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    pub fn variables(&self) -> &V {
        &self.variables
    }

    /// Mutable access for the host side that owns the variables
    pub fn variables_mut(&mut self) -> &mut V {
        &mut self.variables
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn hooks(&self) -> &K {
        &self.hooks
    }

    pub fn observer(&self) -> &ValueObserver {
        &self.observer
    }
}

impl<V, S, K> Drop for Statusbar<V, S, K>
where
    V: VariableHost,
    S: SurfaceHost,
    K: HookHost,
{
    fn drop(&mut self) {
        self.disable();
    }
}
