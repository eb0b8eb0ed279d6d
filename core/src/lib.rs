//! Statusbar core
//!
//! Reactive engine behind a floating statusbar anchored to the bottom-right
//! of a host window.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    statusbar                        │
//! │      enable / disable / toggle / note commands      │
//! │          (lifecycle + single refresh path)          │
//! ├──────────────────┬──────────────────┬───────────────┤
//! │    observer      │    aggregate     │   placement   │
//! │  ValueObserver   │ current_values   │ compute_      │
//! │ (watch registry) │ render           │   position    │
//! ├──────────────────┴──────────────────┴───────────────┤
//! │              host/  +  display_list                 │
//! │   VariableHost, SurfaceHost, HookHost, DisplayList  │
//! │          (collaborators owned by the host)          │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod aggregate;
pub mod config;
pub mod display_list;
pub mod error;
pub mod hooks;
pub mod host;
pub mod observer;
pub mod placement;
pub mod statusbar;


// Re-exports for convenience
pub use config::{OVERLAY_NAMESPACE, StatusbarConfig, StatusbarConfigExt};
pub use display_list::{DisplayEntry, DisplayList};
pub use error::{ConfigError, SurfaceError, VariableError};
pub use hooks::RefreshHook;
pub use host::memory::{HookTable, StaticRegions, VariableTable};
pub use host::{
    HookHost, HookKind, HostEvent, RefreshTrigger, ReservedRegion, ReservedRegionSource,
    ShowRequest, SurfaceHandle, SurfaceHost, VariableHost, WatchToken, Watcher,
};
pub use observer::{SubscriptionKind, ValueObserver};
pub use placement::{
    BOTTOM_EDGE_Y, PlacementContext, PlacementInput, PlacementStrategy, Position,
    compute_position, reserved_width,
};
pub use statusbar::{OverlayState, StatusSnapshot, Statusbar};
