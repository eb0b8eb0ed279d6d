use std::cell::RefCell;
use std::rc::Rc;

use statusbar_core::{
    DisplayEntry, DisplayList, HookTable, ReservedRegion, ReservedRegionSource, Statusbar,
    StatusbarConfig, VariableTable,
};
use statusbar_overlay::{ParentWindow, SoftwareSurface};

/// Statusbar wired to the in-memory host and the software surface
pub type CliStatusbar = Statusbar<VariableTable, SoftwareSurface, HookTable>;

/// Tray icon size used for the simulated tray
pub const TRAY_ICON_SIZE: u32 = 16;
pub const TRAY_ICON_GAP: u32 = 4;

/// Simulated tray shared between the CLI and the statusbar
#[derive(Debug, Clone, Default)]
pub struct TrayHandle(Rc<RefCell<Option<ReservedRegion>>>);

impl TrayHandle {
    /// Set the icon count; zero removes the tray
    pub fn set_icons(&self, icon_count: u32) {
        *self.0.borrow_mut() = (icon_count > 0).then_some(ReservedRegion {
            icon_count,
            icon_min_size: TRAY_ICON_SIZE,
            icon_gap: TRAY_ICON_GAP,
        });
    }

    pub fn icon_count(&self) -> u32 {
        self.0.borrow().map_or(0, |r| r.icon_count)
    }
}

impl ReservedRegionSource for TrayHandle {
    fn regions(&self) -> Vec<ReservedRegion> {
        self.0.borrow().iter().copied().collect()
    }
}

/// Holds all state for the CLI session.
/// Single-threaded: everything runs on the current-thread runtime.
pub struct CliContext {
    pub bar: CliStatusbar,
    pub tray: TrayHandle,
}

impl CliContext {
    pub fn new(config: StatusbarConfig, parent: ParentWindow, workspaces: bool) -> Self {
        let mut variables = VariableTable::new();
        for name in config
            .redirected_variables
            .iter()
            .chain(&config.watched_variables)
        {
            variables.define(name);
        }

        // A status strip with every redirected variable on it, like a host
        // whose status producers registered before the bar was enabled
        let list = DisplayList::from_entries(
            config
                .redirected_variables
                .iter()
                .map(|name| DisplayEntry::variable(name.as_str())),
        );

        let hooks = if workspaces {
            HookTable::with_workspaces()
        } else {
            HookTable::focus_only()
        };

        let surface = SoftwareSurface::new(parent, config.font_size);
        let tray = TrayHandle::default();
        let bar = Statusbar::new(config, variables, list, surface, hooks)
            .with_reserved_regions(Box::new(tray.clone()));

        Self { bar, tray }
    }

    /// Set a variable and let the statusbar react to it
    pub fn set_variable(&mut self, name: &str, value: &str) {
        self.bar.variables_mut().set(name, value);
        self.bar.process_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tray_handle() {
        let tray = TrayHandle::default();
        assert!(tray.regions().is_empty());
        tray.set_icons(3);
        assert_eq!(tray.icon_count(), 3);
        assert_eq!(tray.regions()[0].width(), 60);
        tray.set_icons(0);
        assert!(tray.regions().is_empty());
    }

    #[test]
    fn test_context_redirects_on_enable() {
        let config = StatusbarConfig::default();
        let mut ctx = CliContext::new(
            config,
            ParentWindow {
                width: 800,
                height: 600,
            },
            false,
        );
        assert_eq!(ctx.bar.display_list().len(), 3);

        ctx.bar.enable();
        assert!(ctx.bar.display_list().is_empty());

        ctx.set_variable("clock", "09:30");
        assert_eq!(ctx.bar.state().buffer, "09:30");
    }
}
