//! Focus / workspace refresh hook
//!
//! Hosts differ in how they announce that the user moved somewhere else. The
//! strategy is chosen once from the host's capabilities: a workspace-switch
//! notification when one exists, otherwise focus changes guarded so only a
//! genuine focus gain refreshes the overlay.

use crate::host::{HookHost, HookKind, HostEvent};

/// Which host notification drives refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshHook {
    WorkspaceSwitch,
    /// `focused` tracks the last focus state seen
    FocusGained { focused: bool },
}

impl RefreshHook {
    /// Pick the strategy supported by `host`
    pub fn select<K: HookHost + ?Sized>(host: &K) -> Self {
        if host.supports_workspace_switch() {
            Self::WorkspaceSwitch
        } else {
            Self::FocusGained { focused: true }
        }
    }

    pub fn kind(&self) -> HookKind {
        match self {
            Self::WorkspaceSwitch => HookKind::WorkspaceSwitch,
            Self::FocusGained { .. } => HookKind::FocusChange,
        }
    }

    /// Forget focus history. The hook is installed from a user command, so
    /// the host is assumed focused at that point.
    pub fn reset(&mut self) {
        if let Self::FocusGained { focused } = self {
            *focused = true;
        }
    }

    /// Whether `event` should refresh the overlay
    pub fn should_refresh(&mut self, event: HostEvent) -> bool {
        match (self, event) {
            (Self::WorkspaceSwitch, HostEvent::WorkspaceSwitched) => true,
            (Self::FocusGained { focused }, HostEvent::FocusChanged { focused: now }) => {
                let gained = now && !*focused;
                *focused = now;
                gained
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::HookTable;

    #[test]
    fn test_selects_workspace_when_available() {
        assert_eq!(
            RefreshHook::select(&HookTable::with_workspaces()),
            RefreshHook::WorkspaceSwitch
        );
        assert_eq!(
            RefreshHook::select(&HookTable::focus_only()).kind(),
            HookKind::FocusChange
        );
    }

    #[test]
    fn test_focus_guard_fires_on_gain_only() {
        let mut hook = RefreshHook::select(&HookTable::focus_only());

        assert!(!hook.should_refresh(HostEvent::FocusChanged { focused: true }));
        assert!(!hook.should_refresh(HostEvent::FocusChanged { focused: false }));
        assert!(!hook.should_refresh(HostEvent::FocusChanged { focused: false }));
        assert!(hook.should_refresh(HostEvent::FocusChanged { focused: true }));
        assert!(!hook.should_refresh(HostEvent::FocusChanged { focused: true }));
        assert!(!hook.should_refresh(HostEvent::WorkspaceSwitched));
    }

    #[test]
    fn test_workspace_strategy_ignores_focus() {
        let mut hook = RefreshHook::WorkspaceSwitch;
        assert!(hook.should_refresh(HostEvent::WorkspaceSwitched));
        assert!(!hook.should_refresh(HostEvent::FocusChanged { focused: true }));
    }
}
