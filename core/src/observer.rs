//! Variable subscriptions
//!
//! `ValueObserver` owns every watch the statusbar installs: one per watched
//! variable plus one on the shared display list. The registry maps each
//! variable to the token it was registered with, so disabling removes exactly
//! what enabling added and a second enable never registers twice.

use std::sync::mpsc::Sender;

use crate::display_list::DisplayList;
use crate::error::VariableError;
use crate::host::{RefreshTrigger, VariableHost, WatchToken, Watcher};

/// How a subscribed variable is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionKind {
    /// Shown in the overlay, left on the status strip
    Note,
    /// Shown in the overlay, removed from the status strip while enabled
    Redirected,
}

#[derive(Debug, Clone)]
struct Subscription {
    name: String,
    token: WatchToken,
    kind: SubscriptionKind,
}

/// Registry of active watches
#[derive(Debug)]
pub struct ValueObserver {
    tx: Sender<RefreshTrigger>,
    next_token: u64,
    subscriptions: Vec<Subscription>,
    list_token: Option<WatchToken>,
}

impl ValueObserver {
    pub fn new(tx: Sender<RefreshTrigger>) -> Self {
        Self {
            tx,
            next_token: 1,
            subscriptions: Vec::new(),
            list_token: None,
        }
    }

    /// Install watches and move redirected variables off the status strip.
    ///
    /// Returns `true` if at least one entry was removed from the strip, in
    /// which case the strip has already been asked to redisplay.
    pub fn enable<H: VariableHost + ?Sized>(
        &mut self,
        host: &mut H,
        list: &DisplayList,
        redirected: &[String],
        notes: &[String],
    ) -> bool {
        if self.list_token.is_none() {
            let token = self.allocate_token();
            list.watch(Watcher::new(token, self.tx.clone()));
            self.list_token = Some(token);
        }

        self.redirect(host, list, redirected, notes)
    }

    /// Move every redirected variable currently on the strip into the overlay.
    ///
    /// Runs on enable and again whenever the strip changes, so entries added
    /// later are captured too. Note variables that were unbound on an earlier
    /// pass are retried here. Returns `true` if anything was removed.
    pub fn redirect<H: VariableHost + ?Sized>(
        &mut self,
        host: &mut H,
        list: &DisplayList,
        redirected: &[String],
        notes: &[String],
    ) -> bool {
        // Names in both lists are watched as redirected below
        for name in notes {
            if redirected.contains(name) || self.is_subscribed(name) {
                continue;
            }
            self.subscribe(host, name, SubscriptionKind::Note);
        }

        let mut removed_any = false;

        for name in redirected {
            if !list.contains_variable(name) {
                continue;
            }
            match self.subscription_kind(name) {
                Some(SubscriptionKind::Redirected) => {}
                Some(SubscriptionKind::Note) => self.promote(name),
                None => {
                    if !self.subscribe(host, name, SubscriptionKind::Redirected) {
                        continue;
                    }
                }
            }
            if list.remove_variable(name) {
                tracing::debug!(variable = %name, "Redirected variable from status strip");
                removed_any = true;
            }
        }

        if removed_any {
            list.request_redisplay();
        }
        removed_any
    }

    /// Remove every watch and put redirected variables back on the strip.
    ///
    /// Redirected variables are appended in `redirected` order, followed by
    /// any still-subscribed variable that list no longer names.
    pub fn disable<H: VariableHost + ?Sized>(
        &mut self,
        host: &mut H,
        list: &DisplayList,
        redirected: &[String],
    ) {
        if let Some(token) = self.list_token.take() {
            list.unwatch(token);
        }

        let mut ordered = Vec::with_capacity(self.subscriptions.len());
        for name in redirected {
            if let Some(idx) = self.subscriptions.iter().position(|s| &s.name == name) {
                ordered.push(self.subscriptions.remove(idx));
            }
        }
        ordered.append(&mut self.subscriptions);

        for sub in ordered {
            if let Err(e) = host.unwatch(&sub.name, sub.token) {
                tracing::debug!(variable = %sub.name, error = %e, "Skipping unwatch");
            }
            if sub.kind == SubscriptionKind::Redirected {
                list.append_variable(&sub.name);
                tracing::debug!(variable = %sub.name, "Restored variable to status strip");
            }
        }

        list.request_redisplay();
    }

    pub fn is_subscribed(&self, name: &str) -> bool {
        self.subscriptions.iter().any(|s| s.name == name)
    }

    /// Kind of the active subscription for `name`, if any
    pub fn subscription_kind(&self, name: &str) -> Option<SubscriptionKind> {
        self.subscriptions
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.kind)
    }

    /// Names with an active subscription, in registration order
    pub fn subscribed(&self) -> Vec<&str> {
        self.subscriptions.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn is_watching_list(&self) -> bool {
        self.list_token.is_some()
    }

    fn subscribe<H: VariableHost + ?Sized>(
        &mut self,
        host: &mut H,
        name: &str,
        kind: SubscriptionKind,
    ) -> bool {
        let token = self.allocate_token();
        match host.watch(name, Watcher::new(token, self.tx.clone())) {
            Ok(()) => {
                tracing::trace!(variable = %name, ?kind, token = token.0, "Watching variable");
                self.subscriptions.push(Subscription {
                    name: name.to_string(),
                    token,
                    kind,
                });
                true
            }
            Err(VariableError::Unbound { .. }) => {
                tracing::debug!(variable = %name, "Variable is unbound, not watching");
                false
            }
            Err(e) => {
                tracing::warn!(variable = %name, error = %e, "Failed to watch variable");
                false
            }
        }
    }

    fn promote(&mut self, name: &str) {
        if let Some(sub) = self.subscriptions.iter_mut().find(|s| s.name == name) {
            sub.kind = SubscriptionKind::Redirected;
        }
    }

    fn allocate_token(&mut self) -> WatchToken {
        let token = WatchToken(self.next_token);
        self.next_token += 1;
        token
    }
}
