//! Explizite Event-Abonnements mit verpflichtendem Release.

use super::{EventKind, RenderSurface, SubscriptionId};

/// Handle eines Surface-Abonnements.
///
/// Muss über [`Subscription::release`] zurückgegeben werden. Wird ein
/// Handle unreleased gedroppt, meldet `Drop` das Leck im Log.
#[must_use = "Abonnements müssen mit release() freigegeben werden"]
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    released: bool,
}

impl Subscription {
    /// Registriert `kind` auf der Surface.
    pub fn acquire(surface: &mut dyn RenderSurface, kind: EventKind) -> Self {
        let id = surface.subscribe(kind.clone());
        log::debug!("Abonnement {:?} für {:?} registriert", id, kind);
        Self {
            id,
            kind,
            released: false,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Gibt das Abonnement auf der Surface frei.
    pub fn release(mut self, surface: &mut dyn RenderSurface) {
        surface.unsubscribe(self.id);
        self.released = true;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.released {
            log::error!(
                "Abonnement {:?} ({:?}) wurde nicht freigegeben",
                self.id,
                self.kind
            );
        }
    }
}

/// Alle Abonnements einer Sitzung.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    entries: Vec<Subscription>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.entries.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` wenn bereits ein Abonnement dieser Art besteht.
    pub fn contains(&self, kind: &EventKind) -> bool {
        self.entries.iter().any(|s| s.kind() == kind)
    }

    /// Gibt alle Abonnements frei und liefert deren Anzahl.
    pub fn release_all(&mut self, surface: &mut dyn RenderSurface) -> usize {
        let count = self.entries.len();
        for subscription in self.entries.drain(..) {
            subscription.release(surface);
        }
        count
    }
}
