//! Dataset-Cache: jeder Overlay-Layer wird pro Sitzung höchstens einmal geladen.

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;

use crate::core::{FeatureCollection, OverlayLayerDescriptor, PreparedShapes};

/// Ladezustand eines Layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Noch kein Fetch angestoßen
    NotAttempted,
    /// Fetch läuft
    Pending,
    /// Collection gespeichert (ggf. leer)
    Loaded,
    /// Fetch fehlgeschlagen, bleibt für die Sitzung abwesend
    Absent,
}

/// Unveränderlicher Cache-Eintrag nach Abschluss eines Fetches.
#[derive(Debug, Clone)]
pub struct LayerCacheEntry {
    pub id: String,
    /// `None` wenn der Fetch fehlgeschlagen ist
    pub collection: Option<Arc<FeatureCollection>>,
    /// Einmalig validierte Formen für Abfragen, Index-gleich zu `collection`
    pub prepared: Option<Arc<PreparedShapes>>,
    pub loaded_at: Instant,
}

/// Ergebnis von [`LayerCache::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Collection mit Features gespeichert
    Stored,
    /// Gültige, aber leere Collection gespeichert
    StoredEmpty,
    /// Fetch fehlgeschlagen, Eintrag abwesend
    Absent,
    /// Kein laufender Fetch für diese ID, nichts geändert
    Ignored,
}

/// Reiner Datenhalter für die geladenen Collections.
#[derive(Debug, Default)]
pub struct LayerCache {
    entries: IndexMap<String, LayerCacheEntry>,
    pending: Vec<String>,
    requests: Vec<OverlayLayerDescriptor>,
}

impl LayerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merkt einen Fetch für `layer` vor.
    ///
    /// Liefert `false`, wenn der Layer bereits geladen, abwesend oder
    /// in Arbeit ist. Es gibt keinen zweiten Versuch.
    pub fn load(&mut self, layer: &OverlayLayerDescriptor) -> bool {
        if self.status(&layer.id) != LoadStatus::NotAttempted {
            return false;
        }
        self.pending.push(layer.id.clone());
        self.requests.push(layer.clone());
        log::info!("Fetch für Layer '{}' angefordert", layer.id);
        true
    }

    /// Entnimmt die seit dem letzten Aufruf vorgemerkten Fetches.
    pub fn take_fetch_requests(&mut self) -> Vec<OverlayLayerDescriptor> {
        std::mem::take(&mut self.requests)
    }

    /// Schließt einen laufenden Fetch ab.
    pub fn complete(
        &mut self,
        layer_id: &str,
        result: Result<Arc<FeatureCollection>, String>,
    ) -> CacheOutcome {
        let Some(index) = self.pending.iter().position(|id| id == layer_id) else {
            log::warn!("Fetch-Ergebnis für '{}' ohne laufenden Fetch verworfen", layer_id);
            return CacheOutcome::Ignored;
        };
        self.pending.swap_remove(index);

        let (collection, outcome) = match result {
            Ok(collection) if collection.is_empty() => (Some(collection), CacheOutcome::StoredEmpty),
            Ok(collection) => (Some(collection), CacheOutcome::Stored),
            Err(reason) => {
                log::warn!("Layer '{}' bleibt abwesend: {}", layer_id, reason);
                (None, CacheOutcome::Absent)
            }
        };

        let prepared = collection
            .as_deref()
            .map(|c| Arc::new(PreparedShapes::prepare(c)));

        self.entries.insert(
            layer_id.to_string(),
            LayerCacheEntry {
                id: layer_id.to_string(),
                collection,
                prepared,
                loaded_at: Instant::now(),
            },
        );
        outcome
    }

    /// Reiner Lookup, stößt nie einen Fetch an.
    pub fn get(&self, layer_id: &str) -> Option<&Arc<FeatureCollection>> {
        self.entries.get(layer_id)?.collection.as_ref()
    }

    /// Collection und vorbereitete Formen eines geladenen Layers.
    pub fn get_prepared(
        &self,
        layer_id: &str,
    ) -> Option<(&Arc<FeatureCollection>, &Arc<PreparedShapes>)> {
        let entry = self.entries.get(layer_id)?;
        Some((entry.collection.as_ref()?, entry.prepared.as_ref()?))
    }

    pub fn entry(&self, layer_id: &str) -> Option<&LayerCacheEntry> {
        self.entries.get(layer_id)
    }

    pub fn status(&self, layer_id: &str) -> LoadStatus {
        match self.entries.get(layer_id) {
            Some(entry) if entry.collection.is_some() => LoadStatus::Loaded,
            Some(_) => LoadStatus::Absent,
            None if self.pending.iter().any(|id| id == layer_id) => LoadStatus::Pending,
            None => LoadStatus::NotAttempted,
        }
    }

    /// Anzahl laufender Fetches.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Feature;

    fn layer(id: &str) -> OverlayLayerDescriptor {
        OverlayLayerDescriptor::new(id, id, format!("http://localhost/{id}"), "#000000")
    }

    fn one_feature() -> Arc<FeatureCollection> {
        Arc::new(FeatureCollection::new(vec![Feature::default()]))
    }

    #[test]
    fn load_is_issued_at_most_once() {
        let mut cache = LayerCache::new();
        assert_eq!(cache.status("a"), LoadStatus::NotAttempted);

        assert!(cache.load(&layer("a")));
        assert!(!cache.load(&layer("a")));
        assert_eq!(cache.status("a"), LoadStatus::Pending);
        assert_eq!(cache.take_fetch_requests().len(), 1);
        assert!(cache.take_fetch_requests().is_empty());

        assert_eq!(cache.complete("a", Ok(one_feature())), CacheOutcome::Stored);
        assert!(!cache.load(&layer("a")));
        assert_eq!(cache.status("a"), LoadStatus::Loaded);
    }

    #[test]
    fn failed_fetch_stays_absent_without_retry() {
        let mut cache = LayerCache::new();
        cache.load(&layer("a"));

        let outcome = cache.complete("a", Err("HTTP-Status 500".into()));

        assert_eq!(outcome, CacheOutcome::Absent);
        assert_eq!(cache.status("a"), LoadStatus::Absent);
        assert!(cache.get("a").is_none());
        assert!(!cache.load(&layer("a")));
    }

    #[test]
    fn empty_collection_is_stored_not_absent() {
        let mut cache = LayerCache::new();
        cache.load(&layer("a"));

        let outcome = cache.complete("a", Ok(Arc::new(FeatureCollection::empty())));

        assert_eq!(outcome, CacheOutcome::StoredEmpty);
        assert_eq!(cache.status("a"), LoadStatus::Loaded);
        assert!(cache.get("a").is_some_and(|c| c.is_empty()));
    }

    #[test]
    fn completion_without_pending_fetch_is_ignored() {
        let mut cache = LayerCache::new();

        assert_eq!(cache.complete("x", Ok(one_feature())), CacheOutcome::Ignored);
        assert_eq!(cache.status("x"), LoadStatus::NotAttempted);
    }

    #[test]
    fn stored_collection_is_prepared_once() {
        let mut cache = LayerCache::new();
        cache.load(&layer("a"));
        cache.complete("a", Ok(one_feature()));

        let (collection, prepared) = cache.get_prepared("a").expect("geladen");
        let again = cache.get_prepared("a").map(|(_, p)| p.clone()).expect("geladen");

        assert_eq!(prepared.len(), collection.len());
        // Feature ohne Geometrie
        assert_eq!(prepared.invalid_count(), 1);
        assert!(Arc::ptr_eq(prepared, &again));
    }
}
