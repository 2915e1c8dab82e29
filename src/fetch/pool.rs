//! Nebenläufige Fetches: ein Thread pro Layer, Rückmeldung per Channel.
//!
//! Die Ergebnisse werden ausschließlich auf dem Event-Loop-Thread über
//! [`FetchPool::drain`] abgeholt.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::{FeatureCollection, FetchError, OverlayLayerDescriptor};

use super::DatasetSource;

/// Abgeschlossener Fetch eines Layers.
#[derive(Debug)]
pub struct FetchCompletion {
    pub layer_id: String,
    pub result: Result<FeatureCollection, FetchError>,
}

/// Startet Fetches auf Worker-Threads und sammelt deren Ergebnisse.
pub struct FetchPool {
    source: Arc<dyn DatasetSource>,
    sender: Sender<FetchCompletion>,
    receiver: Receiver<FetchCompletion>,
    in_flight: usize,
}

impl FetchPool {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            source,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Startet den Fetch eines Layers auf einem eigenen Thread.
    pub fn issue(&mut self, layer: OverlayLayerDescriptor) -> std::io::Result<()> {
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        std::thread::Builder::new()
            .name(format!("fetch-{}", layer.id))
            .spawn(move || {
                let result = source.fetch(&layer);
                // Empfänger weg = Sitzung beendet, Ergebnis verwerfen
                let _ = sender.send(FetchCompletion {
                    layer_id: layer.id,
                    result,
                });
            })?;
        self.in_flight += 1;
        Ok(())
    }

    /// Holt alle bereits abgeschlossenen Fetches ab, ohne zu blockieren.
    pub fn drain(&mut self) -> Vec<FetchCompletion> {
        let completions: Vec<FetchCompletion> = self.receiver.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(completions.len());
        completions
    }

    /// Wartet bis alle laufenden Fetches fertig sind oder `timeout` abläuft.
    pub fn wait_for_all(&mut self, timeout: Duration) -> Vec<FetchCompletion> {
        let deadline = Instant::now() + timeout;
        let mut completions = Vec::new();
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(completion) => {
                    self.in_flight -= 1;
                    completions.push(completion);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        completions
    }

    /// Anzahl gestarteter, noch nicht abgeholter Fetches.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl std::fmt::Debug for FetchPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchPool")
            .field("in_flight", &self.in_flight)
            .finish()
    }
}
