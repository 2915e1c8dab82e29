//! Karten-Controls als Fähigkeiten: mount / activate / unmount.

use super::{ControlHandle, ControlPosition, ControlSpec, RenderSurface};

/// Ein Control, das sich auf einer Surface montieren lässt.
pub trait Control {
    /// Anzeigename für Log-Ausgaben
    fn name(&self) -> &str;
    /// Montiert das Control und liefert das Surface-Handle.
    fn mount(&self, surface: &mut dyn RenderSurface) -> ControlHandle;
    /// Reaktion auf Aktivierung (Klick) durch den Nutzer.
    fn activate(&self, surface: &mut dyn RenderSurface);
    /// Entfernt das Control wieder.
    fn unmount(&self, surface: &mut dyn RenderSurface, handle: ControlHandle) {
        surface.remove_control(handle);
    }
}

/// Springt zur konfigurierten Home-Ansicht.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeControl {
    pub center: [f64; 2],
    pub zoom: f64,
}

impl HomeControl {
    pub fn new(center: [f64; 2], zoom: f64) -> Self {
        Self { center, zoom }
    }
}

impl Control for HomeControl {
    fn name(&self) -> &str {
        "home"
    }

    fn mount(&self, surface: &mut dyn RenderSurface) -> ControlHandle {
        surface.add_control(ControlSpec {
            label: "⌂".to_string(),
            tooltip: "Zur Startansicht".to_string(),
            position: ControlPosition::TopRight,
        })
    }

    fn activate(&self, surface: &mut dyn RenderSurface) {
        surface.fly_to(self.center, self.zoom);
    }
}

/// Montierte Controls einer Sitzung.
#[derive(Default)]
pub struct ControlRegistry {
    mounted: Vec<(ControlHandle, Box<dyn Control>)>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Montiert ein Control und merkt sich das Handle.
    pub fn mount(
        &mut self,
        surface: &mut dyn RenderSurface,
        control: Box<dyn Control>,
    ) -> ControlHandle {
        let handle = control.mount(surface);
        log::info!("Control '{}' montiert ({:?})", control.name(), handle);
        self.mounted.push((handle, control));
        handle
    }

    /// Aktiviert das Control hinter `handle`. `false` bei unbekanntem Handle.
    pub fn activate(&self, surface: &mut dyn RenderSurface, handle: ControlHandle) -> bool {
        match self.mounted.iter().find(|(h, _)| *h == handle) {
            Some((_, control)) => {
                control.activate(surface);
                true
            }
            None => false,
        }
    }

    /// Demontiert alle Controls in umgekehrter Reihenfolge.
    pub fn unmount_all(&mut self, surface: &mut dyn RenderSurface) -> usize {
        let count = self.mounted.len();
        while let Some((handle, control)) = self.mounted.pop() {
            control.unmount(surface, handle);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}

impl std::fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.mounted.iter().map(|(h, c)| (h, c.name())))
            .finish()
    }
}
