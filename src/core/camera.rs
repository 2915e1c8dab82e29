//! 2D-Kamera über Lon/Lat (plattkartische Projektion) mit Pan und Zoom.

use glam::{DVec2, Vec2};

use super::geometry::BoundingBox;

/// Kamera mit Mittelpunkt in Grad und Web-Karten-Zoomstufe.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Kartenmitte (`x` = Längengrad, `y` = Breitengrad)
    pub position: DVec2,
    /// Zoomstufe (jede Stufe halbiert den sichtbaren Ausschnitt)
    pub zoom: f64,
}

impl Camera2D {
    /// Sichtbare Welt-Halbhöhe in Grad bei Zoom 0.
    pub const BASE_WORLD_EXTENT: f64 = 180.0;
    /// Minimale Zoomstufe.
    pub const ZOOM_MIN: f64 = 0.0;
    /// Maximale Zoomstufe.
    pub const ZOOM_MAX: f64 = 22.0;

    /// Erstellt eine Kamera auf Position und Zoomstufe.
    pub fn new(position: DVec2, zoom: f64) -> Self {
        Self {
            position,
            zoom: zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX),
        }
    }

    /// Zentriert die Kamera auf einen Punkt
    pub fn look_at(&mut self, target: DVec2) {
        self.position = target;
    }

    /// Verschiebt die Kamera (Pan) in Welt-Einheiten
    pub fn pan(&mut self, delta: DVec2) {
        self.position += delta;
    }

    /// Ändert die Zoomstufe um `levels`
    pub fn zoom_by(&mut self, levels: f64) {
        self.zoom = (self.zoom + levels).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
    }

    /// Zoomt so, dass der Weltpunkt unter `screen_pos` stehen bleibt.
    pub fn zoom_at(&mut self, screen_pos: Vec2, screen_size: Vec2, levels: f64) {
        let anchor = self.screen_to_world(screen_pos, screen_size);
        self.zoom_by(levels);
        let moved = self.screen_to_world(screen_pos, screen_size);
        self.position += anchor - moved;
    }

    /// Sichtbare Welt-Halbhöhe in Grad.
    pub fn half_extent(&self) -> f64 {
        Self::BASE_WORLD_EXTENT / 2f64.powf(self.zoom)
    }

    /// Konvertiert Screen-Koordinaten (Ursprung oben links) zu Lon/Lat.
    pub fn screen_to_world(&self, screen_pos: Vec2, screen_size: Vec2) -> DVec2 {
        let size = screen_size.max(Vec2::ONE).as_dvec2();
        let ndc = (screen_pos.as_dvec2() / size) * 2.0 - DVec2::ONE;
        let aspect = size.x / size.y;
        let half = self.half_extent();
        // Screen-Y wächst nach unten, Breitengrad nach oben
        DVec2::new(
            self.position.x + ndc.x * half * aspect,
            self.position.y - ndc.y * half,
        )
    }

    /// Konvertiert Lon/Lat zu Screen-Koordinaten.
    pub fn world_to_screen(&self, world: DVec2, screen_size: Vec2) -> Vec2 {
        let size = screen_size.max(Vec2::ONE).as_dvec2();
        let aspect = size.x / size.y;
        let half = self.half_extent();
        let ndc = DVec2::new(
            (world.x - self.position.x) / (half * aspect),
            -(world.y - self.position.y) / half,
        );
        ((ndc + DVec2::ONE) * 0.5 * size).as_vec2()
    }

    /// Umrechnungsfaktor von Screen-Pixeln zu Grad.
    pub fn world_per_pixel(&self, viewport_height: f32) -> f64 {
        2.0 * self.half_extent() / f64::from(viewport_height.max(1.0))
    }

    /// Rahmt `bounds` mit `padding` Pixeln Abstand zu jedem Rand ein.
    ///
    /// Degenerierte Boxen (Punkt) landen auf maximalem Zoom.
    pub fn fit_bounds(&mut self, bounds: &BoundingBox, screen_size: Vec2, padding: f32) {
        let size = screen_size.max(Vec2::ONE);
        let available = (size - Vec2::splat(2.0 * padding)).max(Vec2::ONE).as_dvec2();
        let (cx, cy) = bounds.center();
        self.position = DVec2::new(cx, cy);

        let needed_wpp = (bounds.width() / available.x).max(bounds.height() / available.y);
        if needed_wpp <= 0.0 || !needed_wpp.is_finite() {
            self.zoom = Self::ZOOM_MAX;
            return;
        }
        let half = needed_wpp * f64::from(size.y) / 2.0;
        self.zoom = (Self::BASE_WORLD_EXTENT / half)
            .log2()
            .clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(DVec2::ZERO, Self::ZOOM_MIN)
    }
}
