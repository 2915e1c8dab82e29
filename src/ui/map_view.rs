//! Kartenansicht: zeichnet die [`SceneSurface`] und leitet Maus/Tastatur an sie weiter.
//!
//! Pan, Zoom, Klicks und das Draw-Tool sind Sache der Surface; die daraus
//! entstehenden Ereignisse holt der Host per `drain_events` ab.

use glam::{DVec2, Vec2};

use crate::surface::{Paint, SceneSurface, VisualLayerKind};

/// Zoomstufen pro Scroll-Pixel.
const SCROLL_ZOOM_PER_PX: f64 = 1.0 / 120.0;
/// Abstand der Längen-/Breitengrad-Linien in Grad.
const GRATICULE_STEP_DEG: f64 = 10.0;
/// Maximale Breite der Maßstabsleiste in Pixeln.
const SCALE_BAR_MAX_WIDTH_PX: f64 = 120.0;
/// Meter pro Längengrad am Äquator.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Input-Zustand der Kartenansicht
#[derive(Debug, Default)]
pub struct MapViewState {
    /// Polygon-Zeichenmodus aktiv
    pub draw_mode: bool,
}

impl MapViewState {
    /// Das Draw-Tool startet im Polygon-Modus.
    pub fn new() -> Self {
        Self { draw_mode: true }
    }
}

/// Rendert die Karte in den zentralen Bereich und liefert deren Bildschirm-Rechteck.
pub fn render_map_view(
    ctx: &egui::Context,
    surface: &mut SceneSurface,
    view: &mut MapViewState,
) -> egui::Rect {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            surface.set_viewport_size(Vec2::new(rect.width(), rect.height()));

            handle_input(ui, &response, rect, surface, view);

            let painter = ui.painter_at(rect);
            paint_background(&painter, rect, surface);
            paint_layers(&painter, rect, surface);
            paint_draw_tool(&painter, rect, surface);
            paint_scale_bar(&painter, rect, surface);

            render_map_toolbar(ui, rect, surface, view);
            rect
        })
        .inner
}

fn to_local(pos: egui::Pos2, rect: egui::Rect) -> Vec2 {
    Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y)
}

fn to_screen(surface: &SceneSurface, rect: egui::Rect, world: [f64; 2]) -> egui::Pos2 {
    let local = surface
        .camera()
        .world_to_screen(DVec2::from(world), surface.viewport_size());
    egui::pos2(rect.min.x + local.x, rect.min.y + local.y)
}

fn handle_input(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: egui::Rect,
    surface: &mut SceneSurface,
    view: &mut MapViewState,
) {
    let size = surface.viewport_size();

    if response.dragged_by(egui::PointerButton::Primary)
        || response.dragged_by(egui::PointerButton::Middle)
    {
        let delta = response.drag_delta();
        let wpp = surface.camera().world_per_pixel(size.y);
        surface
            .camera_mut()
            .pan(DVec2::new(-f64::from(delta.x) * wpp, f64::from(delta.y) * wpp));
    }

    let scroll = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll != 0.0 {
        if let Some(pos) = response.hover_pos() {
            surface.camera_mut().zoom_at(
                to_local(pos, rect),
                size,
                f64::from(scroll) * SCROLL_ZOOM_PER_PX,
            );
        }
    }

    if let Some(pos) = response.hover_pos() {
        let world = surface.camera().screen_to_world(to_local(pos, rect), size);
        if !view.draw_mode && surface.hovers_feature([world.x, world.y]) {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let world = surface.camera().screen_to_world(to_local(pos, rect), size);
            if view.draw_mode && surface.is_loaded() {
                surface.add_draw_vertex([world.x, world.y]);
            } else {
                surface.click([world.x, world.y]);
            }
        }
    }
    if response.double_clicked() && view.draw_mode {
        surface.finish_drawing();
    }

    let (enter, escape, delete) = ui.input(|i| {
        (
            i.key_pressed(egui::Key::Enter),
            i.key_pressed(egui::Key::Escape),
            i.key_pressed(egui::Key::Delete),
        )
    });
    if enter {
        surface.finish_drawing();
    }
    if escape {
        surface.cancel_drawing();
    }
    if delete {
        surface.delete_drawn();
    }
}

fn basemap_color(surface: &SceneSurface) -> egui::Color32 {
    match surface.basemap().map(|b| b.label.as_str()) {
        Some("Satellite") => egui::Color32::from_rgb(38, 52, 40),
        Some("Light") => egui::Color32::from_rgb(245, 245, 242),
        Some("Dark") => egui::Color32::from_rgb(34, 36, 40),
        _ => egui::Color32::from_rgb(232, 228, 218),
    }
}

fn paint_background(painter: &egui::Painter, rect: egui::Rect, surface: &SceneSurface) {
    let background = basemap_color(surface);
    painter.rect_filled(rect, 0.0, background);

    let grid_color = if background.r() > 128 {
        egui::Color32::from_black_alpha(25)
    } else {
        egui::Color32::from_white_alpha(25)
    };
    let stroke = egui::Stroke::new(1.0, grid_color);
    let camera = surface.camera();
    let size = surface.viewport_size();
    let top_left = camera.screen_to_world(Vec2::ZERO, size);
    let bottom_right = camera.screen_to_world(size, size);

    let mut lon = (top_left.x / GRATICULE_STEP_DEG).floor() * GRATICULE_STEP_DEG;
    while lon <= bottom_right.x {
        let x = to_screen(surface, rect, [lon, 0.0]).x;
        painter.line_segment([egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)], stroke);
        lon += GRATICULE_STEP_DEG;
    }
    let mut lat = (bottom_right.y / GRATICULE_STEP_DEG).floor() * GRATICULE_STEP_DEG;
    while lat <= top_left.y {
        let y = to_screen(surface, rect, [0.0, lat]).y;
        painter.line_segment([egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)], stroke);
        lat += GRATICULE_STEP_DEG;
    }
}

fn paint_layers(painter: &egui::Painter, rect: egui::Rect, surface: &SceneSurface) {
    for layer in surface.visual_layers().iter().filter(|l| l.visible) {
        let Some(collection) = surface.dataset(&layer.source) else {
            continue;
        };
        let accepted = surface.prepared(&layer.source).iter().filter(|prepared| {
            collection
                .features
                .get(prepared.index)
                .is_some_and(|feature| layer.filter.accepts(feature))
        });

        match (&layer.paint, layer.kind()) {
            (Paint::Fill { color, opacity }, VisualLayerKind::Fill) => {
                let fill = egui::Color32::from_rgba_unmultiplied(
                    color[0],
                    color[1],
                    color[2],
                    (opacity.clamp(0.0, 1.0) * 255.0) as u8,
                );
                let mut mesh = egui::Mesh::default();
                for prepared in accepted {
                    for triangle in &prepared.triangles {
                        let base = mesh.vertices.len() as u32;
                        for corner in triangle {
                            mesh.colored_vertex(to_screen(surface, rect, *corner), fill);
                        }
                        mesh.add_triangle(base, base + 1, base + 2);
                    }
                }
                painter.add(egui::Shape::mesh(mesh));
            }
            (Paint::Line { color, width }, _) => {
                let stroke = egui::Stroke::new(*width, egui::Color32::from_rgb(color[0], color[1], color[2]));
                for prepared in accepted {
                    for ring in &prepared.outlines {
                        let points = ring.iter().map(|p| to_screen(surface, rect, *p)).collect();
                        painter.add(egui::Shape::line(points, stroke));
                    }
                }
            }
            _ => {}
        }
    }
}

fn paint_draw_tool(painter: &egui::Painter, rect: egui::Rect, surface: &SceneSurface) {
    let draw_color = egui::Color32::from_rgb(255, 120, 0);
    let stroke = egui::Stroke::new(2.0, draw_color);

    if let Some(ring) = surface
        .drawn_polygon()
        .and_then(|f| f.geometry.as_ref())
        .and_then(|g| g.coordinates.get(0))
        .and_then(|r| r.as_array())
    {
        let points: Vec<egui::Pos2> = ring
            .iter()
            .filter_map(|p| Some([p.get(0)?.as_f64()?, p.get(1)?.as_f64()?]))
            .map(|p| to_screen(surface, rect, p))
            .collect();
        painter.add(egui::Shape::line(points, stroke));
    }

    let draft: Vec<egui::Pos2> = surface
        .draw_vertices()
        .iter()
        .map(|p| to_screen(surface, rect, *p))
        .collect();
    for point in &draft {
        painter.circle_filled(*point, 4.0, draw_color);
    }
    if draft.len() >= 2 {
        painter.add(egui::Shape::dashed_line(&draft, stroke, 6.0, 4.0));
    }
}

/// Metrische Maßstabsleiste: runde Distanz und ihre Breite in Pixeln.
///
/// `None` bei nicht darstellbarem Maßstab (z.B. Viewport ohne Höhe).
fn scale_bar(meters_per_px: f64, max_width_px: f64) -> Option<(f64, f64)> {
    if !meters_per_px.is_finite() || meters_per_px <= 0.0 {
        return None;
    }
    let max_meters = meters_per_px * max_width_px;
    let magnitude = 10f64.powf(max_meters.log10().floor());
    let nice = [5.0, 2.0, 1.0]
        .into_iter()
        .map(|step| step * magnitude)
        .find(|candidate| *candidate <= max_meters)?;
    Some((nice, nice / meters_per_px))
}

fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{} km", meters / 1000.0)
    } else {
        format!("{} m", meters)
    }
}

fn paint_scale_bar(painter: &egui::Painter, rect: egui::Rect, surface: &SceneSurface) {
    let camera = surface.camera();
    let degrees_per_px = camera.world_per_pixel(surface.viewport_size().y);
    let meters_per_px = degrees_per_px * METERS_PER_DEGREE * camera.position.y.to_radians().cos();
    let Some((meters, width)) = scale_bar(meters_per_px, SCALE_BAR_MAX_WIDTH_PX) else {
        return;
    };

    let color = egui::Color32::from_gray(60);
    let stroke = egui::Stroke::new(1.5, color);
    let left = rect.left_bottom() + egui::vec2(10.0, -12.0);
    let right = left + egui::vec2(width as f32, 0.0);
    painter.line_segment([left, right], stroke);
    painter.line_segment([left, left - egui::vec2(0.0, 6.0)], stroke);
    painter.line_segment([right, right - egui::vec2(0.0, 6.0)], stroke);
    painter.text(
        left + egui::vec2(2.0, -4.0),
        egui::Align2::LEFT_BOTTOM,
        format_distance(meters),
        egui::FontId::proportional(11.0),
        color,
    );
}

fn render_map_toolbar(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    surface: &mut SceneSurface,
    view: &mut MapViewState,
) {
    let area = egui::Rect::from_min_size(rect.right_top() + egui::vec2(-160.0, 8.0), egui::vec2(152.0, 32.0));
    ui.scope_builder(egui::UiBuilder::new().max_rect(area), |ui| {
        ui.horizontal(|ui| {
            if ui
                .add(egui::Button::new("⬠").selected(view.draw_mode))
                .on_hover_text("Polygon zeichnen (Klick: Eckpunkt, Enter/Doppelklick: fertig)")
                .clicked()
            {
                view.draw_mode = !view.draw_mode;
                surface.cancel_drawing();
            }
            if ui
                .add_enabled(surface.drawn_polygon().is_some(), egui::Button::new("🗑"))
                .on_hover_text("Gezeichnetes Polygon löschen")
                .clicked()
            {
                surface.delete_drawn();
            }
            let controls: Vec<_> = surface
                .controls()
                .into_iter()
                .map(|(handle, spec)| (handle, spec.label.clone(), spec.tooltip.clone()))
                .collect();
            for (handle, label, tooltip) in controls {
                if ui.button(label).on_hover_text(tooltip).clicked() {
                    surface.activate_control(handle);
                }
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scale_bar_picks_round_distance_within_max_width() {
        // 120 px * 10 m = 1200 m -> 1 km bei 100 px
        let (meters, width) = scale_bar(10.0, 120.0).expect("Maßstab");
        assert_relative_eq!(meters, 1000.0);
        assert_relative_eq!(width, 100.0);

        // 120 px * 50 m = 6000 m -> 5 km
        let (meters, width) = scale_bar(50.0, 120.0).expect("Maßstab");
        assert_relative_eq!(meters, 5000.0);
        assert!(width <= 120.0);
    }

    #[test]
    fn scale_bar_rejects_unusable_resolution() {
        assert!(scale_bar(0.0, 120.0).is_none());
        assert!(scale_bar(f64::NAN, 120.0).is_none());
    }

    #[test]
    fn distances_switch_to_kilometers() {
        assert_eq!(format_distance(500.0), "500 m");
        assert_eq!(format_distance(2000.0), "2 km");
    }
}
