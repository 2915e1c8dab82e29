//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};
use crate::surface::RenderSurface;

/// Orchestriert UI-/Surface-Events und Use-Cases auf den AppState.
///
/// Die Surface wird pro Aufruf übergeben; State und Surface gehören dem Host.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut AppState,
        surface: &mut dyn RenderSurface,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, surface, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        surface: &mut dyn RenderSurface,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Sitzung ===
            AppCommand::MountView => handlers::session::mount(state, surface),
            AppCommand::MarkSurfaceLoaded => handlers::session::mark_surface_loaded(state),
            AppCommand::UnmountView => handlers::session::unmount(state, surface),
            AppCommand::RequestExit => handlers::session::request_exit(state),

            // === Layer & Datasets ===
            AppCommand::RequestDatasetFetches => handlers::layers::request_fetches(state),
            AppCommand::StoreDataset {
                layer_id,
                collection,
            } => handlers::layers::store(state, &layer_id, collection)?,
            AppCommand::MarkDatasetAbsent { layer_id, reason } => {
                handlers::layers::mark_absent(state, &layer_id, &reason)?
            }
            AppCommand::RenderDataset { layer_id } => {
                handlers::layers::render(state, surface, &layer_id)?
            }
            AppCommand::FrameInitialBounds { layer_id } => {
                handlers::layers::frame_initial(state, surface, &layer_id)
            }
            AppCommand::SetActiveLayer { layer_id } => {
                handlers::layers::set_active(state, surface, &layer_id)?
            }

            // === Zeichnen & Abfrage ===
            AppCommand::RunSpatialQuery { drawn } => {
                handlers::draw::run_query(state, surface, &drawn)
            }
            AppCommand::ClearHighlight => handlers::draw::clear_highlight(state, surface),

            // === Ansicht ===
            AppCommand::SetBasemap { index } => handlers::view::set_basemap(state, surface, index)?,
            AppCommand::ShowFeaturePopup {
                layer_id,
                feature,
                position,
            } => handlers::view::show_popup(state, layer_id, &feature, position),
            AppCommand::ClosePopup => handlers::view::close_popup(state),
            AppCommand::ActivateControl { handle } => {
                handlers::view::activate_control(state, surface, handle)
            }
        }

        Ok(())
    }
}
