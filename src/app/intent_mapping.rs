//! Mapping von UI-/Surface-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::ViewMountRequested => vec![AppCommand::MountView],
        AppIntent::SurfaceLoaded => vec![
            AppCommand::MarkSurfaceLoaded,
            AppCommand::RequestDatasetFetches,
        ],
        AppIntent::DatasetFetched {
            layer_id,
            collection,
        } => {
            let renderable = !collection.is_empty();
            let mut commands = vec![AppCommand::StoreDataset {
                layer_id: layer_id.clone(),
                collection,
            }];
            if renderable {
                commands.push(AppCommand::RenderDataset {
                    layer_id: layer_id.clone(),
                });
                if state.overlay.is_active(&layer_id) && !state.view.initial_frame_done {
                    commands.push(AppCommand::FrameInitialBounds { layer_id });
                }
            }
            commands
        }
        AppIntent::DatasetFetchFailed { layer_id, reason } => {
            vec![AppCommand::MarkDatasetAbsent { layer_id, reason }]
        }
        AppIntent::LayerSelected { layer_id } => vec![AppCommand::SetActiveLayer { layer_id }],
        AppIntent::BasemapSelected { index } => vec![AppCommand::SetBasemap { index }],
        AppIntent::DrawCreated { drawn } => vec![AppCommand::RunSpatialQuery { drawn }],
        AppIntent::DrawDeleted => vec![AppCommand::ClearHighlight],
        AppIntent::FeatureClicked {
            layer_id,
            feature,
            position,
        } => vec![AppCommand::ShowFeaturePopup {
            layer_id,
            feature,
            position,
        }],
        AppIntent::PopupCloseRequested => vec![AppCommand::ClosePopup],
        AppIntent::ControlActivated { handle } => vec![AppCommand::ActivateControl { handle }],
        AppIntent::ViewTeardownRequested => vec![AppCommand::UnmountView],
        AppIntent::ExitRequested => vec![AppCommand::UnmountView, AppCommand::RequestExit],
    }
}
