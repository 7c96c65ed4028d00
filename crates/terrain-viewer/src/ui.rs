//! Place search panel.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};
use terrain::TileIndex;

/// Plugin for the search panel.
pub struct SearchUiPlugin;

impl Plugin for SearchUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SearchState>()
            .add_systems(EguiPrimaryContextPass, search_panel);
    }
}

/// Where the current search stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Searching(String),
    Loaded {
        place: String,
        tile: TileIndex,
        elevation_range: Option<(f32, f32)>,
        /// Set when the overlay fell back to a flat colour.
        degraded: Option<String>,
    },
    Failed(String),
}

/// Search box contents and the search queued for the loader.
#[derive(Resource, Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub pending: Option<String>,
    pub status: SearchStatus,
}

impl SearchState {
    /// State with an optional search queued from the start.
    pub fn with_pending(place: Option<String>) -> Self {
        Self {
            query: place.clone().unwrap_or_default(),
            pending: place,
            status: SearchStatus::Idle,
        }
    }

    /// Queue the current query. Blank queries are ignored.
    pub fn submit(&mut self) -> bool {
        let place = self.query.trim();
        if place.is_empty() || matches!(self.status, SearchStatus::Searching(_)) {
            return false;
        }
        self.pending = Some(place.to_string());
        true
    }

    fn status_line(&self) -> String {
        match &self.status {
            SearchStatus::Idle => "Enter a place name".to_string(),
            SearchStatus::Searching(place) => format!("Loading {place}..."),
            SearchStatus::Loaded {
                place,
                tile,
                elevation_range,
                ..
            } => match elevation_range {
                Some((lo, hi)) => format!("{place}\ntile {tile}, {lo:.0} m to {hi:.0} m"),
                None => format!("{place}\ntile {tile}"),
            },
            SearchStatus::Failed(message) => format!("Error: {message}"),
        }
    }
}

fn search_panel(mut contexts: EguiContexts, mut search: ResMut<SearchState>) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Search")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            let mut submitted = false;
            ui.horizontal(|ui| {
                let response = ui.text_edit_singleline(&mut search.query);
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
                let busy = matches!(search.status, SearchStatus::Searching(_));
                if ui.add_enabled(!busy, egui::Button::new("Search")).clicked() {
                    submitted = true;
                }
            });
            if submitted {
                search.submit();
            }

            ui.label(search.status_line());
            if let SearchStatus::Loaded {
                degraded: Some(reason),
                ..
            } = &search.status
            {
                ui.colored_label(
                    egui::Color32::YELLOW,
                    format!("Satellite image unavailable: {reason}"),
                );
            }
        });

    Ok(())
}
