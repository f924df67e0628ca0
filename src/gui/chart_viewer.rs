//! Chart Viewer Widget
//! Central panel with the two chart surfaces stacked vertically. Both charts
//! share the available height, so the layout follows the window size.

use crate::charts::{ChartPlotter, PROGRESS_CHART_TITLE, VOLUME_CHART_TITLE};
use crate::data::ChartSet;
use crate::gui::LoadState;
use egui::{Color32, RichText};

const CHART_SPACING: f32 = 15.0;
/// Card chrome around each plot: title row plus frame margins
const CARD_OVERHEAD: f32 = 60.0;
const MIN_CHART_HEIGHT: f32 = 160.0;

/// Holds the chart set once it has been built. It is set at most once.
#[derive(Default)]
pub struct ChartViewer {
    pub chart_set: Option<ChartSet>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_chart_set(&mut self, chart_set: ChartSet) {
        if self.chart_set.is_none() {
            self.chart_set = Some(chart_set);
        }
    }

    pub fn show(&self, ui: &mut egui::Ui, state: &LoadState) {
        let Some(chart_set) = &self.chart_set else {
            let text = match state {
                LoadState::Unloaded | LoadState::Loading => "Loading...",
                LoadState::Failed(_) => "Charts unavailable",
                LoadState::Loaded => "No Data",
            };
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(text).size(20.0).color(Color32::GRAY));
            });
            return;
        };

        let chart_height = ((ui.available_height() - CHART_SPACING) / 2.0 - CARD_OVERHEAD)
            .max(MIN_CHART_HEIGHT);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_card(ui, PROGRESS_CHART_TITLE, |ui| {
                    ChartPlotter::draw_progress_chart(ui, chart_set, chart_height);
                });
                ui.add_space(CHART_SPACING);
                Self::draw_card(ui, VOLUME_CHART_TITLE, |ui| {
                    ChartPlotter::draw_volume_chart(ui, chart_set, chart_height);
                });
            });
    }

    fn draw_card(ui: &mut egui::Ui, title: &str, add_chart: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).size(18.0).strong());
                ui.add_space(8.0);
                add_chart(ui);
            });
    }
}
