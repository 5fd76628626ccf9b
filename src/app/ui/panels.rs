use std::time::Instant;

use eframe::egui::{self, Align, Context, Layout};

use doi_explorer::layout::LayoutPhase;

use super::super::ExplorerApp;

impl ExplorerApp {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("doi-explorer");
                    ui.separator();
                    ui.label(format!("nodes: {}", self.session.nodes().len()));
                    ui.label(format!("links: {}", self.session.links().len()));
                    ui.label(format!("archetypes: {}", self.session.archetypes().len()));

                    let play_label = if self.timer.is_running() { "Pause" } else { "Play" };
                    if ui.button(play_label).clicked() {
                        self.timer.toggle(Instant::now());
                    }
                    if ui
                        .add_enabled(!self.timer.is_running(), egui::Button::new("Step"))
                        .clicked()
                    {
                        self.session.step();
                    }
                    if ui.button("Reset view").clicked() {
                        self.reset_view();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.layout_status_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.nodes().is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("The dataset has no vertices.");
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }

    fn layout_status_text(&self) -> String {
        let layout = self.session.layout();
        let phase = match layout.phase() {
            LayoutPhase::Uninitialized => "uninitialized",
            LayoutPhase::Initialized => "initialized",
            LayoutPhase::Running => "running",
            LayoutPhase::Settled => "settled",
        };
        format!(
            "{phase}  |  step {}  |  T {:.2}  |  k {:.1}",
            layout.steps_taken(),
            layout.temperature(),
            layout.k()
        )
    }
}
