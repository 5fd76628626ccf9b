use eframe::egui::{self, RichText, Ui};

use doi_explorer::dataset::format_date;
use doi_explorer::layout::NodeRole;

use super::super::ExplorerApp;

impl ExplorerApp {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Focus");
        ui.add_space(6.0);

        let Some(focus_id) = self.session.focus().map(str::to_owned) else {
            ui.label("Click a node or a search result to focus it.");
            return;
        };
        let Some(node) = self.session.layout().node(&focus_id).cloned() else {
            ui.label("The focused node is no longer in the graph.");
            return;
        };

        ui.label(RichText::new(&node.name).strong());
        ui.small(format!("id {}", node.id));
        if let Some(archetype) = self.session.archetype_name(node.group) {
            ui.label(format!("Archetype: {archetype}"));
        }
        if let Some(span) = node.timespan {
            if span.begin == span.end {
                ui.label(format!("Date: {}", format_date(span.begin)));
            } else {
                ui.label(format!(
                    "Dates: {} to {}",
                    format_date(span.begin),
                    format_date(span.end)
                ));
            }
        }
        ui.label(format!("Degree: {}", node.degree));
        let role = match self.session.layout().role(&node.id) {
            Some(NodeRole::Root) => "root",
            Some(NodeRole::IsolatedRoot) => "isolated root",
            Some(NodeRole::Member) | None => "member",
        };
        ui.label(format!("Layout role: {role}"));
        if node.is_pinned() {
            ui.label("Pinned");
        }
        if let Some(description) = &node.description {
            ui.add_space(4.0);
            ui.label(description.as_str());
        }

        ui.separator();
        ui.label(RichText::new("Degree of interest").strong());
        ui.label(format!("DOI: {:.3}", node.doi));
        if let Some(components) = self.session.components(&node.id) {
            ui.label(format!("A (importance): {:.3}", components.apriori));
            ui.label(format!("U (filters): {:.3}", components.user));
            ui.label(format!("J (focus proximity): {:.3}", components.joint));
        }

        ui.separator();
        ui.label(RichText::new("Neighbours").strong());
        let mut neighbours: Vec<(String, String)> = self
            .session
            .neighbors()
            .neighbors(&node.id)
            .into_iter()
            .flatten()
            .filter_map(|id| {
                let neighbour = self.session.layout().node(id)?;
                Some((neighbour.id.clone(), neighbour.name.clone()))
            })
            .collect();
        neighbours.sort_by(|a, b| a.1.cmp(&b.1));

        if neighbours.is_empty() {
            ui.label("No direct neighbours.");
        }
        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("focus_neighbours")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for (id, name) in &neighbours {
                    if ui.link(name.as_str()).clicked() {
                        clicked = Some(id.clone());
                    }
                }
            });
        if let Some(id) = clicked {
            self.focus_node(&id);
        }

        ui.add_space(6.0);
        if ui.button("Clear focus").clicked() {
            self.session.set_focus(None);
        }
    }
}
