use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::render_utils::{distance_to_segment, screen_to_world};
use super::super::{ExplorerApp, HoverTarget};

/// Pointer slack, in screen pixels, for hovering a link.
const LINK_HOVER_DISTANCE: f32 = 4.0;

impl ExplorerApp {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let center = self.session.layout().center();
        let world_before = screen_to_world(rect, self.pan, self.zoom, center, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.center() - ((world_before - center) * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Nodes win over links; the closest candidate wins among each.
    pub(in crate::app) fn hover_target(&self, pointer: Option<Pos2>) -> Option<HoverTarget> {
        let pointer = pointer?;
        let positions = &self.view_scratch.screen_positions;
        let radii = &self.view_scratch.screen_radii;

        let node = (0..positions.len())
            .filter_map(|index| {
                let distance = positions[index].distance(pointer);
                (distance <= radii[index]).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((index, _)) = node {
            return Some(HoverTarget::Node(index));
        }

        let layout = self.session.layout();
        self.session
            .links()
            .iter()
            .enumerate()
            .filter(|(_, link)| link.source != link.target)
            .filter_map(|(index, link)| {
                let start = *positions.get(layout.index_of(&link.source)?)?;
                let end = *positions.get(layout.index_of(&link.target)?)?;
                let distance = distance_to_segment(pointer, start, end);
                (distance <= LINK_HOVER_DISTANCE).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| HoverTarget::Link(index))
    }

    /// Mirrors the hover target into the session highlight, only touching it
    /// when the target changes.
    pub(in crate::app) fn apply_hover(&mut self, hovered: Option<HoverTarget>) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;

        match hovered {
            Some(HoverTarget::Node(index)) => {
                let Some(node) = self.session.nodes().get(index) else {
                    return;
                };
                let id = node.id.clone();
                self.session.highlight_nodes(&[id.as_str()]);
            }
            Some(HoverTarget::Link(index)) => {
                let Some(link) = self.session.links().get(index) else {
                    return;
                };
                let (source, target) = (link.source.clone(), link.target.clone());
                self.session
                    .highlight_nodes(&[source.as_str(), target.as_str()]);
            }
            None => self.session.clear_highlight(),
        }
    }

    /// Primary drag on a node pins it under the pointer; releasing unpins it.
    pub(in crate::app) fn handle_node_drag(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(HoverTarget::Node(index)) = self.hovered
            && let Some(node) = self.session.nodes().get(index)
        {
            self.dragging = Some(node.id.clone());
        }

        if let Some(id) = self.dragging.clone() {
            if response.dragged_by(egui::PointerButton::Primary)
                && let Some(pointer) = ui.input(|input| input.pointer.interact_pos())
            {
                let center = self.session.layout().center();
                let world = screen_to_world(rect, self.pan, self.zoom, center, pointer);
                self.session.pin(&id, world.x, world.y);
                ui.ctx().request_repaint();
            }

            if response.drag_stopped() {
                self.session.unpin(&id);
                self.dragging = None;
            }
        }
    }

    pub(in crate::app) fn handle_graph_click(&mut self, response: &egui::Response) {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return;
        }
        match self.hovered {
            Some(HoverTarget::Node(index)) => {
                if let Some(node) = self.session.nodes().get(index) {
                    let id = node.id.clone();
                    self.session.set_focus(Some(&id));
                }
            }
            Some(HoverTarget::Link(_)) => {}
            None => self.session.set_focus(None),
        }
    }
}
