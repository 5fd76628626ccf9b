use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use doi_explorer::dataset::format_date;
use doi_explorer::util::{initials, truncate_label};
use doi_explorer::visual::{degree_bounds, doi_fill, draw_order, node_radius};

use super::super::render_utils::{
    circle_visible, draw_background, rgb, with_opacity, world_to_screen,
};
use super::super::{ExplorerApp, HoverTarget};

/// World radii run 30..50; on screen they are drawn at this fraction.
const NODE_SCALE: f32 = 0.4;

impl ExplorerApp {
    fn update_screen_space(&mut self, rect: egui::Rect) {
        let layout = self.session.layout();
        let center = layout.center();
        let (min_degree, max_degree) = degree_bounds(layout.nodes());
        let radius_zoom = self.zoom.powf(0.6);

        let scratch = &mut self.view_scratch;
        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        for node in layout.nodes() {
            scratch
                .screen_positions
                .push(world_to_screen(rect, self.pan, self.zoom, center, node.position));
            scratch.screen_radii.push(
                (node_radius(node.degree, min_degree, max_degree) * NODE_SCALE * radius_zoom)
                    .clamp(3.0, 40.0),
            );
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        self.update_screen_space(rect);

        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hovered = if self.dragging.is_some() {
            self.hovered
        } else {
            self.hover_target(pointer.filter(|pos| rect.contains(*pos)))
        };
        self.apply_hover(hovered);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        self.handle_node_drag(ui, rect, &response);
        self.handle_graph_click(&response);
        // Pins and focus may have moved nodes or changed highlight this frame.
        self.update_screen_space(rect);

        let positions = &self.view_scratch.screen_positions;
        let radii = &self.view_scratch.screen_radii;
        let layout = self.session.layout();
        let highlight = self.session.highlight();
        let zoom_sqrt = self.zoom.sqrt();

        for (index, link) in self.session.links().iter().enumerate() {
            let (Some(source), Some(target)) =
                (layout.index_of(&link.source), layout.index_of(&link.target))
            else {
                continue;
            };
            if source == target {
                continue;
            }

            let opacity = highlight.link_opacity(&link.source, &link.target);
            let is_hovered = self.hovered == Some(HoverTarget::Link(index));
            let width = (link.weight.max(0.0).sqrt() * zoom_sqrt).clamp(0.6, 6.0)
                + if is_hovered { 1.2 } else { 0.0 };
            let color = with_opacity(Color32::from_rgb(153, 153, 153), opacity);
            painter.line_segment([positions[source], positions[target]], Stroke::new(width, color));

            if is_hovered && let Some(label) = &link.label {
                let mid = positions[source] + (positions[target] - positions[source]) * 0.5;
                let galley = painter.layout_no_wrap(
                    label.clone(),
                    FontId::proportional(12.0),
                    Color32::from_gray(30),
                );
                let label_rect =
                    egui::Rect::from_center_size(mid, galley.size() + vec2(8.0, 4.0));
                painter.rect_filled(label_rect, 2.0, Color32::WHITE);
                painter.galley(label_rect.min + vec2(4.0, 2.0), galley, Color32::from_gray(30));
            }
        }

        let focus = self.session.focus();
        for index in draw_order(layout.nodes()) {
            let node = &layout.nodes()[index];
            let position = positions[index];
            let radius = radii[index];
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let opacity = highlight.node_opacity(&node.id);
            let fill = with_opacity(rgb(doi_fill(node.group, node.doi)), opacity);
            painter.circle_filled(position, radius, fill);

            let is_focus = focus == Some(node.id.as_str());
            let is_hovered = self.hovered == Some(HoverTarget::Node(index));
            let (stroke_width, stroke_color) = if is_focus {
                (2.6, Color32::from_rgb(20, 20, 20))
            } else if is_hovered {
                (1.8, Color32::from_rgb(60, 60, 60))
            } else if node.is_pinned() {
                (1.6, Color32::from_rgb(200, 80, 40))
            } else {
                (1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 200))
            };
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(stroke_width, with_opacity(stroke_color, opacity)),
            );

            if radius >= 9.0 {
                painter.text(
                    position,
                    Align2::CENTER_CENTER,
                    initials(&node.name),
                    FontId::proportional((radius * 0.6).clamp(8.0, 15.0)),
                    with_opacity(Color32::WHITE, opacity),
                );
            }
            if is_hovered || is_focus || self.zoom > 1.6 {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    truncate_label(&node.name, 40),
                    FontId::proportional(12.0),
                    with_opacity(Color32::from_gray(25), opacity),
                );
            }
        }

        if let Some(HoverTarget::Node(index)) = self.hovered
            && let Some(node) = layout.nodes().get(index)
        {
            let mut panel_text =
                format!("{}  |  doi {:.2}  |  degree {}", node.name, node.doi, node.degree);
            if let Some(archetype) = self.session.archetype_name(node.group) {
                panel_text.push_str(&format!("  |  {archetype}"));
            }
            if let Some(span) = node.timespan {
                panel_text.push_str(&format!(
                    "  |  {} to {}",
                    format_date(span.begin),
                    format_date(span.end)
                ));
            }
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(20),
            );
        }
    }
}
