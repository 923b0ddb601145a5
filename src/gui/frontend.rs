//! eframe frontend: widget panel plus immediate-mode canvas renderer.
//!
//! Pure presentation. Raw pointer events are normalized and handed to
//! the [`Sketchpad`]; this module never mutates the graph directly.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::interact::state::{Mode, PointerButton, Sketchpad};
use crate::sketch::graph::Palette;

const NODE_RADIUS: f32 = 12.0;
const EDGE_WIDTH: f32 = 2.0;

fn palette_color(p: Palette) -> Color32 {
    match p {
        Palette::SkyBlue => Color32::from_rgb(135, 206, 235),
        Palette::Yellow => Color32::from_rgb(240, 200, 60),
        Palette::Green => Color32::from_rgb(60, 170, 90),
        Palette::Purple => Color32::from_rgb(150, 110, 220),
        Palette::Orange => Color32::from_rgb(240, 150, 50),
        Palette::Black => Color32::from_rgb(30, 30, 30),
        Palette::Red => Color32::from_rgb(220, 60, 50),
    }
}

pub struct SketchApp {
    pad: Sketchpad,
    label_input: String,
    last_canvas_rect: Option<Rect>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchApp {
    pub fn new() -> Self {
        SketchApp {
            pad: Sketchpad::new(),
            label_input: String::new(),
            last_canvas_rect: None,
        }
    }

    fn canvas_rect(&self) -> Rect {
        self.last_canvas_rect
            .unwrap_or_else(|| Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)))
    }

    fn mode_button(&mut self, ui: &mut egui::Ui, label: &str, mode: Mode, active_fill: Color32) {
        let active = self.pad.mode() == mode;
        let fill = if active {
            active_fill
        } else {
            ui.visuals().widgets.inactive.weak_bg_fill
        };
        if ui.add(egui::Button::new(label).fill(fill)).clicked() {
            self.pad.toggle_mode(mode);
        }
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        let facts = self.pad.facts().clone();
        ui.heading("Graph");
        ui.label(format!(
            "Node Count: {}    Edge Count: {}",
            facts.node_count, facts.edge_count
        ));
        ui.label(format!(
            "Is Connected: {}    Component Count: {}",
            facts.connectivity, facts.component_count
        ));
        ui.label(format!(
            "Is Planar: {}    Is Bipartite: {}",
            facts.planar, facts.bipartite
        ));
        ui.label(format!(
            "Minimal Coloring: {} (can show up to 5)",
            facts.required_colors
        ));
        ui.separator();

        ui.heading("Node");
        match self
            .pad
            .gesture()
            .inspected
            .and_then(|id| self.pad.graph.get_node(id).cloned())
        {
            Some(node) => {
                ui.label(format!("Node: {}", node.id));
                ui.label(format!("Label: {}", node.label));
                ui.label(format!("Degree: {}", self.pad.graph.degree(node.id)));
            }
            None => {
                ui.label("Node: None");
                ui.label("Label: None");
                ui.label("Degree: None");
            }
        }
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Yellow").clicked() {
                self.pad.recolor_inspected(Palette::Yellow);
            }
            if ui.button("Green").clicked() {
                self.pad.recolor_inspected(Palette::Green);
            }
            if ui.button("Blue").clicked() {
                self.pad.recolor_inspected(Palette::SkyBlue);
            }
        });
        ui.add_space(6.0);
        ui.label("New Label:");
        let resp = ui.text_edit_singleline(&mut self.label_input);
        let submitted = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Change Label").clicked() || submitted {
            // invalid text (empty, "None", >10 chars) is silently rejected
            let text = self.label_input.clone();
            self.pad.change_label(&text);
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Show Bridges").clicked() {
                self.pad.show_bridges();
            }
            if ui.button("Add Node").clicked() {
                let area = self.canvas_rect();
                self.pad.add_node(area);
            }
            self.mode_button(ui, "Add Edge", Mode::AddEdge, Color32::from_rgb(144, 238, 144));
            self.mode_button(ui, "Remove", Mode::Remove, Color32::from_rgb(240, 128, 128));
            if ui.button("Clear All").clicked() {
                self.pad.clear();
            }
            ui.separator();
            if ui.button("Check Bipartite").clicked() {
                self.pad.check_bipartite();
            }
            if ui.button("Minimal Coloring").clicked() {
                self.pad.minimal_coloring();
            }
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_rect_before_wrap();
        self.last_canvas_rect = Some(available);
        let _bg = ui.allocate_rect(available, Sense::click_and_drag());
        let painter = ui.painter_at(available);

        // Normalize pointer events and hand them to the state machine
        // before drawing, so the frame reflects this event's outcome.
        let (pressed_primary, pressed_secondary, released, pointer_pos) = ui.input(|i| {
            (
                i.pointer.button_pressed(egui::PointerButton::Primary),
                i.pointer.button_pressed(egui::PointerButton::Secondary),
                i.pointer.any_released(),
                i.pointer.latest_pos(),
            )
        });
        if let Some(pos) = pointer_pos {
            if available.contains(pos) {
                if pressed_primary {
                    self.pad.press(pos, PointerButton::Primary);
                }
                if pressed_secondary {
                    self.pad.press(pos, PointerButton::Secondary);
                }
                self.pad.motion(pos);
            }
        }
        if released {
            self.pad.release();
        }

        // Edges first, curved when parallel copies share a pair
        for edge in self.pad.graph.edges() {
            let (Some(a), Some(b)) = (
                self.pad.layout.get(edge.id.u),
                self.pad.layout.get(edge.id.v),
            ) else {
                continue;
            };
            let stroke = Stroke::new(EDGE_WIDTH, palette_color(edge.color));
            if edge.id.is_self_loop() {
                let r = NODE_RADIUS * (0.9 + 0.4 * edge.id.key as f32);
                painter.circle_stroke(a + Vec2::new(0.0, -NODE_RADIUS - r * 0.7), r, stroke);
                continue;
            }
            let dir = b - a;
            let len = dir.length();
            if self.pad.graph.multiplicity(edge.id.u, edge.id.v) > 1 && len > f32::EPSILON {
                // arc offset grows with the per-pair key so copies fan out
                let normal = Vec2::new(-dir.y / len, dir.x / len);
                let rad = 0.2 + 0.1 * edge.id.key as f32;
                let mid = Pos2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5);
                let ctrl = mid + normal * (len * rad * 0.5);
                painter.line_segment([a, ctrl], stroke);
                painter.line_segment([ctrl, b], stroke);
            } else {
                painter.line_segment([a, b], stroke);
            }
        }

        // Nodes on top, drag highlight in red
        let gesture = self.pad.gesture();
        for node in self.pad.graph.nodes() {
            let Some(pos) = self.pad.layout.get(node.id) else {
                continue;
            };
            let fill = if gesture.dragging == Some(node.id) {
                palette_color(Palette::Red)
            } else {
                palette_color(node.color)
            };
            painter.circle_filled(pos, NODE_RADIUS, fill);
            painter.circle_stroke(pos, NODE_RADIUS, Stroke::new(1.5, Color32::DARK_GRAY));
            if gesture.pending_edge == Some(node.id) {
                painter.circle_stroke(
                    pos,
                    NODE_RADIUS + 3.0,
                    Stroke::new(2.0, Color32::from_rgb(80, 220, 120)),
                );
            }
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                &node.label,
                FontId::proportional(12.0),
                Color32::BLACK,
            );
        }
    }
}

impl eframe::App for SketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("inspector")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| self.side_panel(ui));
        egui::TopBottomPanel::bottom("toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));
    }
}
