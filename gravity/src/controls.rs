//! Control strip below the canvas
//!
//! Buttons only report what was pressed; the app applies the actions
//! after the egui pass so the simulation is never borrowed by the UI.

use egui::{Color32, Context, RichText};
use gravity::config::CONTROLS_HEIGHT;
use gravity::Scene;

/// A user request from the control strip or the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddParticle,
    Clear,
    ToggleArrows,
    ToggleTrace,
    ToggleTrails,
}

const BUTTONS: &[(&str, Action)] = &[
    ("Add a particle", Action::AddParticle),
    ("Clear", Action::Clear),
    ("Toggle Arrows", Action::ToggleArrows),
    ("Toggle Trace", Action::ToggleTrace),
    ("Toggle Trails", Action::ToggleTrails),
];

fn flag(ui: &mut egui::Ui, name: &str, on: bool) {
    let color = if on { Color32::LIGHT_GREEN } else { Color32::GRAY };
    ui.label(RichText::new(name).color(color));
}

/// Draw the strip and collect the actions pressed this frame.
pub fn draw_controls(ctx: &Context, scene: &Scene, actions: &mut Vec<Action>) {
    egui::TopBottomPanel::bottom("controls")
        .resizable(false)
        .exact_height(CONTROLS_HEIGHT as f32)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                for (label, action) in BUTTONS {
                    if ui.button(*label).clicked() {
                        actions.push(*action);
                    }
                }

                ui.separator();
                ui.label(format!("Particles: {}", scene.particles().len()));
                ui.label(format!("Black holes: {}", scene.black_holes().len()));
                ui.separator();
                flag(ui, "arrows", scene.show_arrows);
                flag(ui, "trace", scene.show_trace);
                flag(ui, "trails", scene.show_trails);
            });
        });
}
