// src/ui/panel.rs
//! Stage control panel
//!
//! The built-in panel driving the subject drawable: play/pause, rotation
//! speeds, transform sliders, and the hex colour field. Every widget writes
//! through [`Stage::apply_control`] / [`Stage::apply_colour`] so panel input
//! and programmatic control share one validation path.

use std::f32::consts::PI;

use crate::control::{ControlAxis, ControlProperty};
use crate::error::VitrineError;
use crate::pick::PickPolicy;
use crate::stage::Stage;

/// State the panel keeps between frames: the colour text being edited and
/// the last rejected input, shown inline.
pub struct PanelState {
    pub colour_text: String,
    pub last_error: Option<String>,
}

impl PanelState {
    /// Seeds the colour field from the subject's current material.
    pub fn new(stage: &Stage) -> Self {
        let colour_text = stage
            .scene
            .subject()
            .map(|subject| subject.material().colour.to_hex())
            .unwrap_or_default();
        PanelState {
            colour_text,
            last_error: None,
        }
    }
}

/// Control panel for the stage's subject drawable
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `stage` - Mutable stage reference for control writes
/// * `panel` - Panel state carried between frames
pub fn stage_control_panel(ui: &imgui::Ui, stage: &mut Stage, panel: &mut PanelState) {
    let display_size = ui.io().display_size;
    // Guard against invalid display size that could cause crashes
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Stage Controls")
        .size([380.0, 560.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            animation_section(ui, stage, panel);
            ui.separator();
            transform_section(ui, stage, panel);
            ui.separator();
            colour_section(ui, stage, panel);
            cycle_section(ui, stage);

            if let Some(error) = panel.last_error.as_ref() {
                ui.spacing();
                ui.text_colored([1.0, 0.4, 0.4, 1.0], error);
            }
        });
}

fn animation_section(ui: &imgui::Ui, stage: &mut Stage, panel: &mut PanelState) {
    if ui.collapsing_header("Animation", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        ui.checkbox("Play", &mut stage.frame.playing);

        let mut speed_x = stage.frame.speed_x;
        let mut speed_y = stage.frame.speed_y;

        ui.set_next_item_width(-60.0);
        if ui.slider("Speed X", 0.0, 0.1, &mut speed_x) {
            report(
                panel,
                stage.apply_control(ControlProperty::RotationSpeed, ControlAxis::X, speed_x),
            );
        }
        ui.set_next_item_width(-60.0);
        if ui.slider("Speed Y", 0.0, 0.1, &mut speed_y) {
            report(
                panel,
                stage.apply_control(ControlProperty::RotationSpeed, ControlAxis::Y, speed_y),
            );
        }
    }
}

fn transform_section(ui: &imgui::Ui, stage: &mut Stage, panel: &mut PanelState) {
    let (mut position, mut rotation, mut scale): ([f32; 3], [f32; 3], [f32; 3]) =
        match stage.scene.subject() {
            Some(subject) => (
                subject.position.into(),
                subject.rotation.into(),
                subject.scale.into(),
            ),
            None => return,
        };

    if ui.collapsing_header("Position", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        axis_sliders(ui, "pos", &mut position, -10.0, 10.0, |axis, value| {
            report(
                panel,
                stage.apply_control(ControlProperty::Position, axis, value),
            );
        });
    }

    if ui.collapsing_header("Rotation", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        axis_sliders(ui, "rot", &mut rotation, -PI, PI, |axis, value| {
            report(
                panel,
                stage.apply_control(ControlProperty::Rotation, axis, value),
            );
        });
    }

    if ui.collapsing_header("Scale", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        axis_sliders(ui, "scale", &mut scale, 0.1, 5.0, |axis, value| {
            report(
                panel,
                stage.apply_control(ControlProperty::Scale, axis, value),
            );
        });
    }
}

/// Three labelled sliders sharing a range; `on_change` fires per moved axis.
fn axis_sliders(
    ui: &imgui::Ui,
    id: &str,
    values: &mut [f32; 3],
    min: f32,
    max: f32,
    mut on_change: impl FnMut(ControlAxis, f32),
) {
    let axes = [(ControlAxis::X, "X"), (ControlAxis::Y, "Y"), (ControlAxis::Z, "Z")];
    for (i, (axis, label)) in axes.into_iter().enumerate() {
        ui.set_next_item_width(-60.0);
        if ui.slider(format!("{label}##{id}_{i}"), min, max, &mut values[i]) {
            on_change(axis, values[i]);
        }
    }
}

fn colour_section(ui: &imgui::Ui, stage: &mut Stage, panel: &mut PanelState) {
    if ui.collapsing_header("Colour", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        ui.set_next_item_width(-60.0);
        ui.input_text("##colour", &mut panel.colour_text).build();
        ui.same_line();
        if ui.button("Apply") {
            let result = stage.apply_colour(&panel.colour_text);
            report(panel, result);
        }
    }
}

/// Shows where the texture cycle stands; absent for colour-swap stages.
fn cycle_section(ui: &imgui::Ui, stage: &Stage) {
    if let PickPolicy::TextureCycle(cycle) = stage.picker.policy() {
        ui.separator();
        match cycle.cursor() {
            Some(index) => ui.text(format!("Image {} of {}", index + 1, cycle.len())),
            None => ui.text(format!("Image - of {} (click to start)", cycle.len())),
        }
    }
}

fn report(panel: &mut PanelState, result: Result<(), VitrineError>) {
    match result {
        Ok(()) => panel.last_error = None,
        Err(err) => panel.last_error = Some(err.to_string()),
    }
}
