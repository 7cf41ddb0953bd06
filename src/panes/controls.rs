use egui::RichText;
use serde::{Deserialize, Serialize};

use crate::app::SESSION;
use crate::panes::PaneDisplay;
use crate::trace::StepOutcome;

/// Step controls. The trace only moves forward; clicking past the last
/// snapshot closes the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ControlsPane;

impl PaneDisplay for ControlsPane {
    fn render(&mut self, ui: &mut egui::Ui) {
        let mut session = SESSION.lock().unwrap();

        ui.label(format!("Step {} of {}", session.step() + 1, session.len()));

        let executed = session.executed_text();
        if !executed.is_empty() {
            ui.horizontal(|ui| {
                ui.label("Executed:");
                ui.label(RichText::new(executed).monospace());
                ui.label(
                    RichText::new(session.executed_hex())
                        .monospace()
                        .color(egui::Color32::GRAY),
                );
            });
        }

        ui.add_space(4.0);

        let label = if session.at_end() {
            "➡ Next Instruction (end of trace)"
        } else {
            "➡ Next Instruction"
        };
        let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 40.0));
        if ui.add(button).clicked() {
            match session.advance() {
                StepOutcome::Advanced => {
                    tracing::info!(step = session.step(), "stepped to next instruction");
                }
                StepOutcome::EndOfTrace => {
                    tracing::info!("end of trace reached, closing viewer");
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn title(&self) -> String {
        "Controls".to_string()
    }
}
