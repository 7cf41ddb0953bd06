use egui::RichText;
use serde::{Deserialize, Serialize};

use crate::app::SESSION;
use crate::panes::PaneDisplay;

/// Program output accumulated over the steps seen so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputPane;

impl PaneDisplay for OutputPane {
    fn render(&mut self, ui: &mut egui::Ui) {
        let session = SESSION.lock().unwrap();
        let transcript = session.transcript().to_string();
        drop(session);

        ui.label(RichText::new("Program Output:").strong());

        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if transcript.is_empty() {
                    ui.label(
                        RichText::new("No output yet")
                            .italics()
                            .color(egui::Color32::GRAY),
                    );
                } else {
                    // TextEdit wants a mutable reference even when
                    // read-only, so hand it a local copy.
                    let mut text = transcript;
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .desired_width(f32::INFINITY)
                            .font(egui::TextStyle::Monospace)
                            .interactive(false),
                    );
                }
            });
    }

    fn title(&self) -> String {
        "Output".to_string()
    }
}
