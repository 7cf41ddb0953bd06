use egui::RichText;
use egui_extras::{Column, TableBuilder};
use serde::{Deserialize, Serialize};

use crate::app::SESSION;
use crate::panes::{base_selector, format_word, PaneDisplay};
use crate::trace::word_hex;

/// Data-segment table: one row per address the trace has touched, in the
/// order the simulator first reported them. Rows currently holding zero
/// are hidden.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MemoryPane {
    display_base: u32,
}

impl Default for MemoryPane {
    fn default() -> Self {
        Self { display_base: 10 }
    }
}

impl PaneDisplay for MemoryPane {
    fn render(&mut self, ui: &mut egui::Ui) {
        let session = SESSION.lock().unwrap();
        let rows: Vec<(u32, u32)> = session.data().filter(|&(_, word)| word != 0).collect();
        drop(session);

        ui.horizontal(|ui| {
            base_selector(ui, &mut self.display_base);
            ui.label(format!("{} locations", rows.len()));
        });
        ui.separator();

        if rows.is_empty() {
            ui.label(
                RichText::new("No data memory written yet")
                    .italics()
                    .color(egui::Color32::GRAY),
            );
            return;
        }

        let text_height = egui::TextStyle::Monospace.resolve(ui.style()).size * 1.5;

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(100.0))
            .column(Column::remainder().at_least(80.0))
            .min_scrolled_height(0.0)
            .header(text_height, |mut header| {
                header.col(|ui| {
                    ui.label(RichText::new("Address").strong());
                });
                header.col(|ui| {
                    ui.label(RichText::new("Value").strong());
                });
            })
            .body(|body| {
                body.rows(text_height, rows.len(), |mut row| {
                    let (address, word) = rows[row.index()];
                    row.col(|ui| {
                        ui.label(RichText::new(word_hex(address)).monospace());
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(format_word(word, self.display_base)).monospace());
                    });
                });
            });
    }

    fn title(&self) -> String {
        "Memory".to_string()
    }
}
