use egui::RichText;
use egui_extras::{Column, TableBuilder};
use serde::{Deserialize, Serialize};

use crate::app::SESSION;
use crate::panes::{base_selector, format_word, PaneDisplay};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegistersPane {
    display_base: u32,
}

impl Default for RegistersPane {
    fn default() -> Self {
        // Decimal matches what the simulator writes in its JSON.
        Self { display_base: 10 }
    }
}

impl PaneDisplay for RegistersPane {
    fn render(&mut self, ui: &mut egui::Ui) {
        let session = SESSION.lock().unwrap();
        let registers = *session.registers();
        drop(session);

        ui.horizontal(|ui| {
            base_selector(ui, &mut self.display_base);
        });
        ui.separator();

        let text_height = egui::TextStyle::Monospace.resolve(ui.style()).size * 1.5;
        let named = [
            ("pc", registers.pc),
            ("hi", registers.hi),
            ("lo", registers.lo),
        ];

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(40.0))
            .column(Column::remainder().at_least(80.0))
            .min_scrolled_height(0.0)
            .body(|body| {
                body.rows(text_height, 32 + named.len(), |mut row| {
                    let index = row.index();
                    let (name, value) = if index < 32 {
                        (format!("${index}"), registers.gpr[index])
                    } else {
                        let (name, value) = named[index - 32];
                        (name.to_string(), value)
                    };

                    row.col(|ui| {
                        ui.label(RichText::new(name).monospace().strong());
                    });
                    row.col(|ui| {
                        ui.label(RichText::new(format_word(value, self.display_base)).monospace());
                    });
                });
            });
    }

    fn title(&self) -> String {
        "Registers".to_string()
    }
}
