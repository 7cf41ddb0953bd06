use egui::{Align, RichText};
use egui_extras::{Column, TableBuilder};
use serde::{Deserialize, Serialize};

use crate::app::SESSION;
use crate::panes::PaneDisplay;
use crate::trace::{word_hex, InstructionRow};

/// Text-segment table: address, machine word, and the disassembled form
/// once a step has revealed it. The row for the most recently executed
/// instruction is tinted green.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisassemblyPane {
    follow_highlight: bool,
}

impl Default for DisassemblyPane {
    fn default() -> Self {
        Self {
            follow_highlight: true,
        }
    }
}

impl PaneDisplay for DisassemblyPane {
    fn render(&mut self, ui: &mut egui::Ui) {
        let session = SESSION.lock().unwrap();
        let rows: Vec<InstructionRow> = session.instructions().cloned().collect();
        let highlight = session.highlight();
        drop(session);

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.follow_highlight, "Follow execution")
                .on_hover_text("Keep the most recently executed instruction in view.");
        });
        ui.separator();

        if rows.is_empty() {
            ui.label(
                RichText::new("No instructions in the trace")
                    .italics()
                    .color(egui::Color32::GRAY),
            );
            return;
        }

        let text_height = egui::TextStyle::Monospace.resolve(ui.style()).size * 1.5;
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::remainder().at_least(180.0))
            .min_scrolled_height(0.0);

        if self.follow_highlight {
            if let Some(index) = rows.iter().position(|row| row.address == highlight) {
                table = table.scroll_to_row(index, Some(Align::Center));
            }
        }

        table
            .header(text_height, |mut header| {
                header.col(|ui| {
                    ui.label(RichText::new("Address").strong());
                });
                header.col(|ui| {
                    ui.label(RichText::new("Machine code").strong());
                });
                header.col(|ui| {
                    ui.label(RichText::new("Assembly").strong());
                });
            })
            .body(|mut body| {
                let item_spacing = body.ui_mut().spacing().item_spacing;

                body.rows(text_height, rows.len(), |mut row| {
                    let inst = &rows[row.index()];
                    let executed = inst.address == highlight;

                    let paint_bg = |ui: &mut egui::Ui| {
                        if executed {
                            let gapless_rect = ui.max_rect().expand2(0.5 * item_spacing);
                            ui.painter().rect_filled(
                                gapless_rect,
                                0.0,
                                egui::Color32::from_rgb(50, 80, 50),
                            );
                        }
                    };

                    row.col(|ui| {
                        paint_bg(ui);
                        let suffix = if executed { " (pc)" } else { "" };
                        ui.label(
                            RichText::new(format!("{}{}", word_hex(inst.address), suffix))
                                .monospace(),
                        );
                    });
                    row.col(|ui| {
                        paint_bg(ui);
                        ui.label(RichText::new(word_hex(inst.word)).monospace());
                    });
                    row.col(|ui| {
                        paint_bg(ui);
                        let text = RichText::new(&inst.assembly).monospace();
                        ui.label(if executed {
                            text.color(egui::Color32::from_rgb(50, 168, 82))
                        } else {
                            text
                        });
                    });
                });
            });
    }

    fn title(&self) -> String {
        "Machine Code".to_string()
    }
}
