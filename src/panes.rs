pub mod controls;
pub mod disassembly;
pub mod memory;
pub mod output;
pub mod registers;

pub use controls::ControlsPane;
pub use disassembly::DisassemblyPane;
pub use memory::MemoryPane;
pub use output::OutputPane;
pub use registers::RegistersPane;

pub trait PaneDisplay {
    fn render(&mut self, ui: &mut egui::Ui);
    fn title(&self) -> String;
}

/// Format a word for display in the selected base. Decimal shows the
/// signed 32-bit value, matching what the simulator writes in its JSON.
pub fn format_word(word: u32, base: u32) -> String {
    match base {
        16 => crate::trace::word_hex(word),
        _ => (word as i32).to_string(),
    }
}

/// Base selector shared by the register and memory panes.
pub fn base_selector(ui: &mut egui::Ui, base: &mut u32) {
    ui.label("Base:");
    ui.radio_value(base, 10, "Dec");
    ui.radio_value(base, 16, "Hex");
}
