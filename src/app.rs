use std::sync::Mutex;

use lazy_static::lazy_static;

use crate::panes::{
    ControlsPane, DisassemblyPane, MemoryPane, OutputPane, PaneDisplay, RegistersPane,
};
use crate::trace::Session;

lazy_static! {
    /// The loaded trace and accumulated view state. Installed by `main`
    /// before the event loop starts; every pane locks it during render.
    pub static ref SESSION: Mutex<Session> = Mutex::new(Session::default());
}

/// Fixed window layout: disassembly in the center, memory and program
/// output along the bottom, registers and the step button in a right-hand
/// column.
pub struct ViewerApp {
    registers: RegistersPane,
    memory: MemoryPane,
    disassembly: DisassemblyPane,
    controls: ControlsPane,
    output: OutputPane,
}

impl Default for ViewerApp {
    fn default() -> Self {
        Self {
            registers: RegistersPane::default(),
            memory: MemoryPane::default(),
            disassembly: DisassemblyPane::default(),
            controls: ControlsPane,
            output: OutputPane,
        }
    }
}

impl ViewerApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Default::default()
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let span = tracing::trace_span!("ViewerApp::update");
        let _guard = span.enter();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.add_space(16.0);

                ui.menu_button("UI", |ui| {
                    let mut scale = ctx.zoom_factor();
                    let res = ui.add(egui::Slider::new(&mut scale, 0.5..=5.0).text("UI Scale"));
                    if !res.dragged() && res.changed() {
                        tracing::info!(scale, "setting new UI scale");
                        ctx.set_zoom_factor(scale);
                    }
                    egui::widgets::global_theme_preference_buttons(ui);
                });
            });
        });

        egui::SidePanel::right("side_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::TopBottomPanel::bottom("controls_panel")
                    .resizable(false)
                    .show_inside(ui, |ui| {
                        ui.add_space(4.0);
                        self.controls.render(ui);
                        ui.add_space(4.0);
                    });
                egui::CentralPanel::default().show_inside(ui, |ui| {
                    ui.heading(self.registers.title());
                    self.registers.render(ui);
                });
            });

        egui::TopBottomPanel::bottom("bottom_panel")
            .resizable(true)
            .default_height(220.0)
            .show(ctx, |ui| {
                ui.columns(2, |columns| {
                    columns[0].heading(self.memory.title());
                    self.memory.render(&mut columns[0]);
                    self.output.render(&mut columns[1]);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.disassembly.title());
            self.disassembly.render(ui);
        });
    }
}
