// src/app.rs
use eframe::egui;
use tracing::warn;

use crate::state::AppState;

pub struct FinCalcApp {
    state: AppState,
}

impl FinCalcApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                let has_history = !self.state.history.is_empty();

                if ui.add_enabled(has_history, egui::Button::new("Export History (CSV)")).clicked() {
                    self.export_history();
                    ui.close_menu();
                }
                if ui.add_enabled(has_history, egui::Button::new("Clear History...")).clicked() {
                    self.state.request_clear();
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close_menu();
                }
            });

            ui.separator();
            ui.strong("FinCalc Pro");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak("Financial Suite v1.0");
            });
        });
    }

    fn export_history(&mut self) {
        match self.state.export_history() {
            Ok(path) => {
                self.state.status_message = Some(format!("Exported history to {}", path.display()));
            }
            Err(e) => {
                warn!("History export failed: {:#}", e);
                self.state.error_message = Some(format!("Error exporting history: {:#}", e));
            }
        }
    }
}

impl eframe::App for FinCalcApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::TopBottomPanel::bottom("footer_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.state.status_message {
                    Some(message) => ui.label(message),
                    None => ui.weak("All calculations are stored locally in your session."),
                };
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_source("main_scroll")
                .show(ui, |ui| {
                    crate::ui::calculators::show_calculators_view(ui, &mut self.state);

                    ui.add_space(16.0);
                    ui.separator();
                    ui.add_space(16.0);

                    crate::ui::history::show_history_view(ui, &mut self.state);
                });
        });

        crate::ui::dialog::show_dialogs(ctx, &mut self.state);

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.end_session();
    }
}
