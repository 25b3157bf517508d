// src/ui/dialog.rs
use eframe::egui;
use crate::state::{AppState, DialogState};

pub fn show_dialogs(ctx: &egui::Context, state: &mut AppState) {
    match state.current_dialog {
        DialogState::None => {},
        DialogState::ConfirmClear => show_confirm_clear(ctx, state),
    }
}

fn show_confirm_clear(ctx: &egui::Context, state: &mut AppState) {
    let count = state.history.len();
    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new("Clear History")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Are you sure you want to clear all saved calculations?");
            ui.small(format!("{} saved item(s) will be removed.", count));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button(egui::RichText::new("Clear").color(egui::Color32::RED)).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        state.confirm_clear();
    } else if cancelled {
        state.cancel_dialog();
    }
}
