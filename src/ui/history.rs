// src/ui/history.rs
use eframe::egui;
use crate::calc::{CalculationKind, RecoveryStatus};
use crate::state::AppState;
use crate::utils::{format_local_time, format_saved_result};

fn badge_colors(kind: CalculationKind) -> (egui::Color32, egui::Color32) {
    match kind {
        CalculationKind::Cvss => (egui::Color32::from_rgb(219, 234, 254), egui::Color32::from_rgb(29, 78, 216)),
        CalculationKind::Vrl => (egui::Color32::from_rgb(255, 237, 213), egui::Color32::from_rgb(194, 65, 12)),
        CalculationKind::Ip => (egui::Color32::from_rgb(243, 232, 255), egui::Color32::from_rgb(126, 34, 206)),
    }
}

pub fn show_history_view(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("🕘 Session History");
        if !state.history.is_empty() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let clear = ui.button(egui::RichText::new("🗑 Clear History").color(egui::Color32::RED));
                if clear.clicked() {
                    state.request_clear();
                }
            });
        }
    });
    ui.add_space(8.0);

    if state.history.is_empty() {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.label("No calculations saved in this session yet.");
                ui.small("Use the \"Save\" button on any calculator to add items here.");
                ui.add_space(16.0);
            });
        });
        return;
    }

    let safe_note = RecoveryStatus::Safe.note();
    let mut to_delete = None;

    for record in state.history.records() {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        let (fill, text) = badge_colors(record.kind);
                        egui::Frame::none()
                            .fill(fill)
                            .rounding(4.0)
                            .inner_margin(egui::Margin::symmetric(6.0, 2.0))
                            .show(ui, |ui| {
                                ui.label(egui::RichText::new(record.kind.label()).small().strong().color(text));
                            });
                        ui.small(format_local_time(record.created_at));
                    });
                    ui.strong(&record.title);

                    ui.horizontal_wrapped(|ui| {
                        for input in &record.inputs {
                            ui.label(format!("{}:", input.label));
                            ui.strong(input.value.to_string());
                            ui.add_space(12.0);
                        }
                    });

                    if let Some(note) = &record.note {
                        let color = if note == safe_note {
                            egui::Color32::from_rgb(22, 163, 74)
                        } else {
                            egui::Color32::from_rgb(217, 119, 6)
                        };
                        ui.label(egui::RichText::new(format!("Note: {}", note)).color(color));
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("🗑").on_hover_text("Remove item").clicked() {
                        to_delete = Some(record.id.clone());
                    }
                    ui.vertical(|ui| {
                        ui.small("RESULT");
                        ui.label(
                            egui::RichText::new(format_saved_result(record.kind, record.result))
                                .size(20.0)
                                .strong()
                                .color(egui::Color32::from_rgb(79, 70, 229))
                        );
                    });
                });
            });
        });
        ui.add_space(4.0);
    }

    if let Some(id) = to_delete {
        state.delete_record(&id);
    }
}
