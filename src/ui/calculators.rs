// src/ui/calculators.rs
use eframe::egui;
use crate::calc::{CalculationKind, RecoveryStatus};
use crate::state::{AppState, CalculatorState};
use crate::utils::format_live_result;

enum CardAction {
    None,
    Save,
}

pub fn show_calculators_view(ui: &mut egui::Ui, state: &mut AppState) {
    let mut save_kind = None;

    ui.columns(CalculationKind::ALL.len(), |columns| {
        for (column, calculator) in columns.iter_mut().zip(state.calculators.iter_mut()) {
            if let CardAction::Save = show_calculator_card(column, calculator) {
                save_kind = Some(calculator.kind);
            }
        }
    });

    if let Some(kind) = save_kind {
        if let Some(record) = state.save_result(kind) {
            state.status_message = Some(format!("Saved {} result", record.kind.label()));
        }
    }
}

fn show_calculator_card(ui: &mut egui::Ui, calculator: &mut CalculatorState) -> CardAction {
    let mut action = CardAction::None;
    let kind = calculator.kind;

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading(kind.card_title());
        ui.label(kind.description());
        ui.add_space(8.0);

        let [first_label, second_label] = kind.field_labels();
        let [first_hint, second_hint] = kind.field_hints();
        let mut changed = false;

        ui.label(first_label);
        changed |= ui.add(
            egui::TextEdit::singleline(&mut calculator.first)
                .hint_text(first_hint)
                .desired_width(f32::INFINITY)
        ).changed();

        ui.label(second_label);
        ui.horizontal(|ui| {
            let suffix = if kind == CalculationKind::Cvss { Some("%") } else { None };
            let width = if suffix.is_some() { ui.available_width() - 16.0 } else { f32::INFINITY };
            changed |= ui.add(
                egui::TextEdit::singleline(&mut calculator.second)
                    .hint_text(second_hint)
                    .desired_width(width)
            ).changed();
            if let Some(suffix) = suffix {
                ui.label(suffix);
            }
        });

        if changed {
            calculator.recompute();
        }

        if let Some(evaluation) = calculator.evaluation() {
            ui.add_space(8.0);
            let (fill, text_color) = match evaluation.status {
                Some(RecoveryStatus::Safe) => (
                    egui::Color32::from_rgb(240, 253, 244),
                    egui::Color32::from_rgb(22, 101, 52),
                ),
                Some(RecoveryStatus::Exit) => (
                    egui::Color32::from_rgb(254, 242, 242),
                    egui::Color32::from_rgb(153, 27, 27),
                ),
                None => (
                    egui::Color32::from_rgb(248, 250, 252),
                    egui::Color32::from_rgb(15, 23, 42),
                ),
            };

            egui::Frame::none()
                .fill(fill)
                .rounding(6.0)
                .inner_margin(egui::Margin::same(10.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(kind.result_label().to_uppercase()).small().color(text_color));
                    ui.label(
                        egui::RichText::new(format_live_result(kind, evaluation.value))
                            .size(26.0)
                            .strong()
                            .color(text_color)
                    );
                    if let Some(status) = evaluation.status {
                        ui.separator();
                        let icon = match status {
                            RecoveryStatus::Safe => "✔",
                            RecoveryStatus::Exit => "⚠",
                        };
                        ui.label(egui::RichText::new(format!("{} {}", icon, status.message())).color(text_color));
                    }
                });
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("⟲ Reset").clicked() {
                calculator.reset();
            }
            let can_save = calculator.evaluation().is_some();
            if ui.add_enabled(can_save, egui::Button::new("💾 Save")).clicked() {
                action = CardAction::Save;
            }
        });
    });

    action
}
