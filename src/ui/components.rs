//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use crate::types::EditTracker;
use eframe::egui;

/// Checkbox-style display for a boolean preference (not interactive).
pub fn flag_indicator(ui: &mut egui::Ui, on: bool, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let rounding = 3.0;

        if on {
            painter.rect_filled(rect, rounding, theme::ACCENT);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::CHECK,
                egui::FontId::proportional(size * 0.7),
                egui::Color32::WHITE,
            );
        } else {
            painter.rect_stroke(
                rect,
                rounding,
                egui::Stroke::new(1.5, theme::BORDER_DEFAULT),
                egui::StrokeKind::Inside,
            );
        }
    }

    response
}

/// Filled action button with hover color, fixed height.
pub fn action_button(
    ui: &mut egui::Ui,
    text: &str,
    fill: egui::Color32,
    hover: egui::Color32,
) -> egui::Response {
    let button = egui::Button::new(
        egui::RichText::new(text)
            .size(theme::FONT_BODY)
            .color(egui::Color32::WHITE),
    )
    .fill(fill)
    .corner_radius(theme::RADIUS_DEFAULT)
    .min_size(egui::vec2(120.0, theme::BUTTON_HEIGHT));

    let response = ui.add(button);
    if response.hovered() {
        ui.painter()
            .rect_filled(response.rect, theme::RADIUS_DEFAULT, hover.gamma_multiply(0.25));
    }
    response
}

/// One-line description of the edit queue, or `None` when idle.
pub fn queue_label(tracker: &EditTracker) -> Option<String> {
    let active = tracker
        .active
        .map(|(seq, kind)| format!("{} #{} running", kind.label(), seq));
    match (active, tracker.queued) {
        (Some(active), 0) => Some(active),
        (Some(active), n) => Some(format!("{active} · {n} queued")),
        (None, n) if n > 0 => Some(format!("{n} queued")),
        (None, _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EditKind;

    #[test]
    fn queue_label_reflects_tracker_state() {
        let mut tracker = EditTracker::default();
        assert_eq!(queue_label(&tracker), None);

        tracker.queued = 2;
        assert_eq!(queue_label(&tracker), Some("2 queued".into()));

        tracker.queued = 1;
        tracker.active = Some((4, EditKind::Clear));
        assert_eq!(queue_label(&tracker), Some("clear #4 running · 1 queued".into()));

        tracker.queued = 0;
        assert_eq!(queue_label(&tracker), Some("clear #4 running".into()));
    }
}
