//! Draws a [`DashboardView`]; returns the action the operator picked, if any.

use dashboard_core::{
    render::{
        BarKind, ComplianceRow, ImpactBanner, PriceBar, ProductCard, ProposalAction,
        ResultPanel, Tone, UploadPanel, ViewBody,
    },
    DashboardView,
};
use eframe::egui;
use shared::domain::ReasoningStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    PickDocument,
    Approve,
    Reset,
}

const HEADING_BLUE: egui::Color32 = egui::Color32::from_rgb(30, 58, 138);
const MUTED: egui::Color32 = egui::Color32::from_rgb(100, 116, 139);
const TRACK: egui::Color32 = egui::Color32::from_rgb(241, 245, 249);
const SELECTED_BAR: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
const REFERENCE_BAR: egui::Color32 = egui::Color32::from_rgb(203, 213, 225);
const PASS_GREEN: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
const FAIL_RED: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
const FAIL_TEXT: egui::Color32 = egui::Color32::from_rgb(185, 28, 28);

fn tone_colors(tone: Tone) -> (egui::Color32, egui::Color32) {
    match tone {
        Tone::Success => (
            egui::Color32::from_rgb(240, 253, 244),
            egui::Color32::from_rgb(22, 101, 52),
        ),
        Tone::Warning => (
            egui::Color32::from_rgb(255, 247, 237),
            egui::Color32::from_rgb(154, 52, 18),
        ),
    }
}

fn card(ui: &mut egui::Ui, add: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::NONE
        .fill(egui::Color32::WHITE)
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(226, 232, 240)))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(20, 18))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add(ui);
        });
}

pub fn show_dashboard(ui: &mut egui::Ui, view: &DashboardView) -> Option<PanelAction> {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(
                egui::RichText::new(view.title)
                    .size(26.0)
                    .strong()
                    .color(HEADING_BLUE),
            );
            ui.label(egui::RichText::new(view.subtitle).color(MUTED));
        });
    });
    ui.add_space(16.0);

    match &view.body {
        ViewBody::Upload(upload) => show_upload(ui, upload),
        ViewBody::Result(panel) => show_result(ui, panel),
    }
}

fn show_upload(ui: &mut egui::Ui, upload: &UploadPanel) -> Option<PanelAction> {
    let mut action = None;
    card(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            if upload.loading {
                ui.add(egui::Spinner::new().size(48.0));
                ui.add_space(12.0);
                ui.label(egui::RichText::new(upload.caption).size(20.0).strong());
            } else {
                let button = egui::Button::new(
                    egui::RichText::new(upload.caption).size(20.0).strong(),
                )
                .min_size(egui::vec2(280.0, 56.0));
                if ui.add(button).clicked() {
                    action = Some(PanelAction::PickDocument);
                }
            }
            ui.add_space(48.0);
        });
    });
    action
}

fn show_result(ui: &mut egui::Ui, panel: &ResultPanel) -> Option<PanelAction> {
    let mut action = None;

    if let Some(banner) = &panel.banner {
        show_banner(ui, banner);
        ui.add_space(12.0);
    }

    ui.columns(2, |columns| {
        card(&mut columns[0], |ui| {
            show_product(ui, &panel.product);
            ui.add_space(12.0);
            for row in &panel.compliance {
                show_compliance_row(ui, row);
            }
        });

        card(&mut columns[1], |ui| {
            ui.label(
                egui::RichText::new(panel.prices.title.to_uppercase())
                    .small()
                    .strong()
                    .color(MUTED),
            );
            ui.add_space(12.0);
            for bar in &panel.prices.bars {
                show_price_bar(ui, bar);
                ui.add_space(10.0);
            }
            ui.add_space(8.0);
            action = show_proposal(ui, &panel.proposal);
        });
    });

    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        if ui
            .add(egui::Button::new(egui::RichText::new(panel.reset_label).color(MUTED)).frame(false))
            .clicked()
        {
            action = Some(PanelAction::Reset);
        }
    });

    action
}

fn show_banner(ui: &mut egui::Ui, banner: &ImpactBanner) {
    let (fill, text) = tone_colors(banner.tone);
    let icon = match banner.tone {
        Tone::Success => "⬇",
        Tone::Warning => "⚠",
    };
    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, text.gamma_multiply(0.3)))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(16, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(icon).size(20.0).color(text));
                ui.label(egui::RichText::new(&banner.text).strong().color(text));
            });
        });
}

fn show_product(ui: &mut egui::Ui, product: &ProductCard) {
    ui.label(
        egui::RichText::new(product.heading.to_uppercase())
            .small()
            .strong()
            .color(MUTED),
    );
    ui.label(
        egui::RichText::new(&product.name)
            .size(22.0)
            .strong()
            .color(HEADING_BLUE),
    );
    if !product.description.is_empty() {
        ui.label(egui::RichText::new(&product.description).color(MUTED));
    }
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(&product.price_label)
                .size(26.0)
                .strong()
                .monospace(),
        );
        ui.label(egui::RichText::new(product.unit_label).small().color(MUTED));
    });
    let (_, tone_text) = tone_colors(product.compliance_tone);
    ui.label(
        egui::RichText::new(&product.compliance_label)
            .strong()
            .color(tone_text),
    );
}

fn show_compliance_row(ui: &mut egui::Ui, row: &ComplianceRow) {
    ui.horizontal_wrapped(|ui| {
        match row.status {
            ReasoningStatus::Pass => {
                ui.label(egui::RichText::new("✔").color(PASS_GREEN));
                ui.label(&row.text);
            }
            ReasoningStatus::Fail => {
                ui.label(egui::RichText::new("✖").color(FAIL_RED));
                ui.label(egui::RichText::new(&row.text).color(FAIL_TEXT));
            }
        }
    });
}

fn show_price_bar(ui: &mut egui::Ui, bar: &PriceBar) {
    let (label_color, fill) = match bar.kind {
        BarKind::Selected => (HEADING_BLUE, SELECTED_BAR),
        BarKind::Reference => (MUTED, REFERENCE_BAR),
    };
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&bar.label).color(label_color));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(&bar.price_label).color(label_color));
        });
    });

    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 12.0), egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, egui::CornerRadius::same(6), TRACK);
    // The track clips bars whose width exceeds 100%.
    let fraction = (bar.width_percent / 100.0).clamp(0.0, 1.0) as f32;
    if fraction > 0.0 {
        let filled =
            egui::Rect::from_min_size(rect.min, egui::vec2(rect.width() * fraction, rect.height()));
        painter.rect_filled(filled, egui::CornerRadius::same(6), fill);
    }

    if let Some(caption) = bar.caption {
        ui.label(egui::RichText::new(caption).small().strong().color(PASS_GREEN));
    }
}

fn show_proposal(ui: &mut egui::Ui, proposal: &ProposalAction) -> Option<PanelAction> {
    match proposal {
        ProposalAction::Generate { label } => {
            let button = egui::Button::new(
                egui::RichText::new(format!("📄 {label}"))
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(HEADING_BLUE)
            .min_size(egui::vec2(ui.available_width(), 40.0));
            ui.add(button).clicked().then_some(PanelAction::Approve)
        }
        ProposalAction::Unavailable { reason } => {
            ui.label(egui::RichText::new(reason).color(MUTED));
            None
        }
        ProposalAction::Generated { message } => {
            let (fill, text) = tone_colors(Tone::Success);
            egui::Frame::NONE
                .fill(fill)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(12, 10))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(format!("✔ {message}")).strong().color(text));
                });
            None
        }
    }
}
