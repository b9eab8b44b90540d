use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use dashboard_core::{render, AnalysisResultStore, ReferencePrices};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{BlockingNotice, UiEvent};
use crate::controller::orchestration::submit_document;
use crate::controller::reducer::apply_ui_event;
use crate::ui::panels::{show_dashboard, PanelAction};

pub struct DashboardApp {
    store: AnalysisResultStore,
    prices: ReferencePrices,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    notice: Option<BlockingNotice>,
    status: String,
}

impl DashboardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        prices: ReferencePrices,
    ) -> Self {
        Self {
            store: AnalysisResultStore::new(),
            prices,
            cmd_tx,
            ui_rx,
            notice: None,
            status: "Starting analysis worker".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(notice) = apply_ui_event(&mut self.store, event, &mut self.status) {
                self.notice = Some(notice);
            }
        }
    }

    fn handle_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::PickDocument => {
                let Some(path) = rfd::FileDialog::new()
                    .set_title("Select tender document")
                    .pick_file()
                else {
                    return;
                };
                self.notice = submit_document(&mut self.store, &self.cmd_tx, path, &mut self.status);
            }
            PanelAction::Approve => match self.store.approve() {
                Ok(message) => {
                    tracing::info!("{message}");
                    self.status = message.to_string();
                }
                Err(err) => self.status = err.to_string(),
            },
            PanelAction::Reset => {
                self.store.reset();
                self.status = "Ready for the next document".to_string();
            }
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(notice.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(&notice.message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(&self.status);
        });

        let view = render(&self.store, &self.prices);
        let mut action = None;
        egui::CentralPanel::default()
            .frame(
                egui::Frame::NONE
                    .fill(egui::Color32::from_rgb(248, 250, 252))
                    .inner_margin(egui::Margin::same(32)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_enabled_ui(self.notice.is_none(), |ui| {
                        action = show_dashboard(ui, &view);
                    });
                });
            });
        if let Some(action) = action {
            self.handle_action(action);
        }

        self.show_notice(ctx);
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
