use std::time::{Duration, Instant};

use client_core::{ActivitiesPage, StatusMessage};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{backend_failure_text, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::panels::{self, UiAction};

pub struct ActivitiesApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    page: ActivitiesPage,
    server_label: String,
    backend_ready: bool,
}

impl ActivitiesApp {
    /// Builds the app and queues the initial catalog load.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_label: String,
        message_display: Duration,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            page: ActivitiesPage::new(message_display),
            server_label,
            backend_ready: false,
        };
        app.handle_action(UiAction::Reload, Instant::now());
        app
    }

    fn process_ui_events(&mut self, now: Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    tracing::info!(server_url = %self.server_label, "backend ready");
                    self.backend_ready = true;
                }
                UiEvent::BackendFailed(message) => {
                    self.backend_ready = false;
                    self.page
                        .notifier
                        .show(StatusMessage::error(backend_failure_text(&message)), now);
                }
                UiEvent::Page(event) => self.page.apply(event, now),
            }
        }
    }

    fn handle_action(&mut self, action: UiAction, now: Instant) {
        let cmd = match action {
            UiAction::Reload => Some(BackendCommand::Refresh),
            UiAction::SubmitSignup => self.page.take_submission(now).map(BackendCommand::Signup),
            UiAction::RequestUnregister(intent) => {
                self.page.request_unregister(intent);
                None
            }
            UiAction::ResolveUnregister { confirmed } => self
                .page
                .resolve_unregister(confirmed)
                .map(BackendCommand::Unregister),
        };
        if let Some(cmd) = cmd {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.page, now);
        }
    }

    fn show_page(&mut self, ctx: &egui::Context, now: Instant) -> Vec<UiAction> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("page_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Mergington High School");
                ui.label(egui::RichText::new("Extracurricular Activities").weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if self.backend_ready {
                        self.server_label.clone()
                    } else {
                        format!("{} (connecting)", self.server_label)
                    };
                    ui.label(egui::RichText::new(label).small().weak());
                });
            });
        });

        egui::SidePanel::right("signup_panel")
            .resizable(false)
            .exact_width(320.0)
            .show(ctx, |ui| {
                panels::signup_form(ui, &mut self.page.form, &self.page.selector, &mut actions);
                ui.add_space(12.0);
                panels::message_area(ui, self.page.visible_status(now));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            panels::activity_list(ui, &self.page.list, &mut actions);
        });

        if let Some(intent) = self.page.pending_unregister() {
            panels::unregister_confirmation(ctx, intent, &mut actions);
        }

        actions
    }
}

impl eframe::App for ActivitiesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events(now);
        self.page.tick(now);

        for action in self.show_page(ctx, now) {
            self.handle_action(action, now);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
