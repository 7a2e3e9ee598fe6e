use std::{path::PathBuf, time::Duration};

use client_core::{write_export, BoardState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{DragEnd, Priority},
    export::ExportFormat,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

const TASK_INPUT_HINT: &str = "Enter your tasks, one per line...";

/// Drag payload carried by a task row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DraggedTask {
    label: String,
}

pub struct BoardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    server_url: String,
    task_input: String,
    state: BoardState,
    /// Local notices (export results, queue problems); never the error banner.
    status: String,
}

impl BoardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url,
            task_input: String::new(),
            state: BoardState::default(),
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Categorized(outcome) => {
                    self.state = std::mem::take(&mut self.state).finish_submission(outcome);
                }
                UiEvent::BackendFailed(message) => {
                    self.state.loading = false;
                    self.status = message;
                }
            }
        }
    }

    fn submit(&mut self) {
        if !self.state.can_submit(&self.task_input) {
            return;
        }
        let cmd = BackendCommand::Categorize {
            server_url: self.server_url.clone(),
            raw_tasks: self.task_input.clone(),
        };
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.status.clear();
            self.state = std::mem::take(&mut self.state).begin_submission();
        }
    }

    fn apply_drag_end(&mut self, event: DragEnd) {
        self.state = std::mem::take(&mut self.state).reorder(&event);
    }

    fn export(&mut self, format: ExportFormat) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(format.default_file_name())
            .add_filter(format.to_string(), &[format.extension()])
            .save_file()
        else {
            return;
        };
        self.status = export_status(write_export(&path, format, &self.state.tasks), format);
    }

    fn show_error_banner(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.state.error.clone() else {
            return;
        };
        let mut dismiss = false;
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(70, 25, 25))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(190, 80, 80)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::from_rgb(255, 210, 210), message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            dismiss = true;
                        }
                    });
                });
            });
        if dismiss {
            self.state = std::mem::take(&mut self.state).dismiss_error();
        }
    }

    fn show_input(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::TextEdit::multiline(&mut self.task_input)
                .hint_text(TASK_INPUT_HINT)
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
        ui.horizontal(|ui| {
            let label = if self.state.loading {
                "Prioritizing..."
            } else {
                "Prioritize Tasks"
            };
            let can_submit = self.state.can_submit(&self.task_input);
            if ui.add_enabled(can_submit, egui::Button::new(label)).clicked() {
                self.submit();
            }
            ui.separator();
            let has_tasks = !self.state.tasks.is_empty();
            if ui
                .add_enabled(has_tasks, egui::Button::new("Export JSON"))
                .clicked()
            {
                self.export(ExportFormat::Json);
            }
            if ui
                .add_enabled(has_tasks, egui::Button::new("Export CSV"))
                .clicked()
            {
                self.export(ExportFormat::Csv);
            }
        });
        if !self.status.is_empty() {
            ui.small(&self.status);
        }
    }

    fn show_columns(&mut self, ui: &mut egui::Ui) {
        let mut drag_end = None;
        ui.columns(Priority::ALL.len(), |columns| {
            for (column, priority) in columns.iter_mut().zip(Priority::ALL) {
                column.heading(priority.title());
                column.separator();
                let bucket = self.state.tasks.bucket(priority);
                egui::ScrollArea::vertical()
                    .id_salt(("bucket", priority.json_key()))
                    .auto_shrink([false, false])
                    .show(column, |ui| {
                        if bucket.is_empty() {
                            ui.weak("No tasks");
                            return;
                        }
                        for (index, label) in bucket.iter().enumerate() {
                            if let Some(event) = task_row(ui, priority, index, label) {
                                drag_end = Some(event);
                            }
                        }
                    });
            }
        });
        if let Some(event) = drag_end {
            self.apply_drag_end(event);
        }
    }
}

/// Draws one draggable task row and returns the drag end when another row
/// is released onto it.
fn task_row(ui: &mut egui::Ui, priority: Priority, index: usize, label: &str) -> Option<DragEnd> {
    let id = egui::Id::new(("task", priority.json_key(), index));
    let payload = DraggedTask {
        label: label.to_string(),
    };
    let response = ui
        .dnd_drag_source(id, payload, |ui| {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(label);
            });
        })
        .response;

    if response.dnd_hover_payload::<DraggedTask>().is_some() {
        ui.painter().hline(
            response.rect.x_range(),
            response.rect.top(),
            ui.visuals().selection.stroke,
        );
    }
    let dropped = response.dnd_release_payload::<DraggedTask>()?;
    Some(DragEnd::new(dropped.label.clone(), Some(label)))
}

fn export_status(result: Result<PathBuf, client_core::ExportError>, format: ExportFormat) -> String {
    match result {
        Ok(path) => format!("Exported {format} to {}", path.display()),
        Err(err) => {
            tracing::error!(%err, "export failed");
            err.to_string()
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("input_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Task Prioritizer");
            self.show_error_banner(ui);
            self.show_input(ui);
            ui.add_space(6.0);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_columns(ui);
        });

        if self.state.loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
