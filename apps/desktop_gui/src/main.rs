mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::BoardApp;

#[derive(Parser, Debug)]
#[command(name = "taskboard-desktop", about = "Desktop task prioritization board")]
struct Args {
    #[arg(long, env = "TASKBOARD_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Task Prioritizer")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Task Prioritizer",
        options,
        Box::new(move |_cc| Ok(Box::new(BoardApp::new(cmd_tx, ui_rx, args.server_url)))),
    )
}
