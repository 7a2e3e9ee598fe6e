//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    Categorize {
        server_url: String,
        raw_tasks: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Categorize { .. } => "categorize",
        }
    }
}
