pub mod bulk_ops;
pub mod config_ops;
pub mod render;
pub mod suggest_ops;

use pick_engine::{EngineMode, FormError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("no reply for {term:?} within {timeout_ms} ms")]
    NoReply { term: String, timeout_ms: u64 },
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write output: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    Tag,
    Lookup,
}

impl From<ModeArg> for EngineMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Tag => EngineMode::Tag,
            ModeArg::Lookup => EngineMode::Lookup,
        }
    }
}
