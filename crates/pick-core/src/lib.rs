//! Building blocks of the remote-backed selection engine: candidates,
//! exact-match synthesis, the bounded selection set, the suggestion
//! source contract, and settings.

pub mod candidate;
pub mod matcher;
pub mod remote;
pub mod selection;
pub mod settings;

pub use candidate::{Candidate, SYNTHESIZED_SUFFIX};
pub use remote::{RemoteError, SuggestionClient};
pub use selection::{BulkReport, SelectionError, SelectionSet};
pub use settings::ModeConfig;
