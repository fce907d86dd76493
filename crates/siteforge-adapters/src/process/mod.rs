//! Process runner adapters.

mod recording;
mod system;

pub use recording::RecordingProcessRunner;
pub use system::SystemProcessRunner;
