pub mod settings;
pub mod tournament;

pub use settings::{AppConfig, SourcePolicy};
pub use tournament::{TournamentConfig, atp_finals_2025};
