//! CLI command implementations

pub mod browse;
pub mod config;
pub mod open;
pub mod search;
pub mod show;

pub use browse::execute as browse;
pub use config::execute as config;
pub use open::execute as open;
pub use search::execute as search;
pub use show::execute as show;
