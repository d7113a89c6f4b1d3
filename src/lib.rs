pub mod aggregate;
pub mod app;
pub mod chart;
pub mod coerce;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod scale;
pub mod serializer;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::ServerConfig;
pub use state::AppState;
pub use store::ActivityStore;
