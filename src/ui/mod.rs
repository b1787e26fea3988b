//! Terminal UI for playing Connect Four: column selection, piece rendering,
//! winner highlighting and turn messages.

mod app;
mod game_view;

pub use app::App;
