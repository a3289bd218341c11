//! Records and filters.

mod app;
mod filter;
mod route;

pub use app::App;
pub use filter::{AppFilter, RouteFilter};
pub use route::{Format, Route, RouteType};
