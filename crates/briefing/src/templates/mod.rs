pub mod components;
pub mod fragments;
pub mod layouts;
pub mod pages;

pub use fragments::{route_map, station_section};
pub use layouts::{CurrentPage, PageConfig};
pub use pages::{briefing_page, home_page};
