mod route_map;
mod station_section;

pub use route_map::route_map;
pub use station_section::{display_or_na, station_section};
