mod station_lookup;

pub use station_lookup::*;
