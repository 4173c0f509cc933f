pub mod forecasts;
pub mod observations;
pub mod stations;

pub use forecasts::*;
pub use observations::*;
pub use stations::*;
