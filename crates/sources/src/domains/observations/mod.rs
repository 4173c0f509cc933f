mod awc;
mod metar;
mod taf;

pub use awc::*;
pub use metar::*;
pub use taf::*;
