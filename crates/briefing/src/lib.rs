pub mod altitude;
pub mod assembler;
pub mod routes;
pub mod startup;
pub mod templates;
pub mod utils;
pub mod zulu;

pub use altitude::*;
pub use assembler::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
pub use zulu::*;
