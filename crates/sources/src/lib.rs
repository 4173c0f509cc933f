mod domains;
mod error;
mod source;
mod utils;

pub use domains::*;
pub use error::*;
pub use source::*;
pub use utils::*;
