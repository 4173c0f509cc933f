pub mod briefing;

pub use briefing::*;
