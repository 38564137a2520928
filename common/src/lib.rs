pub mod style;
pub mod types;

pub use style::*;
pub use types::*;
