pub mod error;
pub mod event;
pub mod plan;
pub mod selection;

pub use error::{Error, Result};
pub use event::*;
pub use plan::*;
pub use selection::*;
