pub mod config;
pub mod hints;
pub mod item;

pub use config::*;
pub use hints::*;
pub use item::*;
