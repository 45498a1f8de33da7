pub mod entities;
pub mod repositories;
pub mod types;

pub use entities::*;
pub use types::*;
