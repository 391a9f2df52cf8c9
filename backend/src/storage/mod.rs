pub mod sqlite;
pub mod traits;

pub use traits::{BehaviorLogStorage, BehaviorStorage};
