pub mod actor;
pub mod ledc;
pub mod storage;

pub use actor::*;
pub use ledc::*;
pub use storage::*;
