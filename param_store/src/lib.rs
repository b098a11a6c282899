mod error;
mod memory;
mod store;

pub use error::{Result, StoreErr};
pub use memory::MemoryStore;
pub use store::ParamStore;
