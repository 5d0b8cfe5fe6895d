pub mod config;
pub mod error;

pub use config::{MAX_NODES, NODE_BITS, NODE_PROPERTY, TsidConfig, UtilConfig};
pub use error::{UtilError, UtilResult};
