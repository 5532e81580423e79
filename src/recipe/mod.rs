pub mod conversion;
pub mod definition;
pub mod resolve;
pub mod wire;

pub use conversion::*;
pub use definition::*;
pub use resolve::*;
