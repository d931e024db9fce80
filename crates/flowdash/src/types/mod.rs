mod attribute;
mod error;
mod execution;
mod status;
mod timestamp;

pub use attribute::*;
pub use error::*;
pub use execution::*;
pub use status::*;
pub use timestamp::*;
