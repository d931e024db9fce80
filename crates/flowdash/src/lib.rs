mod aggregate;
mod axis;
mod config;
mod layout;
mod scale;
mod table;
mod types;
mod utils;
mod view;

pub use aggregate::*;
pub use axis::*;
pub use config::*;
pub use layout::*;
pub use scale::*;
pub use table::*;
pub use types::*;
pub use utils::*;
pub use view::*;

pub type Result<T> = std::result::Result<T, Error>;
