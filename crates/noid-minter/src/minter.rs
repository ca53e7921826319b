mod default;
mod interface;
mod kind;

pub use default::*;
pub use interface::*;
pub use kind::*;
