pub mod document;
mod error;
mod minter;
pub mod model;
mod mutex;
mod rand;
mod registry;
#[cfg(feature = "skolem")]
mod skolem;
mod space;
mod traversal;
#[cfg(feature = "uri")]
mod uri;

pub use crate::document::*;
pub use crate::error::*;
pub use crate::minter::*;
pub use crate::mutex::*;
pub use crate::rand::*;
pub use crate::registry::*;
#[cfg(feature = "skolem")]
pub use crate::skolem::*;
pub use crate::space::*;
pub use crate::traversal::*;
#[cfg(feature = "uri")]
pub use crate::uri::*;
