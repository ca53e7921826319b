mod alphabet;
mod identifier_space;

pub use alphabet::*;
pub use identifier_space::*;
