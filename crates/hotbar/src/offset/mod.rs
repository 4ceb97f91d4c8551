mod resolver;
mod signature;

pub use resolver::*;
pub use signature::*;
