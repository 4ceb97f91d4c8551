mod cache;
mod record;
mod table;
mod types;
mod view;

pub use cache::*;
pub use record::*;
pub use table::*;
pub use types::*;
pub use view::*;
