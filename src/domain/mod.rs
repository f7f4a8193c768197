pub mod pagination;
pub mod product;

pub use pagination::*;
pub use product::*;
