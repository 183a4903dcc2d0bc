//! Plain data: catalog products, stock movements and catalog templates.

pub mod movement;
pub mod product;
pub mod template;

pub use movement::*;
pub use product::*;
pub use template::*;
