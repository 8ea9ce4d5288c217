pub mod cart;
pub mod wishlist;

pub use cart::*;
pub use wishlist::*;
