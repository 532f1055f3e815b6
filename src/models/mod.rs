pub mod book;
pub mod cart_item;
pub mod review;

pub use book::Book;
pub use cart_item::CartItem;
pub use review::Review;
