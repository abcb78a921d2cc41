pub mod layout;
pub mod navbar;

pub use layout::Layout;
