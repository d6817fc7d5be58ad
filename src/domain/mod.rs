pub mod menu;
pub mod order;
pub mod draft;

pub use menu::*;
pub use order::*;
pub use draft::*;
