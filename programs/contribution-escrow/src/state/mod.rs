pub mod escrow;
pub mod participant;
pub mod roles;
pub mod token;
pub mod window;

pub use escrow::*;
pub use participant::*;
pub use roles::*;
pub use token::*;
pub use window::*;
