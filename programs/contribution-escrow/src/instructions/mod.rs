pub mod add_participant;
pub mod add_token;
pub mod authorize;
pub mod close;
pub mod deposit;
pub mod initialize;
pub mod process;
pub mod reclaim_tokens;
pub mod token_deposit;
pub mod token_process;
pub mod token_withdraw;
pub mod window;
pub mod withdraw;

pub use add_participant::*;
pub use add_token::*;
pub use authorize::*;
pub use close::*;
pub use deposit::*;
pub use initialize::*;
pub use process::*;
pub use reclaim_tokens::*;
pub use token_deposit::*;
pub use token_process::*;
pub use token_withdraw::*;
pub use window::*;
pub use withdraw::*;
