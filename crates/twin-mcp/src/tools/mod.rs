//! Built-in tools.

mod add_numbers;
mod getdatetime;
mod hello_world;
mod save_twin_info;

pub use add_numbers::AddNumbers;
pub use getdatetime::GetDateTime;
pub use hello_world::HelloWorld;
pub use save_twin_info::{SaveTwinInfo, STORE_UNAVAILABLE};
