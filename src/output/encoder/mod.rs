mod encoder;
mod human;
mod promapi;

pub use encoder::{format_value, Encoder};
pub use human::HumanReadableEncoder;
pub use promapi::PromApiEncoder;
