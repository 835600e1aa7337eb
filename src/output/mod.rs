pub mod encoder;
mod writer;

pub use encoder::{Encoder, HumanReadableEncoder, PromApiEncoder};
pub use writer::{LineWriter, Writer};
