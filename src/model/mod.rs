mod labels;
mod matcher;
mod timestamp;

pub use labels::*;
pub use matcher::*;
pub use timestamp::*;
