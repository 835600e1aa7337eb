mod json;

pub use json::{read_label_dictionary, read_rows, Epoch};
