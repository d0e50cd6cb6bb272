pub mod convert;

pub use convert::{ConvertState, ImageEntry, show_convert};
