pub mod decode;
pub mod format;

pub use decode::decode_table;
pub use format::SheetFormat;
