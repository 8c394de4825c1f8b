mod headers;
mod instances;

pub use headers::header_numeric_binary;
pub use instances::labeled;
