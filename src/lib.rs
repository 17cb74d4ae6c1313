#[macro_use]
extern crate lazy_static;

#[macro_use]
pub mod log;
pub mod common;
pub mod specifier;
pub mod pinfile;
pub mod pin_table;
pub mod replacer;
pub mod builder;
pub mod stream;

pub use crate::common::{split_pinfile, ErrorPolicy, Report};
pub use crate::specifier::{resolve, Specifier};
pub use crate::pinfile::{expand_pinfile, process_pinfile};
pub use crate::pin_table::PinTable;
pub use crate::replacer::{replace_all, replace_pins};
pub use crate::builder::build_pinfile;
