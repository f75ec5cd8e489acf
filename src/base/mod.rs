pub use crate::errors::*;

mod common;
pub use common::*;
mod write;
pub use write::*;
