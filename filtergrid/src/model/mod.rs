//! Row data model

mod record;
mod row;
mod value;

pub use record::*;
pub use row::*;
pub use value::*;
