//! Core table modules
//!
//! - `frame`: column-typed tables loaded from delimited files
//! - `join`: stable left joins with collision suffixing

pub mod frame;
pub mod join;

pub use frame::{Column, ColumnKind, Frame, Value};
pub use join::{join_tables, left_join, LeftJoin};
