// File: ./src/model/mod.rs
pub mod aggregate;
pub mod display;
pub mod item;
pub mod parser;

pub use aggregate::DueSoonRow;
pub use display::{TaskDisplay, format_minutes};
pub use item::{ParsedTask, RawTask};
pub use parser::parse;
