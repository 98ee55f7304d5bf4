//! Common types used across the application.

pub mod money;
pub mod pagination;

pub use money::{MONEY_SCALE, Money};
pub use pagination::{PageMeta, PageRequest, PageResponse};
