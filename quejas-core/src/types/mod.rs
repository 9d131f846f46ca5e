//! Model types

pub mod branch;
pub mod common;
pub mod complaint;
pub mod email;
pub mod instructor;
pub mod manager;
pub mod rating;

pub use branch::*;
pub use common::*;
pub use complaint::*;
pub use email::*;
pub use instructor::*;
pub use manager::*;
pub use rating::*;
