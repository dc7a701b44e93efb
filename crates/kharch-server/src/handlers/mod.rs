//! HTTP request handlers

pub mod assist;
pub mod expenses;
pub mod export;
pub mod income;
pub mod reports;
pub mod sync;

pub use assist::*;
pub use expenses::*;
pub use export::*;
pub use income::*;
pub use reports::*;
pub use sync::*;
