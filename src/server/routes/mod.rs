//! Routes
//!
//! Route handlers organized by functionality.

pub mod charts;
pub mod health;
pub mod nav;
pub mod page;
pub mod refresh;
pub mod regions;
