//! API Routes
//!
//! Route handlers organized by functionality.

pub mod contact;
pub mod health;
pub mod portfolio;
