//! Route handlers organized by resource

pub mod company;
pub mod customers;
pub mod docs;
pub mod foods;
pub mod health;
pub mod say;
pub mod students;
