//! Passports Module
//!
//! Record lifecycle: insert-or-update, read, list and delete over a
//! [`PassportStore`](crate::store::PassportStore).

mod service;


pub use service::PassportService;
