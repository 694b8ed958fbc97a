//! BANK ACCOUNTS LIBRARY
//!
//! This library provides the elements of a small CRUD service for bank
//! accounts: the account model and its validation rules, the storages able
//! to persist accounts, the account service and the HTTP API on top of it.

pub mod adapter;
pub mod api;
pub mod model;
pub mod service;

pub type Result<T> = anyhow::Result<T>;
