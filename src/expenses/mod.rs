pub mod clock;
pub mod db_types;
pub mod memory;
pub mod postgres;
pub mod rest;
pub mod service;
pub mod store;
pub mod totals;
