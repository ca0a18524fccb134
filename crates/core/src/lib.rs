//! Domain core for the genre rows service.
//!
//! Holds everything that does not touch the network: the plugin
//! configuration, the catalog abstraction and its query adapter, genre row
//! descriptors, the in-process section table, and the page injection helper.

pub mod catalog;
pub mod config;
pub mod error;
pub mod injection;
pub mod memory;
pub mod row;
pub mod section;
pub mod section_table;
pub mod types;
