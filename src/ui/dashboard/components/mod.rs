//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod boxplot;
pub mod footer;
pub mod gene_info;
pub mod header;
pub mod logs;
pub mod selection;
pub mod volcano;
