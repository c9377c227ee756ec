// Library interface for vachan modules
// This allows tests and the binaries to import modules

pub mod article;
pub mod dataset;
pub mod filter;
pub mod providers;
pub mod server;
pub mod share;
pub mod sources;
pub mod store;
pub mod worker;

pub use article::{Article, FactCheck, FactCheckStatus};
pub use filter::{filter, select_by_status, sort_by_recency, FilterSpec};
