pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod crawl;
pub(crate) mod search;
