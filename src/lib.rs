pub mod builder;
pub mod config;
pub mod content;
pub mod feed;
pub mod highlight;
pub mod logger;
pub mod og;
pub mod server;
pub mod text_utils;
pub mod view;
pub mod website;
mod paginator;
mod query_string;
