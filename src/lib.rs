pub mod accounts;
pub mod arguments;
pub mod config;
pub mod constants;
pub mod errors;
pub mod layout;
pub mod logger;
pub mod paths;
pub mod pools;
pub mod rpc;
pub mod swaps;
