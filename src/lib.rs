pub mod bus;
pub mod config;
pub mod drivers;
pub mod filter;
pub mod motion;
