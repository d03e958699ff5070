pub mod account;
pub mod auction;
pub mod authority;
pub mod bidding;
pub mod config;
pub mod handlers;
pub mod query;
pub mod session;
pub mod view;
