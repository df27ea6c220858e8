//! # ARTHOLST Order Relay Bot
//!
//! A Telegram bot that receives orders from the storefront Mini App, forwards
//! each order to the shop's admin chat and confirms it to the customer.

pub mod bot;
pub mod bot_config;
pub mod channel;
pub mod localization;
pub mod logging;
pub mod order_model;
pub mod relay;
pub mod relay_errors;
