//! Quillpad - A small article management client
//!
//! This library provides the core of the Quillpad client: session storage,
//! the articles API client, the route guard and the article controller.

pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod views;
