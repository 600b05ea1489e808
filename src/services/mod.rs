//! Services layer - client logic
//!
//! This module contains the logic sitting between the views and the API:
//! - The article controller and its operations
//! - The busy indicator held while requests are outstanding

pub mod busy;
pub mod controller;


pub use busy::{BusyGuard, BusyIndicator};
pub use controller::{ArticleController, Outcome, UiState};
