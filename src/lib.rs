pub mod controller;
pub mod game;
pub mod utils;
