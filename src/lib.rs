#[macro_use] extern crate derive_more;
#[macro_use] extern crate lazy_static;

pub mod basic;
pub mod config;
pub mod game;
pub mod item;
pub mod sequence;
pub mod snake;
