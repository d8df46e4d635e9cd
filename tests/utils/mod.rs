#![allow(dead_code)]

pub mod factories;
pub mod helpers;

pub use factories::*;
pub use helpers::*;
