use std::sync::LazyLock;
use std::time::Instant;

pub mod config;
pub mod io;
pub mod map;
pub mod report;
pub mod services;
pub mod session;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);
