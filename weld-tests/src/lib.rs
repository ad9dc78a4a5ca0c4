mod documents;
mod nullable;
mod people;
mod settings;

use documents::documents;
use log::LevelFilter;
use nullable::nullable;
use people::people;
use settings::settings;
use std::env;
use weld::Connection;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<C: Connection>(mut connection: C) {
    people(&mut connection).await;
    documents(&mut connection).await;
    nullable(&mut connection).await;
    settings(&mut connection).await;
}

/// Runs the code with logging turned off and evaluates to its value.
#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        let result = { $($code)+ };
        log::set_max_level(level);
        result
    }};
}
