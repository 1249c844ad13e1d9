use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::color::ImageResult;

const LOG_CONFIG_FILE: &str = "log4rs.yaml";
const CONSOLE_APPENDER: &str = "stderr";
const CONSOLE_PATTERN: &str = "{d(%H:%M:%S)} {h({l})} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    if Path::new(LOG_CONFIG_FILE).is_file() {
        if let Err(error) = log4rs::init_file(LOG_CONFIG_FILE, Default::default()) {
            eprintln!("Unable to initialise logging from {}: {}", LOG_CONFIG_FILE, error);
        }
        return;
    }
    let config = Config::builder()
        .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console_appender())))
        .build(
            Root::builder()
                .appender(CONSOLE_APPENDER)
                .build(LevelFilter::Info),
        );
    match config {
        Ok(config) => {
            if let Err(error) = log4rs::init_config(config) {
                eprintln!("Unable to initialise console logging: {}", error);
            }
        }
        Err(error) => eprintln!("Invalid console logging configuration: {}", error),
    }
}

fn console_appender() -> ConsoleAppender {
    ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build()
}

pub fn log_results(results: &[ImageResult]) {
    log::info!("{} result(s)", results.len());
    for result in results {
        log::debug!(
            "{}: R={} G={} B={}",
            result.name,
            result.red,
            result.green,
            result.blue
        );
    }
}
