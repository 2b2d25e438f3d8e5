use std::fmt::Display;

use syslog::{Facility, Formatter3164, Logger, LoggerBackend};

/// Run notices for the local syslog daemon.
///
/// Stdout carries only result lines, so anything else goes here. When syslog
/// can't be reached the notices land on stderr instead.
pub struct Journal {
    process: String,
    logger: Option<Logger<LoggerBackend, Formatter3164>>,
}

impl Journal {
    pub fn connect(process: &str) -> Self {
        let formatter = Formatter3164 {
            facility: Facility::LOG_USER,
            hostname: None,
            process: process.into(),
            pid: std::process::id(),
        };

        match syslog::unix(formatter) {
            Ok(logger) => Self {
                process: process.into(),
                logger: Some(logger),
            },
            Err(e) => {
                eprintln!("[{}] syslog unavailable ({}), logging to stderr", process, e);
                Self::stderr(process)
            }
        }
    }

    pub fn stderr(process: &str) -> Self {
        Self {
            process: process.into(),
            logger: None,
        }
    }

    pub fn notice<M: Display>(&mut self, message: M) {
        match self.logger.as_mut() {
            Some(logger) => logger
                .info(&message)
                .unwrap_or_else(|e| eprintln!("Failed to send to syslog: {}", e)),
            None => eprintln!("[{}] {}", self.process, message),
        }
    }

    pub fn error<M: Display>(&mut self, message: M) {
        match self.logger.as_mut() {
            Some(logger) => logger
                .err(&message)
                .unwrap_or_else(|e| eprintln!("Failed to send to syslog: {}", e)),
            None => eprintln!("[{}] error: {}", self.process, message),
        }
    }
}
