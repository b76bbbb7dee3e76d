use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::*;
use crate::utils::time::Timestamp;

pub fn timestamp() -> Timestamp {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    let us = u64::from(duration.subsec_micros()) + duration.as_secs() * 1_000_000;
    Timestamp::from_micros(us)
}

/// Installs the process-wide logger. Records are printed as
/// `<timestamp> <LEVEL>: <message>` with the `info` level enabled unless
/// `RUST_LOG` says otherwise. Calling it again is harmless.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    let result = env_logger::Builder::from_env(env)
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Warn => "WARNING".to_owned(),
                v => v.to_string(),
            };

            writeln!(buf, "{} {}: {}", buf.timestamp(), level, record.args())
        })
        .try_init();

    if result.is_err() {
        debug!("Logger has been installed already.");
    }
}

/// Calls `advance` until it returns `Ok(false)` or an error.
pub fn run_forever<F>(mut advance: F) -> Result<()>
where
    F: FnMut() -> Result<bool> + 'static,
{
    while advance()? {}
    Ok(())
}
