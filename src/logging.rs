use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Progress goes to stderr at `info`; `--verbose` adds `debug`. `RUST_LOG`
/// overrides both.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    Builder::new()
        .filter_level(default_level)
        .parse_env(Env::default())
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .init();
}
