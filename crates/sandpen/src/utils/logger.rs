use log::Level;
use std::io::Write;

/// Set up `env_logger` for the CLI; `RUST_LOG` still takes precedence
pub fn init_logger(quiet: bool, verbose: u8) {
    let level = if quiet {
        Level::Error
    } else if verbose == 0 {
        Level::Info
    } else if verbose == 1 {
        Level::Debug
    } else {
        Level::Trace
    };

    let mut builder = env_logger::builder();

    if level == Level::Trace {
        builder.filter_level(level.to_level_filter());
    } else {
        for module in ["sandpen", "sandpen_core", "sandpen_config", "sandpen_runtime", "sandpen_format"] {
            builder.filter_module(module, level.to_level_filter());
        }
    }

    if level <= Level::Info {
        builder.format(|buf, record| {
            if record.level() == Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                let log_style = buf.default_level_style(record.level());
                writeln!(
                    buf,
                    "{log_style}[{}]{log_style:#} {}",
                    record.level(),
                    record.args()
                )
            }
        });
    }

    builder.parse_default_env();
    let _ = builder.try_init();
}
