//! gmux CLI - declarative session manager for tmux
//!
//! Binary name: `gmux`

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]

use std::{fs::File, process, sync::Mutex};

mod cli;

use cli::{
    handlers::{format_error, run_cli},
    options::{describe, parse, Parsed},
};
use gmux_core::{config, PathResolver};
use tracing_subscriber::EnvFilter;

fn main() {
    let invocation = match parse(std::env::args().skip(1)) {
        Ok(Parsed::Run(invocation)) => invocation,
        Ok(Parsed::Usage) => {
            println!("{}", cli::build_cli().render_long_help());
            #[allow(clippy::exit)]
            process::exit(0);
        }
        Ok(Parsed::Help(help)) => {
            let code = match help.print() {
                Ok(()) => 0,
                Err(e) => {
                    #[allow(clippy::print_stderr)]
                    {
                        eprintln!("Cannot print help: {e}");
                    }
                    1
                }
            };
            #[allow(clippy::exit)]
            process::exit(code);
        }
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Cannot parse command line options: {:?}", describe(&err));
            }
            #[allow(clippy::exit)]
            process::exit(1);
        }
    };

    let paths = PathResolver::from_env();
    init_logging(invocation.debug, &paths);

    if let Err(err) = run_cli(&invocation, &paths) {
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Error: {}", format_error(&err));
        }

        let code = err
            .downcast_ref::<gmux_core::Error>()
            .map_or(1, gmux_core::Error::exit_code);

        #[allow(clippy::exit)]
        process::exit(code);
    }
}

/// Log to stderr at `warn`, or every command to the debug log with `--debug`.
fn init_logging(debug: bool, paths: &PathResolver) {
    if debug {
        match open_log_file(paths) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_env_filter(EnvFilter::new("debug"))
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .init();
                return;
            }
            Err(e) => {
                #[allow(clippy::print_stderr)]
                {
                    eprintln!("Cannot open debug log: {e}");
                }
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_log_file(paths: &PathResolver) -> std::io::Result<File> {
    let path = config::log_path(paths).ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
    })?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    File::create(path)
}
