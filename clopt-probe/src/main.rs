use std::io::{self, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

mod arguments;

fn run(out: &mut impl Write, inv: &arguments::Invocation) -> io::Result<()> {
    if inv.settings.help {
        return arguments::write_help(out, &inv.registry);
    }
    inv.registry.print_option_values(out)?;
    inv.registry.print_args(out)?;
    out.flush()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let inv = match arguments::parse_args(&args) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("clopt-probe: {}", e);
            eprintln!("Try 'clopt-probe --help' for more information.");
            return ExitCode::from(2);
        }
    };
    tracing::info!(settings = ?inv.settings, "parsed command line");

    let stdout = io::stdout();
    if let Err(e) = run(&mut stdout.lock(), &inv) {
        eprintln!("clopt-probe: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
