use clopt::{HelpLayout, Opt, Registry};

/// Positional inputs accepted after the options.
const MAX_INPUTS: usize = 8;

const HEADER: &str = "Exercise the clopt option parser: parse the command line, then print\n\
every option value and the positional arguments.\n";

#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    #[error(transparent)]
    Cmdline(#[from] clopt::Error),

    #[error("too many command line arguments ({count}, at most {max})")]
    TooManyInputs { count: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub help: bool,
    pub count: i64,
    pub ratio: f64,
    pub verbose: bool,
    pub color: bool,
    pub name: String,
    pub inputs: Vec<String>,
}

/// A parsed command line: the registry for reporting, the typed view for use.
pub struct Invocation {
    pub registry: Registry,
    pub settings: Settings,
}

fn build_registry() -> Registry {
    let mut reg = Registry::new();
    reg.define(Opt::flag("help").short('h').description("Show this help and exit."));
    reg.define(
        Opt::integer("count", 1)
            .range(0, 10)
            .short('c')
            .description("Number of repetitions.")
            .show_default(),
    );
    reg.define(
        Opt::real("ratio", 0.5)
            .range(0.0, 1.0)
            .short('r')
            .description("Blend ratio between 0 and 1.")
            .show_default(),
    );
    reg.define(Opt::flag("verbose").short('v').description("Report every step."));
    reg.define(
        Opt::logical("color", true)
            .description("Colorize output. Accepts T, F, TRUE, FALSE, .TRUE. or .FALSE.")
            .show_default(),
    );
    reg.define(
        Opt::string("name", "x")
            .short('n')
            .description("Label for the run.\nQuote it to keep surrounding spaces.")
            .show_default(),
    );
    reg
}

pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation, ArgsError> {
    let mut registry = build_registry();
    registry.process_command_line(args)?;

    // --help wins over everything that could still be wrong.
    if registry.get_logical("help") {
        let settings = settings_from(&registry);
        return Ok(Invocation { registry, settings });
    }

    registry.check_required_options()?;
    if registry.num_args() > MAX_INPUTS {
        return Err(ArgsError::TooManyInputs {
            count: registry.num_args(),
            max: MAX_INPUTS,
        });
    }

    let settings = settings_from(&registry);
    Ok(Invocation { registry, settings })
}

fn settings_from(reg: &Registry) -> Settings {
    Settings {
        help: reg.get_logical("help"),
        count: reg.get_integer("count"),
        ratio: reg.get_real("ratio"),
        verbose: reg.get_logical("verbose"),
        color: reg.get_logical("color"),
        name: reg.get_string("name").to_string(),
        inputs: reg.args().to_vec(),
    }
}

pub fn write_help<W: std::io::Write>(out: &mut W, reg: &Registry) -> std::io::Result<()> {
    reg.print_usage(out, "clopt-probe", &HelpLayout::default())?;
    write!(out, "{}\nOptions:\n", HEADER)?;
    reg.print_options(out)
}
