use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{App, AppSettings, Arg, ArgMatches};
use tracing::{debug, Level};

use cli_wrapped::config::WrappedConfig;
use cli_wrapped::history::{self, HistorySource, ShellKind};
use cli_wrapped::report::{self, Report};
use cli_wrapped::stats::FrequencyTable;
use cli_wrapped::style::Palette;

fn validate_top(value: String) -> Result<(), String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(format!("expected a positive number, got '{}'", value)),
    }
}

fn build_cli() -> App<'static, 'static> {
    App::new("cli-wrapped")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Your shell history, wrapped: top commands, dev personality and a fun fact")
        .setting(AppSettings::ColoredHelp)
        .arg(Arg::with_name("file")
            .short("f")
            .long("file")
            .value_name("FILE")
            .help("Use specific history file")
            .takes_value(true))
        .arg(Arg::with_name("shell")
            .short("s")
            .long("shell")
            .value_name("SHELL")
            .help("History format to read")
            .possible_values(&["bash", "zsh", "fish"])
            .takes_value(true))
        .arg(Arg::with_name("top")
            .short("n")
            .long("top")
            .value_name("N")
            .help("How many top commands to show")
            .validator(validate_top)
            .takes_value(true))
        .arg(Arg::with_name("json")
            .short("j")
            .long("json")
            .help("Output in JSON format"))
        .arg(Arg::with_name("plain")
            .short("p")
            .long("plain")
            .help("No colors, banner or screen clearing"))
        .arg(Arg::with_name("no-fallback")
            .long("no-fallback")
            .help("Never ask the running shell for its session history"))
        .arg(Arg::with_name("save")
            .long("save")
            .help("Remember --shell, --top and --plain in ~/.cli-wrappedrc"))
        .arg(Arg::with_name("quiet")
            .short("q")
            .long("quiet")
            .help("Suppress non-essential output"))
        .arg(Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .help("Print debug diagnostics to stderr"))
        .after_help("EXAMPLES:\n  cli-wrapped                      # Full wrapped report\n  cli-wrapped -n 10                # Show the top 10 commands\n  cli-wrapped -j                   # JSON report\n  cli-wrapped -f ~/.zsh_history    # Analyze a specific file")
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

/// Command-line flags layered over the rc file (or the defaults).
fn effective_config(matches: &ArgMatches, base: &WrappedConfig) -> WrappedConfig {
    let mut config = base.clone();
    if let Some(shell) = matches.value_of("shell").and_then(|s| s.parse().ok()) {
        config.shell = Some(shell);
    }
    if let Some(top) = matches.value_of("top").and_then(|n| n.parse().ok()) {
        config.top = top;
    }
    if matches.is_present("plain") {
        config.plain = true;
    }
    if matches.is_present("no-fallback") {
        config.fallback = false;
    }
    config
}

/// What `--save` persists: shell, top and plain from this run, the rest
/// as it already was.
fn config_to_save(effective: &WrappedConfig, base: &WrappedConfig) -> WrappedConfig {
    WrappedConfig {
        fallback: base.fallback,
        ..effective.clone()
    }
}

/// `--shell` (already folded into `config`) beats the rc file, which beats
/// guessing from the file name.
fn resolve_source(matches: &ArgMatches, config: &WrappedConfig) -> HistorySource {
    match matches.value_of("file") {
        Some(file) => {
            let path = PathBuf::from(file);
            let shell = config
                .shell
                .unwrap_or_else(|| ShellKind::guess_from_path(&path));
            HistorySource::new(path, shell)
        }
        None => {
            let shell_env = env::var("SHELL").ok();
            history::locate(&history::home_dir(), config.shell, shell_env.as_deref())
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let matches = build_cli().get_matches();
    init_logging(matches.is_present("verbose"));

    let base = WrappedConfig::load().unwrap_or_default();
    let config = effective_config(&matches, &base);
    debug!(?config, "effective config");

    if matches.is_present("save") {
        match config_to_save(&config, &base).save() {
            Ok(path) => eprintln!("Configuration saved to {}", path.display()),
            Err(e) => eprintln!("Could not save configuration: {}", e),
        }
    }

    let json = matches.is_present("json");
    if !json && !matches.is_present("quiet") {
        eprintln!("Analyzing your command history...");
    }

    let source = resolve_source(&matches, &config);
    let commands = if config.fallback {
        history::read_history(&source)
    } else {
        history::read_history_or_else(&source, Vec::new)
    };

    let table = FrequencyTable::from_commands(&commands);
    let report = Report::build(&table, source.shell, config.top, &mut rand::thread_rng());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        report::render_json(&mut out, &report)?;
    } else {
        let palette = Palette::for_stdout(config.plain);
        if !palette.is_plain() {
            report::render_banner(&mut out, &palette)?;
        }
        report::render(&mut out, &report, &palette)?;
    }
    out.flush()?;

    Ok(())
}
