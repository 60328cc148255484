use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;

use std::path::PathBuf;

use tagterm::config::{MANIFEST_ENV, VERBOSE_ENV};
use tagterm::color::render;
use tagterm::{
    format_url, is_error, logger, Config, ErrorSlot, HostInfo, Payload, ProjectInfo, Terminal,
    TerminalError, Verbosity,
};

/// inline color tags, host banners and a verbosity-gated log facade
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Verbosity: 0 silent, 1 single updating line, 2 full.
    #[arg(long, global = true, value_name = "LEVEL", env = VERBOSE_ENV)]
    verbose: Option<String>,

    /// Manifest to read the project name and version from.
    #[arg(long, global = true, value_name = "FILE", env = MANIFEST_ENV)]
    manifest: Option<PathBuf>,

    /// Disable ANSI colors (same as setting NO_COLOR).
    #[arg(long, global = true)]
    no_color: bool,

    /// Render `log` records at this level and above through the terminal.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render inline color tags
    Color { text: String },

    /// Normalise a host and optional port into a URL
    Url {
        host: String,
        port: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Exit 0 when the text looks like an error, 1 otherwise
    Check { text: String },

    /// Print the startup banner
    Start {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<String>,
        /// Print the banner fields as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Log a message (fail label when it looks like an error)
    Log {
        /// Treat the message as JSON
        #[arg(long)]
        json: bool,
        message: String,
    },

    /// Report a success
    Pass {
        /// Treat the message as JSON
        #[arg(long)]
        json: bool,
        message: String,
    },

    /// Route a message through a patched error sink and restore it
    Demo { message: String },
}

/// Banner fields in machine-readable form.
#[derive(Serialize)]
struct Banner {
    #[serde(flatten)]
    project: ProjectInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<HostInfo>,
}

fn print_json(value: &impl Serialize) -> Result<(), TerminalError> {
    let text = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{text}");
    Ok(())
}

fn payload(message: String, json: bool) -> Result<Payload, TerminalError> {
    if !json {
        return Ok(Payload::Text(message));
    }
    let value = serde_json::from_str(&message).map_err(std::io::Error::from)?;
    Ok(Payload::Structured(value))
}

fn main() -> Result<(), TerminalError> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    // Unparsable levels keep the default, as `set_verbose` does.
    if let Some(level) = cli.verbose.as_deref().and_then(Verbosity::parse) {
        config.verbosity = level;
    }
    if cli.manifest.is_some() {
        config.manifest = cli.manifest.clone();
    }
    if cli.no_color {
        config.color = false;
    }

    let color = config.color;
    let terminal = Terminal::new(config);

    if let Some(level) = cli.log_level {
        if let Err(err) = logger::init(terminal.clone(), level) {
            eprintln!("cannot install logger: {err}");
        }
    }

    match cli.command {
        Commands::Color { text } => println!("{}", render(&text, color)),
        Commands::Url { host, port, json } => {
            let info = format_url(&host, port.as_deref())?;
            if json {
                return print_json(&info);
            }
            println!("{}", info.url);
            if !info.port.is_empty() {
                println!("port {}", info.port);
            }
        }
        Commands::Check { text } => {
            let failed = is_error(&Payload::Text(text));
            println!("{failed}");
            if !failed {
                std::process::exit(1);
            }
        }
        Commands::Start {
            host,
            port,
            json: true,
        } => {
            terminal.load_project_info(None);
            let banner = Banner {
                project: terminal.project_info(),
                host: host.and_then(|host| format_url(&host, port.as_deref()).ok()),
            };
            print_json(&banner)?;
        }
        Commands::Start { host, port, .. } => terminal.start(host.as_deref(), port.as_deref())?,
        Commands::Log { json, message } => terminal.log(payload(message, json)?)?,
        Commands::Pass { json, message } => terminal.pass(payload(message, json)?)?,
        Commands::Demo { message } => {
            let mut slot = ErrorSlot::stderr();
            terminal.setup(&mut slot)?;
            slot.report(message.as_str());
            terminal.teardown(&mut slot);
            slot.report(format!("restored: {message}"));
        }
    }

    Ok(())
}
