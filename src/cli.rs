use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// QCS API client
///
/// Issues ad-hoc requests against the configured QCS server. The target
/// server is read from the config file (see `show-config`) or from
/// QCS_* environment variables; `--url` overrides both.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Use this base URL verbatim instead of resolving it from configuration.
    #[arg(long, global = true, help_heading = "Connection")]
    pub url: Option<String>,

    /// Skip the login round-trip and send unauthenticated requests.
    #[arg(long = "no-auth", global = true, help_heading = "Connection")]
    pub no_auth: bool,

    /// Return raw responses without status validation (Echo handler).
    /// Error responses are printed instead of failing the command.
    #[arg(long, global = true, help_heading = "Output")]
    pub raw: bool,

    /// Write logs to this file instead of the default location.
    #[arg(long = "log-file", global = true, help_heading = "Logging")]
    pub log_file: Option<String>,

    /// Also log to stderr, at debug level.
    #[arg(short, long, global = true, help_heading = "Logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the current configuration and its file location
    ShowConfig,
    /// Perform a login round-trip and report the issued token
    Login,
    /// Send a GET request to an endpoint under the base URL
    Get {
        /// Endpoint path, e.g. `scans/` or `credentials/hosts/`
        endpoint: String,
    },
    /// Send a POST request with a JSON body
    Post {
        endpoint: String,
        /// Request body as a JSON document
        payload: String,
    },
    /// Send a PUT request with a JSON body
    Put {
        endpoint: String,
        /// Request body as a JSON document
        payload: String,
    },
    /// Send a DELETE request to an endpoint under the base URL
    Delete { endpoint: String },
}
