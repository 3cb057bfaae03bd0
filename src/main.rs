use std::io;
use std::path::PathBuf;
use std::process;

use check_http_json::cmd::probe;
use check_http_json::domain::config::{KeyFlag, ProbeConfig};
use check_http_json::domain::error::ConfigError;
use check_http_json::domain::predicate::Operator;
use check_http_json::domain::report::NagiosStatus;
use check_http_json::io::reader;
use clap::error::ErrorKind;
use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "check_http_json",
    version,
    about = "Nagios probe that checks an HTTP response and its JSON body"
)]
struct Cli {
    /// Load settings from a TOML, YAML or JSON file; flags override it.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    http: HttpArgs,

    #[command(flatten)]
    checks: CheckArgs,

    /// Log request and response details to stderr.
    #[arg(short = 'v', long, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Args)]
#[command(next_help_heading = "HTTP Options")]
struct HttpArgs {
    /// Web server to query.
    #[arg(short = 'H', long)]
    hostname: Option<String>,

    /// URI to request. May contain `{{ env NAME }}` or
    /// `{{ isotime FORMAT }}`, where FORMAT uses strftime specifiers
    /// (eg. %Y-%m-%d), not Go reference layouts.
    #[arg(short = 'u', long)]
    uri: Option<String>,

    /// HTTP method (eg. GET, HEAD, POST).
    #[arg(short = 'j', long)]
    method: Option<String>,

    /// Request body: a file path, or `stdin`. Templates are expanded as
    /// for --uri; isotime takes strftime specifiers (eg. %Y-%m-%d).
    #[arg(short = 'P', long)]
    post: Option<String>,

    /// Basic HTTP auth (username:password).
    #[arg(short = 'a', long)]
    authorization: Option<String>,

    /// Use https.
    #[arg(short = 'S', long, default_value_t = false)]
    ssl: bool,

    /// Request header in name:value format.
    #[arg(short = 'k', long = "header")]
    headers: Vec<String>,

    /// Request timeout in seconds.
    #[arg(short = 't', long)]
    timeout: Option<u64>,
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Checks")]
struct CheckArgs {
    /// Expected numerical HTTP status (eg. 200).
    #[arg(short = 's', long)]
    status: Option<u16>,

    /// Response size range in min:max format.
    #[arg(short = 'm', long)]
    page_size: Option<String>,

    /// Response header pattern in name:regexp format.
    #[arg(short = 'd', long)]
    header_equals: Vec<String>,

    /// Regular expression the response body must match.
    #[arg(short = 'r', long)]
    regexp: Option<String>,

    /// JSON key that must exist anywhere in the response.
    #[arg(short = 'e', long)]
    key_exists: Vec<String>,

    /// JSON key whose value must match a regexp (key:regexp).
    #[arg(short = 'q', long)]
    key_equals: Vec<String>,

    /// JSON key whose value must be at most a number (key:number).
    #[arg(short = 'l', long)]
    key_lte: Vec<String>,

    /// JSON key whose value must be at least a number (key:number).
    #[arg(short = 'g', long)]
    key_gte: Vec<String>,
}

impl Cli {
    /// Converts parsed flags into a config. `matches` supplies the argv
    /// positions that interleave the `--key-*` flags in the order given.
    fn into_config(self, matches: &ArgMatches) -> ProbeConfig {
        let Cli {
            http,
            checks,
            verbose,
            ..
        } = self;
        let key_flags = ordered_key_flags(
            matches,
            [
                ("key_exists", Operator::Exists, checks.key_exists),
                ("key_equals", Operator::Equals, checks.key_equals),
                ("key_lte", Operator::LessOrEqual, checks.key_lte),
                ("key_gte", Operator::GreaterOrEqual, checks.key_gte),
            ],
        );
        ProbeConfig {
            hostname: http.hostname,
            uri: http.uri,
            method: http.method,
            post: http.post,
            authorization: http.authorization,
            ssl: http.ssl.then_some(true),
            headers: http.headers,
            timeout: http.timeout,
            verbose: verbose.then_some(true),
            status: checks.status,
            page_size: checks.page_size,
            header_equals: checks.header_equals,
            regexp: checks.regexp,
            key_flags,
            ..ProbeConfig::default()
        }
    }
}

fn ordered_key_flags(
    matches: &ArgMatches,
    groups: [(&str, Operator, Vec<String>); 4],
) -> Vec<KeyFlag> {
    let mut indexed = Vec::new();
    for (id, operator, values) in groups {
        let indices = matches.indices_of(id).into_iter().flatten();
        indexed.extend(
            indices
                .zip(values)
                .map(|(index, value)| (index, KeyFlag::new(operator, value))),
        );
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, flag)| flag).collect()
}

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let matches = match Cli::command().try_get_matches() {
        Ok(matches) => matches,
        Err(error) => return handle_parse_error(error),
    };
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };

    let config = match load_config(cli, &matches) {
        Ok(config) => config,
        Err(error) => return emit(NagiosStatus::Critical, &error.to_string()),
    };
    init_logging(config.verbose());

    let stdin = io::stdin();
    let response = probe::run_with_stdin(&config, stdin.lock());
    println!("{}", response.line());
    response.exit_code()
}

fn load_config(cli: Cli, matches: &ArgMatches) -> Result<ProbeConfig, ConfigError> {
    let file_config = match cli.config.as_deref() {
        Some(path) => reader::read_config(path).map_err(|source| ConfigError::ConfigFile {
            path: path.display().to_string(),
            source,
        })?,
        None => ProbeConfig::default(),
    };
    Ok(file_config.merge(cli.into_config(matches)))
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "check_http_json=debug"
    } else {
        "warn"
    };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn handle_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{error}");
            0
        }
        kind => {
            eprint!("{error}");
            emit(
                NagiosStatus::Unknown,
                kind.as_str().unwrap_or("invalid command line"),
            )
        }
    }
}

fn emit(status: NagiosStatus, message: &str) -> i32 {
    println!("{status}: {message}");
    status.exit_code()
}
