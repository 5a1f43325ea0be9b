//! gestured - Gesture Daemon
//!
//! Entry point for gestured. Supports two event sources:
//! - **libinput**: live touchpad, touchscreen and switch events from a udev seat
//! - **replay**: a recorded session in JSON lines, for testing bindings
//!
//! Run with `--help` to see available options.

use std::path::PathBuf;

use gestured::backend::{self, replay::ReplaySource, EventSource};
use gestured::command::ShellRunner;
use gestured::config::load_config;
use gestured::GestureState;

static USAGE: &[&str] = &[
    "USAGE: gestured [OPTIONS] (--libinput | --replay FILE)",
    "",
    "Event sources:",
    #[cfg(feature = "libinput")]
    "\t--libinput : Read live events from libinput (needs access to /dev/input).",
    #[cfg(feature = "libinput")]
    "\t             --seat NAME : udev seat to watch (default: seat0)",
    "\t--replay FILE : Replay events recorded as JSON lines.",
    "",
    "Options:",
    "\t--config PATH : Config file (default: $GESTURED_CONFIG_FILE or ~/.config/gestured/config)",
    "\t--dry-run : Log bound commands instead of running them.",
    "\t-v, --verbose : Log at debug level unless RUST_LOG says otherwise.",
    "\t-h, --help : Show this message.",
];

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    replay: Option<PathBuf>,
    libinput: bool,
    seat: Option<String>,
    dry_run: bool,
    verbose: bool,
    help: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = ::std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--replay" => {
                let path = iter.next().ok_or("--replay needs a file")?;
                args.replay = Some(PathBuf::from(path));
            }
            "--seat" => {
                args.seat = Some(iter.next().ok_or("--seat needs a name")?);
            }
            "--libinput" => args.libinput = true,
            "--dry-run" => args.dry_run = true,
            "-v" | "--verbose" => args.verbose = true,
            "-h" | "--help" => args.help = true,
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    if args.libinput && args.replay.is_some() {
        return Err("--libinput and --replay are mutually exclusive".into());
    }
    Ok(args)
}

#[allow(clippy::disallowed_macros)]
fn print_usage() {
    for line in USAGE {
        println!("{line}");
    }
}

fn init_logging(verbose: bool) {
    if let Ok(env_filter) = tracing_subscriber::EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .init();
    } else if verbose {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .init();
    } else {
        tracing_subscriber::fmt().compact().init();
    }
}

fn open_source(args: &Args) -> gestured::GesturedResult<Box<dyn EventSource>> {
    if let Some(path) = &args.replay {
        return Ok(Box::new(ReplaySource::open(path)?));
    }

    #[cfg(feature = "libinput")]
    {
        let seat = args.seat.as_deref().unwrap_or("seat0");
        tracing::info!("Starting gestured on libinput seat {seat}");
        Ok(Box::new(backend::libinput::LibinputSource::new(seat)?))
    }
    #[cfg(not(feature = "libinput"))]
    {
        Err(gestured::GesturedError::Backend(
            "gestured was built without libinput support, use --replay".into(),
        ))
    }
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            std::process::exit(2);
        }
    };
    if args.help || (!args.libinput && args.replay.is_none()) {
        print_usage();
        return;
    }

    init_logging(args.verbose);

    #[cfg(feature = "profile-with-tracy")]
    profiling::tracy_client::Client::start();

    profiling::register_thread!("Main Thread");

    #[cfg(feature = "profile-with-puffin")]
    let _server =
        match puffin_http::Server::new(&format!("0.0.0.0:{}", puffin_http::DEFAULT_PORT)) {
            Ok(server) => Some(server),
            Err(e) => {
                tracing::error!("Failed to start puffin profiling server: {e}");
                None
            }
        };
    #[cfg(feature = "profile-with-puffin")]
    profiling::puffin::set_scopes_on(true);

    let config = load_config(args.config.as_deref());
    let settings = config.settings.clone();

    let mut source = match open_source(&args) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("Failed to open event source: {e}");
            std::process::exit(1);
        }
    };

    let runner = ShellRunner::new(config).with_dry_run(args.dry_run);
    let mut state = match GestureState::new(settings, source.devices(), runner) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Fatal error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = backend::run(source.as_mut(), &mut state) {
        tracing::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
