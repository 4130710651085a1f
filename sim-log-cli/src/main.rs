//! Simulation Event Logger CLI
//!
//! Command-line logger for simulation telemetry: joins a UDP multicast
//! group, dispatches each datagram through the sim-log-decoder library and
//! writes normalized events as text lines. On top of the library it adds:
//! - Multicast socket setup (IPv4/IPv6)
//! - The text log sink (stdout or file)
//! - The cancellable delayed-shutdown timer
//! - TOML configuration for network settings and extra subtype labels

use anyhow::{Context, Result};
use clap::Parser;
use sim_log_decoder::{DispatchOutcome, Dispatcher, DispatcherConfig, EventKind, SubtypeRegistry};
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

mod config;
mod net;
mod shutdown;
mod sink;

/// Grace period between the simulation-end message and process exit
const SHUTDOWN_DELAY: Duration = Duration::from_secs(5);

/// Simulation Event Logger - log events coming from a simulation multicast group
#[derive(Parser, Debug)]
#[command(name = "sim-log-cli")]
#[command(about = "Log events coming from a simulation multicast group", long_about = None)]
#[command(version)]
struct Args {
    /// IP address of the multicast group
    #[arg(short, long, default_value = "224.1.1.1")]
    address: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 10000)]
    port: u16,

    /// Output file for the event log (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    log::info!("Simulation Event Logger v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", sim_log_decoder::VERSION);

    let app_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::AppConfig::default(),
    };

    // Config file values win over command-line defaults.
    let address = app_config.network.address.unwrap_or(args.address);
    let port = app_config.network.port.unwrap_or(args.port);

    let mut registry = SubtypeRegistry::with_defaults();
    for entry in &app_config.subtypes {
        match EventKind::from_code(entry.kind) {
            Some(kind) => registry.insert(kind, entry.code, entry.label.clone()),
            None => log::warn!("config names unknown message kind {}, skipping", entry.kind),
        }
    }

    let mut sink = match &args.output {
        Some(path) => sink::TextSink::to_file(path, &registry)
            .with_context(|| format!("Failed to open output file: {:?}", path))?,
        None => sink::TextSink::stdout(&registry),
    };

    let dispatcher = Dispatcher::new(
        registry,
        DispatcherConfig::new().with_ignored_logging(args.verbose > 1),
    );

    let socket = net::multicast_listener(address, port)
        .with_context(|| format!("Failed to join multicast group {}:{}", address, port))?;
    log::info!("listening on {}:{} (hit CTRL+C to exit)", address, port);

    receive_loop(&socket, &dispatcher, &mut sink)
}

/// Blocking read loop: one datagram is read, dispatched and fully
/// processed before the next read. A transport error is fatal; everything
/// else keeps the loop running.
fn receive_loop(
    socket: &std::net::UdpSocket,
    dispatcher: &Dispatcher,
    sink: &mut sink::TextSink,
) -> Result<()> {
    let mut pending_shutdown: Option<shutdown::ShutdownTimer> = None;
    let mut buf = [0u8; 65535];

    loop {
        let (len, _addr) = socket
            .recv_from(&mut buf)
            .context("receive loop transport failure")?;
        log::trace!("received {} bytes", len);

        match dispatcher.dispatch(&buf[..len]) {
            Ok(event) => sink.record(&event, dispatcher.registry()),
            Err(DispatchOutcome::ShutdownRequested) => {
                log::info!(
                    "received simulation end message, shutting down in {} seconds",
                    SHUTDOWN_DELAY.as_secs()
                );
                // A repeated end message re-arms the timer from scratch.
                if let Some(timer) = pending_shutdown.take() {
                    timer.cancel();
                }
                pending_shutdown = Some(shutdown::ShutdownTimer::arm(SHUTDOWN_DELAY, || {
                    log::info!("logger is now exiting");
                    std::process::exit(0);
                }));
            }
            Err(DispatchOutcome::Ignored) => {}
            Err(DispatchOutcome::ParseFailed(kind)) => {
                log::debug!("dropped malformed {} message", kind);
            }
        }
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
