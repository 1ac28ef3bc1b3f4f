//! Leap-second announcement lookup tool
//!
//! Queries the published announcement, decodes addresses given on the
//! command line, encodes new announcements and checks the reference vectors.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

use leapsec_dns::network::AnnouncementResolver;
use leapsec_dns::protocol::{self, TEST_VECTORS};
use leapsec_dns::{time, Announcement, Config, Delta, Error, Result};

/// Leap-second announcements over DNS
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up and decode the published announcement
    Query {
        /// Name to query instead of the configured one
        #[arg(long)]
        fqdn: Option<String>,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Decode dotted-quad addresses
    Decode {
        /// Addresses to decode
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// Encode an announcement into its address
    Encode {
        /// Year of the horizon month
        #[arg(long)]
        year: i32,

        /// Horizon month (1-12)
        #[arg(long)]
        month: u32,

        /// Seconds UTC trails TAI until the horizon month ends
        #[arg(long)]
        dtai: u32,

        /// Change applied at the end of the month (-1, 0, 1)
        #[arg(long, default_value = "0", allow_negative_numbers = true,
              value_parser = clap::value_parser!(i32).range(-1..=1))]
        delta: i32,
    },

    /// Verify the decoder against the reference vectors
    Check,
}

fn print_decoded(address: &str, result: &std::result::Result<Announcement, Error>) {
    match result {
        Ok(ann) => println!("  IP: {:<15}  Error: {:2}  {}", address, 0, ann),
        Err(e) => {
            let code = e.as_decode().map(|kind| kind.code()).unwrap_or(-1);
            println!("  IP: {:<15}  Error: {:2}  ({})", address, code, e);
        }
    }
}

fn check() -> bool {
    println!("Checking test-vectors:\n");

    let mut ok = true;
    for tv in TEST_VECTORS {
        let result = protocol::decode_address(tv.address);
        print_decoded(tv.address, &result);

        let matches = match (&result, &tv.expected) {
            (Ok(got), Ok(want)) => got == want,
            (Err(got), Err(want)) => got.as_decode() == Some(*want),
            _ => false,
        };
        if !matches {
            error!(address = tv.address, "Test vector mismatch");
            ok = false;
        }
    }

    if ok {
        println!("\nIf you see this, the tests ran OK");
    }
    ok
}

async fn query(fqdn: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            info!("Configuration file: {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };
    if let Some(fqdn) = fqdn {
        config.fqdn = fqdn;
    }

    println!("Querying currently published leapsecond announcement:\n");

    let resolver = AnnouncementResolver::new(config)?;
    let lookup = resolver.query().await?;
    let ann = lookup.announcement;

    print_decoded(&lookup.address.to_string(), &Ok(ann));

    println!("\nThat means:\n");
    println!(
        "   Information is valid until end of UTC-month {} of year {}",
        ann.month, ann.year
    );
    if let Some(expiry) = time::expires_at(&ann) {
        debug!(%expiry, "Announcement expiry");
    }
    println!("   After that month: UTC = TAI - {} seconds", ann.dtai_after());
    println!("   Until then:       UTC = TAI - {} seconds", ann.dtai);

    Ok(())
}

fn encode(year: i32, month: u32, dtai: u32, delta: i32) -> Result<()> {
    let delta = match delta {
        -1 => Delta::Decrement,
        1 => Delta::Increment,
        _ => Delta::Unchanged,
    };

    let raw = protocol::encode(&Announcement::new(year, month, dtai, delta))?;
    println!("{}", std::net::Ipv4Addr::from(raw));
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let result = match args.command.unwrap_or(Command::Query {
        fqdn: None,
        config: None,
    }) {
        Command::Query { fqdn, config } => query(fqdn, config).await,
        Command::Decode { addresses } => {
            let mut failed = false;
            for address in &addresses {
                let result = protocol::decode_address(address);
                failed |= result.is_err();
                print_decoded(address, &result);
            }
            if failed {
                return ExitCode::FAILURE;
            }
            Ok(())
        }
        Command::Encode {
            year,
            month,
            dtai,
            delta,
        } => encode(year, month, dtai, delta),
        Command::Check => {
            return if check() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Failed with error: {}", e);
            ExitCode::FAILURE
        }
    }
}
