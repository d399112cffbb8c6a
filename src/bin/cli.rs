//! mcpickle CLI Client
//!
//! Command-line interface for reading and writing pylibmc-compatible values.

use clap::{Parser, Subcommand};
use mcpickle::ring::HashKind;
use mcpickle::{Client, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// mcpickle CLI
#[derive(Parser, Debug)]
#[command(name = "mcpickle-cli")]
#[command(about = "Read and write pylibmc-compatible values on a memcached cluster")]
#[command(version)]
struct Args {
    /// Comma separated host:port list
    #[arg(short, long, default_value = "127.0.0.1:11211", value_delimiter = ',')]
    servers: Vec<String>,

    /// Ring hash function (jenkins, fnv1a)
    #[arg(long, default_value = "jenkins")]
    hash: HashKind,

    /// Ring points per server
    #[arg(long, default_value = "100")]
    points: usize,

    /// Read/write timeout in milliseconds
    #[arg(short, long, default_value = "1000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a string (plain or pickled unicode)
    GetString { key: String },

    /// Get a 64-bit integer
    GetInt { key: String },

    /// Get a boolean
    GetBool { key: String },

    /// Set a plain string
    SetString { key: String, value: String },

    /// Set a string as a pickled unicode object
    SetUnicode { key: String, value: String },

    /// Set a 64-bit integer
    SetInt {
        key: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Set a boolean
    SetBool {
        key: String,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },

    /// Print the server that owns a key
    Locate { key: String },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mcpickle=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .servers(args.servers)
        .hash(args.hash)
        .points_per_server(args.points)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    let client = match Client::connect(config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to build client: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(code) = run(&client, args.command) {
        std::process::exit(code);
    }
}

/// Execute one subcommand; `Err` carries the process exit code
fn run(client: &Client<mcpickle::network::TcpStore>, command: Commands) -> Result<(), i32> {
    match command {
        Commands::GetString { key } => print_or_miss(client.get_string(&key)),
        Commands::GetInt { key } => print_or_miss(client.get_int64(&key)),
        Commands::GetBool { key } => print_or_miss(client.get_bool(&key)),
        Commands::SetString { key, value } => report(client.set_string(&key, &value)),
        Commands::SetUnicode { key, value } => report(client.set_unicode(&key, &value)),
        Commands::SetInt { key, value } => report(client.set_int64(&key, value)),
        Commands::SetBool { key, value } => report(client.set_bool(&key, value)),
        Commands::Locate { key } => {
            let ring = client.ring();
            println!("{} (hash {:#010x})", ring.pick_node(&key), ring.hash_key(&key));
            Ok(())
        }
    }
}

fn print_or_miss<T: std::fmt::Display>(value: Option<T>) -> Result<(), i32> {
    match value {
        Some(v) => {
            println!("{}", v);
            Ok(())
        }
        None => {
            eprintln!("(miss)");
            Err(2)
        }
    }
}

fn report(result: mcpickle::Result<()>) -> Result<(), i32> {
    match result {
        Ok(()) => {
            println!("STORED");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Set failed: {}", e);
            Err(1)
        }
    }
}
