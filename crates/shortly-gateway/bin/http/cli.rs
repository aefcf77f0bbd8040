use clap::{Parser, ValueEnum};
use shortly_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "SHORTLY_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "SHORTLY_PUBLIC_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "SHORTLY_STORAGE_BACKEND";
pub const DATA_DIR_ENV: &str = "SHORTLY_DATA_DIR";
pub const DEFAULT_VALIDITY_ENV: &str = "SHORTLY_DEFAULT_VALIDITY_MINUTES";
pub const CODE_LENGTH_ENV: &str = "SHORTLY_CODE_LENGTH";
pub const LOG_FORMAT_ENV: &str = "SHORTLY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "file")]
    File,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::File => write!(f, "file"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shortly", about = "URL shortener with click statistics")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Origin that short links are built from.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DATA_DIR_ENV, required_if_eq("storage", "file"))]
    pub data_dir: Option<PathBuf>,

    /// Validity applied when a row leaves it blank.
    #[arg(
        long,
        env = DEFAULT_VALIDITY_ENV,
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub default_validity_minutes: u32,

    /// Length of generated codes before collision escalation.
    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value_t = 6,
        value_parser = clap::value_parser!(u32).range(3..=40)
    )]
    pub code_length: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
