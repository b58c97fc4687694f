use std::env;
use std::net::SocketAddrV4;
use std::path::PathBuf;
use std::str::FromStr;
use anyhow::{anyhow, Context};
use crate::server::lifecycle::status::WrapPolicy;

const DEFAULT_HOST_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_TABLE_COUNT: u16 = 9;

/// Server configs
#[derive(Debug)]
pub(crate) struct ServerConfig {
    pub addr: SocketAddrV4,
    /// tables seeded at startup, numbered from 1
    pub table_count: u16,
    pub wrap_policy: WrapPolicy,
    /// JSON snapshot of tables, orders and menu; in-memory only when unset
    pub data_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn new(addr: SocketAddrV4, table_count: u16, wrap_policy: WrapPolicy, data_file: Option<PathBuf>) -> Self {
        Self {
            addr,
            table_count,
            wrap_policy,
            data_file,
        }
    }

    /// Reads `HOST`, `TABLE_COUNT`, `ORDER_STATUS_WRAP` and `DATA_FILE`, falling back to defaults when absent.
    pub fn from_env() -> anyhow::Result<Self> {
        let addr = SocketAddrV4::from_str(
            env::var("HOST")
                .unwrap_or(DEFAULT_HOST_ADDR.to_string())
                .as_str(),
        )
        .context("failed to parse HOST")?;
        let table_count = match env::var("TABLE_COUNT") {
            Ok(v) => v.parse().context("failed to parse TABLE_COUNT")?,
            Err(_) => DEFAULT_TABLE_COUNT,
        };
        let wrap_policy = match env::var("ORDER_STATUS_WRAP") {
            Ok(v) => v.parse().map_err(|e: String| anyhow!(e))?,
            Err(_) => WrapPolicy::default(),
        };
        let data_file = env::var("DATA_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self::new(addr, table_count, wrap_policy, data_file))
    }
}
