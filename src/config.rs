use crate::core::constants::MAX_PARTICIPANTS;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

/// Local Hardhat deployment address of the bill contract.
const DEFAULT_POT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    /// Creditor address for bills whose shares are collected by the bill itself.
    pub pot_address: String,
    pub max_participants: usize,
    pub request_timeout_secs: u64,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(3000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            pot_address: env::var("POT_ADDRESS").unwrap_or_else(|_| DEFAULT_POT_ADDRESS.to_string()),
            max_participants: env::var("MAX_PARTICIPANTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n >= 2)
                .unwrap_or(MAX_PARTICIPANTS),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
