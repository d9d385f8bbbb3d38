use base64ct::{Base64UrlUnpadded, Encoding};
use sha2::{Digest, Sha256};

pub mod codegen;
pub mod config;
pub mod manifest;

pub use codegen::CodeGen;
pub use config::GenConfig;
pub use manifest::Manifest;

pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

pub fn init_logger_verbose() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp_secs()
        .init();
}

/// Digest of generated text, used to check that regeneration is byte-stable.
pub fn sha256(s: &str) -> String {
    Base64UrlUnpadded::encode_string(&Sha256::digest(s.as_bytes()))
}
