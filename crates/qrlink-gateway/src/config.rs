use clap::{Parser, Subcommand, ValueEnum};
use qrlink_qrcode::{EcLevel, QrSettings};
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const HOST_ENV: &str = "QRLINK_HOST";
pub const PORT_ENV: &str = "PORT";
pub const BASE_URL_ENV: &str = "QRLINK_BASE_URL";
pub const DATA_FILE_ENV: &str = "QRLINK_DATA_FILE";
pub const CODE_LENGTH_ENV: &str = "QRLINK_CODE_LENGTH";
pub const QR_EC_LEVEL_ENV: &str = "QRLINK_QR_EC_LEVEL";
pub const QR_WIDTH_ENV: &str = "QRLINK_QR_WIDTH";
pub const QR_MARGIN_ENV: &str = "QRLINK_QR_MARGIN";
pub const LOG_FORMAT_ENV: &str = "QRLINK_LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/qrcode";
pub const DEFAULT_DATA_FILE: &str = "qr_codes.json";
pub const DEFAULT_CODE_LENGTH: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EcLevelArg {
    #[value(name = "l")]
    L,
    #[value(name = "m")]
    M,
    #[value(name = "q")]
    Q,
    #[value(name = "h")]
    H,
}

impl From<EcLevelArg> for EcLevel {
    fn from(value: EcLevelArg) -> Self {
        match value {
            EcLevelArg::L => EcLevel::L,
            EcLevelArg::M => EcLevel::M,
            EcLevelArg::Q => EcLevel::Q,
            EcLevelArg::H => EcLevel::H,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Maintenance commands run directly against the data file, without serving.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the target URL of a short code. Does not count as a visit.
    Lookup { short_code: String },
    /// Point an existing short code at a new target URL.
    Update { short_code: String, new_url: String },
}

#[derive(Debug, Clone, Parser)]
#[command(name = "qrlink", version, about = "URL shortener that issues QR codes")]
pub struct Config {
    /// Serve the HTTP API when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(long, env = HOST_ENV, default_value = DEFAULT_HOST)]
    pub host: IpAddr,

    #[arg(long, env = PORT_ENV, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Public prefix of issued short URLs; the code is appended after a `/`.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// JSON document holding every short code.
    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value_t = DEFAULT_CODE_LENGTH,
        value_parser = clap::value_parser!(u16).range(1..=64),
    )]
    pub code_length: u16,

    #[arg(long, env = QR_EC_LEVEL_ENV, value_enum, default_value_t = EcLevelArg::H)]
    pub qr_ec_level: EcLevelArg,

    /// Side length of QR images in pixels.
    #[arg(long, env = QR_WIDTH_ENV, default_value_t = 300)]
    pub qr_width: u32,

    /// Light border around QR codes, in modules.
    #[arg(long, env = QR_MARGIN_ENV, default_value_t = 2)]
    pub qr_margin: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn qr_settings(&self) -> QrSettings {
        QrSettings::builder()
            .ec_level(self.qr_ec_level.into())
            .width(self.qr_width)
            .margin(self.qr_margin)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags() {
        let config = Config::try_parse_from([
            "qrlink",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--base-url",
            "https://qr.link",
            "--data-file",
            "/tmp/links.json",
            "--code-length",
            "8",
            "--qr-ec-level",
            "m",
            "--qr-width",
            "512",
            "--qr-margin",
            "4",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.listen_addr(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.base_url, "https://qr.link");
        assert_eq!(config.data_file, PathBuf::from("/tmp/links.json"));
        assert_eq!(config.code_length, 8);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.qr_settings(),
            QrSettings::builder()
                .ec_level(EcLevel::M)
                .width(512)
                .margin(4)
                .build()
        );
    }

    #[test]
    fn qr_defaults_match_the_encoder_defaults() {
        let config = Config::try_parse_from(["qrlink", "--port", "3000"]).unwrap();
        assert_eq!(config.qr_settings(), QrSettings::default());
    }

    #[test]
    fn serves_without_a_subcommand() {
        let config = Config::try_parse_from(["qrlink"]).unwrap();
        assert_eq!(config.command, None);
    }

    #[test]
    fn maintenance_subcommands() {
        let config = Config::try_parse_from([
            "qrlink",
            "--data-file",
            "/tmp/links.json",
            "update",
            "abc123",
            "https://newexample.com",
        ])
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/links.json"));
        assert_eq!(
            config.command,
            Some(Command::Update {
                short_code: "abc123".to_string(),
                new_url: "https://newexample.com".to_string(),
            })
        );

        let config = Config::try_parse_from(["qrlink", "lookup", "abc123"]).unwrap();
        assert_eq!(
            config.command,
            Some(Command::Lookup {
                short_code: "abc123".to_string()
            })
        );

        assert!(Config::try_parse_from(["qrlink", "update", "abc123"]).is_err());
    }

    #[test]
    fn code_length_out_of_range_is_rejected() {
        assert!(Config::try_parse_from(["qrlink", "--code-length", "0"]).is_err());
        assert!(Config::try_parse_from(["qrlink", "--code-length", "65"]).is_err());
    }
}
