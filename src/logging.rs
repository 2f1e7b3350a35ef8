use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Unknown values fall back to JSON.
    pub fn parse(format: &str) -> Self {
        match format.to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" | "compact" | "text" => Self::Pretty,
            _ => {
                eprintln!(
                    "WARN: Invalid log format '{}', defaulting to 'json'. Valid options: json, pretty",
                    format
                );
                Self::Json
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init(log_format: &str, log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let format = LogFormat::parse(log_format);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339()),
            )
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .init(),
    }

    tracing::debug!(
        log_format = format.as_str(),
        log_level = log_level,
        "Logging system initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_formats() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("text"), LogFormat::Pretty);
    }

    #[test]
    fn test_parse_unknown_defaults_to_json() {
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Json);
        assert_eq!(LogFormat::parse(""), LogFormat::Json);
    }
}
