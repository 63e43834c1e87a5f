// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use price_history_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_interval() {
        let err = CoreError::InvalidInterval {
            series_key: "Elko - SKU1 - price".into(),
            start: 200,
            end: 100,
        };
        assert_eq!(
            err.to_string(),
            "Invalid interval for Elko - SKU1 - price: start 200 is after end 100"
        );
    }

    #[test]
    fn empty_series() {
        assert_eq!(
            CoreError::EmptySeries.to_string(),
            "Cannot derive axis ticks from an empty series"
        );
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("bad range".into());
        assert_eq!(err.to_string(), "Validation failed: bad range");
    }

    #[test]
    fn config() {
        let err = CoreError::Config("y_axis_step must be positive".into());
        assert_eq!(err.to_string(), "Invalid configuration: y_axis_step must be positive");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            provider: "PriceApi".into(),
            message: "prices request failed with status 502".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (PriceApi): prices request failed with status 502"
        );
    }

    #[test]
    fn network() {
        let err = CoreError::Network("timeout".into());
        assert_eq!(err.to_string(), "Network error: timeout");
    }

    #[test]
    fn file_io_empty_message() {
        let err = CoreError::FileIO(String::new());
        assert_eq!(err.to_string(), "File I/O error: ");
    }

    #[test]
    fn serialization_pair() {
        assert_eq!(
            CoreError::Serialization("x".into()).to_string(),
            "Serialization error: x"
        );
        assert_eq!(
            CoreError::Deserialization("y".into()).to_string(),
            "Deserialization error: y"
        );
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.json missing");
        let err: CoreError = io.into();
        match err {
            CoreError::FileIO(msg) => assert!(msg.contains("settings.json missing")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates() {
        fn parse() -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str("[1,")?)
        }
        assert!(matches!(parse(), Err(CoreError::Deserialization(_))));
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&CoreError::EmptySeries);
    }
}
