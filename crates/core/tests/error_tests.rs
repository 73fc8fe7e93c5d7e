// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use pbr_chart_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: "timeout".into(),
        };
        assert_eq!(err.to_string(), "API error (Yahoo Finance): timeout");
    }

    #[test]
    fn empty_price_history() {
        let err = CoreError::EmptyPriceHistory {
            ticker: "9107.T".into(),
        };
        assert_eq!(err.to_string(), "No price history available for 9107.T");
    }

    #[test]
    fn exchange_rate_unavailable_names_both_pairs() {
        let err = CoreError::ExchangeRateUnavailable {
            direct: "JPYUSD=X".into(),
            inverse: "USDJPY=X".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("JPYUSD=X"));
        assert!(msg.contains("USDJPY=X"));
    }

    #[test]
    fn empty_conversion_series() {
        let err = CoreError::EmptyConversionSeries;
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("bad code".into());
        assert_eq!(err.to_string(), "Validation failed: bad code");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("oops".into());
        assert_eq!(err.to_string(), "Serialization error: oops");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("eof".into());
        assert_eq!(err.to_string(), "Deserialization error: eof");
    }

    #[test]
    fn render() {
        let err = CoreError::Render("broken pipe".into());
        assert_eq!(err.to_string(), "Render error: broken pipe");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: CoreError = io_err.into();
        match err {
            CoreError::Render(msg) => assert!(msg.contains("pipe closed")),
            other => panic!("Expected Render error, got {:?}", other),
        }
    }

    #[test]
    fn question_mark_propagates_io_error() {
        fn write_fails() -> Result<(), CoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))?;
            Ok(())
        }
        assert!(matches!(write_fails(), Err(CoreError::Render(_))));
    }
}

// ── Trait bounds ────────────────────────────────────────────────────

mod traits {
    use super::*;

    #[test]
    fn core_error_is_std_error_send_sync() {
        fn assert_bounds<T: std::error::Error + Send + Sync + 'static>() {}
        assert_bounds::<CoreError>();
    }
}
