#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use feather_ingest::cli;

#[test]
fn absent_argument_is_none() {
    assert_eq!(cli::parse_ms_arg(None).unwrap(), None);
    assert_eq!(cli::work_delay_ms(None), None);
    assert_eq!(cli::deadline(None), None);
}

#[test]
fn parses_integers() {
    assert_eq!(cli::parse_ms_arg(Some("50")).unwrap(), Some(50));
    assert_eq!(cli::parse_ms_arg(Some("-1")).unwrap(), Some(-1));
    assert_eq!(cli::parse_ms_arg(Some(" 7 ")).unwrap(), Some(7));
}

#[test]
fn rejects_non_integers() {
    for bad in ["abc", "1.5", "", "10ms"] {
        let e = cli::parse_ms_arg(Some(bad)).expect_err(bad);
        assert_eq!(e.status_code().as_str(), "INVALID_ARGUMENT");
    }
}

#[test]
fn negative_sleep_means_no_delay() {
    assert_eq!(cli::work_delay_ms(Some(-5)), Some(0));
    assert_eq!(cli::work_delay_ms(Some(50)), Some(50));
}

#[test]
fn negative_deadline_means_none() {
    assert_eq!(cli::deadline(Some(-1)), None);
    assert_eq!(cli::deadline(Some(0)), Some(Duration::ZERO));
    assert_eq!(cli::deadline(Some(20)), Some(Duration::from_millis(20)));
}
