use clap::Parser;
use kafka_peek::PeekOpts;

fn parse(args: &[&str]) -> Result<PeekOpts, clap::Error> {
    let mut full = vec!["kafka-peek"];
    full.extend_from_slice(args);
    PeekOpts::try_parse_from(full)
}

#[test]
fn test_peek_opts_defaults() {
    let opts = parse(&["--topic", "orders"]).unwrap();

    assert_eq!(opts.brokers, "localhost:9092");
    assert_eq!(opts.topic, "orders");
    assert_eq!(opts.consumer_group, "kafka-peek");
    assert_eq!(opts.partition_id, "0");
    assert_eq!(opts.seek_start_sequence_number, None);
    assert_eq!(opts.seek_start_time, None);
    assert_eq!(opts.poll_max_wait_time_in_seconds, 10);
    assert_eq!(opts.poll_max_messages, 2);
    assert!(opts.poll_stop_on_no_events_received);
    assert_eq!(opts.poll_stop_on_seek_end_sequence_number, None);
    assert_eq!(opts.poll_stop_on_seek_end_time, None);
    assert!(opts.poll_stop_on_user_confirmation_prompt);
}

#[test]
fn test_boolean_stop_options_take_explicit_values() {
    let opts = parse(&[
        "--topic",
        "orders",
        "--poll-stop-on-no-events-received",
        "false",
        "--poll-stop-on-user-confirmation-prompt",
        "false",
    ])
    .unwrap();

    assert!(!opts.poll_stop_on_no_events_received);
    assert!(!opts.poll_stop_on_user_confirmation_prompt);
}

#[test]
fn test_seek_start_time_parses_rfc3339() {
    let opts = parse(&["--topic", "orders", "--seek-start-time", "2026-08-22T00:00:00Z"]).unwrap();

    let t = opts.seek_start_time.unwrap();
    assert_eq!(t.to_rfc3339(), "2026-08-22T00:00:00+00:00");
}

#[test]
fn test_seek_start_time_rejects_garbage() {
    assert!(parse(&["--topic", "orders", "--seek-start-time", "yesterday"]).is_err());
}

#[test]
fn test_seek_start_sequence_number_rejects_negative() {
    assert!(parse(&["--topic", "orders", "--seek-start-sequence-number", "-1"]).is_err());
    assert!(parse(&["--topic", "orders", "--poll-stop-on-seek-end-sequence-number", "-7"]).is_err());
}

#[test]
fn test_poll_ranges_are_enforced() {
    assert!(parse(&["--topic", "orders", "--poll-max-messages", "0"]).is_err());
    assert!(parse(&["--topic", "orders", "--poll-max-messages", "101"]).is_err());
    assert!(parse(&["--topic", "orders", "--poll-max-messages", "100"]).is_ok());
    assert!(parse(&["--topic", "orders", "--poll-max-wait-time-in-seconds", "0"]).is_err());
    assert!(parse(&["--topic", "orders", "--poll-max-wait-time-in-seconds", "61"]).is_err());
    assert!(parse(&["--topic", "orders", "--poll-max-wait-time-in-seconds", "60"]).is_ok());
}

#[test]
fn test_blank_consumer_group_is_rejected() {
    assert!(parse(&["--topic", "orders", "--consumer-group", "  "]).is_err());
    assert!(parse(&["--topic", "orders", "--partition-id", ""]).is_err());
}
