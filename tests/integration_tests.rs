//! Integration tests for the journal logger
//!
//! These tests verify:
//! - Deferred buffering and flush ordering
//! - Retroactive discard
//! - Deferral mode switching
//! - Constant field merging
//! - Backend selection and the plain fallback
//! - Best-effort dispatch

use rust_journal_logger::core::backend::StaticProbe;
use rust_journal_logger::dispatchers::{CaptureDispatcher, PlainDispatcher, SharedWriter};
use rust_journal_logger::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

fn deferred(capture: &CaptureDispatcher) -> Logger {
    Logger::builder()
        .dispatcher(capture.clone())
        .deferred(true)
        .build()
}

#[test]
fn test_flush_dispatches_in_submission_order_exactly_once() {
    let capture = CaptureDispatcher::new();
    let logger = deferred(&capture);

    for i in 0..20 {
        logger.log(Priority::Info, [("SEQ", i.to_string())], format!("Message {}", i));
    }
    assert!(capture.is_empty());

    logger.flush();
    logger.flush();

    let messages = capture.messages();
    assert_eq!(messages.len(), 20);
    for (i, message) in messages.iter().enumerate() {
        assert_eq!(message, &format!("Message {}", i));
    }
    assert_eq!(logger.metrics().dispatched(), 20);
}

#[test]
fn test_discard_scenario_three_six_three() {
    let capture = CaptureDispatcher::new();
    let logger = deferred(&capture);

    logger.log(Priority::Error, [("STEP", "a")], "first");
    logger.log(Priority::Info, [("STEP", "b")], "second");
    logger.log(Priority::Error, [("STEP", "c")], "third");

    let removed = logger.discard(Priority::Info);
    assert_eq!(removed, 1);
    assert!(capture.is_empty(), "discard performs no I/O");

    logger.flush();

    let records = capture.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].priority(), Some(3));
    assert_eq!(records[1].priority(), Some(3));
    assert_eq!(records[0].field("STEP"), Some("a"));
    assert_eq!(records[1].field("STEP"), Some("c"));
}

#[test]
fn test_discard_keeps_relative_order_of_survivors() {
    let capture = CaptureDispatcher::new();
    let logger = deferred(&capture);

    let priorities = [7u8, 2, 6, 4, 5, 0, 7, 3];
    for (i, p) in priorities.iter().enumerate() {
        let priority = Priority::try_from(*p).unwrap();
        logger.log(priority, [("IDX", i.to_string())], "x");
    }

    logger.discard(Priority::Notice);
    logger.flush();

    let survivors: Vec<(Option<u8>, String)> = capture
        .records()
        .iter()
        .map(|r| (r.priority(), r.field("IDX").unwrap().to_string()))
        .collect();
    assert_eq!(
        survivors,
        vec![
            (Some(2), "1".to_string()),
            (Some(4), "3".to_string()),
            (Some(0), "5".to_string()),
            (Some(3), "7".to_string()),
        ]
    );
}

#[test]
fn test_request_debug_trail_dropped_on_success() {
    let capture = CaptureDispatcher::new();
    let logger = deferred(&capture);

    logger.debug("parsing headers");
    logger.debug("cache lookup");
    logger.notice("request completed");

    logger.discard(Priority::Debug);
    logger.flush();

    assert_eq!(capture.messages(), vec!["request completed"]);
}

#[test]
fn test_mode_switch_flushes_before_bypass() {
    let capture = CaptureDispatcher::new();
    let logger = deferred(&capture);

    logger.info("queued 1");
    logger.info("queued 2");
    logger.disable_defer();
    assert_eq!(capture.messages(), vec!["queued 1", "queued 2"]);

    logger.info("immediate");
    assert_eq!(capture.len(), 3);

    // The immediate entry never shows up in a later flush
    logger.flush();
    assert_eq!(capture.len(), 3);

    logger.enable_defer();
    logger.info("deferred again");
    assert_eq!(capture.len(), 3);
    logger.flush();
    assert_eq!(capture.messages().last().map(String::as_str), Some("deferred again"));
}

#[test]
fn test_serialized_field_order() {
    let capture = CaptureDispatcher::new();
    let logger = Logger::builder()
        .dispatcher(capture.clone())
        .constant_field("SERVICE", "orders")
        .constant_field("BUILD", "1.4.2")
        .build();

    logger.log(
        Priority::Warning,
        [("ORDER", "o-9"), ("RETRY", "2"), ("ORDER", "o-10")],
        "payment slow",
    );

    let record = &capture.records()[0];
    assert_eq!(
        record.fields,
        vec![
            "PRIORITY=4",
            "ORDER=o-9",
            "RETRY=2",
            "ORDER=o-10",
            "BUILD=1.4.2",
            "SERVICE=orders",
        ]
    );
    assert_eq!(record.message, "payment slow");
}

#[test]
fn test_constant_field_changes_apply_to_later_flushes() {
    let capture = CaptureDispatcher::new();
    let logger = deferred(&capture);

    logger.add_constant_field("PHASE", "boot");
    logger.info("a");
    logger.flush();

    logger.add_constant_field("PHASE", "serve");
    logger.add_constant_field("NODE", "n1");
    logger.info("b");
    logger.flush();

    let mut replacement = BTreeMap::new();
    replacement.insert("ONLY".to_string(), "this".to_string());
    logger.set_constant_fields(replacement);
    logger.info("c");
    logger.flush();

    let records = capture.records();
    assert_eq!(records[0].fields, vec!["PRIORITY=6", "PHASE=boot"]);
    assert_eq!(records[1].fields, vec!["PRIORITY=6", "NODE=n1", "PHASE=serve"]);
    assert_eq!(records[2].fields, vec!["PRIORITY=6", "ONLY=this"]);
}

#[test]
fn test_no_capabilities_plain_sink_gets_message_only() {
    // Selection with no journal and no terminal
    let logger = Logger::builder().probe(StaticProbe::default()).build();
    assert_eq!(logger.dispatcher_name(), "plain");
    drop(logger);

    let output = SharedWriter::new();
    let logger = Logger::builder()
        .dispatcher(PlainDispatcher::new(output.clone()))
        .constant_field("SERVICE", "api")
        .build();

    logger.log(Priority::Error, [("CODE", "E42")], "upstream timeout");

    assert_eq!(output.contents(), "upstream timeout\n");
    assert!(!output.contents().contains('['));
    assert!(!output.contents().contains("CODE"));
}

#[test]
fn test_plain_dispatcher_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("plain.log");
    let file = fs::File::create(&log_file).expect("Failed to create log file");

    let logger = Logger::builder()
        .dispatcher(PlainDispatcher::new(file))
        .deferred(true)
        .build();

    logger.info("line one");
    logger.warning("line two");
    drop(logger);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content, "line one\nline two\n");
}

#[test]
fn test_dispatch_failure_never_reaches_caller() {
    let capture = CaptureDispatcher::new();
    let logger = deferred(&capture);

    logger.info("a");
    logger.info("b");
    capture.set_failing(true);
    logger.flush();
    capture.set_failing(false);

    // Failed entries are not retried
    logger.flush();
    assert!(capture.is_empty());
    assert_eq!(logger.metrics().dispatch_failures(), 2);

    logger.info("c");
    logger.flush();
    assert_eq!(capture.messages(), vec!["c"]);
}

#[test]
fn test_drop_performs_final_flush() {
    let capture = CaptureDispatcher::new();
    {
        let logger = deferred(&capture);
        logger.info("pending at exit");
        logger.error("also pending");
    }
    assert_eq!(capture.messages(), vec!["pending at exit", "also pending"]);
}

#[test]
fn test_logger_from_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("logger.json");
    fs::write(
        &path,
        r#"{ "backend": "plain", "deferred": true, "constant_fields": { "APP": "demo" } }"#,
    )
    .expect("Failed to write config");

    let config = LoggerConfig::from_json_file(&path).expect("Failed to load config");
    let logger = Logger::from_config(&config);

    assert!(logger.is_deferred());
    assert_eq!(logger.dispatcher_name(), "plain");
    assert_eq!(logger.constant_fields().get("APP"), Some("demo"));
}

#[cfg(all(unix, feature = "journal"))]
#[test]
fn test_journal_backend_end_to_end() {
    use std::os::unix::net::UnixDatagram;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let socket_path = temp_dir.path().join("journal.sock");
    let server = UnixDatagram::bind(&socket_path).expect("Failed to bind socket");

    let logger = Logger::builder()
        .backend(BackendChoice::Journal)
        .journal_socket(&socket_path)
        .constant_field("SYSLOG_IDENTIFIER", "itest")
        .deferred(true)
        .build();
    assert_eq!(logger.dispatcher_name(), "journal");

    logger.log(Priority::Notice, [("STAGE", "one")], "first");
    logger.log(Priority::Debug, [("STAGE", "two")], "second");
    logger.flush();

    let mut buf = [0u8; 512];
    let n = server.recv(&mut buf).expect("Failed to receive");
    assert_eq!(
        &buf[..n],
        b"PRIORITY=5\nSTAGE=one\nSYSLOG_IDENTIFIER=itest\nMESSAGE=first\n"
    );
    let n = server.recv(&mut buf).expect("Failed to receive");
    assert_eq!(
        &buf[..n],
        b"PRIORITY=7\nSTAGE=two\nSYSLOG_IDENTIFIER=itest\nMESSAGE=second\n"
    );
}

#[cfg(all(target_os = "linux", feature = "journal"))]
#[test]
fn test_journal_record_larger_than_a_datagram_is_delivered() {
    use std::os::unix::net::UnixDatagram;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let socket_path = temp_dir.path().join("journal.sock");
    let server = UnixDatagram::bind(&socket_path).expect("Failed to bind socket");

    let logger = Logger::builder()
        .backend(BackendChoice::Journal)
        .journal_socket(&socket_path)
        .build();
    logger.info("x".repeat(512 * 1024));

    assert_eq!(logger.metrics().dispatched(), 1);
    assert_eq!(logger.metrics().dispatch_failures(), 0);

    // Only the descriptor travels; the datagram itself is empty
    let mut buf = [0u8; 16];
    let n = server.recv(&mut buf).expect("Failed to receive");
    assert_eq!(n, 0);
}
