//! Property-based tests for rust_journal_logger using proptest

use proptest::prelude::*;
use rust_journal_logger::dispatchers::CaptureDispatcher;
use rust_journal_logger::prelude::*;
use rust_journal_logger::{DeferredLogBuffer, FieldFormatter};

fn any_priority() -> impl Strategy<Value = Priority> {
    (0u8..8).prop_map(|p| Priority::try_from(p).unwrap())
}

fn field_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,8}"
}

// ============================================================================
// Priority Tests
// ============================================================================

proptest! {
    /// Parsing the display name gives back the same priority
    #[test]
    fn test_priority_str_roundtrip(priority in any_priority()) {
        let parsed: Priority = priority.to_str().parse().unwrap();
        prop_assert_eq!(parsed, priority);
    }

    /// Ordering follows the numeric syslog value
    #[test]
    fn test_priority_ordering(a in any_priority(), b in any_priority()) {
        prop_assert_eq!(a <= b, a.as_u8() <= b.as_u8());
        prop_assert_eq!(a.is_at_least_as_severe_as(b), a.as_u8() <= b.as_u8());
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    /// PRIORITY first, entry fields in order, then constants, message kept apart
    #[test]
    fn test_formatter_field_order(
        priority in any_priority(),
        fields in prop::collection::vec((field_name(), "[a-z0-9]{0,6}"), 0..6),
        constants in prop::collection::btree_map(field_name(), "[a-z0-9]{0,6}", 0..4),
        message in ".*",
    ) {
        let entry = LogEntry::new(priority, message.clone()).with_fields(fields.clone());
        let constant_fields = ConstantFields::from(constants.clone());

        let record = FieldFormatter::format(&entry, &constant_fields);

        let mut expected = vec![format!("PRIORITY={}", priority.as_u8())];
        expected.extend(fields.iter().map(|(k, v)| format!("{}={}", k, v)));
        expected.extend(constants.iter().map(|(k, v)| format!("{}={}", k, v)));

        prop_assert_eq!(record.fields, expected);
        prop_assert_eq!(record.message, message);
    }
}

// ============================================================================
// Buffer Tests
// ============================================================================

proptest! {
    /// discard removes exactly the entries with priority >= threshold and
    /// keeps the survivors in their original order
    #[test]
    fn test_discard_predicate(
        priorities in prop::collection::vec(any_priority(), 0..40),
        threshold in any_priority(),
    ) {
        let buffer = DeferredLogBuffer::new(true);
        for (i, p) in priorities.iter().enumerate() {
            buffer.submit(LogEntry::new(*p, i.to_string()));
        }

        let removed = buffer.discard(threshold);
        let batch = buffer.detach();

        let expected: Vec<String> = priorities
            .iter()
            .enumerate()
            .filter(|(_, p)| p.as_u8() < threshold.as_u8())
            .map(|(i, _)| i.to_string())
            .collect();
        let kept: Vec<String> = batch.entries().iter().map(|e| e.message.clone()).collect();

        prop_assert_eq!(removed, priorities.len() - expected.len());
        prop_assert_eq!(kept, expected);
    }

    /// Any interleaving of submits and flushes delivers every entry once, in order
    #[test]
    fn test_flush_exactly_once(ops in prop::collection::vec(any::<bool>(), 0..60)) {
        let capture = CaptureDispatcher::new();
        let logger = Logger::builder()
            .dispatcher(capture.clone())
            .deferred(true)
            .build();

        let mut submitted = Vec::new();
        for (i, is_flush) in ops.iter().enumerate() {
            if *is_flush {
                logger.flush();
            } else {
                logger.info(i.to_string());
                submitted.push(i.to_string());
            }
        }
        logger.flush();

        prop_assert_eq!(capture.messages(), submitted);
    }
}

// ============================================================================
// Safety Tests (No Panics)
// ============================================================================

proptest! {
    /// Arbitrary priority strings never panic the parser
    #[test]
    fn test_priority_parse_no_panic(input in ".*") {
        let _ = input.parse::<Priority>();
    }

    /// The terminal dispatcher handles arbitrary fields and messages
    #[test]
    fn test_terminal_dispatcher_no_panic(
        fields in prop::collection::vec(".*", 0..10),
        message in ".*",
    ) {
        let out = rust_journal_logger::dispatchers::SharedWriter::new();
        let terminal = TerminalDispatcher::new(out.clone()).with_colors(false);
        let result = terminal.dispatch(&fields, &message);
        prop_assert!(result.is_ok(), "TerminalDispatcher failed: {:?}", result);
        prop_assert!(out.contents().ends_with('\n'));
    }
}
