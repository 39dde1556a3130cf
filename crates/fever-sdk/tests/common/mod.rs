//! Common test utilities for SDK integration tests

use chrono::{NaiveDate, TimeZone, Utc};
use fever_sdk::{ConditionEngine, ConditionEngineBuilder, FixedClock, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Engine whose clock is frozen at 2024-06-15 10:00 UTC
pub fn frozen_engine() -> ConditionEngine {
    frozen_builder().build().unwrap()
}

pub fn frozen_builder() -> ConditionEngineBuilder {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
    ConditionEngineBuilder::new().with_clock(Arc::new(FixedClock(now)))
}

/// An order record as a caller would hold it
pub fn order() -> HashMap<String, Value> {
    let created = NaiveDate::from_ymd_opt(2024, 6, 14)
        .unwrap()
        .and_hms_opt(18, 30, 0)
        .unwrap();

    let mut record = HashMap::new();
    record.insert("customer".to_string(), Value::from("acme corp"));
    record.insert("amount".to_string(), Value::from(250.5));
    record.insert("created_at".to_string(), Value::Time(created));
    record.insert("tags".to_string(), Value::from("priority,export,b2b"));
    record.insert("note".to_string(), Value::Null);
    record
}
