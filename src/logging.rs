//! Structured JSON logging.
//!
//! One JSON object per line on stdout: timestamp, sequence number, level,
//! module tag, then caller fields. `LOG_LEVEL` filters. The numeric core
//! never logs; only the binary and the fetch path do.

use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("debug") => Level::Debug,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

pub fn ts_now() -> String {
    Utc::now().to_rfc3339()
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

pub fn obj(fields: &[(&str, Value)]) -> Value {
    let mut map = Map::new();
    for (k, v) in fields {
        map.insert((*k).to_string(), v.clone());
    }
    Value::Object(map)
}

pub fn json_log_at(level: Level, module: &str, fields: Value) {
    if level < Level::from_env() {
        return;
    }
    let mut map = Map::new();
    map.insert("ts".to_string(), Value::String(ts_now()));
    map.insert(
        "seq".to_string(),
        Value::Number(LOG_SEQ.fetch_add(1, Ordering::SeqCst).into()),
    );
    map.insert("level".to_string(), v_str(level.as_str()));
    map.insert("module".to_string(), v_str(module));
    if let Value::Object(extra) = fields {
        map.extend(extra);
    }
    println!("{}", Value::Object(map));
}

pub fn json_log(module: &str, fields: Value) {
    json_log_at(Level::Info, module, fields);
}
