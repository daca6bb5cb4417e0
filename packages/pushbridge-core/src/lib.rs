use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

pub mod deep_link;
pub mod interpret;
pub mod mapper;

pub use deep_link::DeepLinkData;
pub use interpret::{
    CollectionPrecedence, InterpretError, InterpretedEvent, ParsePrecedenceError, interpret,
};
pub use mapper::{KNOWN_COLLECTIONS, build_notification};

/// 推送广播的固定受众主题
pub const ADMIN_TOPIC: &str = "/topics/admins";

/// 触发事件携带的文档字段
pub type Document = Map<String, Value>;

/// 事件类型，由事件描述串推导得到
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Create,
    Update,
    Unsupported,
}

impl EventKind {
    /// Substring match, `create` wins over `update`.
    pub fn from_descriptor(descriptor: &str) -> Self {
        if descriptor.contains("create") {
            EventKind::Create
        } else if descriptor.contains("update") {
            EventKind::Update
        } else {
            EventKind::Unsupported
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Create => "create",
            EventKind::Update => "update",
            EventKind::Unsupported => "unsupported",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, EventKind::Unsupported)
    }

    /// 支持推送的事件类型
    pub fn supported() -> [EventKind; 2] {
        [EventKind::Create, EventKind::Update]
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 通知内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub title: String,
    pub body: String,
}

impl NotificationRecord {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Renders a JSON value as display text, or `None` when the value is falsy
/// (null, `false`, empty string, zero, NaN).
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => number_text(number),
        Value::Array(_) | Value::Object(_) => Some(template_text(value)),
    }
}

/// 模板插值的文本形式：数组逗号拼接，对象为 `[object Object]`
fn template_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number_text(number).unwrap_or_else(|| "0".to_string()),
        Value::Array(items) => items.iter().map(template_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(number: &Number) -> Option<String> {
    if let Some(i) = number.as_i64() {
        return (i != 0).then(|| i.to_string());
    }
    if let Some(u) = number.as_u64() {
        return (u != 0).then(|| u.to_string());
    }
    let f = number.as_f64()?;
    if f == 0.0 || f.is_nan() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        Some(format!("{}", f as i64))
    } else {
        Some(f.to_string())
    }
}

/// 文档字段的展示文本
pub fn field_text(document: &Document, key: &str) -> Option<String> {
    document.get(key).and_then(value_text)
}

/// 文档标识：优先 `$id`，其次 `id`
pub fn document_id(document: &Document) -> Option<String> {
    field_text(document, "$id").or_else(|| field_text(document, "id"))
}
