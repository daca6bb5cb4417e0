use crate::{Document, EventKind};
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// 事件描述串的候选字段，按优先级排列
const EVENT_FIELDS: &[&str] = &["event", "$event"];
/// 文档的候选字段，按优先级排列
const DOCUMENT_FIELDS: &[&str] = &["payload", "document", "$payload"];
/// 扁平化触发格式中直接给出集合名的字段
const COLLECTION_FIELDS: &[&str] = &["collection", "$collection"];

const COLLECTIONS_SEGMENT: &str = "collections";
const DOCUMENTS_SEGMENT: &str = "documents";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    #[error("event descriptor not found in trigger payload")]
    MissingEventDescriptor,

    #[error("invalid event format: {descriptor}")]
    InvalidEventFormat { descriptor: String },
}

/// 集合名来源的优先级
///
/// `Field` trusts an explicit `collection` field first and falls back to the
/// descriptor path; `Descriptor` does the reverse. Either way both sources
/// are tried before the event is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionPrecedence {
    #[default]
    Field,
    Descriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown collection precedence: {0} (expected `field` or `descriptor`)")]
pub struct ParsePrecedenceError(pub String);

impl FromStr for CollectionPrecedence {
    type Err = ParsePrecedenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "field" => Ok(CollectionPrecedence::Field),
            "descriptor" => Ok(CollectionPrecedence::Descriptor),
            _ => Err(ParsePrecedenceError(s.to_string())),
        }
    }
}

/// 解析后的触发事件
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretedEvent {
    pub descriptor: String,
    pub collection: String,
    pub kind: EventKind,
    pub document: Document,
    /// Segment following `documents` in the descriptor, if any.
    pub descriptor_document_id: Option<String>,
}

pub fn interpret(
    payload: &Value,
    precedence: CollectionPrecedence,
) -> Result<InterpretedEvent, InterpretError> {
    let descriptor =
        first_string(payload, EVENT_FIELDS).ok_or(InterpretError::MissingEventDescriptor)?;
    let document = first_object(payload, DOCUMENT_FIELDS).unwrap_or_default();

    let from_field = || first_string(payload, COLLECTION_FIELDS).map(str::to_string);
    let from_path = || segment_after(descriptor, COLLECTIONS_SEGMENT).map(str::to_string);
    let collection = match precedence {
        CollectionPrecedence::Field => from_field().or_else(from_path),
        CollectionPrecedence::Descriptor => from_path().or_else(from_field),
    }
    .ok_or_else(|| InterpretError::InvalidEventFormat {
        descriptor: descriptor.to_string(),
    })?;

    Ok(InterpretedEvent {
        descriptor: descriptor.to_string(),
        collection,
        kind: EventKind::from_descriptor(descriptor),
        document,
        descriptor_document_id: segment_after(descriptor, DOCUMENTS_SEGMENT).map(str::to_string),
    })
}

fn first_string<'a>(payload: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|field| payload.get(*field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
}

fn first_object(payload: &Value, fields: &[&str]) -> Option<Document> {
    fields
        .iter()
        .find_map(|field| payload.get(*field).and_then(Value::as_object))
        .cloned()
}

fn segment_after<'a>(descriptor: &'a str, marker: &str) -> Option<&'a str> {
    let mut segments = descriptor.split('.');
    segments.by_ref().find(|segment| *segment == marker)?;
    segments.next().filter(|segment| !segment.is_empty())
}
