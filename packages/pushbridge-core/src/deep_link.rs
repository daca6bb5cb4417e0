use crate::{InterpretedEvent, document_id};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 深度链接数据，推送通道要求所有取值均为字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepLinkData {
    pub collection: String,
    pub document_id: String,
    pub event: String,
    pub timestamp: String,
}

impl DeepLinkData {
    /// Coerces every field of the event to its string form. The document id
    /// comes from the document (`$id`, then `id`), then from the descriptor
    /// path, and is empty when neither carries one.
    pub fn build(event: &InterpretedEvent, timestamp: DateTime<Utc>) -> Self {
        let document_id = document_id(&event.document)
            .or_else(|| event.descriptor_document_id.clone())
            .unwrap_or_default();

        Self {
            collection: event.collection.clone(),
            document_id,
            event: event.kind.as_str().to_string(),
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CollectionPrecedence, interpret};
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
    }

    fn link_for(payload: Value) -> DeepLinkData {
        let event = interpret(&payload, CollectionPrecedence::Field).unwrap();
        DeepLinkData::build(&event, fixed_time())
    }

    #[test]
    fn test_deep_link_from_document_id() {
        let link = link_for(json!({
            "event": "databases.x.collections.bookings.documents.b1.update",
            "payload": { "$id": "booking-42" }
        }));

        assert_eq!(link.collection, "bookings");
        assert_eq!(link.document_id, "booking-42");
        assert_eq!(link.event, "update");
        assert_eq!(link.timestamp, "2026-03-14T09:26:53.000Z");
    }

    #[test]
    fn test_deep_link_numeric_id_is_stringified() {
        let link = link_for(json!({
            "event": "databases.x.collections.rooms.update",
            "payload": { "id": 314 }
        }));
        assert_eq!(link.document_id, "314");
    }

    #[test]
    fn test_deep_link_falls_back_to_descriptor_segment() {
        let link = link_for(json!({
            "event": "databases.x.collections.payments.documents.p1.create",
            "payload": { "amount": 500 }
        }));
        assert_eq!(link.document_id, "p1");
    }

    #[test]
    fn test_deep_link_missing_id_is_empty_string() {
        let link = link_for(json!({
            "event": "create",
            "collection": "guests",
            "payload": { "id": null }
        }));
        assert_eq!(link.document_id, "");
    }

    #[test]
    fn test_deep_link_serializes_only_strings() {
        let link = link_for(json!({
            "event": "databases.x.collections.rooms.create",
            "payload": { "$id": 12.0 }
        }));
        let value = serde_json::to_value(&link).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert!(object.values().all(Value::is_string));
        assert_eq!(object["documentId"], json!("12"));
    }
}
