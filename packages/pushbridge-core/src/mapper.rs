use crate::{Document, EventKind, NotificationRecord, document_id, field_text};

/// 有专属通知模板的集合
pub const KNOWN_COLLECTIONS: &[&str] = &[
    "bookings",
    "contactmessages",
    "tablebookings",
    "banquetenquiries",
    "roomblocks",
    "rooms",
    "housekeeping",
    "guests",
    "payments",
    "reports",
    "users",
];

const UNKNOWN_ID: &str = "unknown";
const UNKNOWN_COLLECTION: &str = "unknown";

/// 根据集合名、事件类型和文档字段生成通知
///
/// Pure and deterministic. Collections without a template, and the
/// `Unsupported` kind, fall back to a generic notification naming the
/// collection.
pub fn build_notification(
    collection: Option<&str>,
    kind: EventKind,
    document: &Document,
) -> NotificationRecord {
    let doc_id = || document_id(document).unwrap_or_else(|| UNKNOWN_ID.to_string());
    let field = |key: &str, fallback: &str| {
        field_text(document, key).unwrap_or_else(|| fallback.to_string())
    };
    let room_number = || field_text(document, "roomNumber").unwrap_or_else(doc_id);

    let (title, body) = match (collection.unwrap_or_default(), kind) {
        ("bookings", EventKind::Create) => (
            "📅 New Booking",
            format!("Booking {} created", doc_id()),
        ),
        ("bookings", EventKind::Update) => (
            "✏️ Booking Updated",
            format!("Booking {} updated", doc_id()),
        ),

        ("contactmessages", EventKind::Create) => (
            "📧 New Contact Message",
            format!("Message from {} received", field("name", "Visitor")),
        ),
        ("contactmessages", EventKind::Update) => (
            "✏️ Message Updated",
            format!("Message {} updated", doc_id()),
        ),

        ("tablebookings", EventKind::Create) => (
            "🍽️ New Table Booking",
            format!("Table booking {} created", doc_id()),
        ),
        ("tablebookings", EventKind::Update) => (
            "✏️ Table Booking Updated",
            format!("Table booking {} updated", doc_id()),
        ),

        ("banquetenquiries", EventKind::Create) => (
            "🎉 New Banquet Enquiry",
            format!("Banquet enquiry from {} received", field("name", "Guest")),
        ),
        ("banquetenquiries", EventKind::Update) => (
            "✏️ Banquet Enquiry Updated",
            format!("Banquet enquiry {} updated", doc_id()),
        ),

        ("roomblocks", EventKind::Create) => (
            "🚫 Room Blocked",
            format!("Room {} blocked", field("roomId", "unknown")),
        ),
        ("roomblocks", EventKind::Update) => (
            "✏️ Block Updated",
            format!("Block {} updated", doc_id()),
        ),

        ("rooms", EventKind::Create) => ("🛏️ New Room", format!("Room {} added", room_number())),
        ("rooms", EventKind::Update) => (
            "✏️ Room Updated",
            format!("Room {} updated", room_number()),
        ),

        ("housekeeping", EventKind::Create) => (
            "🧹 New Task",
            format!("Housekeeping task created for room {}", field("roomId", "unknown")),
        ),
        ("housekeeping", EventKind::Update) => (
            "✏️ Task Updated",
            format!("Task {} updated", doc_id()),
        ),

        ("guests", EventKind::Create) => (
            "👤 New Guest",
            format!("Guest {} checked in", field("firstName", "Unknown")),
        ),
        ("guests", EventKind::Update) => (
            "✏️ Guest Updated",
            format!("Guest {} updated", doc_id()),
        ),

        ("payments", EventKind::Create) => (
            "💳 New Payment",
            format!("Payment of ₹{} received", field("amount", "N/A")),
        ),
        ("payments", EventKind::Update) => (
            "✏️ Payment Updated",
            format!("Payment {} updated", doc_id()),
        ),

        ("reports", EventKind::Create) => (
            "📊 New Report",
            format!("Report {} generated", doc_id()),
        ),
        ("reports", EventKind::Update) => (
            "✏️ Report Updated",
            format!("Report {} updated", doc_id()),
        ),

        ("users", EventKind::Create) => (
            "👨‍💼 New User",
            format!("User {} added", field("name", "Unknown")),
        ),
        ("users", EventKind::Update) => (
            "✏️ User Updated",
            format!("User {} updated", field("name", "Unknown")),
        ),

        _ => return default_notification(collection),
    };

    NotificationRecord::new(title, body)
}

fn default_notification(collection: Option<&str>) -> NotificationRecord {
    let name = collection
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_COLLECTION);
    NotificationRecord::new(
        format!("📨 {name} Updated"),
        format!("New activity in {name}"),
    )
}
