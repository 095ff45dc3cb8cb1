//! Wire models for the realtime protocol

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The kind of change a push update describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A child was added under the subscribed node
    Inserted,
    /// An existing child's value changed
    Updated,
    /// A child was removed
    Removed,
}

/// One push update delivered through a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// What happened
    pub kind: ChangeKind,
    /// The child key the change applies to
    pub key: String,
    /// The child's new value; absent for removals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// A keyed value returned by a point read or query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedValue {
    /// Child key under the queried node
    pub key: String,
    /// The child's value
    pub value: Value,
}

/// Frames the client sends over the subscription socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Authenticate the connection before anything else.
    Auth {
        /// Identity-provider-issued token
        token: String,
    },
    /// Register for value-changed pushes under `path`.
    Subscribe {
        /// Client-chosen registration id, echoed in every change frame
        id: String,
        /// Node path to watch
        path: String,
    },
    /// Drop a registration.
    Unsubscribe {
        /// The registration id from [`ClientFrame::Subscribe`]
        id: String,
    },
}

/// Frames the server sends over the subscription socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Authentication accepted.
    AuthAck,
    /// Authentication rejected; the server closes after this.
    AuthRejected {
        /// Human-readable reason
        message: String,
    },
    /// Registration confirmed.
    Subscribed {
        /// Echo of the registration id
        id: String,
    },
    /// A change under a watched node.
    Change {
        /// The registration this change belongs to
        id: String,
        /// What changed
        #[serde(flatten)]
        event: ChangeEvent,
    },
    /// Server-side error tied to one registration.
    SubscriptionError {
        /// The registration id
        id: String,
        /// Human-readable reason
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_frame_roundtrip() {
        let frame = ServerFrame::Change {
            id: "sub-1".to_string(),
            event: ChangeEvent {
                kind: ChangeKind::Updated,
                key: "abc".to_string(),
                value: Some(json!({"title": "Seed round"})),
            },
        };
        let encoded = serde_json::to_string(&frame).unwrap();
        let decoded: ServerFrame = serde_json::from_str(&encoded).unwrap();
        match decoded {
            ServerFrame::Change { id, event } => {
                assert_eq!(id, "sub-1");
                assert_eq!(event.kind, ChangeKind::Updated);
                assert_eq!(event.key, "abc");
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn test_removed_event_omits_value() {
        let event = ChangeEvent {
            kind: ChangeKind::Removed,
            key: "gone".to_string(),
            value: None,
        };
        let encoded = serde_json::to_string(&event).unwrap();
        assert!(!encoded.contains("value"));
    }
}
