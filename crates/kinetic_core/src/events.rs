//! Event model
//!
//! Pointer, resize and scroll-progress notifications, either raised locally
//! by the host or forwarded from a controlling parent frame as JSON messages.

use crate::host::ElementId;
use serde::Deserialize;
use thiserror::Error;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const RESIZE: EventType = 40;
    /// Scroll progress forwarded by a parent frame
    pub const SCROLL_PROGRESS: EventType = 90;
}

/// An event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Element the event is aimed at (enter/leave), `None` for window-level events
    pub target: Option<ElementId>,
    pub data: EventData,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        /// Viewport x coordinate
        x: f32,
        /// Viewport y coordinate
        y: f32,
        pointer_id: Option<i64>,
        pointer_type: Option<String>,
        pressure: f32,
    },
    ScrollProgress {
        progress: f32,
    },
    None,
}

impl Event {
    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self {
            event_type: event_types::POINTER_MOVE,
            target: None,
            data: EventData::Pointer {
                x,
                y,
                pointer_id: None,
                pointer_type: None,
                pressure: 0.0,
            },
        }
    }

    pub fn pointer_enter(target: ElementId) -> Self {
        Self {
            event_type: event_types::POINTER_ENTER,
            target: Some(target),
            data: EventData::None,
        }
    }

    pub fn pointer_leave(target: ElementId) -> Self {
        Self {
            event_type: event_types::POINTER_LEAVE,
            target: Some(target),
            data: EventData::None,
        }
    }

    pub fn resize() -> Self {
        Self {
            event_type: event_types::RESIZE,
            target: None,
            data: EventData::None,
        }
    }

    pub fn scroll_progress(progress: f32) -> Self {
        Self {
            event_type: event_types::SCROLL_PROGRESS,
            target: None,
            data: EventData::ScrollProgress { progress },
        }
    }

    /// Decode a message posted by a parent frame.
    ///
    /// The message is rejected unless `origin` equals `trusted_origin`.
    pub fn from_message(
        origin: &str,
        trusted_origin: &str,
        payload: &str,
    ) -> Result<Self, MessageError> {
        if origin != trusted_origin {
            return Err(MessageError::UntrustedOrigin(origin.to_string()));
        }

        match serde_json::from_str::<FrameMessage>(payload)? {
            FrameMessage::PointerMove {
                client_x,
                client_y,
                pointer_id,
                pointer_type,
                pressure,
            } => Ok(Self {
                event_type: event_types::POINTER_MOVE,
                target: None,
                data: EventData::Pointer {
                    x: client_x,
                    y: client_y,
                    pointer_id,
                    pointer_type,
                    pressure,
                },
            }),
            FrameMessage::ScrollProgress { progress } => Ok(Self::scroll_progress(progress)),
            FrameMessage::Unknown => Err(MessageError::UnknownType),
        }
    }
}

/// Wire shape of a cross-frame message
#[derive(Deserialize)]
#[serde(tag = "type")]
enum FrameMessage {
    #[serde(rename = "pointermove", rename_all = "camelCase")]
    PointerMove {
        client_x: f32,
        client_y: f32,
        #[serde(default)]
        pointer_id: Option<i64>,
        #[serde(default)]
        pointer_type: Option<String>,
        #[serde(default)]
        pressure: f32,
    },
    #[serde(rename = "scroll:progress")]
    ScrollProgress { progress: f32 },
    #[serde(other)]
    Unknown,
}

/// Why a cross-frame message was rejected
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("message from untrusted origin {0:?}")]
    UntrustedOrigin(String),
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown message type")]
    UnknownType,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://example.test";

    #[test]
    fn test_pointer_message() {
        let event = Event::from_message(
            ORIGIN,
            ORIGIN,
            r#"{"type":"pointermove","clientX":12.5,"clientY":40,"pointerId":1,"pointerType":"mouse","pressure":0.5}"#,
        )
        .unwrap();

        assert_eq!(event.event_type, event_types::POINTER_MOVE);
        match event.data {
            EventData::Pointer {
                x,
                y,
                pointer_id,
                pointer_type,
                pressure,
            } => {
                assert_eq!((x, y), (12.5, 40.0));
                assert_eq!(pointer_id, Some(1));
                assert_eq!(pointer_type.as_deref(), Some("mouse"));
                assert_eq!(pressure, 0.5);
            }
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn test_scroll_progress_message() {
        let event =
            Event::from_message(ORIGIN, ORIGIN, r#"{"type":"scroll:progress","progress":0.25}"#)
                .unwrap();
        assert_eq!(event, Event::scroll_progress(0.25));
    }

    #[test]
    fn test_untrusted_origin_rejected() {
        let err = Event::from_message(
            "https://evil.test",
            ORIGIN,
            r#"{"type":"scroll:progress","progress":1}"#,
        )
        .unwrap_err();
        assert!(matches!(err, MessageError::UntrustedOrigin(_)));
    }

    #[test]
    fn test_malformed_and_unknown_rejected() {
        assert!(matches!(
            Event::from_message(ORIGIN, ORIGIN, "not json"),
            Err(MessageError::Malformed(_))
        ));
        assert!(matches!(
            Event::from_message(ORIGIN, ORIGIN, r#"{"type":"pointermove"}"#),
            Err(MessageError::Malformed(_))
        ));
        assert!(matches!(
            Event::from_message(ORIGIN, ORIGIN, r#"{"type":"scrollProgress","progress":1}"#),
            Err(MessageError::UnknownType)
        ));
    }
}
