use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::message::schema::MessageEntity;

/// Frames the client may send over the websocket. The first frame after
/// connecting must be `Auth`; everything else is rejected until then.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientFrame {
    #[serde(rename_all = "camelCase")]
    Auth { token: String },
    #[serde(rename_all = "camelCase")]
    OpenConversation { conversation_id: Uuid },
    CloseConversation,
    #[serde(rename_all = "camelCase")]
    SendMessage { content: String },
    Ping,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerFrame {
    #[serde(rename_all = "camelCase")]
    AuthSuccess { user_id: String },
    #[serde(rename_all = "camelCase")]
    AuthFailed { reason: String },
    #[serde(rename_all = "camelCase")]
    ConversationOpened {
        conversation_id: Uuid,
        messages: Vec<MessageEntity>,
    },
    #[serde(rename_all = "camelCase")]
    NewMessage {
        conversation_id: Uuid,
        message: MessageEntity,
    },
    /// The conversation list snapshot changed; the client should
    /// re-fetch it over HTTP.
    ConversationsStale,
    #[serde(rename_all = "camelCase")]
    MessageSent { message: MessageEntity },
    #[serde(rename_all = "camelCase")]
    Error { message: String },
    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_auth_deserialize() {
        let json = r#"{"type":"auth","token":"abc.def.ghi"}"#;
        let frame: ClientFrame = serde_json::from_str(json).unwrap();
        match frame {
            ClientFrame::Auth { token } => assert_eq!(token, "abc.def.ghi"),
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn test_client_open_conversation_deserialize() {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let json = format!(r#"{{"type":"openConversation","conversationId":"{id}"}}"#);
        let frame: ClientFrame = serde_json::from_str(&json).unwrap();
        match frame {
            ClientFrame::OpenConversation { conversation_id } => {
                assert_eq!(conversation_id, id)
            }
            other => panic!("unexpected frame: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{"type":"selfDestruct"}"#;
        assert!(serde_json::from_str::<ClientFrame>(json).is_err());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{"type":"sendMessage"}"#;
        assert!(serde_json::from_str::<ClientFrame>(json).is_err());
    }

    #[test]
    fn test_server_frame_serialize_tags() {
        let json = serde_json::to_string(&ServerFrame::AuthFailed {
            reason: "Invalid token".to_string(),
        })
        .unwrap();
        assert!(json.contains(r#""type":"authFailed""#));
        assert!(json.contains(r#""reason":"Invalid token""#));

        let json = serde_json::to_string(&ServerFrame::ConversationsStale).unwrap();
        assert_eq!(json, r#"{"type":"conversationsStale"}"#);

        let json = serde_json::to_string(&ServerFrame::Pong).unwrap();
        assert_eq!(json, r#"{"type":"pong"}"#);
    }
}
