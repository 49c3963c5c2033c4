use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::Message;
use uuid::Uuid;

use crate::modules::employer::service::EmployerService;
use crate::modules::message::service::MessageService;
use crate::modules::realtime::protocol::{ClientFrame, ServerFrame};
use crate::modules::realtime::view::{ConversationView, ViewEvent};
use crate::modules::session::UserRole;
use crate::modules::worker::service::WorkerService;
use crate::utils::Claims;
use crate::ENV;

/// Upgrades the connection and drives one client's realtime session.
///
/// Endpoint: GET /ws
///
/// The first frame must be `auth`; once authenticated the client gets a
/// `ConversationView` and may open one conversation at a time.
pub async fn websocket_handler(
    req: HttpRequest,
    stream: web::Payload,
    message_service: web::Data<MessageService>,
    workers: web::Data<WorkerService>,
    employers: web::Data<EmployerService>,
) -> Result<HttpResponse, actix_web::Error> {
    tracing::debug!("WebSocket upgrade request from {:?}", req.peer_addr());

    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, stream)?;

    actix_web::rt::spawn(async move {
        let mut view: Option<ConversationView> = None;

        loop {
            tokio::select! {
                // === INBOUND: client frames ===
                msg = msg_stream.recv() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            let text = text.to_string();
                            let frame = match serde_json::from_str::<ClientFrame>(&text) {
                                Ok(frame) => frame,
                                Err(e) => {
                                    tracing::warn!(
                                        "Unparseable client frame: {} - raw: {}",
                                        e,
                                        frame_preview(&text)
                                    );
                                    if send_frame(
                                        &mut ws_session,
                                        &ServerFrame::Error { message: "Malformed frame".to_string() },
                                    )
                                    .await
                                    .is_err()
                                    {
                                        break;
                                    }
                                    continue;
                                }
                            };

                            let keep_going = handle_frame(
                                frame,
                                &mut view,
                                &mut ws_session,
                                &message_service,
                                &workers,
                                &employers,
                            )
                            .await;
                            if !keep_going {
                                break;
                            }
                        }

                        Some(Ok(Message::Ping(data))) => {
                            if let Err(e) = ws_session.pong(&data).await {
                                tracing::error!("Failed to send pong: {}", e);
                                break;
                            }
                        }

                        Some(Ok(Message::Pong(_))) => {}

                        Some(Ok(Message::Close(reason))) => {
                            tracing::info!("WebSocket close frame: {:?}", reason);
                            break;
                        }

                        Some(Ok(Message::Binary(_))) => {
                            tracing::warn!("Binary frames are not supported");
                        }

                        Some(Ok(Message::Continuation(_) | Message::Nop)) => {}

                        Some(Err(e)) => {
                            tracing::error!("WebSocket protocol error: {}", e);
                            break;
                        }

                        None => break,
                    }
                }

                // === OUTBOUND: live feed of the open conversation ===
                event = next_view_event(&mut view) => {
                    match event {
                        Ok(Some(ViewEvent::Appended(message))) => {
                            let frame = ServerFrame::NewMessage {
                                conversation_id: message.conversation_id,
                                message,
                            };
                            if send_frame(&mut ws_session, &frame).await.is_err() {
                                break;
                            }
                            if notify_stale(&mut view, &mut ws_session).await.is_err() {
                                break;
                            }
                        }
                        Ok(Some(ViewEvent::Resynced)) => {
                            if send_resync(&mut view, &mut ws_session).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(err) => {
                            tracing::error!("Live feed resync failed: {err:?}");
                            if let Some(view) = view.as_mut() {
                                view.close();
                            }
                            let frame = ServerFrame::Error {
                                message: "Conversation feed lost, please reopen".to_string(),
                            };
                            if send_frame(&mut ws_session, &frame).await.is_err() {
                                break;
                            }
                        }
                    }
                }
            }
        }

        let _ = ws_session.close(None).await;
        tracing::debug!("WebSocket message loop finished");
    });

    tracing::info!("WebSocket connection established");
    Ok(response)
}

/// Waits on the open conversation's feed. Pends forever while no
/// conversation is live so the select loop only wakes for client frames.
async fn next_view_event(
    view: &mut Option<ConversationView>,
) -> Result<Option<ViewEvent>, crate::api::error::SystemError> {
    match view.as_mut() {
        Some(v) if v.is_live() => v.next_event().await,
        _ => std::future::pending().await,
    }
}

/// First bytes of a client frame for the log, cut on a char boundary so
/// multi-byte input can never split mid-character.
fn frame_preview(text: &str) -> &str {
    let mut end = text.len().min(100);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

async fn send_frame(session: &mut actix_ws::Session, frame: &ServerFrame) -> Result<(), ()> {
    let json = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize server frame: {}", e);
            return Ok(());
        }
    };
    session.text(json).await.map_err(|_| ())
}

async fn notify_stale(
    view: &mut Option<ConversationView>,
    session: &mut actix_ws::Session,
) -> Result<(), ()> {
    if view.as_mut().map(|v| v.take_conversations_stale()).unwrap_or(false) {
        send_frame(session, &ServerFrame::ConversationsStale).await?;
    }
    Ok(())
}

/// After a resync the client's timeline is stale wholesale; re-send the
/// full window as a fresh open.
async fn send_resync(
    view: &mut Option<ConversationView>,
    session: &mut actix_ws::Session,
) -> Result<(), ()> {
    if let Some(v) = view.as_mut() {
        if let Some(conversation_id) = v.conversation_id() {
            let frame = ServerFrame::ConversationOpened {
                conversation_id,
                messages: v.timeline().to_vec(),
            };
            send_frame(session, &frame).await?;
        }
    }
    notify_stale(view, session).await
}

/// Handles one parsed client frame. Returns false when the connection
/// should be torn down.
async fn handle_frame(
    frame: ClientFrame,
    view: &mut Option<ConversationView>,
    session: &mut actix_ws::Session,
    message_service: &web::Data<MessageService>,
    workers: &web::Data<WorkerService>,
    employers: &web::Data<EmployerService>,
) -> bool {
    match frame {
        ClientFrame::Auth { token } => {
            match authenticate(&token, workers, employers).await {
                Ok((user_id, profile_id)) => {
                    *view = Some(ConversationView::new(
                        profile_id,
                        message_service.get_ref().clone(),
                    ));
                    let frame = ServerFrame::AuthSuccess { user_id: user_id.to_string() };
                    send_frame(session, &frame).await.is_ok()
                }
                Err(reason) => {
                    let _ = send_frame(session, &ServerFrame::AuthFailed { reason }).await;
                    false
                }
            }
        }

        ClientFrame::Ping => send_frame(session, &ServerFrame::Pong).await.is_ok(),

        ClientFrame::OpenConversation { conversation_id } => {
            let Some(view) = view.as_mut() else {
                return send_unauthenticated(session).await;
            };
            match view.open(conversation_id).await {
                Ok(messages) => {
                    let frame = ServerFrame::ConversationOpened { conversation_id, messages };
                    send_frame(session, &frame).await.is_ok()
                }
                Err(err) => {
                    let frame = ServerFrame::Error { message: err.to_string() };
                    send_frame(session, &frame).await.is_ok()
                }
            }
        }

        ClientFrame::CloseConversation => {
            if let Some(view) = view.as_mut() {
                view.close();
                true
            } else {
                send_unauthenticated(session).await
            }
        }

        ClientFrame::SendMessage { content } => {
            let send_result = match view.as_mut() {
                Some(v) => v.send(&content).await,
                None => return send_unauthenticated(session).await,
            };
            match send_result {
                Ok((sent, changes)) => {
                    if send_frame(session, &ServerFrame::MessageSent { message: sent })
                        .await
                        .is_err()
                    {
                        return false;
                    }
                    for change in changes {
                        let sent_ok = match change {
                            ViewEvent::Appended(message) => {
                                let frame = ServerFrame::NewMessage {
                                    conversation_id: message.conversation_id,
                                    message,
                                };
                                send_frame(session, &frame).await.is_ok()
                            }
                            ViewEvent::Resynced => send_resync(view, session).await.is_ok(),
                        };
                        if !sent_ok {
                            return false;
                        }
                    }
                    notify_stale(view, session).await.is_ok()
                }
                Err(err) => {
                    let frame = ServerFrame::Error { message: err.to_string() };
                    send_frame(session, &frame).await.is_ok()
                }
            }
        }
    }
}

async fn send_unauthenticated(session: &mut actix_ws::Session) -> bool {
    let frame = ServerFrame::Error { message: "Not authenticated".to_string() };
    send_frame(session, &frame).await.is_ok()
}

/// Verifies the token and resolves the caller's messaging identity (the
/// profile id on their side of the marketplace).
async fn authenticate(
    token: &str,
    workers: &web::Data<WorkerService>,
    employers: &web::Data<EmployerService>,
) -> Result<(Uuid, Uuid), String> {
    let claims = Claims::decode(token, ENV.jwt_secret.as_bytes())
        .map_err(|_| "Invalid token".to_string())?;

    let profile_id = match claims.role {
        UserRole::Worker => workers
            .get_by_user_id(&claims.sub)
            .await
            .map_err(|_| "Profile lookup failed".to_string())?
            .map(|p| p.id),
        UserRole::Employer => employers
            .get_by_user_id(&claims.sub)
            .await
            .map_err(|_| "Profile lookup failed".to_string())?
            .map(|p| p.id),
    };

    match profile_id {
        Some(profile_id) => Ok((claims.sub, profile_id)),
        None => Err("No profile for this account".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_preview_cuts_on_a_char_boundary() {
        // byte 100 falls inside the euro sign
        let frame = "a".repeat(99) + "€trailing";
        let preview = frame_preview(&frame);
        assert_eq!(preview, "a".repeat(99));
        assert!(frame.starts_with(preview));
    }

    #[test]
    fn frame_preview_keeps_short_frames_whole() {
        assert_eq!(frame_preview(r#"{"type":"ping"}"#), r#"{"type":"ping"}"#);
    }
}
