use chrono::Duration;
use std::collections::HashMap;

use crate::session::config::{
    SESSION_ABSOLUTE_LIFETIME, SESSION_IDLE_TIMEOUT, SESSION_ROTATION_INTERVAL,
};
use crate::session::errors::SessionError;
use crate::session::types::{
    ATTR_LAST_ACTION, ATTR_LAST_ROTATION, ATTR_ORIGIN_ADDRESS, ATTR_SESSION_START, ATTR_USER_ID,
    ATTR_USERNAME, RequestContext, Session,
};
use crate::storage::{AttributeValue, SESSION_STORE, SessionHandle, SessionStore};

/// Run the standard security checks on the session bound to the request's
/// channel.
///
/// Any rejected check destroys the underlying record and yields `Ok(None)`,
/// so a hijacked or stale handle is never left behind for a later request.
/// An accepted session gets its last-action timestamp refreshed and, once
/// every rotation interval, a fresh identifier with all attributes carried
/// over.
///
/// # Returns
/// * `Ok(Some(Session))` - The session passed every check
/// * `Ok(None)` - No session, or the session failed a check and was destroyed
/// * `Err(SessionError)` - The store itself could not be reached
pub async fn validate_session(request: &RequestContext) -> Result<Option<Session>, SessionError> {
    // One lock acquisition spans the whole check-rotate-stamp sequence, so a
    // concurrent request on the same channel can never observe a half-rotated
    // session.
    let mut store = SESSION_STORE.lock().await;

    let Some(handle) = store.get(request.channel_id()).await? else {
        return Ok(None);
    };

    let now = request.now();

    let user_id = store
        .get_attribute(&handle, ATTR_USER_ID)
        .await?
        .and_then(AttributeValue::into_integer);
    let origin_address = store
        .get_attribute(&handle, ATTR_ORIGIN_ADDRESS)
        .await?
        .and_then(AttributeValue::into_text);
    let created_at = store
        .get_attribute(&handle, ATTR_SESSION_START)
        .await?
        .and_then(AttributeValue::into_instant);
    let last_action = store
        .get_attribute(&handle, ATTR_LAST_ACTION)
        .await?
        .and_then(AttributeValue::into_instant);
    let last_rotation = store
        .get_attribute(&handle, ATTR_LAST_ROTATION)
        .await?
        .and_then(AttributeValue::into_instant);

    // Fail closed: a record missing identity, origin, or start time is void.
    let (user_id, origin_address, created_at) = match (user_id, origin_address, created_at) {
        (Some(user_id), Some(origin_address), Some(created_at)) => {
            if origin_address != request.remote_origin() {
                tracing::debug!("Invalidating session: origin address changed");
                store.invalidate(&handle).await?;
                return Ok(None);
            }
            (user_id, origin_address, created_at)
        }
        _ => {
            tracing::debug!("Invalidating session: incomplete session record");
            store.invalidate(&handle).await?;
            return Ok(None);
        }
    };

    if now - created_at > Duration::seconds(*SESSION_ABSOLUTE_LIFETIME as i64) {
        tracing::debug!("Invalidating session: absolute lifetime exceeded");
        store.invalidate(&handle).await?;
        return Ok(None);
    }

    if let Some(last) = last_action {
        if now - last > Duration::seconds(*SESSION_IDLE_TIMEOUT as i64) {
            tracing::debug!("Invalidating session: idle timeout exceeded");
            store.invalidate(&handle).await?;
            return Ok(None);
        }
    }

    // Rotation baseline is the last rotation, or the session start before the
    // first one.
    let rotation_base = last_rotation.unwrap_or(created_at);
    let (handle, last_rotated_at) =
        if now - rotation_base >= Duration::seconds(*SESSION_ROTATION_INTERVAL as i64) {
            let new_handle = rotate_handle(&mut store, request.channel_id(), &handle).await?;
            store
                .set_attribute(&new_handle, ATTR_LAST_ROTATION, AttributeValue::Instant(now))
                .await?;
            tracing::debug!("Rotated session identifier for user {}", user_id);
            (new_handle, Some(now))
        } else {
            (handle, last_rotation)
        };

    store
        .set_attribute(&handle, ATTR_LAST_ACTION, AttributeValue::Instant(now))
        .await?;

    let username = store
        .get_attribute(&handle, ATTR_USERNAME)
        .await?
        .and_then(AttributeValue::into_text);

    Ok(Some(Session {
        handle,
        user_id,
        username,
        origin_address,
        created_at,
        last_action_at: Some(now),
        last_rotated_at,
    }))
}

/// Create a session bound to the request's channel and origin.
///
/// Any session already bound to the channel is destroyed first, so a channel
/// never carries two live sessions.
pub async fn create_session(
    request: &RequestContext,
    username: &str,
    user_id: i64,
) -> Result<Session, SessionError> {
    let mut store = SESSION_STORE.lock().await;

    if let Some(existing) = store.get(request.channel_id()).await? {
        store.invalidate(&existing).await?;
    }

    let handle = store.create(request.channel_id()).await?;
    let now = request.now();
    let origin_address = request.remote_origin().to_string();

    store
        .set_attribute(&handle, ATTR_USERNAME, AttributeValue::Text(username.to_string()))
        .await?;
    store
        .set_attribute(
            &handle,
            ATTR_ORIGIN_ADDRESS,
            AttributeValue::Text(origin_address.clone()),
        )
        .await?;
    store
        .set_attribute(&handle, ATTR_SESSION_START, AttributeValue::Instant(now))
        .await?;
    store
        .set_attribute(&handle, ATTR_USER_ID, AttributeValue::Integer(user_id))
        .await?;

    tracing::debug!("Created session for user {}", user_id);

    Ok(Session {
        handle,
        user_id,
        username: Some(username.to_string()),
        origin_address,
        created_at: now,
        // The first validated request stamps the last action.
        last_action_at: None,
        last_rotated_at: None,
    })
}

/// Destroy the session bound to the request's channel. No-op when the channel
/// carries none.
pub async fn dispose_session(request: &RequestContext) -> Result<(), SessionError> {
    let mut store = SESSION_STORE.lock().await;

    if let Some(handle) = store.get(request.channel_id()).await? {
        store.invalidate(&handle).await?;
        tracing::debug!("Disposed session");
    }
    Ok(())
}

/// Reissue a session's identifier while preserving its attributes.
///
/// The old record is gone once this returns; there is no state in which both
/// handles address a live session. Callers must hold the store lock.
async fn rotate_handle(
    store: &mut Box<dyn SessionStore>,
    channel_id: &str,
    handle: &SessionHandle,
) -> Result<SessionHandle, SessionError> {
    let mut attributes = HashMap::new();
    for key in store.attribute_keys(handle).await? {
        if let Some(value) = store.get_attribute(handle, &key).await? {
            attributes.insert(key, value);
        }
    }

    store.invalidate(handle).await?;

    let new_handle = store.create(channel_id).await?;
    for (key, value) in attributes {
        store.set_attribute(&new_handle, &key, value).await?;
    }
    Ok(new_handle)
}
