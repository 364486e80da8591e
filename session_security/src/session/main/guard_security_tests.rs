//! Session lifecycle security tests: expiry windows, origin binding, and
//! identifier rotation.
//!
//! Every test drives the guard through `RequestContext::at` with explicit
//! instants, so the three time thresholds are exercised deterministically
//! regardless of wall-clock speed.

#[cfg(test)]
mod tests {
    use crate::session::main::{create_session, validate_session};
    use crate::session::types::{ATTR_USER_ID, RequestContext};
    use crate::storage::SESSION_STORE;
    use crate::test_utils::init_test_environment;
    use chrono::{Duration, Utc};
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_validate_immediately_after_create() {
        init_test_environment().await;

        // Given a session created at T0
        let t0 = Utc::now();
        let create_request = RequestContext::at("sec-validate-fresh", "10.0.0.5", t0);
        let created = create_session(&create_request, "alice", 7).await.unwrap();
        assert!(created.last_action_at.is_none());

        // When validating one second later from the same origin
        let request = RequestContext::at("sec-validate-fresh", "10.0.0.5", t0 + Duration::seconds(1));
        let session = validate_session(&request).await.unwrap();

        // Then the session is live, bound to the same origin and user, with
        // the last action stamped and the identifier unchanged
        let session = session.expect("fresh session should validate");
        assert_eq!(session.handle, created.handle);
        assert_eq!(session.user_id, 7);
        assert_eq!(session.username.as_deref(), Some("alice"));
        assert_eq!(session.origin_address, "10.0.0.5");
        assert_eq!(session.created_at, t0);
        assert_eq!(session.last_action_at, Some(t0 + Duration::seconds(1)));
        assert!(session.last_rotated_at.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_absolute_expiry() {
        init_test_environment().await;

        // Given a session created at T0
        let t0 = Utc::now();
        let create_request = RequestContext::at("sec-absolute-expiry", "10.0.0.5", t0);
        create_session(&create_request, "alice", 7).await.unwrap();

        // When validating at T0 + 3h + 1s
        let request = RequestContext::at(
            "sec-absolute-expiry",
            "10.0.0.5",
            t0 + Duration::hours(3) + Duration::seconds(1),
        );
        let session = validate_session(&request).await.unwrap();

        // Then the session is rejected
        assert!(session.is_none());

        // And the record is gone: a later in-window request finds nothing
        let retry = RequestContext::at(
            "sec-absolute-expiry",
            "10.0.0.5",
            t0 + Duration::hours(3) + Duration::seconds(2),
        );
        assert!(validate_session(&retry).await.unwrap().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_absolute_lifetime_boundary_still_valid() {
        init_test_environment().await;

        // Given a session created at T0
        let t0 = Utc::now();
        let create_request = RequestContext::at("sec-absolute-boundary", "10.0.0.5", t0);
        create_session(&create_request, "alice", 7).await.unwrap();

        // When validating at exactly T0 + 3h
        let request = RequestContext::at("sec-absolute-boundary", "10.0.0.5", t0 + Duration::hours(3));
        let session = validate_session(&request).await.unwrap();

        // Then the session still validates (expiry is strictly greater-than)
        let session = session.expect("session exactly at the lifetime boundary is valid");
        assert_eq!(session.created_at, t0);
    }

    #[tokio::test]
    #[serial]
    async fn test_idle_expiry_inside_absolute_window() {
        init_test_environment().await;

        // Given a session created at T0 and used at T0 + 60s
        let t0 = Utc::now();
        let create_request = RequestContext::at("sec-idle-expiry", "10.0.0.5", t0);
        create_session(&create_request, "alice", 7).await.unwrap();

        let first = RequestContext::at("sec-idle-expiry", "10.0.0.5", t0 + Duration::seconds(60));
        assert!(validate_session(&first).await.unwrap().is_some());

        // When the next request arrives 31 minutes after that action, well
        // inside the 3 hour absolute window
        let idle = RequestContext::at(
            "sec-idle-expiry",
            "10.0.0.5",
            t0 + Duration::seconds(60) + Duration::minutes(31),
        );
        let session = validate_session(&idle).await.unwrap();

        // Then the session is rejected for idleness
        assert!(session.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_idle_boundary_still_valid() {
        init_test_environment().await;

        let t0 = Utc::now();
        let create_request = RequestContext::at("sec-idle-boundary", "10.0.0.5", t0);
        create_session(&create_request, "alice", 7).await.unwrap();

        let first = RequestContext::at("sec-idle-boundary", "10.0.0.5", t0 + Duration::seconds(10));
        assert!(validate_session(&first).await.unwrap().is_some());

        // Exactly 30 minutes of idleness is still acceptable
        let boundary = RequestContext::at(
            "sec-idle-boundary",
            "10.0.0.5",
            t0 + Duration::seconds(10) + Duration::minutes(30),
        );
        assert!(validate_session(&boundary).await.unwrap().is_some());
    }

    #[tokio::test]
    #[serial]
    async fn test_origin_mismatch_destroys_session() {
        init_test_environment().await;

        // Given a session bound to 10.0.0.5
        let t0 = Utc::now();
        let create_request = RequestContext::at("sec-origin-mismatch", "10.0.0.5", t0);
        create_session(&create_request, "alice", 7).await.unwrap();

        // When a request for the same channel arrives from a different origin
        let hijacked = RequestContext::at("sec-origin-mismatch", "10.0.0.6", t0 + Duration::seconds(5));
        let session = validate_session(&hijacked).await.unwrap();

        // Then the session is rejected
        assert!(session.is_none());

        // And it was destroyed, not merely hidden: the original origin loses
        // the session too
        let original = RequestContext::at("sec-origin-mismatch", "10.0.0.5", t0 + Duration::seconds(6));
        assert!(validate_session(&original).await.unwrap().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_rotation_after_interval() {
        init_test_environment().await;

        // Given a session created at T0
        let t0 = Utc::now();
        let create_request = RequestContext::at("sec-rotation", "10.0.0.5", t0);
        let created = create_session(&create_request, "alice", 7).await.unwrap();

        // When validating at T0 + 121s from the same origin
        let request = RequestContext::at("sec-rotation", "10.0.0.5", t0 + Duration::seconds(121));
        let session = validate_session(&request).await.unwrap();

        // Then the identifier changed while identity and start time survived
        let session = session.expect("rotated session should validate");
        assert_ne!(session.handle, created.handle);
        assert_eq!(session.user_id, 7);
        assert_eq!(session.origin_address, "10.0.0.5");
        assert_eq!(session.created_at, t0);
        assert_eq!(session.last_rotated_at, Some(t0 + Duration::seconds(121)));

        // And the old handle no longer addresses anything, while the channel
        // resolves to the new one
        let store = SESSION_STORE.lock().await;
        assert!(
            store
                .get_attribute(&created.handle, ATTR_USER_ID)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(store.get("sec-rotation").await.unwrap(), Some(session.handle));
    }

    #[tokio::test]
    #[serial]
    async fn test_no_rotation_within_interval() {
        init_test_environment().await;

        let t0 = Utc::now();
        let create_request = RequestContext::at("sec-no-rotation", "10.0.0.5", t0);
        let created = create_session(&create_request, "alice", 7).await.unwrap();

        // 119 seconds after creation the identifier must not change
        let request = RequestContext::at("sec-no-rotation", "10.0.0.5", t0 + Duration::seconds(119));
        let session = validate_session(&request).await.unwrap().unwrap();

        assert_eq!(session.handle, created.handle);
        assert!(session.last_rotated_at.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_rotation_baseline_advances() {
        init_test_environment().await;

        let t0 = Utc::now();
        let create_request = RequestContext::at("sec-rotation-baseline", "10.0.0.5", t0);
        create_session(&create_request, "alice", 7).await.unwrap();

        // First rotation at T0 + 121s
        let first = RequestContext::at("sec-rotation-baseline", "10.0.0.5", t0 + Duration::seconds(121));
        let rotated = validate_session(&first).await.unwrap().unwrap();
        assert_eq!(rotated.last_rotated_at, Some(t0 + Duration::seconds(121)));

        // 59 seconds after the rotation the baseline is the rotation, not the
        // session start, so the identifier stays put
        let second = RequestContext::at("sec-rotation-baseline", "10.0.0.5", t0 + Duration::seconds(180));
        let kept = validate_session(&second).await.unwrap().unwrap();
        assert_eq!(kept.handle, rotated.handle);
        assert_eq!(kept.last_rotated_at, Some(t0 + Duration::seconds(121)));

        // 121 seconds after the first rotation it rotates again
        let third = RequestContext::at("sec-rotation-baseline", "10.0.0.5", t0 + Duration::seconds(242));
        let rotated_again = validate_session(&third).await.unwrap().unwrap();
        assert_ne!(rotated_again.handle, kept.handle);
        assert_eq!(rotated_again.last_rotated_at, Some(t0 + Duration::seconds(242)));
    }

    #[tokio::test]
    #[serial]
    async fn test_handles_are_unique_across_sessions() {
        init_test_environment().await;

        // Session identifiers must not collide or follow a guessable pattern
        let t0 = Utc::now();
        let mut handles = std::collections::HashSet::new();

        for i in 0..50 {
            let channel = format!("sec-fixation-{i}");
            let request = RequestContext::at(&channel, "10.0.0.5", t0);
            let session = create_session(&request, "alice", i).await.unwrap();

            let id = session.handle.as_str().to_string();
            assert!(id.len() >= 32, "handle should be long enough: {id}");
            assert!(handles.insert(id), "handle should be unique");
        }

        assert_eq!(handles.len(), 50);
    }
}
