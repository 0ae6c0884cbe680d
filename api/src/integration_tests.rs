//! Router-level tests for the Sassy API
//!
//! The full router runs against in-memory sources so every route, the
//! operator middleware and the error mapping are exercised together.
//!
//! Run with: cargo test integration_tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::app::{LeaderboardService, LeaderboardSettings, SnapshotService};
    use crate::auth::operator::hash_token;
    use crate::config::Config;
    use crate::domain::entities::{Cast, Fid, ModeratorRoster, RulesConfig};
    use crate::domain::ports::{EngagementSource, ReactionSource, SnapshotRepository};
    use crate::domain::scoring::ExclusionList;
    use crate::test_utils::{
        approved_likes, test_cast, InMemoryEngagementSource, InMemoryReactionSource,
        InMemorySnapshotRepository,
    };
    use crate::{build_router, AppState};

    const OPERATOR_TOKEN: &str = "sassy-operator-token";

    fn test_config(operator_token: Option<&str>) -> Config {
        Config {
            port: 0,
            counter_store_url: "http://counter.test".to_string(),
            counter_store_token: String::new(),
            snapshot_store_url: "http://snapshots.test".to_string(),
            snapshot_store_token: String::new(),
            hub_url: "http://hub.test".to_string(),
            operator_token_sha256: operator_token.map(hash_token),
            rules: RulesConfig::default(),
            exclusions: ExclusionList::new().with_fids([Fid(6546)]),
            moderators: ModeratorRoster::default(),
            most_seen_per_fid: 3,
        }
    }

    fn week_casts() -> (Vec<Cast>, InMemoryReactionSource) {
        let casts = vec![
            test_cast(6546, "0xop", 900),
            test_cast(1, "0xa", 30),
            test_cast(2, "0xb", 20),
            test_cast(3, "0xc", 10),
        ];
        let reactions = InMemoryReactionSource::new()
            .with_likes("0xop", approved_likes(&[533, 3115]))
            .with_likes("0xa", approved_likes(&[533, 3115, 77]))
            .with_likes("0xb", approved_likes(&[533, 4163]))
            .with_likes("0xc", approved_likes(&[533]));
        (casts, reactions)
    }

    fn server_with(operator_token: Option<&str>) -> TestServer {
        let config = test_config(operator_token);
        let (casts, reactions) = week_casts();

        let engagement: Arc<dyn EngagementSource> = Arc::new(InMemoryEngagementSource::new(casts));
        let reactions: Arc<dyn ReactionSource> = Arc::new(reactions);
        let snapshots: Arc<dyn SnapshotRepository> = Arc::new(InMemorySnapshotRepository::new());

        let leaderboard_service = Arc::new(
            LeaderboardService::new(engagement, reactions).with_settings(LeaderboardSettings {
                rules: config.rules.clone(),
                exclusions: config.exclusions.clone(),
                moderators: config.moderators.clone(),
                most_seen_per_fid: config.most_seen_per_fid,
            }),
        );
        let snapshot_service = Arc::new(SnapshotService::new(snapshots));

        let state = AppState {
            leaderboard_service,
            snapshot_service,
            config,
        };
        TestServer::new(build_router(state).unwrap()).unwrap()
    }

    fn server() -> TestServer {
        server_with(Some(OPERATOR_TOKEN))
    }

    fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }

    // ==========================================================================
    // Public routes
    // ==========================================================================

    #[tokio::test]
    async fn health_reports_ok() {
        let response = server().get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn rules_are_served_camel_case() {
        let response = server().get("/rules").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["topN"], 15);
        assert_eq!(body["minMods"], 2);
        assert_eq!(body["vector"]["views"], 1.0);
    }

    #[tokio::test]
    async fn leaderboard_pays_only_approved_casts() {
        let response = server().get("/leaderboard").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let winners = body["winners"].as_array().unwrap();
        let fids: Vec<_> = winners.iter().map(|w| w["fid"].as_u64().unwrap()).collect();
        assert_eq!(fids, vec![1, 2]);

        let total: f64 = winners.iter().map(|w| w["payout"].as_f64().unwrap()).sum();
        assert!((total - 100.0).abs() < 1e-6);
        assert_eq!(body["distribution"]["nRaw"], 2);
    }

    #[tokio::test]
    async fn leaderboard_min_mods_override() {
        let response = server()
            .get("/leaderboard")
            .add_query_param("min_mods", 1)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["rulesConfig"]["minMods"], 1);
        assert_eq!(body["winners"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn leaderboard_rejects_threshold_above_roster() {
        let response = server()
            .get("/leaderboard")
            .add_query_param("min_mods", 99)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn casts_sort_by_likes() {
        let response = server()
            .get("/casts")
            .add_query_param("sort", "likes")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let hashes: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["castHash"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(hashes, vec!["0xa", "0xb", "0xc"]);
        assert_eq!(body[0]["likes"], 3);
        assert_eq!(body[0]["modLikeCount"], 2);
    }

    #[tokio::test]
    async fn casts_reject_unknown_sort() {
        let response = server()
            .get("/casts")
            .add_query_param("sort", "vibes")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn snapshots_are_not_found_before_first_write() {
        let server = server();

        server
            .get("/api/munnies")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get("/api/munnies/csv")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get("/api/best-of-sassy")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    // ==========================================================================
    // Operator routes
    // ==========================================================================

    #[tokio::test]
    async fn snapshot_write_requires_token() {
        let server = server();

        server
            .post("/api/munnies")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/api/munnies")
            .add_header(header::AUTHORIZATION, bearer("wrong"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejected_writes_do_not_spend_the_rate_limit() {
        let server = server();

        for _ in 0..8 {
            server
                .post("/api/munnies")
                .await
                .assert_status(StatusCode::UNAUTHORIZED);
        }

        server
            .post("/api/munnies")
            .add_header(header::AUTHORIZATION, bearer(OPERATOR_TOKEN))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn operator_writes_are_rate_limited() {
        let server = server();

        for _ in 0..5 {
            server
                .post("/api/munnies")
                .add_header(header::AUTHORIZATION, bearer(OPERATOR_TOKEN))
                .await
                .assert_status_ok();
        }

        server
            .post("/api/munnies")
            .add_header(header::AUTHORIZATION, bearer(OPERATOR_TOKEN))
            .await
            .assert_status(StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn snapshot_writes_disabled_without_configured_token() {
        server_with(None)
            .post("/api/best-of-sassy")
            .add_header(header::AUTHORIZATION, bearer(OPERATOR_TOKEN))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn empty_post_snapshots_live_winners() {
        let server = server();

        let response = server
            .post("/api/munnies")
            .add_header(header::AUTHORIZATION, bearer(OPERATOR_TOKEN))
            .await;
        response.assert_status_ok();
        let saved: Value = response.json();
        assert_eq!(saved["ok"], true);

        let response = server.get("/api/munnies").await;
        response.assert_status_ok();
        let disposition = response.header(header::CONTENT_DISPOSITION);
        assert!(disposition
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"winners-snapshot-"));

        let snapshot: Value = response.json();
        assert_eq!(snapshot["timestamp"], saved["timestamp"]);
        assert_eq!(snapshot["winners"].as_array().unwrap().len(), 2);
        assert_eq!(snapshot["rulesConfig"]["topN"], 15);
    }

    #[tokio::test]
    async fn posted_winners_feed_the_csv() {
        let server = server();
        let body = json!({
            "winners": [{
                "fid": 644823,
                "username": "0xkesha",
                "rawScore": 22,
                "smoothScore": 18.836579051786785,
                "numCasts": 2,
                "payout": 11.019504293923909
            }],
            "rulesConfig": {
                "topN": 2,
                "totalPool": 11.019504293923909,
                "minPayout": 5,
                "minMods": 2,
                "vector": { "views": 1, "likes": 0, "replies": 0 }
            }
        });

        server
            .post("/api/munnies")
            .add_header(header::AUTHORIZATION, bearer(OPERATOR_TOKEN))
            .json(&body)
            .await
            .assert_status_ok();

        let response = server.get("/api/munnies/csv").await;
        response.assert_status_ok();
        assert_eq!(
            response.text(),
            "fid,username,USDC,DEGEN,BURRITO\n644823,0xkesha,6.61,3.31,1.10\n"
        );
    }

    #[tokio::test]
    async fn posted_rules_are_validated() {
        let body = json!({
            "winners": [],
            "rulesConfig": { "topN": 3, "totalPool": 10, "minPayout": 5, "minMods": 2 }
        });

        server()
            .post("/api/munnies")
            .add_header(header::AUTHORIZATION, bearer(OPERATOR_TOKEN))
            .json(&body)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn posted_payouts_must_match_the_pool() {
        let server = server();
        let winner = |fid: u64, payout: f64| {
            json!({
                "fid": fid,
                "username": format!("u{}", fid),
                "rawScore": 10,
                "smoothScore": 10,
                "numCasts": 1,
                "payout": payout
            })
        };
        let rules = json!({ "topN": 15, "totalPool": 100, "minPayout": 5, "minMods": 2 });

        for winners in [
            json!([winner(1, 1.0), winner(2, 5000.0)]),
            json!([winner(1, 1.0), winner(2, 99.0)]),
            json!([winner(1, 50.0), winner(1, 50.0)]),
        ] {
            server
                .post("/api/munnies")
                .add_header(header::AUTHORIZATION, bearer(OPERATOR_TOKEN))
                .json(&json!({ "winners": winners, "rulesConfig": rules }))
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        server
            .get("/api/munnies/csv")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_post_snapshots_live_distribution() {
        let server = server();

        server
            .post("/api/best-of-sassy")
            .add_header(header::AUTHORIZATION, bearer(OPERATOR_TOKEN))
            .await
            .assert_status_ok();

        let response = server.get("/api/best-of-sassy").await;
        response.assert_status_ok();
        let snapshot: Value = response.json();
        assert_eq!(snapshot["bestOfSassy"]["nRaw"], 2);
        assert_eq!(
            snapshot["bestOfSassy"]["items"].as_array().unwrap().len(),
            2
        );
    }
}
