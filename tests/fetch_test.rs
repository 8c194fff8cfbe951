//! Archive download against a mocked chess.com API.

mod common;

use insights::clients::chess_com::ChessComError;
use insights::fetch::fetch_all_games;
use insights::store;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetches_every_archive_in_order() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/player/ardil30/games/archives"))
        .and(header("user-agent", "chess-insights-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "archives": [
                format!("{base}/player/ardil30/games/2024/01"),
                format!("{base}/player/ardil30/games/2024/02"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/player/ardil30/games/2024/01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "games": [common::raw_game(1, "white", "win", "checkmated", common::ITALIAN, 1_704_103_200)]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/player/ardil30/games/2024/02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "games": [
                common::raw_game(2, "black", "resigned", "win", common::SICILIAN, 1_706_781_600),
                common::raw_game(3, "white", "agreed", "agreed", common::ITALIAN, 1_706_785_200),
            ]
        })))
        .mount(&server)
        .await;

    let client = common::client(&base);
    let games = fetch_all_games(&client, common::USERNAME).await.unwrap();

    let urls: Vec<&str> = games.iter().map(|g| g["url"].as_str().unwrap()).collect();
    assert_eq!(
        urls,
        vec![
            "https://www.chess.com/game/live/1",
            "https://www.chess.com/game/live/2",
            "https://www.chess.com/game/live/3",
        ]
    );
}

#[tokio::test]
async fn failing_archive_is_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/player/ardil30/games/archives"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "archives": [
                format!("{base}/player/ardil30/games/2024/01"),
                format!("{base}/player/ardil30/games/2024/02"),
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/player/ardil30/games/2024/01"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/player/ardil30/games/2024/02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "games": [common::raw_game(7, "white", "win", "timeout", common::ITALIAN, 1_706_781_600)]
        })))
        .mount(&server)
        .await;

    let games = fetch_all_games(&common::client(&base), common::USERNAME).await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0]["url"], "https://www.chess.com/game/live/7");
}

#[tokio::test]
async fn unknown_player_yields_no_games_and_keeps_existing_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/player/ardil30/games/archives"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let games = fetch_all_games(&common::client(&server.uri()), common::USERNAME)
        .await
        .unwrap();
    assert!(games.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let raw_path = common::config_in(dir.path()).raw_games_path();
    assert!(store::save_raw_games(&raw_path, &[json!({"url": "kept"})]).unwrap());
    assert!(!store::save_raw_games(&raw_path, &games).unwrap());
    let kept = store::load_raw_games(&raw_path).unwrap();
    assert_eq!(kept[0].url.as_deref(), Some("kept"));
}

#[tokio::test]
async fn archive_listing_status_error_is_reported_by_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/player/ardil30/games/archives"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = common::client(&server.uri())
        .fetch_archives(common::USERNAME)
        .await
        .unwrap_err();
    assert!(matches!(err, ChessComError::Status { status, .. } if status.as_u16() == 503));
}
