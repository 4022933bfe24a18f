//! Runs the CLI commands against the sample site under `site/`.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::ServiceExt;
use waypost::{
    Config,
    cmd::{self, check},
    server::{ServerState, create_router},
};

fn config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../site/waypost.toml")
}

#[test]
fn test_sample_site_checks_clean() {
    let result = check::validate(&config_path());
    assert!(result.errors().is_empty(), "{:?}", result.errors());
    assert!(result.warnings().is_empty(), "{:?}", result.warnings());
}

#[test]
fn test_sample_site_resolve() {
    assert!(cmd::resolve::run(&config_path(), "/docs/tutorials/nextjs").is_ok());
    assert!(cmd::resolve::run(&config_path(), "/blog").is_err());
}

#[tokio::test]
async fn test_sample_site_serves_redirect_and_destination() {
    let config = Config::load(&config_path()).unwrap();
    let root = cmd::site_path(&config_path(), &config.serve.root);
    let state = Arc::new(ServerState::new(config.redirect_table().unwrap()));
    let app = create_router(&root, state);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/docs/tutorials/nextjs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers()[header::LOCATION].to_str().unwrap().to_string();
    assert_eq!(location, "/docs/tutorials/nextjs/step-1");

    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("{location}/"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
