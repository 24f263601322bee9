use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rank_oracle::config::RankConfig;
use rank_oracle::driver::signer::verify;
use rank_oracle::driver::{
    render_table, ConsensusOptions, DataResult, DrId, RequestDriver, SignedDataRequest,
};
use rank_oracle::execution::{decode_u128, encode_u128};
use rank_oracle::RankError;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory gateway: each request is tallied after one pending lookup.
#[derive(Clone, Default)]
struct Gateway {
    posted: Arc<Mutex<Vec<SignedDataRequest>>>,
    lookups: Arc<Mutex<HashMap<String, u32>>>,
}

async fn post_request(
    State(gw): State<Gateway>,
    Json(req): Json<SignedDataRequest>,
) -> Json<Value> {
    let mut posted = gw.posted.lock().unwrap();
    posted.push(req);
    Json(json!({ "dr_id": format!("dr-{}", posted.len()), "height": 7 }))
}

async fn get_result(
    State(gw): State<Gateway>,
    Path(dr_id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let mut lookups = gw.lookups.lock().unwrap();
    let seen = lookups.entry(dr_id.clone()).or_insert(0);
    *seen += 1;
    if *seen < 2 {
        return Err(StatusCode::NOT_FOUND);
    }
    let index: usize = dr_id.trim_start_matches("dr-").parse().unwrap();
    let posted = gw.posted.lock().unwrap();
    let input = String::from_utf8(posted[index - 1].request.exec_inputs.clone()).unwrap();
    let price: u128 = input.parse::<u128>().unwrap() * 1_000;
    Ok(Json(json!({
        "dr_id": dr_id,
        "exit_code": 0,
        "result": hex::encode(encode_u128(price)),
        "block_height": 100,
        "gas_used": "12345",
        "consensus": true
    })))
}

async fn spawn_gateway() -> (String, Gateway) {
    let gateway = Gateway::default();
    let app = Router::new()
        .route("/data-requests", post(post_request))
        .route("/data-requests/:dr_id/result", get(get_result))
        .with_state(gateway.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), gateway)
}

fn driver_config(rpc_endpoint: &str) -> RankConfig {
    let mut config = RankConfig::default();
    config.driver.oracle_program_id = Some("0xrankprogram".into());
    config.driver.mnemonic = Some("pistol aunt rural dash".into());
    config.driver.rpc_endpoint = Some(rpc_endpoint.to_string());
    config.driver.poll_interval_ms = 20;
    config.driver.await_timeout_secs = 5;
    config
}

#[tokio::test]
async fn posts_two_requests_sequentially_and_awaits_each() {
    let (url, gateway) = spawn_gateway().await;
    let driver = RequestDriver::from_config(&driver_config(&url).driver).unwrap();

    let mut results: Vec<DataResult> = Vec::new();
    for input in ["1", "2"] {
        let result = driver
            .submit(input.as_bytes(), ConsensusOptions::None)
            .await
            .unwrap();
        results.push(result);
    }

    assert_eq!(results[0].dr_id, DrId("dr-1".into()));
    assert_eq!(decode_u128(&results[0].result).unwrap(), 1_000);
    assert_eq!(decode_u128(&results[1].result).unwrap(), 2_000);

    let posted = gateway.posted.lock().unwrap();
    assert_eq!(posted.len(), 2);
    for (signed, input) in posted.iter().zip(["1", "2"]) {
        assert!(verify(signed).is_ok());
        assert_eq!(signed.request.exec_program_id, "0xrankprogram");
        assert_eq!(signed.request.exec_inputs, input.as_bytes());
        assert!(signed.request.tally_inputs.is_empty());
        assert_eq!(signed.request.consensus_options, ConsensusOptions::None);
        let memo = String::from_utf8(signed.request.memo.clone()).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&memo).is_ok());
    }
}

#[tokio::test]
async fn rendered_result_shows_decoded_price() {
    let (url, _gateway) = spawn_gateway().await;
    let driver = RequestDriver::from_config(&driver_config(&url).driver).unwrap();
    let result = driver.submit(b"65", ConsensusOptions::None).await.unwrap();
    let table = render_table(&result);
    assert!(table.contains("(65000)"));
    assert!(table.contains("| consensus"));
}

#[tokio::test]
async fn rejected_submission_surfaces_an_error() {
    let app = Router::new().route(
        "/data-requests",
        post(|| async { (StatusCode::BAD_REQUEST, "insufficient funds") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = driver_config(&format!("http://{}", addr));
    let driver = RequestDriver::from_config(&config.driver).unwrap();
    let err = driver
        .submit(b"1", ConsensusOptions::None)
        .await
        .unwrap_err();
    assert!(matches!(err, RankError::ApiError(_)));
    assert!(err.to_string().contains("insufficient funds"));
}

#[test]
fn missing_program_id_fails_before_any_request() {
    let mut config = driver_config("http://127.0.0.1:1");
    config.driver.oracle_program_id = None;
    let err = RequestDriver::from_config(&config.driver).err().unwrap();
    assert!(matches!(err, RankError::ConfigError(_)));
}
