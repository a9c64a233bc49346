#![allow(dead_code)]

use axum::{Json, Router, extract::Path, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use wallet_bot::balance::HttpBalanceClient;
use wallet_bot::store::MemoryStore;
use wallet_bot::validator::WalletValidator;

pub const ADDR: &str = "0x1234567890123456789012345678901234567890";

/// What the mock balance API answers with.
#[derive(Clone)]
pub enum MockReply {
    Json(StatusCode, Value),
    Raw(StatusCode, &'static str),
    Slow(Duration),
}

pub struct MockBalanceApi {
    pub url_template: String,
    hits: Arc<AtomicUsize>,
}

impl MockBalanceApi {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serves `GET /balance/{address}` on an ephemeral local port.
pub async fn spawn_balance_api(reply: MockReply) -> MockBalanceApi {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let app = Router::new().route(
        "/balance/{address}",
        get(move |Path(address): Path<String>| {
            let reply = reply.clone();
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                match reply {
                    MockReply::Json(status, body) => (status, Json(body)).into_response(),
                    MockReply::Raw(status, body) => (status, body.to_string()).into_response(),
                    MockReply::Slow(delay) => {
                        tokio::time::sleep(delay).await;
                        (StatusCode::OK, Json(json!({"balance": 1.0, "address": address})))
                            .into_response()
                    }
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBalanceApi {
        url_template: format!("http://{addr}/balance/{{address}}"),
        hits,
    }
}

pub fn validator_for(api: &MockBalanceApi, store: &Arc<MemoryStore>, timeout: Duration) -> WalletValidator {
    let lookup = HttpBalanceClient::new(&api.url_template, timeout).unwrap();
    WalletValidator::new(store.clone(), Arc::new(lookup), timeout)
}
