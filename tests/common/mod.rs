#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Barrier;

use cinescope::client::{ClientError, ProxyRoute, ProxyTransport};

/// Scripted proxy: answers by route path and records every call
#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, Result<Value, ClientError>>,
    delays: HashMap<String, Duration>,
    barrier: Option<Arc<Barrier>>,
    calls: Mutex<Vec<ProxyRoute>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, path: &str, error: ClientError) -> Self {
        self.responses.insert(path.to_string(), Err(error));
        self
    }

    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    /// Every call waits until `parties` calls are in flight at once
    pub fn rendezvous(mut self, parties: usize) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn calls(&self) -> Vec<ProxyRoute> {
        self.calls.lock().unwrap().clone()
    }

    /// Successful answers for the four detail routes of one title
    pub fn with_detail_set(self, prefix: &str, details: Value) -> Self {
        self.respond(prefix, details)
            .respond(&format!("{}/credits", prefix), json!({ "cast": [] }))
            .respond(
                &format!("{}/recommendations", prefix),
                json!({ "page": 1, "results": [] }),
            )
            .respond(&format!("{}/watch/providers", prefix), json!({ "results": {} }))
    }
}

#[async_trait]
impl ProxyTransport for FakeTransport {
    async fn get_json(&self, route: &ProxyRoute) -> Result<Value, ClientError> {
        self.calls.lock().unwrap().push(route.clone());

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        let path = route.path();
        if let Some(delay) = self.delays.get(&path) {
            tokio::time::sleep(*delay).await;
        }

        self.responses
            .get(&path)
            .cloned()
            .unwrap_or_else(|| {
                Err(ClientError::Upstream {
                    status: 404,
                    message: "Failed to fetch data from the metadata API.".to_string(),
                })
            })
    }
}

/// Shares one transport between the runtime and the test body
pub struct SharedTransport(pub Arc<FakeTransport>);

#[async_trait]
impl ProxyTransport for SharedTransport {
    async fn get_json(&self, route: &ProxyRoute) -> Result<Value, ClientError> {
        self.0.get_json(route).await
    }
}

pub fn listing(titles: &[(u64, &str)]) -> Value {
    let results: Vec<Value> = titles
        .iter()
        .map(|(id, title)| json!({ "id": id, "title": title, "vote_average": 7.0 }))
        .collect();
    json!({ "page": 1, "results": results, "total_pages": 1, "total_results": titles.len() })
}
