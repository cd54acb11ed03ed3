//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use livekit_rooms::config::{HttpConfig, ServiceConfig};
use livekit_rooms::{Config, EgressApi, EgressInfo, LiveKitConfig, LiveKitError};
use reqwest::StatusCode;

pub const TEST_KEY: &str = "APItestkey";
pub const TEST_SECRET: &str = "test-secret-that-is-long-enough";
pub const TEST_WS_URL: &str = "wss://demo.livekit.cloud";

pub fn livekit_config() -> LiveKitConfig {
    LiveKitConfig {
        api_key: Some(TEST_KEY.to_string()),
        api_secret: Some(TEST_SECRET.to_string()),
        ws_url: Some(TEST_WS_URL.to_string()),
        ..Default::default()
    }
}

pub fn app_config(livekit: LiveKitConfig) -> Config {
    Config {
        service: ServiceConfig {
            name: "livekit-rooms-test".to_string(),
            http: HttpConfig {
                bind: "127.0.0.1".to_string(),
                port: 8501,
            },
            headless: false,
            public_base_url: None,
            session_idle_secs: 600,
        },
        livekit,
    }
}

fn api_failure() -> LiveKitError {
    LiveKitError::Api {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: "egress unavailable".to_string(),
    }
}

/// In-memory egress service that records calls
#[derive(Default)]
pub struct FakeEgress {
    pub fail_start: bool,
    pub fail_stop: bool,
    /// Simulated latency of each remote call
    pub delay: Duration,
    pub start_calls: AtomicUsize,
    pub stop_calls: AtomicUsize,
    pub started_rooms: Mutex<Vec<String>>,
    pub stopped_ids: Mutex<Vec<String>>,
}

impl FakeEgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    pub fn failing_stop() -> Self {
        Self {
            fail_stop: true,
            ..Self::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn starts(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EgressApi for FakeEgress {
    async fn start_room_composite(&self, room: &str) -> Result<EgressInfo, LiveKitError> {
        let n = self.start_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.fail_start {
            return Err(api_failure());
        }
        self.started_rooms.lock().unwrap().push(room.to_string());
        Ok(EgressInfo {
            egress_id: format!("EG_test{}", n),
            room_name: room.to_string(),
        })
    }

    async fn stop_egress(&self, egress_id: &str) -> Result<EgressInfo, LiveKitError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.stopped_ids.lock().unwrap().push(egress_id.to_string());
        if self.fail_stop {
            return Err(api_failure());
        }
        Ok(EgressInfo {
            egress_id: egress_id.to_string(),
            room_name: String::new(),
        })
    }
}
