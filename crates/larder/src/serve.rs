// SPDX-FileCopyrightText: 2026 Larder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring for `larder serve`: opens the stores, builds the broker and the
//! reducer, and runs the gateway until the process exits.

use std::sync::Arc;

use larder_broker::{QueryBroker, QuotaLimits};
use larder_config::LarderConfig;
use larder_core::LarderError;
use larder_gateway::{GatewayState, ServerConfig};
use larder_openai::OpenAiClient;
use larder_storage::{FsObjectStore, SqliteDocumentStore};
use larder_vision::VisionLogReducer;
use tracing::{info, warn};

pub async fn run(config: LarderConfig) -> Result<(), LarderError> {
    let documents = SqliteDocumentStore::open(&config.storage.database_path).await?;
    let objects = FsObjectStore::new(config.storage.object_root.clone());
    info!(
        database = %config.storage.database_path,
        object_root = %config.storage.object_root,
        "stores opened"
    );

    if config.openai.api_key.is_none() {
        warn!("openai.api_key is not set; queries will be rejected");
    }
    let client = OpenAiClient::new(config.openai.api_key.clone())?;

    let broker = QueryBroker::new(
        Arc::new(documents.clone()),
        client,
        QuotaLimits::from(&config.quota),
    );
    let reducer = VisionLogReducer::new(
        Arc::new(documents),
        Arc::new(objects),
        config.storage.image_base_location.clone(),
    );

    let state = GatewayState {
        broker: Arc::new(broker),
        reducer: Arc::new(reducer),
    };
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    larder_gateway::start_server(&server_config, state).await
}
