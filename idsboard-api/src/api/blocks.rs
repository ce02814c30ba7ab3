use chrono::{DateTime, Utc};
use idsboard_common::{ActionLog, Block, IdsError, Persisted, Record};
use idsboard_core::action_log::record_action;
use idsboard_core::{DocumentFilter, Services, StoredDocument};
use poem::web::Data;
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object, OpenApi};
use serde_json::Value as JsonValue;
use tracing::*;

/// Listing is capped; there is no pagination.
const BLOCK_LIST_LIMIT: u64 = 100;

pub struct Api;

#[derive(Object)]
struct BlockCreated {
    status: String,
    id: String,
}

#[derive(Object)]
struct BlockItem {
    id: String,
    ip: String,
    reason: Option<String>,
    source: String,
    created_at: DateTime<Utc>,
}

impl From<StoredDocument<Block>> for BlockItem {
    fn from(document: StoredDocument<Block>) -> Self {
        Self {
            id: document.id,
            ip: document.record.ip,
            reason: document.record.reason,
            source: document.record.source,
            created_at: document.created_at,
        }
    }
}

#[derive(Object)]
struct BlockList {
    items: Vec<BlockItem>,
}

#[derive(ApiResponse)]
enum BlockIpResponse {
    #[oai(status = 200)]
    Ok(Json<BlockCreated>),
}

#[derive(ApiResponse)]
enum ListBlocksResponse {
    #[oai(status = 200)]
    Ok(Json<BlockList>),
}

#[OpenApi]
impl Api {
    #[oai(path = "/api/block-ip", method = "post", operation_id = "block_ip")]
    async fn api_block_ip(
        &self,
        services: Data<&Services>,
        body: Json<JsonValue>,
    ) -> Result<BlockIpResponse, IdsError> {
        let block = Block::validate(&body.0)?;
        let id = services
            .store
            .insert(Block::KIND.collection(), &block)
            .await?;
        info!(ip = %block.ip, source = %block.source, %id, "Blocked IP");

        record_action(&services.store, ActionLog::blocked(&block)).await;

        Ok(BlockIpResponse::Ok(Json(BlockCreated {
            status: "ok".into(),
            id,
        })))
    }

    #[oai(path = "/api/blocks", method = "get", operation_id = "list_blocks")]
    async fn api_list_blocks(
        &self,
        services: Data<&Services>,
    ) -> Result<ListBlocksResponse, IdsError> {
        let items = services
            .store
            .query::<Block>(
                Block::KIND.collection(),
                &DocumentFilter::all(),
                BLOCK_LIST_LIMIT,
            )
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(ListBlocksResponse::Ok(Json(BlockList { items })))
    }
}
