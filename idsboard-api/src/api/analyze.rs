use idsboard_common::{ActionLog, AnalyzeRequest, AnalyzeResponse, IdsError, Record};
use idsboard_core::action_log::record_action;
use idsboard_core::analyzer::analyze;
use idsboard_core::Services;
use poem::web::Data;
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, OpenApi};
use serde_json::Value as JsonValue;
use tracing::*;

pub struct Api;

#[derive(ApiResponse)]
enum AnalyzeLogsResponse {
    #[oai(status = 200)]
    Ok(Json<AnalyzeResponse>),
}

#[OpenApi]
impl Api {
    #[oai(path = "/api/ai/analyze", method = "post", operation_id = "analyze_logs")]
    async fn api_analyze_logs(
        &self,
        services: Data<&Services>,
        body: Json<JsonValue>,
    ) -> Result<AnalyzeLogsResponse, IdsError> {
        let request = AnalyzeRequest::validate(&body.0)?;
        let analysis = analyze(&request.text);
        info!(risk = %analysis.risk, findings = analysis.findings.len(), "Analyzed log text");

        record_action(&services.store, ActionLog::analyzed(analysis.risk)).await;

        Ok(AnalyzeLogsResponse::Ok(Json(AnalyzeResponse {
            risk: analysis.risk,
            summary: analysis.findings.into_iter().map(ToOwned::to_owned).collect(),
        })))
    }
}
