use idsboard_common::validation::validate_list;
use idsboard_common::{ActionLog, Alert, IdsError};
use idsboard_core::action_log::record_action;
use idsboard_core::export::to_csv;
use idsboard_core::Services;
use poem::web::Data;
use poem_openapi::payload::{Json, PlainText};
use poem_openapi::{ApiResponse, OpenApi};
use serde_json::Value as JsonValue;
use tracing::*;

pub struct Api;

#[derive(ApiResponse)]
enum ExportAlertsResponse {
    #[oai(status = 200)]
    Ok(PlainText<String>),
}

#[OpenApi]
impl Api {
    /// Converts the posted alerts to CSV. Alerts are not stored.
    #[oai(path = "/api/alerts/export", method = "post", operation_id = "export_alerts")]
    async fn api_export_alerts(
        &self,
        services: Data<&Services>,
        body: Json<JsonValue>,
    ) -> Result<ExportAlertsResponse, IdsError> {
        let alerts = validate_list::<Alert>(&body.0)?;
        let csv = to_csv(&alerts);
        debug!(count = alerts.len(), "Exported alerts");

        record_action(&services.store, ActionLog::exported(alerts.len())).await;

        Ok(ExportAlertsResponse::Ok(PlainText(csv)))
    }
}
