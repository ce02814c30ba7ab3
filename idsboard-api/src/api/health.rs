use idsboard_core::{Services, StoreHealth};
use poem::web::Data;
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object, OpenApi};

pub struct Api;

#[derive(Object, Debug, PartialEq, Eq)]
pub struct HealthReport {
    backend: String,
    database: String,
    database_url: Option<String>,
    database_name: Option<String>,
    connection_status: String,
    collections: Vec<String>,
}

impl From<StoreHealth> for HealthReport {
    fn from(health: StoreHealth) -> Self {
        let mut report = HealthReport {
            backend: "✅ Running".into(),
            database: "❌ Not Available".into(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".into(),
            collections: vec![],
        };
        if !health.available {
            return report;
        }

        report.database = "✅ Available".into();
        report.database_url = Some(if health.database_url_set {
            "✅ Set".into()
        } else {
            "❌ Not Set".into()
        });
        report.database_name = Some(health.database_name.unwrap_or_else(|| "✅ Connected".into()));
        report.connection_status = "Connected".into();

        match health.collections_error {
            None => {
                report.collections = health.collections;
                report.database = "✅ Connected & Working".into();
            }
            Some(error) => {
                let error = error.chars().take(50).collect::<String>();
                report.database = format!("⚠️  Connected but Error: {error}");
            }
        }
        report
    }
}

#[derive(ApiResponse)]
enum HealthResponse {
    #[oai(status = 200)]
    Ok(Json<HealthReport>),
}

#[OpenApi]
impl Api {
    /// Reports backend and document store status. Always answers 200.
    #[oai(path = "/test", method = "get", operation_id = "get_health")]
    async fn api_health(&self, services: Data<&Services>) -> HealthResponse {
        let health = services.store.health().await;
        HealthResponse::Ok(Json(health.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> StoreHealth {
        StoreHealth {
            available: true,
            database_url_set: true,
            database_name: Some("idsboard".into()),
            degraded_reason: None,
            collections: vec!["actionlog".into(), "block".into()],
            collections_error: None,
        }
    }

    #[test]
    fn degraded_store_is_not_available() {
        let report = HealthReport::from(StoreHealth {
            available: false,
            database_url_set: true,
            database_name: Some("idsboard".into()),
            degraded_reason: Some("connection refused".into()),
            collections: vec![],
            collections_error: None,
        });
        assert_eq!(report.database, "❌ Not Available");
        assert_eq!(report.connection_status, "Not Connected");
        assert_eq!(report.database_url, None);
        assert!(report.collections.is_empty());
    }

    #[test]
    fn working_store_lists_collections() {
        let report = HealthReport::from(connected());
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.database_url.as_deref(), Some("✅ Set"));
        assert_eq!(report.database_name.as_deref(), Some("idsboard"));
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections.len(), 2);
    }

    #[test]
    fn listing_error_is_truncated() {
        let mut health = connected();
        health.database_name = None;
        health.collections_error = Some("x".repeat(80));
        let report = HealthReport::from(health);
        assert_eq!(report.database_name.as_deref(), Some("✅ Connected"));
        assert_eq!(
            report.database,
            format!("⚠️  Connected but Error: {}", "x".repeat(50))
        );
        assert!(report.collections.is_empty());
    }
}
