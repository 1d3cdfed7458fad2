//! Bulk import of FAQ entries and glossary terms from JSON.
//!
//! Every item goes through the same create path as a single create, so each
//! imported FAQ entry starts as a draft with its own `created` audit record.
//! A bad item does not stop the batch; it is reported by position and the
//! rest are still imported.

use axum::extract::State;
use axum::Json;
use faircms_core::cache::CacheScope;
use faircms_core::error::CoreError;
use faircms_db::models::faq_entry::CreateFaqEntry;
use faircms_db::models::glossary::CreateGlossaryTerm;
use faircms_db::repositories::GlossaryTermRepo;
use faircms_db::workflow::FaqWorkflow;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::glossary::prepare_new_term;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::side_effects;
use crate::state::AppState;

/// Upper bound on items per request.
pub const MAX_IMPORT_ITEMS: usize = 500;

/// Body of both import endpoints: `{"items": [...]}`.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub items: Value,
}

/// One item that could not be imported.
#[derive(Debug, Serialize)]
pub struct ImportFailure {
    /// Zero-based position in `items`.
    pub index: usize,
    /// The item's question or term, or `unknown`.
    pub item: String,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub created: usize,
    pub errors: Vec<ImportFailure>,
}

impl ImportReport {
    fn record(&mut self, index: usize, label: &str, result: AppResult<()>) {
        match result {
            Ok(()) => self.created += 1,
            Err(err) => {
                // Same client-safe message the single-create endpoint would return.
                let (_, _, error) = err.parts();
                self.errors.push(ImportFailure {
                    index,
                    item: label.to_string(),
                    error,
                });
            }
        }
    }
}

fn into_items(request: ImportRequest) -> AppResult<Vec<Value>> {
    let Value::Array(items) = request.items else {
        return Err(AppError::BadRequest("items array is required".into()));
    };
    if items.len() > MAX_IMPORT_ITEMS {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_IMPORT_ITEMS} items may be imported at once"
        )));
    }
    Ok(items)
}

fn label(item: &Value, field: &str) -> String {
    item.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

fn parse_item<T: DeserializeOwned>(item: Value) -> AppResult<T> {
    serde_json::from_value(item)
        .map_err(|e| AppError::Core(CoreError::Validation(format!("Malformed item: {e}"))))
}

/// POST /api/admin/import/faq
///
/// Items use the single-create body (`question`, `answer`, optional `slug`,
/// `category_id`, `search_keywords`, ...).
pub async fn import_faq(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> AppResult<Json<DataResponse<ImportReport>>> {
    let items = into_items(request)?;
    let mut report = ImportReport::default();

    for (index, item) in items.into_iter().enumerate() {
        let name = label(&item, "question");
        let result = async {
            let input: CreateFaqEntry = parse_item(item)?;
            FaqWorkflow::create(&state.pool, &input, &user.email).await?;
            Ok::<_, AppError>(())
        }
        .await;
        report.record(index, &name, result);
    }

    tracing::info!(
        created = report.created,
        failed = report.errors.len(),
        actor = %user.email,
        "FAQ import finished",
    );
    side_effects::invalidate(&state, CacheScope::Faq).await;

    Ok(Json(DataResponse { data: report }))
}

/// POST /api/admin/import/glossary
///
/// Items use the single-create body (`term`, `short_definition`, ...). Terms
/// are imported as drafts.
pub async fn import_glossary(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> AppResult<Json<DataResponse<ImportReport>>> {
    let items = into_items(request)?;
    let mut report = ImportReport::default();

    for (index, item) in items.into_iter().enumerate() {
        let name = label(&item, "term");
        let result = async {
            let input: CreateGlossaryTerm = parse_item(item)?;
            let (validated, slug) = prepare_new_term(input)?;
            GlossaryTermRepo::create(&state.pool, &validated, &slug, &user.email).await?;
            Ok::<_, AppError>(())
        }
        .await;
        report.record(index, &name, result);
    }

    tracing::info!(
        created = report.created,
        failed = report.errors.len(),
        actor = %user.email,
        "Glossary import finished",
    );
    side_effects::invalidate(&state, CacheScope::Glossary).await;

    Ok(Json(DataResponse { data: report }))
}
