//! Matching API endpoint: ranked shareable resources for a charity.

use api_types::matching::{CandidateListResponse, CandidateQuery, CandidateView};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, charity, resources::map_resource, server::ServerState};

/// List other charities' shareable resources, best match first.
pub async fn candidates(
    Extension(charity): Extension<charity::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CandidateQuery>,
) -> Result<Json<CandidateListResponse>, ServerError> {
    let scored = state
        .engine
        .rank_candidates(&charity.id, payload.recommendation.as_deref())
        .await?;

    Ok(Json(CandidateListResponse {
        candidates: scored
            .into_iter()
            .map(|(resource, score)| CandidateView {
                resource: map_resource(resource),
                score,
            })
            .collect(),
    }))
}
