use crate::{Resource, ResultEngine, matching::score_match};

use super::Engine;

impl Engine {
    /// Rank other charities' shareable resources against a charity's profile.
    ///
    /// Read-only: no lock is taken and the scores come from
    /// [`score_match`] over a snapshot of the listing. Ties keep the stable
    /// listing order (name, then id).
    pub async fn rank_candidates(
        &self,
        charity_id: &str,
        recommendation: Option<&str>,
    ) -> ResultEngine<Vec<(Resource, u8)>> {
        let profile = self.charity_profile(charity_id).await?;
        let candidates = self.list_shareable(charity_id).await?;

        let mut scored: Vec<(Resource, u8)> = candidates
            .into_iter()
            .map(|resource| {
                let score = score_match(&resource, &profile, recommendation);
                (resource, score)
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(scored)
    }
}
