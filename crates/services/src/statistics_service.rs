use std::sync::Arc;

use literacy_core::model::{LevelTallies, StatisticsFilter, StatisticsForm};
use storage::repository::StatisticsApi;
use tracing::{debug, info};

use crate::error::StatisticsError;
use crate::session_context::SessionContext;

/// Tallies for one filter, ready for the statistics page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsReport {
    pub filter: StatisticsFilter,
    pub tallies: LevelTallies,
}

impl StatisticsReport {
    /// Heading for the report, e.g. `"NCR, Manila"` or `"Philippines"`.
    #[must_use]
    pub fn caption(&self) -> String {
        self.filter.location_caption()
    }
}

pub struct StatisticsService {
    session: Arc<SessionContext>,
    statistics: Arc<dyn StatisticsApi>,
}

impl StatisticsService {
    #[must_use]
    pub fn new(session: Arc<SessionContext>, statistics: Arc<dyn StatisticsApi>) -> Self {
        Self {
            session,
            statistics,
        }
    }

    /// Validate the form and fetch tallies for it.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError::Validation` for a malformed age (no request is
    /// sent), or a session/gateway error.
    pub async fn load(&self, form: &StatisticsForm) -> Result<StatisticsReport, StatisticsError> {
        let filter = form.to_filter()?;
        self.fetch(filter).await
    }

    /// Fetch tallies for an already-validated filter.
    ///
    /// # Errors
    ///
    /// Returns `StatisticsError` if there is no session or the request fails.
    pub async fn fetch(&self, filter: StatisticsFilter) -> Result<StatisticsReport, StatisticsError> {
        let token = self.session.token()?;
        debug!(params = ?filter.query_pairs(), "fetching statistics");
        let records = self.statistics.fetch_statistics(&token, &filter).await?;
        let tallies = LevelTallies::from_records(&records);
        info!(total = tallies.total, "statistics loaded");
        Ok(StatisticsReport { filter, tallies })
    }
}
