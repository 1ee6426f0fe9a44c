//! `analytics.*` procedures

use super::{Params, RawClient};
use crate::error::Result;
use crate::models::{AnalyticsReport, AnalyticsState};
use crate::transport::Transport;

impl<T: Transport> RawClient<T> {
    pub async fn analytics_get_state(&self) -> Result<AnalyticsState> {
        self.call("analytics.get_state", Params::new()).await
    }

    pub async fn analytics_initialize(&self) -> Result<()> {
        self.call_unit("analytics.initialize", Params::new()).await
    }

    pub async fn analytics_disable(&self) -> Result<()> {
        self.call_unit("analytics.disable", Params::new()).await
    }

    /// The report that would be uploaded if analytics were enabled
    pub async fn analytics_view_report(&self) -> Result<AnalyticsReport> {
        self.call("analytics.view_report", Params::new()).await
    }

    pub async fn analytics_upload_feedback(&self, message: &str) -> Result<()> {
        let params = Params::new().set("message", message);
        self.call_unit("analytics.upload_feedback", params).await
    }
}
