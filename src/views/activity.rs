//! Messages-per-day chart

use super::games::CHART_ERROR_CLASS;
use crate::backend::schema::ActivityResponse;
use crate::backend::{fetch, Endpoint, FetchResult};
use crate::charts::update_activity_chart;
use crate::dashboard::Dashboard;
use crate::document::{ids, Document};

pub async fn load(dashboard: &Dashboard) -> FetchResult<()> {
    let settings = dashboard.settings();
    let days = settings.activity_days;
    let response: ActivityResponse = fetch(dashboard.backend(), Endpoint::Activity { days }).await?;

    let mut charts = dashboard.charts().lock().await;
    let mut doc = dashboard.document().write().await;

    let update = update_activity_chart(
        &mut charts.activity,
        &mut *doc,
        &response.activity,
        settings.activity_labels,
    );
    doc.remove_class(ids::ACTIVITY_CHART, CHART_ERROR_CLASS);
    tracing::debug!(?update, points = response.activity.len(), "Activity chart updated");

    Ok(())
}

pub fn show_error(doc: &mut Document) {
    doc.add_class(ids::ACTIVITY_CHART, CHART_ERROR_CLASS);
}
