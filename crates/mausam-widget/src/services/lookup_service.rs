//! Lookup backend: async city weather lookups.
//! Each lookup runs as its own task; results are sent back via mpsc.

use std::sync::Arc;

use mausam_core::LookupError;
use mausam_weather::{WeatherProvider, WeatherReport};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::error_mapping::lookup_error;
use crate::widget::LookupRequest;

/// Messages sent from lookup tasks back to the widget
#[derive(Debug)]
pub enum LookupServiceMessage {
    /// Result of one resolve-then-report sequence
    LookupDone {
        generation: u64,
        result: Result<WeatherReport, LookupError>,
    },
}

/// Run `request` on `runtime`. Sends `LookupDone` on the channel when complete.
///
/// Overlapping requests run independently and are never cancelled.
pub fn request_lookup(
    runtime: &Handle,
    tx: &UnboundedSender<LookupServiceMessage>,
    provider: Arc<WeatherProvider>,
    request: LookupRequest,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let LookupRequest { city, generation } = request;

        let result = provider.lookup(&city).await.map_err(lookup_error);
        match &result {
            Ok(report) => tracing::info!(
                "Lookup #{} for '{}' done: {}",
                generation,
                city,
                report.condition_label
            ),
            Err(e) => tracing::debug!("Lookup #{} for '{}' failed: {}", generation, city, e),
        }

        if tx
            .send(LookupServiceMessage::LookupDone { generation, result })
            .is_err()
        {
            tracing::debug!("Widget gone, dropping result of lookup #{}", generation);
        }
    });
}
