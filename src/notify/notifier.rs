use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};

use crate::client::{Delivery, Mailer};
use crate::error::Result;
use crate::model::MonitorRecord;
use crate::quote::PriceLookup;
use crate::repo::MonitorRepo;

use super::EmailTemplate;

/// Counts of one notification batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NotifySummary {
    /// Monitors loaded from the store
    pub total: usize,
    /// Inactive monitors, never processed
    pub skipped: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl NotifySummary {
    /// Monitors an email was attempted for
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Sends every active monitor its daily fare report
pub struct Notifier {
    repo: MonitorRepo,
    prices: Arc<dyn PriceLookup>,
    mailer: Arc<dyn Mailer>,
    template: EmailTemplate,
    send_delay: Duration,
}

impl Notifier {
    pub fn new(
        repo: MonitorRepo,
        prices: Arc<dyn PriceLookup>,
        mailer: Arc<dyn Mailer>,
        template: EmailTemplate,
        send_delay: Duration,
    ) -> Self {
        Self {
            repo,
            prices,
            mailer,
            template,
            send_delay,
        }
    }

    /// Process all monitors one after another.
    ///
    /// A failing monitor is logged and counted, the batch carries on.
    #[tracing::instrument(name = "Run daily notifications", skip(self))]
    pub async fn run(&self) -> NotifySummary {
        let today = Utc::now().date_naive();
        let monitors = self.repo.list().await;

        let mut summary = NotifySummary {
            total: monitors.len(),
            ..Default::default()
        };
        if monitors.is_empty() {
            tracing::info!("No monitors to notify");
            return summary;
        }
        tracing::info!("Found {} monitors", monitors.len());

        let mut previous_was_sent = false;
        for monitor in &monitors {
            if !monitor.active {
                tracing::debug!(monitor.id = %monitor.id, "Skipping inactive monitor");
                summary.skipped += 1;
                continue;
            }

            // Stay under the provider's rate limit
            if previous_was_sent {
                tokio::time::sleep(self.send_delay).await;
            }

            match self.notify(monitor, today).await {
                Ok(delivery) => {
                    previous_was_sent = matches!(delivery, Delivery::Sent { .. });
                    summary.succeeded += 1;
                }
                Err(error) => {
                    tracing::error!(
                        error.cause_chain = ?error,
                        monitor.id = %monitor.id,
                        "Failed to notify {} ({} → {})",
                        monitor.email,
                        monitor.from,
                        monitor.to
                    );
                    previous_was_sent = false;
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            "Done: {} succeeded, {} failed, {} skipped",
            summary.succeeded,
            summary.failed,
            summary.skipped
        );
        summary
    }

    #[tracing::instrument(
        name = "Notify a monitor",
        skip(self, monitor),
        fields(monitor.id = %monitor.id, route = %format!("{}-{}", monitor.from, monitor.to))
    )]
    async fn notify(&self, monitor: &MonitorRecord, today: NaiveDate) -> Result<Delivery> {
        let quote = self
            .prices
            .quote(&monitor.from, &monitor.to, monitor.days())
            .await?;
        let email = self.template.render(monitor, &quote, today);
        self.mailer.send(&email).await
    }
}
