//! Background search worker
//!
//! Runs the city → forecast pipeline on a tokio task and reports each step
//! back to the main loop over a channel, so the UI keeps rendering while
//! requests are in flight.

use chrono::Local;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::data::WeatherService;
use crate::state::Action;

/// Capacity of the result channel
const CHANNEL_CAPACITY: usize = 32;

/// Handle for starting searches and collecting their results
pub struct SearchWorker {
    service: WeatherService,
    sender: mpsc::Sender<Action>,
    receiver: mpsc::Receiver<Action>,
}

impl SearchWorker {
    pub fn new(service: WeatherService) -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            service,
            sender,
            receiver,
        }
    }

    /// Start a search on a background task
    ///
    /// Earlier searches are left running; their results carry an older
    /// generation and are discarded by the state reducer.
    pub fn spawn_search(&self, generation: u64, city: String) -> JoinHandle<()> {
        let service = self.service.clone();
        let tx = self.sender.clone();
        tokio::spawn(async move {
            run_search(&service, generation, &city, &tx).await;
        })
    }

    /// Checks for a pending result without blocking
    pub fn try_recv(&mut self) -> Option<Action> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next result
    pub async fn recv(&mut self) -> Option<Action> {
        self.receiver.recv().await
    }
}

/// Resolve `city`, report the location, then fetch and report the forecast
async fn run_search(
    service: &WeatherService,
    generation: u64,
    city: &str,
    tx: &mpsc::Sender<Action>,
) {
    debug!(generation, city, "search started");

    let place = match service.resolve_city(city).await {
        Ok(place) => place,
        Err(e) => {
            warn!(generation, city, error = %e, "failed to resolve city");
            let _ = tx
                .send(Action::SearchFailed {
                    generation,
                    message: e.user_message(),
                })
                .await;
            return;
        }
    };

    let coordinate = place.coordinate;
    let _ = tx
        .send(Action::LocationResolved { generation, place })
        .await;

    let now = Local::now();
    let result = match service.fetch_forecast(coordinate, now).await {
        Ok(forecast) => Action::ForecastReady {
            generation,
            forecast,
            fetched_at: now,
        },
        Err(e) => {
            warn!(generation, city, error = %e, "failed to fetch forecast");
            Action::SearchFailed {
                generation,
                message: e.user_message(),
            }
        }
    };
    let _ = tx.send(result).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ClientConfig;

    fn unreachable_service() -> WeatherService {
        WeatherService::from_configs(
            ClientConfig::new("http://127.0.0.1:9"),
            ClientConfig::new("http://127.0.0.1:9"),
        )
        .expect("Failed to build service")
    }

    #[tokio::test]
    async fn test_try_recv_empty_without_searches() {
        let mut worker = SearchWorker::new(unreachable_service());
        assert!(worker.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_blank_city_reports_failure() {
        let mut worker = SearchWorker::new(unreachable_service());
        worker
            .spawn_search(7, "  ".to_string())
            .await
            .expect("search task panicked");

        match worker.recv().await {
            Some(Action::SearchFailed { generation, message }) => {
                assert_eq!(generation, 7);
                assert!(message.contains("enter a city"));
            }
            other => panic!("Expected SearchFailed, got {:?}", other),
        }
        assert!(worker.try_recv().is_none());
    }
}
