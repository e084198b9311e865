//! Storage connectivity at process start.

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseSettings;

/// Open a connection pool, retrying with exponential backoff.
///
/// Gives up after `connect_retries` attempts and returns the last error.
pub async fn connect_with_retry(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let max_attempts = settings.connect_retries.max(1);
    let initial = Duration::from_secs(settings.initial_retry_delay_secs);
    let max = Duration::from_secs(settings.max_retry_delay_secs);

    let mut attempt = 0;
    loop {
        attempt += 1;
        match PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(settings.with_db())
            .await
        {
            Ok(pool) => {
                tracing::info!("Connected to database {}", settings.database_name);
                return Ok(pool);
            }
            Err(err) if attempt < max_attempts => {
                let delay = backoff_duration(attempt, initial, max);
                tracing::warn!(
                    "Failed to connect to database (attempt {}/{}): {}. Retrying in {:?}",
                    attempt,
                    max_attempts,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                tracing::error!(
                    "All {} database connection attempts failed: {}",
                    max_attempts,
                    err
                );
                return Err(err);
            }
        }
    }
}

/// `initial * 2^(attempt - 1)`, capped at `max`.
pub fn backoff_duration(attempt: u32, initial: Duration, max: Duration) -> Duration {
    let exponent = attempt.saturating_sub(1).min(31) as i32;
    let delay = initial.as_secs_f64() * 2_f64.powi(exponent);

    Duration::from_secs_f64(delay.min(max.as_secs_f64()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_from_initial() {
        let initial = Duration::from_secs(2);
        let max = Duration::from_secs(60);

        assert_eq!(backoff_duration(1, initial, max), Duration::from_secs(2));
        assert_eq!(backoff_duration(2, initial, max), Duration::from_secs(4));
        assert_eq!(backoff_duration(3, initial, max), Duration::from_secs(8));
    }

    #[test]
    fn backoff_is_capped() {
        let initial = Duration::from_secs(2);
        let max = Duration::from_secs(60);

        assert_eq!(backoff_duration(6, initial, max), max);
        assert_eq!(backoff_duration(u32::MAX, initial, max), max);
    }
}
