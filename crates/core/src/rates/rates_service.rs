use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::commodities::Commodity;
use crate::constants::DEFAULT_HISTORY_DAYS;
use crate::errors::{DatabaseError, Error, Result};
use crate::utils::time_utils;

use super::rates_model::{NewRate, Rate, RateKind, RateRecord};
use super::rates_traits::{RateRepositoryTrait, RateServiceTrait};

pub struct RateService {
    repository: Arc<dyn RateRepositoryTrait>,
}

impl RateService {
    pub fn new(repository: Arc<dyn RateRepositoryTrait>) -> Self {
        RateService { repository }
    }

    /// Normalizes a submission into its canonical stored form.
    ///
    /// The rate is converted to per-gram, the instant defaults to now, and
    /// the uniqueness date is the instant truncated to the local day.
    fn normalize(
        commodity: Commodity,
        contributed_by: Option<String>,
        input: NewRate,
    ) -> Result<RateRecord> {
        let rate_per_gram = input.basis.to_per_gram(input.value)?;
        let recorded_at = input.date.unwrap_or_else(Utc::now);
        let rate_date = time_utils::calendar_date(recorded_at);
        Ok(RateRecord {
            commodity,
            rate_per_gram,
            kind: input.kind,
            recorded_at,
            rate_date,
            contributed_by,
        })
    }
}

#[async_trait]
impl RateServiceTrait for RateService {
    async fn add_rate(
        &self,
        commodity: Commodity,
        contributed_by: Option<String>,
        input: NewRate,
    ) -> Result<Rate> {
        let kind = input.kind;
        let record = Self::normalize(commodity, contributed_by, input)?;
        let rate_date = record.rate_date;
        self.repository.insert_rate(record).await.map_err(|e| {
            // The unique index only covers closing rates, so a violation here
            // can only mean a second close for the same day.
            match (kind, e) {
                (RateKind::Closing, Error::Database(DatabaseError::UniqueViolation(_))) => {
                    Error::DuplicateClosingRate(rate_date)
                }
                (_, other) => other,
            }
        })
    }

    fn get_current_rate(&self, commodity: Commodity) -> Result<Option<Rate>> {
        self.repository.get_latest_closing(commodity)
    }

    fn get_rate_history(&self, commodity: Commodity, days: Option<i64>) -> Result<Vec<Rate>> {
        let limit = match days {
            Some(d) if d > 0 => d,
            _ => DEFAULT_HISTORY_DAYS,
        };
        self.repository.get_closing_history(commodity, limit)
    }

    async fn delete_rate(&self, commodity: Commodity, rate_id: String) -> Result<()> {
        self.repository.delete_rate(commodity, rate_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::RateBasis;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::RwLock;

    struct MockRateRepository {
        rates: RwLock<Vec<Rate>>,
    }

    impl MockRateRepository {
        fn new() -> Self {
            Self {
                rates: RwLock::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RateRepositoryTrait for MockRateRepository {
        fn get_latest_closing(&self, commodity: Commodity) -> Result<Option<Rate>> {
            let rates = self.rates.read().unwrap();
            Ok(rates
                .iter()
                .filter(|r| r.commodity == commodity && r.kind == RateKind::Closing)
                .max_by_key(|r| r.rate_date)
                .cloned())
        }

        fn get_closing_history(&self, commodity: Commodity, limit: i64) -> Result<Vec<Rate>> {
            let rates = self.rates.read().unwrap();
            let mut closing: Vec<Rate> = rates
                .iter()
                .filter(|r| r.commodity == commodity && r.kind == RateKind::Closing)
                .cloned()
                .collect();
            closing.sort_by(|a, b| b.rate_date.cmp(&a.rate_date));
            closing.truncate(limit as usize);
            Ok(closing)
        }

        async fn insert_rate(&self, record: RateRecord) -> Result<Rate> {
            let mut rates = self.rates.write().unwrap();
            // Mirrors the partial unique index on (commodity, rate_date)
            // for closing rates.
            if record.kind == RateKind::Closing
                && rates.iter().any(|r| {
                    r.commodity == record.commodity
                        && r.kind == RateKind::Closing
                        && r.rate_date == record.rate_date
                })
            {
                return Err(Error::Database(DatabaseError::UniqueViolation(
                    "rates.commodity, rates.rate_date".to_string(),
                )));
            }
            let rate = Rate {
                id: format!("rate-{}", rates.len() + 1),
                commodity: record.commodity,
                rate_per_gram: record.rate_per_gram,
                kind: record.kind,
                recorded_at: record.recorded_at,
                rate_date: record.rate_date,
                contributed_by: record.contributed_by,
            };
            rates.push(rate.clone());
            Ok(rate)
        }

        async fn delete_rate(&self, commodity: Commodity, rate_id: String) -> Result<()> {
            let mut rates = self.rates.write().unwrap();
            let before = rates.len();
            rates.retain(|r| !(r.commodity == commodity && r.id == rate_id));
            if rates.len() == before {
                return Err(Error::Database(DatabaseError::NotFound(format!(
                    "Rate {} not found",
                    rate_id
                ))));
            }
            Ok(())
        }
    }

    fn make_service() -> RateService {
        RateService::new(Arc::new(MockRateRepository::new()))
    }

    fn closing(value: Decimal, date: Option<chrono::DateTime<Utc>>) -> NewRate {
        NewRate {
            value,
            basis: RateBasis::PerGram,
            kind: RateKind::Closing,
            date,
        }
    }

    #[tokio::test]
    async fn add_rate_stores_per_gram_value() {
        let service = make_service();
        let rate = service
            .add_rate(Commodity::Gold, Some("user-1".into()), closing(dec!(7500), None))
            .await
            .unwrap();
        assert_eq!(rate.rate_per_gram, dec!(7500));
        assert_eq!(rate.contributed_by.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn add_rate_converts_per_tola_submissions() {
        let service = make_service();
        let rate = service
            .add_rate(
                Commodity::Silver,
                None,
                NewRate {
                    value: dec!(11664),
                    basis: RateBasis::PerTola,
                    kind: RateKind::Closing,
                    date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(rate.rate_per_gram, dec!(1000));
    }

    #[tokio::test]
    async fn add_rate_rejects_non_positive_values() {
        let service = make_service();
        let result = service
            .add_rate(Commodity::Gold, None, closing(Decimal::ZERO, None))
            .await;
        assert!(matches!(result, Err(Error::Valuation(_))));
    }

    #[tokio::test]
    async fn same_day_closing_rates_conflict_even_at_different_times() {
        let service = make_service();
        // Build the instants from local times: the uniqueness day is the
        // local calendar day.
        let morning = chrono::Local
            .with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let evening = chrono::Local
            .with_ymd_and_hms(2024, 6, 1, 18, 30, 0)
            .unwrap()
            .with_timezone(&Utc);

        service
            .add_rate(Commodity::Gold, None, closing(dec!(7500), Some(morning)))
            .await
            .unwrap();
        let second = service
            .add_rate(Commodity::Gold, None, closing(dec!(7600), Some(evening)))
            .await;

        assert!(matches!(second, Err(Error::DuplicateClosingRate(_))));
        // Exactly one record survives.
        assert_eq!(
            service.get_rate_history(Commodity::Gold, None).unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn same_day_closing_rates_for_different_commodities_coexist() {
        let service = make_service();
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        service
            .add_rate(Commodity::Gold, None, closing(dec!(7500), Some(instant)))
            .await
            .unwrap();
        service
            .add_rate(Commodity::Silver, None, closing(dec!(90), Some(instant)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn intraday_rates_are_not_subject_to_uniqueness() {
        let service = make_service();
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        for value in [dec!(7500), dec!(7510), dec!(7490)] {
            service
                .add_rate(
                    Commodity::Gold,
                    None,
                    NewRate {
                        value,
                        basis: RateBasis::PerGram,
                        kind: RateKind::Intraday,
                        date: Some(instant),
                    },
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn current_rate_is_the_latest_closing() {
        let service = make_service();
        for (day, value) in [(1, dec!(7500)), (3, dec!(7600)), (2, dec!(7550))] {
            let instant = Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap();
            service
                .add_rate(Commodity::Gold, None, closing(value, Some(instant)))
                .await
                .unwrap();
        }
        let current = service.get_current_rate(Commodity::Gold).unwrap().unwrap();
        assert_eq!(current.rate_per_gram, dec!(7600));
    }

    #[tokio::test]
    async fn current_rate_is_none_when_no_closing_exists() {
        let service = make_service();
        assert!(service.get_current_rate(Commodity::Gold).unwrap().is_none());
    }

    #[tokio::test]
    async fn history_is_newest_first_and_limited() {
        let service = make_service();
        for day in 1..=5 {
            let instant = Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap();
            service
                .add_rate(Commodity::Gold, None, closing(dec!(7500), Some(instant)))
                .await
                .unwrap();
        }
        let history = service
            .get_rate_history(Commodity::Gold, Some(3))
            .unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[0].rate_date > w[1].rate_date));
    }
}
