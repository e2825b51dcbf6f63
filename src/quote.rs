use async_trait::async_trait;

use chrono::NaiveDate;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::DayRange;
use crate::error::{Error, Result};
use crate::settings::QuoteSettings;

/// Maximum number of days added to the minimum stay
const STAY_SPREAD_DAYS: i64 = 10;

/// The cheapest itinerary found for a route
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub price: u32,
    pub converted_price: u32,
    pub airline: String,
    pub depart: NaiveDate,
    pub return_date: NaiveDate,
    pub stay_days: i64,
}

/// A pricier option on the same route
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub price: u32,
    pub airline: String,
}

/// A priced itinerary summary for a route and trip window
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub from: String,
    pub to: String,
    pub days: DayRange,
    pub currency: String,
    pub converted_currency: String,
    pub cheapest: Offer,
    pub alternatives: Vec<Alternative>,
}

/// Source of price quotes for a route
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn quote(&self, from: &str, to: &str, days: DayRange) -> Result<Quote>;
}

/// Generates plausible random prices, no fares are actually searched
#[derive(Debug, Clone)]
pub struct MockPriceLookup {
    settings: QuoteSettings,
}

impl MockPriceLookup {
    pub fn new(settings: QuoteSettings) -> Self {
        Self { settings }
    }

    fn generate(&self, from: &str, to: &str, days: DayRange) -> Result<Quote> {
        let settings = &self.settings;
        if settings.base_price_min >= settings.base_price_max {
            return Err(Error::PriceLookup(format!(
                "Empty price band {}..{}",
                settings.base_price_min, settings.base_price_max
            )));
        }

        let mut rng = rand::thread_rng();

        let price = rng.gen_range(settings.base_price_min..settings.base_price_max);
        let airline = settings
            .airlines
            .choose(&mut rng)
            .cloned()
            .ok_or_else(|| Error::PriceLookup("No airlines configured".into()))?;
        let stay_days = days
            .min()
            .checked_add(rng.gen_range(0..STAY_SPREAD_DAYS))
            .ok_or_else(|| Error::PriceLookup(format!("Stay length out of range for {}", days)))?;

        let cheapest = Offer {
            price,
            converted_price: (f64::from(price) * settings.exchange_rate).round() as u32,
            airline,
            depart: settings.depart_date,
            return_date: settings.return_date,
            stay_days,
        };

        let alternatives = settings
            .alternatives
            .iter()
            .map(|alt| Alternative {
                price: price.saturating_add(alt.markup),
                airline: alt.airline.clone(),
            })
            .collect();

        Ok(Quote {
            from: from.into(),
            to: to.into(),
            days,
            currency: settings.base_currency.clone(),
            converted_currency: settings.converted_currency.clone(),
            cheapest,
            alternatives,
        })
    }
}

#[async_trait]
impl PriceLookup for MockPriceLookup {
    #[tracing::instrument(name = "Look up a mock price", skip(self))]
    async fn quote(&self, from: &str, to: &str, days: DayRange) -> Result<Quote> {
        self.generate(from, to, days)
    }
}
