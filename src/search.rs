use chrono::{Days, NaiveDate};

use url::Url;

const GOOGLE_FLIGHTS_URL: &str = "https://www.google.com/travel/flights";

/// Google Flights query link for a route departing on the given date
pub fn search_url(from: &str, to: &str, departure: NaiveDate) -> Url {
    let query = format!("flights {} to {} {}", from, to, departure.format("%Y-%m-%d"));

    let mut url = Url::parse(GOOGLE_FLIGHTS_URL).expect("Search base URL is valid");
    url.query_pairs_mut().append_pair("q", &query);
    url
}

/// The departure date searched for, `lead_days` after `today`
pub fn departure_date(today: NaiveDate, lead_days: i64) -> NaiveDate {
    let lead = Days::new(lead_days.unsigned_abs());
    let date = if lead_days >= 0 {
        today.checked_add_days(lead)
    } else {
        today.checked_sub_days(lead)
    };
    date.unwrap_or(today)
}
