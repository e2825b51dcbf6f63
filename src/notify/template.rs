use std::fmt::Write;

use chrono::NaiveDate;

use url::form_urlencoded;

use crate::client::Email;
use crate::domain::CityNames;
use crate::model::MonitorRecord;
use crate::quote::Quote;
use crate::search;
use crate::settings::{NotifierSettings, SearchLink};

/// Renders the daily fare report for a monitor
#[derive(Debug, Clone)]
pub struct EmailTemplate {
    cities: CityNames,
    search_links: Vec<SearchLink>,
    site_url: String,
    search_lead_days: i64,
}

impl EmailTemplate {
    pub fn new(cities: CityNames, settings: &NotifierSettings) -> Self {
        Self {
            cities,
            search_links: settings.search_links.clone(),
            site_url: settings.site_url.trim_end_matches('/').to_string(),
            search_lead_days: settings.search_lead_days,
        }
    }

    pub fn render(&self, monitor: &MonitorRecord, quote: &Quote, today: NaiveDate) -> Email {
        let from_city = self.cities.display_name(&monitor.from);
        let to_city = self.cities.display_name(&monitor.to);
        let cheapest = &quote.cheapest;

        let departure = search::departure_date(today, self.search_lead_days);
        let search_url = search::search_url(from_city, to_city, departure);
        let unsubscribe_url = format!(
            "{}/unsubscribe?email={}",
            self.site_url,
            form_urlencoded::byte_serialize(monitor.email.as_bytes()).collect::<String>()
        );

        let subject = format!(
            "✈️ Daily fare report | {} → {} | {} {}",
            from_city, to_city, quote.converted_currency, cheapest.converted_price
        );

        let mut alternatives_html = String::new();
        let mut alternatives_text = String::new();
        for alt in &quote.alternatives {
            let _ = write!(
                alternatives_html,
                r#"<li style="margin: 4px 0; color: #666;">{} {} ({})</li>"#,
                quote.currency,
                alt.price,
                escape_html(&alt.airline)
            );
            let _ = writeln!(
                alternatives_text,
                "  - {} {} ({})",
                quote.currency, alt.price, alt.airline
            );
        }

        let links_html = self
            .search_links
            .iter()
            .map(|link| {
                format!(
                    r#"<a href="{}" style="color: #667eea;">{}</a>"#,
                    escape_html(&link.url),
                    escape_html(&link.name)
                )
            })
            .collect::<Vec<_>>()
            .join(" | ");
        let links_text = self
            .search_links
            .iter()
            .map(|link| format!("  - {}: {}", link.name, link.url))
            .collect::<Vec<_>>()
            .join("\n");

        let html_body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
</head>
<body style="font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f5f5f5; margin: 0; padding: 20px;">
    <div style="max-width: 600px; margin: 0 auto; background: white; border-radius: 12px; overflow: hidden;">
        <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; text-align: center;">
            <h1 style="margin: 0; font-size: 24px;">✈️ Daily fare report</h1>
            <p style="margin: 10px 0 0;">{today}</p>
        </div>
        <div style="padding: 30px;">
            <h2 style="color: #333; font-size: 18px;">Monitor</h2>
            <p style="margin: 8px 0; color: #666;"><strong>From:</strong> {from_city} ({from})</p>
            <p style="margin: 8px 0; color: #666;"><strong>To:</strong> {to_city} ({to})</p>
            <p style="margin: 8px 0; color: #666;"><strong>Trip length:</strong> {days} days</p>

            <h2 style="color: #333; font-size: 18px;">Lowest price</h2>
            <div style="border: 2px solid #667eea; border-radius: 12px; padding: 25px; text-align: center;">
                <p style="font-size: 36px; font-weight: bold; color: #667eea; margin: 0;">{converted_currency} {converted_price}</p>
                <p style="font-size: 14px; color: #999; margin: 5px 0 0;">about {currency} {price}</p>
            </div>
            <p style="margin: 8px 0; color: #333;"><strong>Airline:</strong> {airline}</p>
            <p style="margin: 8px 0; color: #333;"><strong>Depart:</strong> {depart}</p>
            <p style="margin: 8px 0; color: #333;"><strong>Return:</strong> {return_date}</p>
            <p style="margin: 8px 0; color: #333;"><strong>Stay:</strong> {stay} days</p>

            <h3 style="color: #333; font-size: 16px;">Alternatives</h3>
            <ul>{alternatives_html}</ul>

            <p style="text-align: center; margin: 30px 0;">
                <a href="{search_url}" style="background: #667eea; color: white; padding: 15px 30px; text-decoration: none; border-radius: 8px;">See live prices</a>
            </p>

            <h3 style="color: #333; font-size: 16px;">Search more</h3>
            <p style="color: #666; font-size: 14px;">{links_html}</p>
        </div>
        <div style="background: #f8f9fa; padding: 20px; text-align: center; font-size: 12px; color: #999;">
            <p>Prices change often, book early.</p>
            <p><a href="{site_url}">Flight Monitor</a> | <a href="{unsubscribe_url}">Unsubscribe</a></p>
        </div>
    </div>
</body>
</html>"#,
            today = today.format("%A, %B %-d, %Y"),
            from_city = escape_html(from_city),
            from = escape_html(&monitor.from),
            to_city = escape_html(to_city),
            to = escape_html(&monitor.to),
            days = quote.days,
            converted_currency = escape_html(&quote.converted_currency),
            converted_price = cheapest.converted_price,
            currency = escape_html(&quote.currency),
            price = cheapest.price,
            airline = escape_html(&cheapest.airline),
            depart = cheapest.depart,
            return_date = cheapest.return_date,
            stay = cheapest.stay_days,
            alternatives_html = alternatives_html,
            search_url = escape_html(search_url.as_str()),
            links_html = links_html,
            site_url = escape_html(&self.site_url),
            unsubscribe_url = escape_html(&unsubscribe_url),
        );

        let text_body = format!(
            "Daily fare report, {today}\n\n\
             From: {from_city} ({from})\n\
             To: {to_city} ({to})\n\
             Trip length: {days} days\n\n\
             Lowest price: {converted_currency} {converted_price} (about {currency} {price})\n\
             Airline: {airline}\n\
             Depart: {depart}\n\
             Return: {return_date}\n\
             Stay: {stay} days\n\n\
             Alternatives:\n{alternatives_text}\n\
             See live prices: {search_url}\n\n\
             Search more:\n{links_text}\n\n\
             Unsubscribe: {unsubscribe_url}\n",
            today = today.format("%A, %B %-d, %Y"),
            from = monitor.from,
            to = monitor.to,
            days = quote.days,
            converted_currency = quote.converted_currency,
            converted_price = cheapest.converted_price,
            currency = quote.currency,
            price = cheapest.price,
            airline = cheapest.airline,
            depart = cheapest.depart,
            return_date = cheapest.return_date,
            stay = cheapest.stay_days,
        );

        Email {
            recipient: monitor.email.clone(),
            subject,
            html_body,
            text_body,
        }
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
