//! The rate snapshot published by DolarToday.
//!
//! Decoding is lenient. A missing key, a `null` or a value of the wrong type
//! leaves the field at zero (or an empty string) instead of failing the whole
//! document.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Bolivar quotes for one foreign currency.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CurrencyRates {
    #[serde(deserialize_with = "lenient_f64")]
    pub transferencia: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub efectivo: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub efectivo_cucuta: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub promedio_real: f64,
    /// Only published for USD.
    #[serde(deserialize_with = "lenient_f64")]
    pub bitcoin_ref: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rate {
    #[serde(deserialize_with = "lenient_f64")]
    pub rate: f64,
}

/// Central bank (BCV) figures. The amounts arrive as text.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CentralBank {
    /// Monetary liquidity.
    #[serde(deserialize_with = "lenient_string")]
    pub liquidez: String,
    /// International reserves.
    #[serde(deserialize_with = "lenient_string")]
    pub reservas: String,
}

/// The parts of one fetch of the feed that reports read. Other keys are
/// ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateSnapshot {
    #[serde(rename = "USD", deserialize_with = "lenient")]
    pub usd: CurrencyRates,
    #[serde(rename = "EUR", deserialize_with = "lenient")]
    pub eur: CurrencyRates,
    /// EUR to USD cross rate.
    #[serde(rename = "EURUSD", deserialize_with = "lenient")]
    pub eurusd: Rate,
    #[serde(rename = "BCV", deserialize_with = "lenient")]
    pub bcv: CentralBank,
}

impl RateSnapshot {
    /// Decodes a response body. Never fails: an unreadable body yields an
    /// all-zero snapshot.
    pub fn decode(body: &[u8]) -> RateSnapshot {
        match serde_json::from_slice(body) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("unable to decode rate snapshot ({} bytes): {}", body.len(), err);
                RateSnapshot::default()
            }
        }
    }

    /// Bitcoin reference rate expressed per euro.
    pub fn euro_bitcoin(&self) -> f64 {
        self.usd.bitcoin_ref * self.eurusd.rate
    }

    /// Monetary liquidity divided by international reserves, when the central
    /// bank published both.
    pub fn liquidity_ratio(&self) -> Option<f64> {
        let liquidity = parse_amount(&self.bcv.liquidez)?;
        let reserves = parse_amount(&self.bcv.reservas)?;
        if liquidity <= 0.0 || reserves <= 0.0 {
            return None;
        }
        let ratio = liquidity / reserves;
        ratio.is_finite().then_some(ratio)
    }

    /// Implicit dollar rate. Falls back to the feed's cash rate when the BCV
    /// figures are unusable.
    pub fn dollar_implicit(&self) -> f64 {
        match self.liquidity_ratio() {
            Some(ratio) => ratio,
            None => {
                debug!("BCV figures unavailable, using USD cash rate as implicit rate");
                self.usd.efectivo
            }
        }
    }

    /// Implicit euro rate, see [`RateSnapshot::dollar_implicit`].
    pub fn euro_implicit(&self) -> f64 {
        match self.liquidity_ratio() {
            Some(ratio) => ratio * self.eurusd.rate,
            None => self.eur.efectivo,
        }
    }
}

/// Parses a numeric-like string as published by the BCV.
///
/// `.` groups thousands and `,` marks the decimals when the text contains a
/// `,`, more than one `.`, or a single `.` followed by exactly three digits
/// (`"1.234.567,89"`, `"1.234.567"`, `"8.500"`). Anything else is read as a
/// plain decimal number.
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let normalized = if text.contains(',') || text.matches('.').count() > 1 || is_dot_grouped(text)
    {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

// `^\d{1,3}(\.\d{3})+$`
fn is_dot_grouped(text: &str) -> bool {
    let mut groups = text.split('.');
    let Some(lead) = groups.next() else {
        return false;
    };
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    let mut rest = groups.peekable();
    (1..=3).contains(&lead.len())
        && all_digits(lead)
        && rest.peek().is_some()
        && rest.all(|g| g.len() == 3 && all_digits(g))
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
