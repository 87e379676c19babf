use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use serde_json::Value;

pub const UNKNOWN_ITEM_NAME: &str = "Unknown Item";
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 3] = [Rarity::Common, Rarity::Rare, Rarity::Legendary];

    /// `highlightRare` only counts when `highlight` is also set.
    pub fn from_highlight(highlight: bool, highlight_rare: bool) -> Self {
        match (highlight, highlight_rare) {
            (true, true) => Rarity::Legendary,
            (true, false) => Rarity::Rare,
            (false, _) => Rarity::Common,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a spin response exactly as the remote service sent it.
///
/// Every field is optional and kept as untyped JSON; the conversion into an
/// [`Item`] decides what counts as present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawItem {
    pub index: Option<Value>,
    pub prize: Option<Value>,
    pub loot_name: Option<Value>,
    pub quick_sell_price: Option<Value>,
    pub highlight: Option<Value>,
    pub highlight_rare: Option<Value>,
    pub sold: Option<Value>,
    pub timestamp: Option<Value>,
}

impl RawItem {
    /// Decodes one array entry. Entries that are not JSON objects decode to
    /// an empty record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub index: Option<i64>,
    pub name: String,
    pub price: f64,
    pub quick_sell_price: f64,
    pub rarity: Rarity,
    pub sold: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Item {
    pub fn sale_label(&self) -> &'static str {
        if self.sold {
            "Auto-sold"
        } else {
            "Kept"
        }
    }

    /// Renders the timestamp in the machine's local time zone.
    pub fn display_timestamp(&self) -> String {
        match self.timestamp {
            Some(ts) => ts.with_timezone(&Local).format(DISPLAY_TIME_FORMAT).to_string(),
            None => "Invalid Date".to_string(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] price={} quick_sell={} ({}, {})",
            self.name,
            self.rarity,
            self.price,
            self.quick_sell_price,
            self.sale_label(),
            self.display_timestamp()
        )
    }
}

/// Normalizes a raw record. Never fails: absent or malformed fields fall
/// back to their defaults.
pub fn classify_item(raw: &RawItem) -> Item {
    let prize = raw.prize.as_ref();
    let name = prize
        .and_then(|p| text(p.get("name")))
        .or_else(|| text(raw.loot_name.as_ref()))
        .unwrap_or(UNKNOWN_ITEM_NAME)
        .to_string();

    Item {
        index: raw.index.as_ref().and_then(Value::as_i64),
        name,
        price: prize.and_then(|p| number(p.get("price"))).unwrap_or(0.0),
        quick_sell_price: number(raw.quick_sell_price.as_ref()).unwrap_or(0.0),
        rarity: Rarity::from_highlight(
            truthy(raw.highlight.as_ref()),
            truthy(raw.highlight_rare.as_ref()),
        ),
        sold: truthy(raw.sold.as_ref()),
        timestamp: raw.timestamp.as_ref().and_then(parse_timestamp),
    }
}

fn text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite() && *n != 0.0)
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Epoch milliseconds (number or numeric string) or an RFC 3339 string.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(millis) = s.parse::<i64>() {
                return DateTime::<Utc>::from_timestamp_millis(millis);
            }
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|ts| ts.with_timezone(&Utc))
        }
        _ => None,
    }
}
