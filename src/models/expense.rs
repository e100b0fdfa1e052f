use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One recorded expense. Field names match the persisted JSON layout
/// (`expenses` key in the store), so serde names must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    /// Raw parsed amount. A non-numeric entry is stored as NaN and rendered
    /// as "NaN"; it is never rejected.
    #[serde(deserialize_with = "amount_from_json")]
    pub amount: f64,
    pub category: String,
    /// Calendar date as entered, "YYYY-MM-DD" expected but not enforced.
    pub date: String,
}

impl Expense {
    /// Aggregation label for the monthly view, e.g. "Jan 2024".
    /// An unparseable date buckets under "Invalid Date".
    pub fn month_label(&self) -> String {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|_| "Invalid Date".to_string())
    }
}

/// serde_json writes non-finite floats as `null`; map that back to the NaN
/// sentinel on load so a stored non-numeric amount survives a reload.
fn amount_from_json<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(de)?.unwrap_or(f64::NAN))
}
