use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One phase of the delivery timeline.
///
/// The timeline is always replaced as a whole, either by a generated reply
/// or by [`fallback_timeline`]; items are never edited in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineItem {
    /// Generated replies may number their phases; numbers are kept as text.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    /// Free text such as `2 weeks`.
    pub duration: String,
    #[serde(deserialize_with = "order_from_number")]
    pub order: i64,
    pub tasks: Vec<String>,
    /// Symbolic color tag (`primary`, `secondary`, `accent`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn order_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = serde_json::Number::deserialize(deserializer)?;
    match (n.as_i64(), n.as_f64()) {
        (Some(i), _) => Ok(i),
        (None, Some(f)) if f.is_finite() => Ok(f.round() as i64),
        _ => Err(de::Error::custom(format!("order out of range: {}", n))),
    }
}

impl TimelineItem {
    fn phase(
        order: i64,
        name: &str,
        duration: &str,
        tasks: [&str; 3],
        color: Option<&str>,
    ) -> Self {
        Self {
            id: order.to_string(),
            name: name.to_string(),
            duration: duration.to_string(),
            order,
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
            color: color.map(str::to_string),
        }
    }
}

/// The fixed four-phase timeline used whenever generation does not produce
/// a usable result.
pub fn fallback_timeline() -> Vec<TimelineItem> {
    vec![
        TimelineItem::phase(
            1,
            "Project Setup & Planning",
            "1 week",
            [
                "Requirements gathering and analysis",
                "Project architecture design",
                "Development environment setup",
            ],
            Some("primary"),
        ),
        TimelineItem::phase(
            2,
            "Core Development",
            "3 weeks",
            [
                "Backend API development",
                "Database integration",
                "User authentication implementation",
            ],
            Some("secondary"),
        ),
        TimelineItem::phase(
            3,
            "Feature Implementation",
            "2 weeks",
            [
                "AI integration",
                "UI development",
                "Analytics dashboard implementation",
            ],
            Some("accent"),
        ),
        TimelineItem::phase(
            4,
            "Testing & Deployment",
            "2 weeks",
            [
                "Quality assurance testing",
                "Performance optimization",
                "Deployment and documentation",
            ],
            None,
        ),
    ]
}
