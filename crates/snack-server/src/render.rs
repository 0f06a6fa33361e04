//! JSON and HTML views of an [`Acceptability`].

use std::fmt::Write as _;

use serde_json::{Map, Value, json};
use snack_core::{Acceptability, ItemLabel, RecordError};

/// Timestamp format for `date_time`, e.g. `2024-06-03 11:05:00 BST+0100`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z%z";

#[must_use]
pub fn format_date_time(result: &Acceptability) -> String {
    result.now.format(DATE_TIME_FORMAT).to_string()
}

/// Body of `GET /api/v1/acceptable-now`.
///
/// # Errors
///
/// Returns [`RecordError::MissingField`] if a match lacks `Item` or
/// `Other Restrictions`.
pub fn api_body(result: &Acceptability, label: ItemLabel) -> Result<Value, RecordError> {
    let items = result
        .matches
        .iter()
        .map(|record| -> Result<Value, RecordError> {
            let mut item = Map::new();
            item.insert(label.singular().into(), json!(record.item()?));
            item.insert(
                "other_restrictions".into(),
                json!(record.other_restrictions()?),
            );
            Ok(Value::Object(item))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut body = Map::new();
    body.insert("date_time".into(), json!(format_date_time(result)));
    body.insert(
        "time".into(),
        json!(result.time_bucket.map(|bucket| bucket.column())),
    );
    body.insert(label.plural().into(), Value::Array(items));
    Ok(Value::Object(body))
}

/// The `GET /` page.
///
/// # Errors
///
/// Same as [`api_body`].
pub fn html_page(result: &Acceptability, label: ItemLabel) -> Result<String, RecordError> {
    let noun = label.singular();
    let mut list = String::new();
    for record in &result.matches {
        let restrictions = record.other_restrictions()?;
        let _ = write!(list, "      <li><strong>{}</strong>", escape(record.item()?));
        if !restrictions.is_empty() {
            let _ = write!(list, " <em>({})</em>", escape(restrictions));
        }
        list.push_str("</li>\n");
    }

    let summary = match result.time_bucket {
        Some(bucket) if result.matches.is_empty() => {
            format!("It's {bucket}, but nothing is acceptable right now.")
        }
        Some(bucket) => format!("It's {bucket}. These are acceptable:"),
        None => format!("It's not {noun} time. Nothing is acceptable right now."),
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>What {noun} is acceptable now?</title>
  </head>
  <body>
    <h1>What {noun} is acceptable now?</h1>
    <p><time>{date_time}</time></p>
    <p>{summary}</p>
    <ul>
{list}    </ul>
  </body>
</html>
"#,
        date_time = escape(&format_date_time(result)),
    ))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use snack_core::{REFERENCE_TZ, Record, TimeBucket};

    fn result(bucket: Option<TimeBucket>, matches: Vec<Record>) -> Acceptability {
        Acceptability {
            time_bucket: bucket,
            now: REFERENCE_TZ.with_ymd_and_hms(2024, 6, 3, 11, 5, 0).unwrap(),
            matches,
        }
    }

    fn tea_biscuit() -> Record {
        Record::from_pairs(
            2,
            [
                ("Item", "Tea Biscuit"),
                ("Other Restrictions", "Dunk <= 3s"),
            ],
        )
    }

    #[test]
    fn api_body_uses_label_keys() {
        let body = api_body(
            &result(Some(TimeBucket::Morning), vec![tea_biscuit()]),
            ItemLabel::Biscuit,
        )
        .unwrap();
        assert_eq!(
            body,
            json!({
                "date_time": "2024-06-03 11:05:00 BST+0100",
                "time": "Morning",
                "biscuits": [
                    {"biscuit": "Tea Biscuit", "other_restrictions": "Dunk <= 3s"}
                ]
            })
        );
    }

    #[test]
    fn api_body_without_bucket_has_null_time() {
        let body = api_body(&result(None, vec![]), ItemLabel::Snack).unwrap();
        assert_eq!(body["time"], Value::Null);
        assert_eq!(body["snacks"], json!([]));
    }

    #[test]
    fn api_body_requires_item_column() {
        let record = Record::from_pairs(5, [("Other Restrictions", "")]);
        let err = api_body(&result(Some(TimeBucket::Morning), vec![record]), ItemLabel::Snack)
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                row: 5,
                field: "Item".into()
            }
        );
    }

    #[test]
    fn winter_timestamps_use_gmt() {
        let mut winter = result(None, vec![]);
        winter.now = REFERENCE_TZ.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();
        assert_eq!(format_date_time(&winter), "2024-01-03 09:00:00 GMT+0000");
    }

    #[test]
    fn html_escapes_cell_text() {
        let page = html_page(
            &result(Some(TimeBucket::Morning), vec![tea_biscuit()]),
            ItemLabel::Biscuit,
        )
        .unwrap();
        assert!(page.contains("<strong>Tea Biscuit</strong>"));
        assert!(page.contains("Dunk &lt;= 3s"));
        assert!(page.contains("What biscuit is acceptable now?"));
        assert!(page.contains("It's Morning. These are acceptable:"));
    }

    #[test]
    fn html_explains_empty_results() {
        let page = html_page(&result(None, vec![]), ItemLabel::Snack).unwrap();
        assert!(page.contains("It's not snack time."));
        let page = html_page(&result(Some(TimeBucket::Night), vec![]), ItemLabel::Snack).unwrap();
        assert!(page.contains("It's Night, but nothing is acceptable right now."));
    }
}
