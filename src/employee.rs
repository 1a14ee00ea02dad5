//! The employee record and its persisted JSON shape.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DraftError;

/// Display format for dates in the form and the list.
pub const DISPLAY_DATE_FORMAT: &str = "%m/%d/%Y";

/// Department of an employee.
///
/// The selector only offers the four named departments. Stored records may
/// carry any other text (older free-text forms wrote things like
/// `"engineering"` or `""`); those decode as [`Department::Other`] and are
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Department {
    Sales,
    Marketing,
    Engineering,
    Hr,
    Other(String),
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::Sales,
        Department::Marketing,
        Department::Engineering,
        Department::Hr,
    ];

    /// Selector values, in display order.
    pub const NAMES: [&'static str; 4] = ["Sales", "Marketing", "Engineering", "HR"];

    pub fn as_str(&self) -> &str {
        match self {
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Engineering => "Engineering",
            Department::Hr => "HR",
            Department::Other(name) => name,
        }
    }

    /// Named department for exact selector values, [`Department::Other`]
    /// for anything else.
    pub fn from_stored(name: String) -> Self {
        name.parse().unwrap_or(Department::Other(name))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict: only the four selector values parse.
impl FromStr for Department {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| DraftError::UnknownDepartment(s.to_string()))
    }
}

impl Serialize for Department {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Department {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Department::from_stored)
    }
}

/// One employee entry.
///
/// Serialized with camelCase keys (`firstName`, `zipCode`, ...). Records
/// written without an identifier keep `id` absent rather than `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, with = "date_serde")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, with = "date_serde")]
    pub start_date: Option<NaiveDate>,
    pub department: Department,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Format an optional date for display; `None` renders as an empty string.
pub fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parse an ISO `YYYY-MM-DD` date, the value format of `<input type="date">`.
/// Blank input is `None`.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Dates are written as `YYYY-MM-DD` or `null`.
///
/// Reading also accepts `""` and full RFC 3339 timestamps, which is what a
/// browser `Date` turns into under `JSON.stringify`.
mod date_serde {
    use chrono::{DateTime, NaiveDate};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(text)
            .map(|dt| Some(dt.date_naive()))
            .map_err(|_| D::Error::custom(format!("invalid date '{text}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Employee {
        Employee {
            id: Some(1_700_000_000_000),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            department: Department::Engineering,
            street: "1 Infinite Loop".into(),
            city: "Cupertino".into(),
            state: "CA".into(),
            zip_code: "94016".into(),
        }
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(ada()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "id",
            "firstName",
            "lastName",
            "dateOfBirth",
            "startDate",
            "department",
            "street",
            "city",
            "state",
            "zipCode",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj["dateOfBirth"], "1815-12-10");
        assert_eq!(obj["department"], "Engineering");
    }

    #[test]
    fn test_hr_department_name() {
        assert_eq!(serde_json::to_string(&Department::Hr).unwrap(), "\"HR\"");
        assert_eq!("HR".parse::<Department>(), Ok(Department::Hr));
        assert!(matches!(
            "Legal".parse::<Department>(),
            Err(DraftError::UnknownDepartment(_))
        ));
    }

    #[test]
    fn test_unknown_department_is_kept() {
        let lower: Department = serde_json::from_str("\"engineering\"").unwrap();
        assert_eq!(lower, Department::Other("engineering".into()));
        let blank: Department = serde_json::from_str("\"\"").unwrap();
        assert_eq!(blank, Department::Other(String::new()));
        assert_eq!(serde_json::to_string(&lower).unwrap(), "\"engineering\"");
        assert_eq!(lower.to_string(), "engineering");

        let known: Department = serde_json::from_str("\"Marketing\"").unwrap();
        assert_eq!(known, Department::Marketing);
    }

    #[test]
    fn test_absent_id_is_not_written() {
        let mut e = ada();
        e.id = None;
        let json = serde_json::to_string(&e).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn test_null_dates() {
        let mut e = ada();
        e.date_of_birth = None;
        let value = serde_json::to_value(&e).unwrap();
        assert!(value["dateOfBirth"].is_null());
        let back: Employee = serde_json::from_value(value).unwrap();
        assert_eq!(back.date_of_birth, None);
    }

    #[test]
    fn test_reads_legacy_date_encodings() {
        let json = r#"{
            "firstName": "Grace", "lastName": "Hopper",
            "dateOfBirth": "1906-12-09T05:00:00.000Z",
            "startDate": "",
            "department": "Sales", "street": "1 Navy Way", "city": "Arlington",
            "state": "VA", "zipCode": "22201"
        }"#;
        let e: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(e.id, None);
        assert_eq!(e.date_of_birth, NaiveDate::from_ymd_opt(1906, 12, 9));
        assert_eq!(e.start_date, None);
    }

    #[test]
    fn test_rejects_garbage_date() {
        let json = r#"{
            "firstName": "A", "lastName": "B", "dateOfBirth": "yesterday",
            "department": "Sales", "street": "", "city": "", "state": "", "zipCode": ""
        }"#;
        assert!(serde_json::from_str::<Employee>(json).is_err());
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date(NaiveDate::from_ymd_opt(2024, 1, 1)), "01/01/2024");
        assert_eq!(display_date(None), "");
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("1815-12-10"), NaiveDate::from_ymd_opt(1815, 12, 10));
        assert_eq!(parse_iso_date("  "), None);
        assert_eq!(parse_iso_date("12/10/1815"), None);
    }
}
