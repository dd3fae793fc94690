use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use invoicer_core::{DomainError, DomainResult, RecordId};

use crate::host_format::{opt_date, opt_datetime, opt_decimal, opt_id, opt_variant};

/// Invoice status as stored by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
    Cancelled,
}

/// One row of the `invoices` table, as exchanged with the host.
///
/// Every column is optional because the host sends partial field maps
/// (`""` for empty inputs). Unknown columns are ignored. `created` and
/// `last_updated` belong to the host and pass through hooks untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceRecord {
    /// Assigned by the host on insert.
    #[serde(deserialize_with = "opt_id::deserialize", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub code: Option<String>,
    #[serde(deserialize_with = "opt_variant::deserialize")]
    pub status: Option<InvoiceStatus>,
    #[serde(with = "opt_date")]
    pub date_due: Option<NaiveDate>,
    /// Key into the `clients` table.
    #[serde(deserialize_with = "opt_id::deserialize")]
    pub client: Option<RecordId>,
    pub client_contact: Option<String>,
    pub client_address: Option<String>,
    pub client_phone: Option<String>,
    pub client_email: Option<String>,
    pub client_website: Option<String>,
    pub client_comments: Option<String>,
    #[serde(deserialize_with = "opt_decimal::deserialize")]
    pub subtotal: Option<f64>,
    #[serde(deserialize_with = "opt_decimal::deserialize")]
    pub discount: Option<f64>,
    #[serde(deserialize_with = "opt_decimal::deserialize")]
    pub tax: Option<f64>,
    #[serde(deserialize_with = "opt_decimal::deserialize")]
    pub total: Option<f64>,
    pub comments: Option<String>,
    /// Label of one of the cached invoice templates.
    pub invoice_template: Option<String>,
    #[serde(with = "opt_datetime")]
    pub created: Option<NaiveDateTime>,
    #[serde(with = "opt_datetime")]
    pub last_updated: Option<NaiveDateTime>,
}

impl InvoiceRecord {
    /// Decode a host field map (a JSON object of column -> value).
    pub fn from_fields(fields: serde_json::Value) -> DomainResult<Self> {
        serde_json::from_value(fields)
            .map_err(|e| DomainError::validation(format!("invoice fields: {e}")))
    }

    pub fn to_fields(&self) -> DomainResult<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| DomainError::validation(format!("invoice fields: {e}")))
    }

    pub fn with_client(mut self, client: RecordId) -> Self {
        self.client = Some(client);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_host_string_fields() {
        let record = InvoiceRecord::from_fields(json!({
            "id": "12",
            "code": "INV-0012",
            "status": "Unpaid",
            "date_due": "2020-12-31",
            "client": "3",
            "subtotal": "100.50",
            "discount": "",
            "tax": 7,
            "created": "2020-11-25 06:38:04",
            "last_updated": "",
            "some_host_column": "ignored"
        }))
        .unwrap();

        assert_eq!(record.id, Some(RecordId::new(12)));
        assert_eq!(record.status, Some(InvoiceStatus::Unpaid));
        assert_eq!(record.date_due, NaiveDate::from_ymd_opt(2020, 12, 31));
        assert_eq!(record.client, Some(RecordId::new(3)));
        assert_eq!(record.subtotal, Some(100.5));
        assert_eq!(record.discount, None);
        assert_eq!(record.tax, Some(7.0));
        assert!(record.created.is_some());
        assert_eq!(record.last_updated, None);
    }

    #[test]
    fn blank_client_is_no_client() {
        let record = InvoiceRecord::from_fields(json!({"client": ""})).unwrap();
        assert_eq!(record.client, None);
    }

    #[test]
    fn blank_status_is_no_status() {
        let record = InvoiceRecord::from_fields(json!({"client": "3", "status": ""})).unwrap();
        assert_eq!(record.status, None);
        assert_eq!(record.client, Some(RecordId::new(3)));
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = InvoiceRecord::from_fields(json!({"status": "Overdue"})).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn malformed_date_is_a_validation_error() {
        let err = InvoiceRecord::from_fields(json!({"date_due": "31/12/2020"})).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("invoice fields") => {}
            _ => panic!("Expected Validation error for malformed date"),
        }
    }

    #[test]
    fn encodes_dates_in_host_format() {
        let record = InvoiceRecord {
            date_due: NaiveDate::from_ymd_opt(2021, 1, 2),
            created: NaiveDate::from_ymd_opt(2021, 1, 1).and_then(|d| d.and_hms_opt(8, 30, 0)),
            ..InvoiceRecord::default()
        };
        let fields = record.to_fields().unwrap();
        assert_eq!(fields["date_due"], "2021-01-02");
        assert_eq!(fields["created"], "2021-01-01 08:30:00");
        assert!(fields.get("id").is_none());
    }
}
