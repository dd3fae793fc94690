//! Serde adapters for the host's field-map encoding.
//!
//! The host sends every column as a string, with `""` meaning "no value".
//! Dates use `YYYY-MM-DD` and timestamps `YYYY-MM-DD HH:MM:SS`.

use serde::{Deserialize, Deserializer, de::Error};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(u64),
    Float(f64),
    Text(String),
}

fn non_blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Scalar>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) if s.trim().is_empty() => None,
        other => other,
    })
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match non_blank(deserializer)? {
        None => Ok(None),
        Some(Scalar::Text(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(D::Error::custom("expected a string")),
    }
}

pub(crate) mod opt_date {
    use chrono::NaiveDate;
    use serde::{Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_str(&d.format(super::DATE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        super::text(d)?
            .map(|s| NaiveDate::parse_from_str(&s, super::DATE_FORMAT).map_err(D::Error::custom))
            .transpose()
    }
}

pub(crate) mod opt_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => s.serialize_str(&t.format(super::DATETIME_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
        super::text(d)?
            .map(|s| {
                NaiveDateTime::parse_from_str(&s, super::DATETIME_FORMAT).map_err(D::Error::custom)
            })
            .transpose()
    }
}

pub(crate) mod opt_id {
    use invoicer_core::RecordId;
    use serde::{Deserializer, de::Error};

    use super::Scalar;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<RecordId>, D::Error> {
        match super::non_blank(d)? {
            None => Ok(None),
            Some(Scalar::Int(n)) => Ok(Some(RecordId::new(n))),
            Some(Scalar::Text(s)) => s.parse().map(Some).map_err(D::Error::custom),
            Some(Scalar::Float(f)) => Err(D::Error::custom(format!("invalid record id {f}"))),
        }
    }
}

pub(crate) mod opt_decimal {
    use serde::{Deserializer, de::Error};

    use super::Scalar;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        match super::non_blank(d)? {
            None => Ok(None),
            Some(Scalar::Int(n)) => Ok(Some(n as f64)),
            Some(Scalar::Float(f)) => Ok(Some(f)),
            Some(Scalar::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid decimal '{s}': {e}"))),
        }
    }
}

/// Blank-as-none for string-valued enums such as the invoice status.
pub(crate) mod opt_variant {
    use serde::de::{DeserializeOwned, Error, IntoDeserializer, value};
    use serde::Deserializer;

    pub fn deserialize<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        super::text(d)?
            .map(|s| {
                let de: value::StringDeserializer<value::Error> = s.into_deserializer();
                T::deserialize(de).map_err(D::Error::custom)
            })
            .transpose()
    }
}
