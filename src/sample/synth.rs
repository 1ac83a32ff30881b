// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Synthetic records.
//!
//! Rules, first match wins:
//!
//! | Field | Value |
//! |-------|-------|
//! | `enum(...)` storage type | first listed value |
//! | `Decimal`, `BigDecimal` | `"3.14"` |
//! | time storage type | RFC 3339 timestamp |
//! | integer | `0..10000` |
//! | float | `[0, 1)` |
//! | string | alphanumeric, configured length |
//! | boolean | coin flip |
//! | pointer | value of the pointee |
//! | struct / slice / other | `{}` / `[]` / `null` |

use chrono::{DateTime, SecondsFormat};
use rand::{Rng, distributions::Alphanumeric};
use serde_json::{Map, Value};

use super::Record;
use crate::schema::{ColumnShape, DataType, ResourceDescriptor, SchemaField};

/// Literal used for fixed-precision decimals.
pub const DECIMAL_SAMPLE: &str = "3.14";

/// Upper bound (exclusive) of synthesized integers.
const MAX_INTEGER: u32 = 10_000;

/// Timestamps fall between 2020-01-01 and 2030-01-01.
const TIME_RANGE: std::ops::Range<i64> = 1_577_836_800..1_893_456_000;

/// Synthesize a record covering every schema field.
pub fn synthesize<R: Rng + ?Sized>(
    descriptor: &ResourceDescriptor,
    string_len: usize,
    rng: &mut R
) -> Record {
    let mut record = Record::new();
    for field in &descriptor.schema.fields {
        record.insert(field.name.clone(), sample_value(field, string_len, rng));
    }
    record
}

/// Sample value of one field.
pub fn sample_value<R: Rng + ?Sized>(field: &SchemaField, string_len: usize, rng: &mut R) -> Value {
    if let Some(first) = field.settings.enum_values().into_iter().next() {
        return Value::String(first);
    }
    if field.is_decimal() {
        return Value::String(DECIMAL_SAMPLE.to_string());
    }
    if field.data_type == DataType::Time {
        return random_time(rng);
    }
    shape_value(&field.shape, string_len, rng)
}

fn shape_value<R: Rng + ?Sized>(shape: &ColumnShape, string_len: usize, rng: &mut R) -> Value {
    match shape {
        ColumnShape::Integer => Value::from(rng.gen_range(0..MAX_INTEGER)),
        ColumnShape::Float => Value::from(rng.r#gen::<f64>()),
        ColumnShape::String => Value::String(
            (0..string_len)
                .map(|_| char::from(rng.sample(Alphanumeric)))
                .collect()
        ),
        ColumnShape::Boolean => Value::Bool(rng.gen_bool(0.5)),
        ColumnShape::Pointer(inner) => shape_value(inner, string_len, rng),
        ColumnShape::Struct(_) => Value::Object(Map::new()),
        ColumnShape::Slice => Value::Array(Vec::new()),
        ColumnShape::Other => Value::Null
    }
}

fn random_time<R: Rng + ?Sized>(rng: &mut R) -> Value {
    DateTime::from_timestamp(rng.gen_range(TIME_RANGE), 0)
        .map_or(Value::Null, |time| {
            Value::String(time.to_rfc3339_opts(SecondsFormat::Secs, true))
        })
}
