// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV trip log import and export.

use crate::models::{TripInput, TripRecord};
use crate::services::ledger::LedgerError;
use crate::time_utils::{format_trip_date, parse_trip_date};
use anyhow::Context;
use serde::Serialize;
use std::io;

/// Column names shared by import and export.
pub mod columns {
    pub const DATE: &str = "Date";
    pub const SCOOTER_ID: &str = "Scooter ID";
    pub const DISTANCE_KM: &str = "Distance (km)";
    pub const VEHICLE_TYPE: &str = "Vehicle Type";
    pub const CO2_EMITTED: &str = "CO₂ Emitted (kg)";
    pub const CO2_AVOIDED: &str = "CO₂ Avoided (kg)";

    /// Columns an import file must have, in any order.
    pub const REQUIRED: [&str; 4] = [DATE, SCOOTER_ID, DISTANCE_KM, VEHICLE_TYPE];

    pub const EXPORT: [&str; 6] = [
        DATE,
        SCOOTER_ID,
        DISTANCE_KM,
        VEHICLE_TYPE,
        CO2_EMITTED,
        CO2_AVOIDED,
    ];
}

/// Suggested file name for downloads.
pub const EXPORT_FILE_NAME: &str = "zeromoto_trip_log.csv";

/// Parse an uploaded trip log.
///
/// The whole file is validated before anything is returned: a missing
/// column or any unparsable date/distance fails the import.
pub fn parse_import<R: io::Read>(input: R) -> Result<Vec<TripInput>, LedgerError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| LedgerError::MalformedInput(format!("unreadable header: {}", e)))?
        .clone();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let missing: Vec<&str> = columns::REQUIRED
        .iter()
        .copied()
        .filter(|&name| position(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(LedgerError::MalformedInput(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )));
    }

    // All present, checked above
    let [date_col, scooter_col, distance_col, vehicle_col] =
        columns::REQUIRED.map(|name| position(name).unwrap_or_default());

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result
            .map_err(|e| LedgerError::MalformedInput(format!("row {}: {}", row, e)))?;
        let field = |col: usize| record.get(col).unwrap_or("");

        let date = parse_trip_date(field(date_col)).ok_or_else(|| {
            LedgerError::MalformedInput(format!(
                "row {}: invalid date '{}' (expected YYYY-MM-DD)",
                row,
                field(date_col)
            ))
        })?;

        let distance_km = field(distance_col)
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| {
                LedgerError::MalformedInput(format!(
                    "row {}: invalid distance '{}' (expected a non-negative number)",
                    row,
                    field(distance_col)
                ))
            })?;

        rows.push(TripInput {
            date,
            scooter_id: field(scooter_col).to_string(),
            distance_km,
            vehicle_type: field(vehicle_col).to_string(),
        });
    }

    tracing::debug!(rows = rows.len(), "Parsed trip import");
    Ok(rows)
}

#[derive(Serialize)]
struct ExportRow<'a> {
    date: String,
    scooter_id: &'a str,
    distance_km: f64,
    vehicle_type: &'a str,
    co2_emitted_kg: f64,
    co2_avoided_kg: f64,
}

/// Write records as CSV, header first, in the given order.
pub fn write_export<W: io::Write>(records: &[TripRecord], output: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    // Written explicitly so an empty log still gets a header
    writer.write_record(columns::EXPORT)?;
    for record in records {
        writer.serialize(ExportRow {
            date: format_trip_date(record.date),
            scooter_id: &record.scooter_id,
            distance_km: record.distance_km,
            vehicle_type: &record.vehicle_type,
            co2_emitted_kg: record.co2_emitted_kg,
            co2_avoided_kg: record.co2_avoided_kg,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Render records as a CSV string.
pub fn export_csv(records: &[TripRecord]) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_export(records, &mut buf).context("Failed to write trip log CSV")?;
    String::from_utf8(buf).context("Trip log CSV is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_import_basic() {
        let data = "Date,Scooter ID,Distance (km),Vehicle Type\n\
                    2024-06-01,ZM-001,12.5,Petrol Scooter\n\
                    2024-06-02,ZM-002,3, electric scooter (grid avg) \n";

        let rows = parse_import(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(rows[0].scooter_id, "ZM-001");
        assert_eq!(rows[0].distance_km, 12.5);
        assert_eq!(rows[1].vehicle_type, "electric scooter (grid avg)");
    }

    #[test]
    fn test_parse_import_column_order_and_extras() {
        let data = "Notes,Vehicle Type,Distance (km),Rider,Scooter ID,Date\n\
                    late,Diesel Car,7.25,sam,ZM-9,2024-06-03 18:45:00\n";

        let rows = parse_import(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].vehicle_type, "Diesel Car");
        assert_eq!(rows[0].scooter_id, "ZM-9");
        assert_eq!(rows[0].distance_km, 7.25);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    }

    #[test]
    fn test_parse_import_missing_columns() {
        let data = "Date,Distance (km)\n2024-06-01,5\n";

        let err = parse_import(data.as_bytes()).unwrap_err();
        match err {
            LedgerError::MalformedInput(msg) => {
                assert!(msg.contains("Scooter ID"));
                assert!(msg.contains("Vehicle Type"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_import_empty_input() {
        let err = parse_import("".as_bytes()).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedInput(_)));
    }

    #[test]
    fn test_parse_import_header_only() {
        let rows = parse_import("Date,Scooter ID,Distance (km),Vehicle Type\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_import_bad_fields() {
        let bad_date = "Date,Scooter ID,Distance (km),Vehicle Type\n\
                        2024-06-01,a,1,Diesel Car\n\
                        June 2,b,1,Diesel Car\n";
        let err = parse_import(bad_date.as_bytes()).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedInput(ref msg) if msg.starts_with("row 2")));

        let bad_distance = "Date,Scooter ID,Distance (km),Vehicle Type\n\
                            2024-06-01,a,ten,Diesel Car\n";
        let err = parse_import(bad_distance.as_bytes()).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedInput(ref msg) if msg.contains("ten")));

        let negative = "Date,Scooter ID,Distance (km),Vehicle Type\n\
                        2024-06-01,a,-4,Diesel Car\n";
        let err = parse_import(negative.as_bytes()).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedInput(_)));
    }

    #[test]
    fn test_export_header_on_empty_log() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "Date,Scooter ID,Distance (km),Vehicle Type,CO₂ Emitted (kg),CO₂ Avoided (kg)\n"
        );
    }

    #[test]
    fn test_export_rows() {
        let records = vec![TripRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            scooter_id: "ZM-001".to_string(),
            distance_km: 100.0,
            vehicle_type: "Diesel Car".to_string(),
            co2_emitted_kg: 17.1,
            co2_avoided_kg: -7.9,
        }];

        let csv = export_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2024-06-01,ZM-001,100.0,Diesel Car,17.1,-7.9");
    }

    #[test]
    fn test_export_then_import_keeps_inputs() {
        let records = vec![TripRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 9).unwrap(),
            scooter_id: "ZM, north depot".to_string(),
            distance_km: 4.2,
            vehicle_type: "Petrol Scooter".to_string(),
            co2_emitted_kg: 0.386,
            co2_avoided_kg: 0.0,
        }];

        let csv = export_csv(&records).unwrap();
        let rows = parse_import(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].scooter_id, "ZM, north depot");
        assert_eq!(rows[0].distance_km, 4.2);
        assert_eq!(rows[0].date, records[0].date);
    }
}
