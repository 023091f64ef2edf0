//! CSV loaders for trip and maintenance sheets
//!
//! Columns are located by header name, in English or Portuguese. Files are
//! read as UTF-8 and fall back to Windows-1252, the default encoding of
//! spreadsheet exports on Brazilian Windows installs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use encoding_rs::WINDOWS_1252;
use thiserror::Error;
use tracing::{debug, warn};

use wise_domain::model::{MaintenanceCategory, MaintenanceRecord, TripRecord};

#[derive(Error, Debug)]
pub enum CsvLoaderError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid date format in row {row}: {value}")]
    InvalidDate { row: usize, value: String },

    #[error("Invalid number format in row {row}, column {column}: {value}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Negative value in row {row}, column {column}: {value}")]
    NegativeValue {
        row: usize,
        column: String,
        value: f64,
    },

    #[error("Unknown maintenance category in row {row}: {value}")]
    InvalidCategory { row: usize, value: String },
}

struct Column {
    name: &'static str,
    aliases: &'static [&'static str],
}

const TRIP_COLUMNS: [Column; 13] = [
    Column { name: "vehicle", aliases: &["veiculo"] },
    Column { name: "driver", aliases: &["motorista"] },
    Column { name: "departure_date", aliases: &["departuredate", "data_saida", "saida"] },
    Column { name: "arrival_date", aliases: &["arrivaldate", "data_chegada", "chegada"] },
    Column { name: "destination", aliases: &["destino"] },
    Column { name: "fuel_cost", aliases: &["fuelcost", "combustivel"] },
    Column { name: "maintenance_cost", aliases: &["maintenancecost", "manutencao"] },
    Column { name: "driver_daily", aliases: &["driverdaily", "diaria", "diaria_do_motorista"] },
    Column { name: "total_expenses", aliases: &["totalexpenses", "despesa_total", "total_despesas"] },
    Column { name: "total_km", aliases: &["totalkm", "km_total"] },
    Column { name: "km_difference", aliases: &["kmdifference", "diferenca_km", "diferenca_de_km"] },
    Column { name: "total_diesel_liters", aliases: &["totaldieselliters", "litros_diesel", "litros"] },
    Column { name: "avg_km_l", aliases: &["avgkml", "media_km_l", "km_l"] },
];

const MAINTENANCE_COLUMNS: [Column; 7] = [
    Column { name: "date", aliases: &["data"] },
    Column { name: "driver", aliases: &["motorista"] },
    Column { name: "vehicle", aliases: &["veiculo"] },
    Column { name: "cost", aliases: &["custo", "valor"] },
    Column { name: "responsible", aliases: &["responsavel"] },
    Column { name: "observation", aliases: &["observacao", "obs"] },
    Column { name: "category", aliases: &["categoria"] },
];

/// Load trip records from a CSV file
pub fn load_trips<P: AsRef<Path>>(path: P) -> Result<Vec<TripRecord>, CsvLoaderError> {
    let content = read_text(path.as_ref())?;
    parse_trips(&content)
}

/// Load maintenance records from a CSV file
pub fn load_maintenance<P: AsRef<Path>>(path: P) -> Result<Vec<MaintenanceRecord>, CsvLoaderError> {
    let content = read_text(path.as_ref())?;
    parse_maintenance(&content)
}

/// Parse trip records from CSV text with a header row
pub fn parse_trips(content: &str) -> Result<Vec<TripRecord>, CsvLoaderError> {
    let mut reader = reader_for(content);
    let headers = reader.headers()?.clone();
    let idx = locate_columns(&headers, &TRIP_COLUMNS)?;

    let mut trips = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 2; // header is row 1
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let field = |i: usize| record.get(idx[i]).unwrap_or("");
        let number = |i: usize| parse_f64(field(i), row, TRIP_COLUMNS[i].name);

        let total_km = non_negative(number(9)?, row, TRIP_COLUMNS[9].name)?;
        let total_diesel_liters = non_negative(number(11)?, row, TRIP_COLUMNS[11].name)?;

        trips.push(TripRecord {
            vehicle: field(0).to_string(),
            driver: field(1).to_string(),
            departure_date: parse_date(field(2), row)?,
            arrival_date: parse_date(field(3), row)?,
            destination: field(4).to_string(),
            fuel_cost: number(5)?,
            maintenance_cost: number(6)?,
            driver_daily: number(7)?,
            total_expenses: number(8)?,
            total_km,
            km_difference: number(10)?,
            total_diesel_liters,
            avg_km_l: number(12)?,
        });
    }

    debug!(count = trips.len(), "parsed trip rows");
    Ok(trips)
}

/// Parse maintenance records from CSV text with a header row
pub fn parse_maintenance(content: &str) -> Result<Vec<MaintenanceRecord>, CsvLoaderError> {
    let mut reader = reader_for(content);
    let headers = reader.headers()?.clone();
    let idx = locate_columns(&headers, &MAINTENANCE_COLUMNS)?;

    let mut records = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 2;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let field = |i: usize| record.get(idx[i]).unwrap_or("");
        let category_raw = field(6);
        let category = MaintenanceCategory::from_code(category_raw).ok_or_else(|| {
            CsvLoaderError::InvalidCategory {
                row,
                value: category_raw.to_string(),
            }
        })?;

        records.push(MaintenanceRecord {
            date: parse_date(field(0), row)?,
            driver: field(1).to_string(),
            vehicle: field(2).to_string(),
            cost: parse_f64(field(3), row, MAINTENANCE_COLUMNS[3].name)?,
            responsible: field(4).to_string(),
            observation: field(5).to_string(),
            category,
        });
    }

    debug!(count = records.len(), "parsed maintenance rows");
    Ok(records)
}

fn read_text(path: &Path) -> Result<String, CsvLoaderError> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(decode_text(bytes, path))
}

fn decode_text(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text.trim_start_matches('\u{feff}').to_string(),
        Err(err) => {
            warn!(
                path = %path.display(),
                "file is not valid UTF-8, decoding as Windows-1252"
            );
            let (decoded, _, _) = WINDOWS_1252.decode(err.as_bytes());
            decoded.into_owned()
        }
    }
}

fn reader_for(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(detect_delimiter(content))
        .from_reader(content.as_bytes())
}

/// `;` when the header has semicolons and no commas, `,` otherwise
fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");
    if header.contains(';') && !header.contains(',') {
        b';'
    } else {
        b','
    }
}

/// Lowercase, strip Portuguese accents and collapse punctuation to `_`
fn normalize_header(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    for ch in header.trim().to_lowercase().chars() {
        let ch = match ch {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            c => c,
        };
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}

fn locate_columns(
    headers: &csv::StringRecord,
    columns: &[Column],
) -> Result<Vec<usize>, CsvLoaderError> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    columns
        .iter()
        .map(|col| {
            normalized
                .iter()
                .position(|h| h == col.name || col.aliases.contains(&h.as_str()))
                .ok_or_else(|| CsvLoaderError::MissingColumn(col.name.to_string()))
        })
        .collect()
}

fn parse_date(s: &str, row: usize) -> Result<NaiveDate, CsvLoaderError> {
    let formats = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s.trim(), fmt) {
            return Ok(date);
        }
    }

    Err(CsvLoaderError::InvalidDate {
        row,
        value: s.to_string(),
    })
}

/// Parse an amount written as `1,234.56`, `1.234,56`, `1.450` or `12,5`,
/// optionally signed and prefixed with `R$`.
///
/// With both separators present the last one is the decimal point. A single
/// kind of separator splitting the digits into groups of three is a thousands
/// separator; otherwise a lone separator is the decimal point.
fn parse_f64(s: &str, row: usize, column: &str) -> Result<f64, CsvLoaderError> {
    let invalid = || CsvLoaderError::InvalidNumber {
        row,
        column: column.to_string(),
        value: s.to_string(),
    };

    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(0.0);
    }

    let (sign_before, rest) = match compact.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, compact.as_str()),
    };
    let rest = rest.strip_prefix("R$").unwrap_or(rest);
    let (sign_after, body) = match rest.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, rest),
    };
    if sign_before && sign_after {
        return Err(invalid());
    }

    let normalized = normalize_number(body).ok_or_else(invalid)?;
    let value: f64 = normalized.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(if sign_before || sign_after { -value } else { value })
}

fn normalize_number(body: &str) -> Option<String> {
    match (body.rfind(','), body.rfind('.')) {
        (Some(comma), Some(dot)) => {
            let (decimal_at, group_sep) = if comma > dot { (comma, '.') } else { (dot, ',') };
            let int_part = &body[..decimal_at];
            let fraction = &body[decimal_at + 1..];
            if !is_digit_grouped(int_part, group_sep) || !fraction.chars().all(|c| c.is_ascii_digit())
            {
                return None;
            }
            Some(format!("{}.{}", int_part.replace(group_sep, ""), fraction))
        }
        (Some(_), None) => single_separator(body, ','),
        (None, Some(_)) => single_separator(body, '.'),
        (None, None) => Some(body.to_string()),
    }
}

fn single_separator(body: &str, sep: char) -> Option<String> {
    if is_digit_grouped(body, sep) {
        return Some(body.replace(sep, ""));
    }
    if body.matches(sep).count() == 1 {
        return Some(body.replace(sep, "."));
    }
    None
}

/// `1.234.567` style: a leading group of 1-3 digits (no leading zero), then
/// one or more groups of exactly 3 digits
fn is_digit_grouped(int_part: &str, sep: char) -> bool {
    let mut groups = int_part.split(sep);
    let first = groups.next().unwrap_or("");
    let first_ok = (1..=3).contains(&first.len())
        && !first.starts_with('0')
        && first.chars().all(|c| c.is_ascii_digit());
    let mut rest_count = 0;
    let rest_ok = groups.all(|g| {
        rest_count += 1;
        g.len() == 3 && g.chars().all(|c| c.is_ascii_digit())
    });
    first_ok && rest_ok && rest_count > 0
}

fn non_negative(value: f64, row: usize, column: &str) -> Result<f64, CsvLoaderError> {
    if value < 0.0 {
        return Err(CsvLoaderError::NegativeValue {
            row,
            column: column.to_string(),
            value,
        });
    }
    Ok(value)
}
