//! CSV loaders for the sales and comodato feeds
//!
//! The upstream spreadsheets are exported by different branches with
//! inconsistent header spellings, so each canonical field carries an ordered
//! alias list that is resolved against the header row once per file. The
//! engine only ever sees the canonical shapes.

use super::{ComodatoContract, SalesRecord};
use chrono::NaiveDate;
use csv::StringRecord;
use std::path::Path;
use thiserror::Error;

/// Errors surfaced while ingesting a feed file
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("no column found for '{field}' (tried: {tried})")]
    MissingColumn { field: &'static str, tried: String },

    #[error("row {row}: invalid number for '{field}': '{value}'")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("row {row}: invalid date for '{field}': '{value}'")]
    InvalidDate {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Accepted header spellings per canonical sales field, in resolution order
const SALES_CLIENT: &[&str] = &["cliente", "cod cliente", "cod. cliente", "client", "client_key"];
const SALES_PRODUCT_CODE: &[&str] = &["produto", "cod produto", "cod. produto", "codigo", "product_code", "sku"];
const SALES_PRODUCT_NAME: &[&str] = &["descricao", "descrição", "desc produto", "product_name", "nome"];
const SALES_VOLUME: &[&str] = &["quantidade", "qtd", "peso", "peso kg", "kg", "volume_kg"];
const SALES_REVENUE: &[&str] = &["valor total", "valor", "vlr total", "faturamento", "revenue"];
const SALES_DATE: &[&str] = &["data emissao", "data emissão", "dt emissao", "data", "document_date", "emissao"];

/// Accepted header spellings per canonical contract field
const CONTRACT_PRODUCT_CODE: &[&str] = &["produto", "cod produto", "cod. produto", "equipamento", "product_code"];
const CONTRACT_PRODUCT_NAME: &[&str] = &["descricao", "descrição", "desc equipamento", "product_name"];
const CONTRACT_TOTAL: &[&str] = &["valor total", "valor", "vlr contrato", "total_value"];
const CONTRACT_MONTHS: &[&str] = &["prazo", "prazo meses", "meses", "parcelas", "contract_months"];
const CONTRACT_INSTALL_DATE: &[&str] = &["data instalacao", "data instalação", "dt instalacao", "instalacao", "install_date"];

/// Find the index of the first header matching one of the accepted aliases.
/// Comparison is case-insensitive on trimmed headers.
fn resolve_column(
    headers: &StringRecord,
    field: &'static str,
    aliases: &[&str],
) -> Result<usize, FeedError> {
    for alias in aliases {
        let found = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(alias));
        if let Some(idx) = found {
            return Ok(idx);
        }
    }
    Err(FeedError::MissingColumn {
        field,
        tried: aliases.join(", "),
    })
}

/// Parse a feed number, accepting both `1234.56` and the Brazilian
/// spreadsheet form `1.234,56` (optionally prefixed with `R$`).
fn parse_number(raw: &str, row: usize, field: &'static str) -> Result<f64, FeedError> {
    let cleaned = raw.trim().trim_start_matches("R$").trim();
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned.to_string()
    };

    if normalized.is_empty() {
        return Ok(0.0);
    }

    normalized.parse::<f64>().map_err(|_| FeedError::InvalidNumber {
        row,
        field,
        value: raw.to_string(),
    })
}

/// Parse a feed date, accepting ISO and the Brazilian day-first forms
fn parse_date(raw: &str, row: usize, field: &'static str) -> Result<NaiveDate, FeedError> {
    let trimmed = raw.trim();
    for format in ["%Y-%m-%d", "%d/%m/%Y", "%d/%m/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(FeedError::InvalidDate {
        row,
        field,
        value: raw.to_string(),
    })
}

fn field<'a>(record: &'a StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("")
}

/// Load sales records from any reader (e.g., string buffer, network stream)
pub fn load_sales_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<SalesRecord>, FeedError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let client = resolve_column(&headers, "client_key", SALES_CLIENT)?;
    let code = resolve_column(&headers, "product_code", SALES_PRODUCT_CODE)?;
    let name = resolve_column(&headers, "product_name", SALES_PRODUCT_NAME)?;
    let volume = resolve_column(&headers, "volume_kg", SALES_VOLUME)?;
    let revenue = resolve_column(&headers, "revenue", SALES_REVENUE)?;
    let date = resolve_column(&headers, "document_date", SALES_DATE)?;

    let mut records = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let row = i + 2; // 1-based, after the header row
        let record = result?;
        records.push(SalesRecord {
            client_key: field(&record, client).trim().to_string(),
            product_code: field(&record, code).trim().to_string(),
            product_name: field(&record, name).trim().to_string(),
            volume_kg: parse_number(field(&record, volume), row, "volume_kg")?,
            revenue: parse_number(field(&record, revenue), row, "revenue")?,
            document_date: parse_date(field(&record, date), row, "document_date")?,
        });
    }

    Ok(records)
}

/// Load all sales records from a CSV file
pub fn load_sales_records<P: AsRef<Path>>(path: P) -> Result<Vec<SalesRecord>, FeedError> {
    let file = std::fs::File::open(path)?;
    load_sales_from_reader(file)
}

/// Load comodato contracts from any reader
pub fn load_contracts_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<ComodatoContract>, FeedError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let code = resolve_column(&headers, "product_code", CONTRACT_PRODUCT_CODE)?;
    let name = resolve_column(&headers, "product_name", CONTRACT_PRODUCT_NAME)?;
    let total = resolve_column(&headers, "total_value", CONTRACT_TOTAL)?;
    let months = resolve_column(&headers, "contract_months", CONTRACT_MONTHS)?;
    let install = resolve_column(&headers, "install_date", CONTRACT_INSTALL_DATE)?;

    let mut contracts = Vec::new();
    for (i, result) in csv_reader.records().enumerate() {
        let row = i + 2;
        let record = result?;
        contracts.push(ComodatoContract {
            product_code: field(&record, code).trim().to_string(),
            product_name: field(&record, name).trim().to_string(),
            total_value: parse_number(field(&record, total), row, "total_value")?,
            contract_months: parse_number(field(&record, months), row, "contract_months")? as u32,
            install_date: parse_date(field(&record, install), row, "install_date")?,
        });
    }

    Ok(contracts)
}

/// Load all comodato contracts from a CSV file
pub fn load_contracts<P: AsRef<Path>>(path: P) -> Result<Vec<ComodatoContract>, FeedError> {
    let file = std::fs::File::open(path)?;
    load_contracts_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_sales_iso_headers() {
        let csv = "client_key,product_code,product_name,volume_kg,revenue,document_date\n\
                   C001,PA100,Mozzarella,120.5,1450.00,2025-01-15\n\
                   C001,PA200,Provolone,80,990.50,2025-02-03\n";

        let records = load_sales_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].client_key, "C001");
        assert_eq!(records[0].volume_kg, 120.5);
        assert_eq!(records[1].document_date, NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
    }

    #[test]
    fn test_load_sales_branch_headers() {
        // Alternate spreadsheet export: Portuguese headers, day-first dates,
        // comma decimals with thousands separators
        let csv = "Cliente,Produto,Descricao,Peso KG,Valor Total,Data Emissao\n\
                   C001,PA100,Mozzarella,\"1.250,5\",\"R$ 14.500,75\",15/01/2025\n";

        let records = load_sales_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product_code, "PA100");
        assert_eq!(records[0].volume_kg, 1250.5);
        assert_eq!(records[0].revenue, 14500.75);
        assert_eq!(records[0].document_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_missing_column_reports_aliases() {
        let csv = "Cliente,Produto,Descricao,Peso KG,Valor Total\nC001,PA100,M,1,2\n";
        let err = load_sales_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            FeedError::MissingColumn { field, tried } => {
                assert_eq!(field, "document_date");
                assert!(tried.contains("data emissao"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_contracts() {
        let csv = "Equipamento,Descricao,Valor,Prazo,Data Instalacao\n\
                   EQ001,Freezer 400L,24000.00,24,10/01/2024\n";

        let contracts = load_contracts_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(contracts.len(), 1);
        assert_eq!(contracts[0].contract_months, 24);
        assert_eq!(contracts[0].monthly_installment(), 1_000.0);
    }

    #[test]
    fn test_brazilian_number_parsing() {
        assert_eq!(parse_number("1.234,56", 2, "revenue").unwrap(), 1234.56);
        assert_eq!(parse_number("R$ 500,00", 2, "revenue").unwrap(), 500.0);
        assert_eq!(parse_number("1234.56", 2, "revenue").unwrap(), 1234.56);
        assert_eq!(parse_number("", 2, "revenue").unwrap(), 0.0);
        assert!(parse_number("abc", 2, "revenue").is_err());
    }
}
