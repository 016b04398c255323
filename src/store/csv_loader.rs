use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;
use tracing::warn;

use super::{decode_entry, insert_lenient};
use crate::catalog::IngredientCatalog;

// Expected column headers
const NAME_COL: &str = "name";
const CATEGORY_COL: &str = "category";
const ALIASES_COL: &str = "aliases";

/// Imports a catalog from a CSV file with `name,category,aliases` columns, where
/// `aliases` holds a JSON array of strings.
pub fn load_catalog_csv(csv_path: &Path) -> Result<IngredientCatalog> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!("Catalog CSV file not found at: {:?}", csv_path));
    }
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open catalog CSV file at {:?}", csv_path))?;
    read_catalog_csv(file)
}

/// Reads catalog rows, one entry per physical line. Each line is parsed on its
/// own, so an unterminated quote in one row cannot pull later rows into it.
pub fn read_catalog_csv<R: Read>(mut reader: R) -> Result<IngredientCatalog> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("Failed to read catalog CSV")?;

    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let headers = match lines.next() {
        Some((_, line)) => parse_line(line).context("Failed to read catalog CSV header")?,
        None => StringRecord::new(),
    };
    let column = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", wanted))
    };
    let name_idx = column(NAME_COL)?;
    let category_idx = column(CATEGORY_COL)?;
    // An aliases column is optional; without it every entry simply has none.
    let aliases_idx = column(ALIASES_COL).ok();

    let mut catalog = IngredientCatalog::new();
    for (line_index, line) in lines {
        let line_no = line_index + 1;
        let record = match parse_line(line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line_no, "unreadable catalog row skipped: {}", e);
                continue;
            }
        };

        let name = record.get(name_idx).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }

        let mut entry = json!({
            "name": name,
            "category": record.get(category_idx).unwrap_or(""),
        });
        if let Some(idx) = aliases_idx {
            let aliases = if has_unterminated_quote(line) {
                warn!(line = line_no, ingredient = name, "unterminated quote in catalog row; aliases dropped");
                ""
            } else {
                record.get(idx).unwrap_or("")
            };
            entry["aliases"] = Value::String(aliases.to_string());
        }

        if let Some(ingredient) = decode_entry(&entry) {
            insert_lenient(&mut catalog, ingredient, "csv");
        }
    }

    Ok(catalog)
}

fn parse_line(line: &str) -> csv::Result<StringRecord> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    rdr.read_record(&mut record)?;
    Ok(record)
}

// Quoted fields escape quotes by doubling them, so a well-formed row always
// carries an even number.
fn has_unterminated_quote(line: &str) -> bool {
    line.matches('"').count() % 2 == 1
}
