use crate::core::{converter, ConversionSession};
use crate::error::{KonversiError, KonversiResult};
use crate::excel::{self, ExcelImporter};
use crate::types::{ConversionRange, ImportRecord};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Record dump formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(RecordFormat::Json),
            "yaml" | "yml" => Some(RecordFormat::Yaml),
            _ => None,
        }
    }
}

/// Read records from a workbook or from a JSON/YAML dump
fn load_records(input: &Path) -> KonversiResult<Vec<ImportRecord>> {
    match RecordFormat::from_path(input) {
        Some(RecordFormat::Json) => {
            let content = fs::read_to_string(input)?;
            Ok(serde_json::from_str(&content)?)
        }
        Some(RecordFormat::Yaml) => {
            let content = fs::read_to_string(input)?;
            Ok(serde_yaml::from_str(&content)?)
        }
        None => ExcelImporter::new(input).import(),
    }
}

fn write_records(output: &Path, records: &[ImportRecord]) -> KonversiResult<()> {
    let content = match RecordFormat::from_path(output) {
        Some(RecordFormat::Yaml) => serde_yaml::to_string(records)?,
        Some(RecordFormat::Json) => serde_json::to_string_pretty(records)?,
        None => {
            return Err(KonversiError::Validation(format!(
                "unsupported output format '{}': use .json, .yaml or .yml",
                output.display()
            )))
        }
    };
    fs::write(output, content)?;
    Ok(())
}

/// Record count per group, in first-seen order
fn group_counts(records: &[ImportRecord]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(name, _)| *name == record.group) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.group.as_str(), 1)),
        }
    }
    counts
}

/// Execute the convert command
pub fn convert(numbers: String, min: i64, max: i64, verbose: bool) -> KonversiResult<()> {
    let range = ConversionRange::new(min, max);
    println!("{}", "📊 Konversi - Converting numbers".bold().green());
    println!("   Range: [{}, {}]\n", range.min, range.max);

    let conversion = converter::convert_text(&numbers, range)?;

    if verbose {
        let skipped = conversion.skipped();
        println!("   Parsed {} of {} entries", conversion.len() - skipped.len(), conversion.len());
        if !skipped.is_empty() {
            println!(
                "{}",
                format!("   ⚠️  Skipped non-numeric positions: {:?}", skipped).yellow()
            );
        }
        println!();
    }

    println!("{}", "✅ Hasil Konversi:".bold().green());
    println!("   {}\n", converter::join_values(&conversion.values()));
    Ok(())
}

/// Execute the import command
pub fn import(input: PathBuf, output: Option<PathBuf>, verbose: bool) -> KonversiResult<()> {
    println!("{}", "📊 Konversi - Excel Import".bold().green());
    println!("   Input:  {}", input.display());
    if let Some(ref out) = output {
        println!("   Output: {}", out.display());
    }
    println!();

    if verbose {
        println!("{}", "📖 Reading Excel file...".cyan());
    }

    let records = ExcelImporter::new(&input).import()?;

    for (group, count) in group_counts(&records) {
        println!("   📄 Sheet: {} ({} rows)", group.bright_blue().bold(), count);
    }

    if verbose {
        for record in &records {
            println!(
                "      {} = {}",
                record.label.cyan(),
                record.raw_value.trim()
            );
        }
    }

    if let Some(out) = output {
        write_records(&out, &records)?;
        println!("\n   Records written to {}", out.display());
    }

    println!("\n{} {} records", "✅ Import Complete:".bold().green(), records.len());
    Ok(())
}

/// Execute the process command: import, convert and export in one go
pub fn process(
    input: PathBuf,
    output: Option<PathBuf>,
    min: i64,
    max: i64,
    verbose: bool,
) -> KonversiResult<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(crate::types::EXPORT_FILE_NAME));
    println!("{}", "📊 Konversi - Processing workbook".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}", output.display());
    println!("   Range:  [{}, {}]\n", min, max);

    let mut session = ConversionSession::new(ConversionRange::new(min, max));
    session.load_records(load_records(&input)?);

    if verbose {
        println!("   Loaded {} records", session.records().len());
    }

    let skipped = session.convert()?.skipped();
    if !skipped.is_empty() {
        println!(
            "{}",
            format!(
                "   ⚠️  {} record(s) without a numeric value exported with an empty Hasil Konversi",
                skipped.len()
            )
            .yellow()
        );
    }

    let tables = session.export_tables()?;
    if verbose {
        for table in &tables {
            println!(
                "   📄 Sheet: {} ({} rows)",
                table.name.bright_blue().bold(),
                table.data_rows()
            );
        }
    }

    excel::ExcelExporter::new(tables).export(&output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Hasil: {}", session.result_text());
    println!("   Excel file: {}\n", output.display());
    Ok(())
}

/// Execute the template command
pub fn template(output: PathBuf) -> KonversiResult<()> {
    excel::write_template(&output)?;
    println!("{}", "✅ Template written".bold().green());
    println!("   Excel file: {}", output.display());
    println!("   Fill column A with names and column B with numbers, one sheet per class.\n");
    Ok(())
}
