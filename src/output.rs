// ABOUTME: Renders a summary table as pretty text, CSV or JSON
// ABOUTME: Pure projection: selected columns, stable sort on one key, one function per format

use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::JobstatError;
use crate::query::SummaryTable;
use crate::remote::models::{JobSummary, JOB_ID_FIELD};
use crate::status::StatusFilter;

pub const DEFAULT_DISPLAY_COLUMNS: [&str; 8] = [
    "Owner",
    "JobName",
    "OwnerGroup",
    "JobGroup",
    "Site",
    "Status",
    "MinorStatus",
    "SubmissionTime",
];

const COLUMN_GAP: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = JobstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(JobstatError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// What to show and how. `columns` always starts with `JobID` and holds no duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySpec {
    columns: Vec<String>,
    pub format: OutputFormat,
    pub sort_key: String,
    pub status_filter: StatusFilter,
}

impl DisplaySpec {
    pub fn new<S: AsRef<str>>(
        fields: &[S],
        format: OutputFormat,
        sort_key: impl Into<String>,
        status_filter: StatusFilter,
    ) -> Self {
        let mut columns = vec![JOB_ID_FIELD.to_string()];
        for field in fields {
            let field = field.as_ref().trim();
            if !field.is_empty() && !columns.iter().any(|c| c == field) {
                columns.push(field.to_string());
            }
        }

        Self {
            columns,
            format,
            sort_key: sort_key.into(),
            status_filter,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

pub fn render(table: &SummaryTable, spec: &DisplaySpec) -> String {
    let rows = sorted_rows(table, &spec.sort_key);
    match spec.format {
        OutputFormat::Pretty => render_pretty(&rows, spec.columns()),
        OutputFormat::Csv => render_csv(&rows, spec.columns()),
        OutputFormat::Json => render_json(&rows, spec.columns()),
    }
}

fn sorted_rows<'a>(table: &'a SummaryTable, sort_key: &str) -> Vec<&'a JobSummary> {
    let mut rows: Vec<&JobSummary> = table.iter().map(|(_, record)| record).collect();
    rows.sort_by(|a, b| compare_values(a.get(sort_key), b.get(sort_key)));
    rows
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(_) => 4,
    }
}

/// Natural ordering: numbers numerically, strings lexicographically, missing values first.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => compare_numbers(x, y),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => type_rank(a)
            .cmp(&type_rank(b))
            .then_with(|| cell_text(a).cmp(&cell_text(b))),
    }
}

enum Numeric {
    Int(i128),
    Float(f64),
}

fn numeric(n: &serde_json::Number) -> Numeric {
    if let Some(u) = n.as_u64() {
        Numeric::Int(i128::from(u))
    } else if let Some(i) = n.as_i64() {
        Numeric::Int(i128::from(i))
    } else {
        Numeric::Float(n.as_f64().unwrap_or(0.0))
    }
}

/// Exact comparison of an integer with a finite float, without rounding the integer to f64.
fn compare_int_float(i: i128, f: f64) -> Ordering {
    // every JSON integer lies in [-2^63, 2^64)
    if f >= 18_446_744_073_709_551_616.0 {
        return Ordering::Less;
    }
    if f < -9_223_372_036_854_775_808.0 {
        return Ordering::Greater;
    }
    let floor = f.floor();
    match i.cmp(&(floor as i128)) {
        Ordering::Equal if f > floor => Ordering::Less,
        other => other,
    }
}

fn compare_numbers(x: &serde_json::Number, y: &serde_json::Number) -> Ordering {
    match (numeric(x), numeric(y)) {
        (Numeric::Int(x), Numeric::Int(y)) => x.cmp(&y),
        (Numeric::Int(x), Numeric::Float(y)) => compare_int_float(x, y),
        (Numeric::Float(x), Numeric::Int(y)) => compare_int_float(y, x).reverse(),
        (Numeric::Float(x), Numeric::Float(y)) => x.total_cmp(&y),
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn project(row: &JobSummary, columns: &[String]) -> Vec<String> {
    columns.iter().map(|c| cell_text(row.get(c))).collect()
}

fn render_pretty(rows: &[&JobSummary], columns: &[String]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(|row| project(row, columns)).collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |values: &[String]| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect();
        let mut text = padded.join(COLUMN_GAP).trim_end().to_string();
        text.push('\n');
        text
    };

    let mut output = line(columns);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&line(rule.as_slice()));
    for row in &cells {
        output.push_str(&line(row.as_slice()));
    }
    output
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn render_csv(rows: &[&JobSummary], columns: &[String]) -> String {
    let csv_line = |values: &[String]| -> String {
        let escaped: Vec<String> = values.iter().map(|v| csv_escape(v)).collect();
        escaped.join(",") + "\n"
    };

    let mut output = csv_line(columns);
    for row in rows {
        output.push_str(&csv_line(project(row, columns).as_slice()));
    }
    output
}

fn render_json(rows: &[&JobSummary], columns: &[String]) -> String {
    let objects: Vec<Value> = rows
        .iter()
        .map(|row| {
            let object: Map<String, Value> = columns
                .iter()
                .map(|c| (c.clone(), row.get(c).cloned().unwrap_or(Value::Null)))
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(objects).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(records: Vec<Value>) -> SummaryTable {
        let mut table = SummaryTable::new();
        for record in records {
            let id = record["JobID"].as_u64().unwrap();
            table.insert(id, record.as_object().cloned().unwrap());
        }
        table
    }

    fn spec(fields: &[&str], format: OutputFormat) -> DisplaySpec {
        DisplaySpec::new(fields, format, JOB_ID_FIELD, StatusFilter::All)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("pretty".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "yaml".parse::<OutputFormat>().unwrap_err(),
            JobstatError::UnknownFormat("yaml".to_string())
        );
    }

    #[test]
    fn test_job_id_always_first_and_unique() {
        let spec = spec(&["Status", "JobID", "Site", "Status", " "], OutputFormat::Csv);
        assert_eq!(spec.columns(), ["JobID", "Status", "Site"]);
    }

    #[test]
    fn test_json_projection() {
        let table = table(vec![json!({
            "JobID": 5,
            "Status": "Done",
            "Site": "CERN",
            "Owner": "x"
        })]);
        let output = render(&table, &spec(&["Status", "Site"], OutputFormat::Json));
        assert_eq!(output, r#"[{"JobID":5,"Status":"Done","Site":"CERN"}]"#);
    }

    #[test]
    fn test_json_missing_column_is_null() {
        let table = table(vec![json!({"JobID": 1, "Status": "Running"})]);
        let output = render(&table, &spec(&["Site"], OutputFormat::Json));
        assert_eq!(output, r#"[{"JobID":1,"Site":null}]"#);
    }

    #[test]
    fn test_csv_quoting_and_blank_cells() {
        let table = table(vec![
            json!({"JobID": 1, "JobName": "a,b", "Status": "Running"}),
            json!({"JobID": 2, "JobName": "say \"hi\""}),
        ]);
        let output = render(&table, &spec(&["JobName", "Status"], OutputFormat::Csv));
        assert_eq!(
            output,
            "JobID,JobName,Status\n1,\"a,b\",Running\n2,\"say \"\"hi\"\"\",\n"
        );
    }

    #[test]
    fn test_pretty_alignment() {
        let table = table(vec![
            json!({"JobID": 5, "Status": "Running", "Site": "LCG.CERN.ch"}),
            json!({"JobID": 123, "Status": "Waiting"}),
        ]);
        let output = render(&table, &spec(&["Status", "Site"], OutputFormat::Pretty));
        let expected = "\
JobID  Status   Site
-----  -------  -----------
5      Running  LCG.CERN.ch
123    Waiting
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_pretty_empty_table_has_header_only() {
        let output = render(&SummaryTable::new(), &spec(&["Status"], OutputFormat::Pretty));
        assert_eq!(output, "JobID  Status\n-----  ------\n");
        assert_eq!(render(&SummaryTable::new(), &spec(&[], OutputFormat::Json)), "[]");
    }

    #[test]
    fn test_sort_is_numeric_for_job_ids() {
        let table = table(vec![json!({"JobID": 100}), json!({"JobID": 9}), json!({"JobID": 20})]);
        let output = render(&table, &spec(&[], OutputFormat::Csv));
        assert_eq!(output, "JobID\n9\n20\n100\n");
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        let table = table(vec![
            json!({"JobID": 3, "Site": "B"}),
            json!({"JobID": 1, "Site": "B"}),
            json!({"JobID": 2, "Site": "A"}),
            json!({"JobID": 4}),
        ]);
        let spec = DisplaySpec::new(&["Site"], OutputFormat::Csv, "Site", StatusFilter::All);
        let output = render(&table, &spec);
        assert_eq!(output, "JobID,Site\n4,\n2,A\n1,B\n3,B\n");
    }

    #[test]
    fn test_render_is_deterministic() {
        let table = table(vec![
            json!({"JobID": 2, "Status": "Running"}),
            json!({"JobID": 1, "Status": "Waiting"}),
        ]);
        for format in [OutputFormat::Pretty, OutputFormat::Csv, OutputFormat::Json] {
            let spec = spec(&["Status"], format);
            assert_eq!(render(&table, &spec), render(&table, &spec));
        }
    }

    #[test]
    fn test_mixed_types_order() {
        assert_eq!(compare_values(None, Some(&json!(1))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(2)), Some(&json!("1"))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(-1)), Some(&json!(3))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(1.5)), Some(&json!(1))), Ordering::Greater);
    }

    #[test]
    fn test_large_integers_compare_exactly_against_floats() {
        let big = json!(9_007_199_254_740_993u64);
        let float = json!(9_007_199_254_740_992.0);
        assert_eq!(compare_values(Some(&big), Some(&float)), Ordering::Greater);
        assert_eq!(compare_values(Some(&float), Some(&big)), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(u64::MAX)), Some(&json!(1e30))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(i64::MIN)), Some(&json!(-1e30))), Ordering::Greater);
        assert_eq!(compare_values(Some(&json!(3)), Some(&json!(3.0))), Ordering::Equal);
        assert_eq!(compare_values(Some(&json!(-3)), Some(&json!(-2.5))), Ordering::Less);
    }

    #[test]
    fn test_sort_on_mixed_precision_numbers() {
        let table = table(vec![
            json!({"JobID": 1, "Cost": 9_007_199_254_740_993u64}),
            json!({"JobID": 2, "Cost": 9_007_199_254_740_992.0}),
            json!({"JobID": 3, "Cost": 9_007_199_254_740_992u64}),
        ]);
        let spec = DisplaySpec::new(&["Cost"], OutputFormat::Csv, "Cost", StatusFilter::All);
        let rendered = render(&table, &spec);
        let ids: Vec<&str> = rendered
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_format_display_round_trips() {
        for format in [OutputFormat::Pretty, OutputFormat::Csv, OutputFormat::Json] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }
}
