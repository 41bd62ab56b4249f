use crate::report::format_f64_repr;

pub const SAMPLE_ID_COLUMN: &str = "sample_id";
pub const BIN_ID_COLUMN: &str = "bin_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    pub raw_key: &'static str,
    pub column: &'static str,
}

const fn field(raw_key: &'static str, column: &'static str) -> SchemaField {
    SchemaField { raw_key, column }
}

/// Raw CheckM statistic keys and the columns they land in, in output order.
/// The bin id column precedes these and comes from the line label.
pub const REPORT_FIELDS: &[SchemaField] = &[
    field("marker lineage", "marker_lineage"),
    field("# genomes", "genomes"),
    field("# markers", "markers"),
    field("# marker sets", "marker_sets"),
    field("0", "count0"),
    field("1", "count1"),
    field("2", "count2"),
    field("3", "count3"),
    field("4", "count4"),
    field("5+", "count5_or_more"),
    field("Completeness", "completeness"),
    field("Contamination", "contamination"),
    field("GC", "gc"),
    field("GC std", "gc_std"),
    field("Genome size", "genome_size"),
    field("# ambiguous bases", "ambiguous_bases"),
    field("# scaffolds", "scaffolds"),
    field("# contigs", "contigs"),
    field("Longest scaffold", "longest_scaffold"),
    field("Longest contig", "longest_contig"),
    field("N50 (scaffolds)", "n50_scaffolds"),
    field("N50 (contigs)", "n50_contigs"),
    field("Mean scaffold length", "mean_scaffold_length"),
    field("Mean contig length", "mean_contig_length"),
    field("Coding density", "coding_density"),
    field("Translation table", "translation_table"),
    field("# predicted genes", "predicted_genes"),
    field("GCN0", "gcn0"),
    field("GCN1", "gcn1"),
    field("GCN2", "gcn2"),
    field("GCN3", "gcn3"),
    field("GCN4", "gcn4"),
    field("GCN5+", "gcn5_or_more"),
];

pub fn field_index(column: &str) -> Option<usize> {
    REPORT_FIELDS.iter().position(|f| f.column == column)
}

pub fn raw_key_index(raw_key: &str) -> Option<usize> {
    REPORT_FIELDS.iter().position(|f| f.raw_key == raw_key)
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Missing | CellValue::Text(_) => None,
        }
    }

    /// TSV rendering: missing and NaN cells are empty.
    pub fn render(&self) -> String {
        match self {
            CellValue::Missing => String::new(),
            CellValue::Int(v) => v.to_string(),
            CellValue::Float(v) if v.is_nan() => String::new(),
            CellValue::Float(v) => format_f64_repr(*v),
            CellValue::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub sample_id: String,
    pub bin_id: String,
    /// Aligned with [`REPORT_FIELDS`].
    pub values: Vec<CellValue>,
}

impl ReportRow {
    pub fn empty(sample_id: &str, bin_id: &str) -> Self {
        Self {
            sample_id: sample_id.to_string(),
            bin_id: bin_id.to_string(),
            values: vec![CellValue::Missing; REPORT_FIELDS.len()],
        }
    }

    pub fn value(&self, column: &str) -> Option<&CellValue> {
        field_index(column).and_then(|idx| self.values.get(idx))
    }

    fn numeric(&self, column: &str) -> f64 {
        self.value(column)
            .and_then(CellValue::as_f64)
            .unwrap_or(f64::NAN)
    }

    pub fn completeness(&self) -> f64 {
        self.numeric("completeness")
    }

    pub fn contamination(&self) -> f64 {
        self.numeric("contamination")
    }

    pub fn cells(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.values.len() + 2);
        out.push(self.sample_id.clone());
        out.push(self.bin_id.clone());
        out.extend(self.values.iter().map(CellValue::render));
        out
    }
}

/// Rows of every sample, in sample order then report line order. A row's
/// position in `rows` is its index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportTable {
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn columns() -> Vec<&'static str> {
        let mut cols = Vec::with_capacity(REPORT_FIELDS.len() + 2);
        cols.push(SAMPLE_ID_COLUMN);
        cols.push(BIN_ID_COLUMN);
        cols.extend(REPORT_FIELDS.iter().map(|f| f.column));
        cols
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn append(&mut self, other: ReportTable) {
        self.rows.extend(other.rows);
    }

    pub fn rows_for_sample<'a>(&'a self, sample_id: &'a str) -> impl Iterator<Item = &'a ReportRow> {
        self.rows.iter().filter(move |r| r.sample_id == sample_id)
    }
}
