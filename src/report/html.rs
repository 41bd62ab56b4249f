use std::fmt::Write;

use crate::model::quality::QualityCategory;
use crate::model::report::ReportTable;
use crate::report::format_f64_repr;
use crate::report::json::SummaryData;

pub const INDEX_PAGE: &str = "index.html";
pub const DETAILS_PAGE: &str = "sample_details.html";

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
th,td{border:1px solid #ccc;padding:4px 8px;text-align:right}\
th:first-child,td:first-child{text-align:left}\
nav a{margin-right:1em}";

const DETAIL_COLUMNS: &[&str] = &[
    "marker_lineage",
    "completeness",
    "contamination",
    "gc",
    "genome_size",
    "contigs",
    "n50_contigs",
    "coding_density",
    "predicted_genes",
];

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn page_start(out: &mut String, title: &str) {
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(title));
    let _ = writeln!(out, "<style>{}</style>", STYLE);
    out.push_str("</head>\n<body>\n<nav>");
    let _ = write!(out, "<a href=\"{INDEX_PAGE}\">QC overview</a>");
    let _ = write!(out, "<a href=\"{DETAILS_PAGE}\">Sample details</a>");
    out.push_str("</nav>\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(title));
}

fn page_end(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}

fn opt_f64(v: Option<f64>) -> String {
    v.map(format_f64_repr).unwrap_or_default()
}

pub fn render_index(summary: &SummaryData) -> String {
    let mut out = String::new();
    page_start(&mut out, "CheckM QC overview");

    let _ = writeln!(
        out,
        "<p>{} samples, {} bins. {} {}.</p>",
        summary.samples.len(),
        summary.n_bins,
        escape_html(&summary.tool),
        escape_html(&summary.version)
    );

    out.push_str("<table>\n<tr><th>sample</th><th>bins</th>");
    for category in QualityCategory::all() {
        let _ = write!(out, "<th>{}</th>", category.as_str());
    }
    out.push_str("<th>completeness median</th><th>contamination median</th></tr>\n");

    for sample in &summary.samples {
        let _ = write!(out, "<tr><td>{}</td>", escape_html(sample));
        match summary.per_sample.get(sample) {
            Some(s) => {
                let _ = write!(out, "<td>{}</td>", s.n_bins);
                for &category in QualityCategory::all() {
                    let _ = write!(out, "<td>{}</td>", s.categories.get(category));
                }
                let _ = write!(
                    out,
                    "<td>{}</td><td>{}</td>",
                    opt_f64(s.completeness_median),
                    opt_f64(s.contamination_median)
                );
            }
            None => {
                out.push_str("<td>0</td>");
                for _ in QualityCategory::all() {
                    out.push_str("<td>0</td>");
                }
                out.push_str("<td></td><td></td>");
            }
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");

    let _ = writeln!(
        out,
        "<p><a href=\"{0}\">{0}</a></p>",
        escape_html(&summary.results_table)
    );
    if let Some(archive) = &summary.plots_archive {
        let _ = writeln!(
            out,
            "<p>Plots: <a href=\"{0}\">{0}</a></p>",
            escape_html(archive)
        );
    }

    page_end(&mut out);
    out
}

pub fn render_sample_details(
    summary: &SummaryData,
    table: &ReportTable,
    categories: &[QualityCategory],
) -> String {
    let mut out = String::new();
    page_start(&mut out, "CheckM sample details");

    for sample in &summary.samples {
        let _ = writeln!(
            out,
            "<h2 id=\"{0}\">{0}</h2>",
            escape_html(sample)
        );
        out.push_str("<table>\n<tr><th>bin_id</th>");
        for col in DETAIL_COLUMNS {
            let _ = write!(out, "<th>{col}</th>");
        }
        out.push_str("<th>qc_category</th></tr>\n");

        for (row, category) in table.rows.iter().zip(categories) {
            if row.sample_id != *sample {
                continue;
            }
            let _ = write!(out, "<tr><td>{}</td>", escape_html(&row.bin_id));
            for col in DETAIL_COLUMNS {
                let cell = row.value(col).map(|v| v.render()).unwrap_or_default();
                let _ = write!(out, "<td>{}</td>", escape_html(&cell));
            }
            let _ = writeln!(out, "<td>{}</td></tr>", category.as_str());
        }
        out.push_str("</table>\n");

        if let Some(s) = summary.per_sample.get(sample) {
            if !s.plot_kinds.is_empty() {
                let _ = writeln!(
                    out,
                    "<p>Plots: {}</p>",
                    escape_html(&s.plot_kinds.join(", "))
                );
            }
        }
    }

    page_end(&mut out);
    out
}
