use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::model::plots::PlotsBySample;
use crate::pipeline::stage6_report::ReportError;

/// Every `*.svg` directly inside the plot directories, per sample, sorted
/// within each directory.
pub fn collect_plot_files(plots: &PlotsBySample) -> Result<Vec<PathBuf>, ReportError> {
    let mut files = Vec::new();
    for (_, kinds) in plots.iter() {
        for (_, dir) in kinds.iter() {
            if !dir.is_dir() {
                tracing::warn!("plot directory {} does not exist", dir.display());
                continue;
            }
            let mut svgs = Vec::new();
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "svg") {
                    svgs.push(path);
                }
            }
            svgs.sort();
            files.extend(svgs);
        }
    }
    Ok(files)
}

/// Deepest directory containing every file.
pub fn common_dir(files: &[PathBuf]) -> PathBuf {
    let mut iter = files.iter().filter_map(|f| f.parent());
    let Some(first) = iter.next() else {
        return PathBuf::new();
    };
    let mut common: Vec<_> = first.components().collect();
    for dir in iter {
        let shared = common
            .iter()
            .zip(dir.components())
            .take_while(|(a, b)| **a == *b)
            .count();
        common.truncate(shared);
    }
    common.iter().collect()
}

/// Archives all plot SVGs with names relative to their common directory.
/// Returns `Ok(None)` without touching disk when there is nothing to pack.
pub fn write_plots_zip(plots: &PlotsBySample, zip_path: &Path) -> Result<Option<usize>, ReportError> {
    let files = collect_plot_files(plots)?;
    if files.is_empty() {
        tracing::warn!("no plot files found; skipping {}", zip_path.display());
        return Ok(None);
    }
    let root = common_dir(&files);

    let mut tmp_name = zip_path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let file = File::create(&tmp_path)?;
    let mut zip = ZipWriter::new(file);
    let result = write_zip_entries(&mut zip, &files, &root);

    match result.and_then(|_| zip.finish().map(|_| ()).map_err(ReportError::from)) {
        Ok(()) => {
            fs::rename(&tmp_path, zip_path)?;
            Ok(Some(files.len()))
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

fn write_zip_entries(zip: &mut ZipWriter<File>, files: &[PathBuf], root: &Path) -> Result<(), ReportError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for src in files {
        let rel = src.strip_prefix(root).unwrap_or(src);
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        add_file(zip, src, &name, options)?;
    }
    Ok(())
}

fn add_file(
    zip: &mut ZipWriter<File>,
    src_path: &Path,
    zip_path: &str,
    options: SimpleFileOptions,
) -> Result<(), ReportError> {
    let mut file = File::open(src_path)?;
    zip.start_file(zip_path, options)?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        zip.write_all(&buf[..n])?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/zip.rs"]
mod tests;
