use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::info;

use crate::transcription::{
    record::{WordRecord, WORD_TABLE_COLUMNS},
    report::RunSummary,
};

// 語の無い場合もヘッダ行は必ず書く
pub fn write_word_table<W: Write>(writer: W, records: &[WordRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer
        .write_record(WORD_TABLE_COLUMNS)
        .context("Failed to write header")?;

    for (i, record) in records.iter().enumerate() {
        writer
            .serialize(record)
            .with_context(|| format!("Failed to write record at {}", i))?;
    }

    writer.flush().context("Failed to flush word table")?;

    Ok(())
}

pub fn save_word_table(path: &Path, records: &[WordRecord]) -> Result<()> {
    save_atomically(path, |writer| write_word_table(writer, records))?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

pub fn save_report(path: &Path, lines: &[String]) -> Result<()> {
    save_atomically(path, |writer| {
        writer.write_all(lines.join("\n").as_bytes())?;
        Ok(())
    })
}

pub fn save_summary_json(path: &Path, summary: &RunSummary<'_>) -> Result<()> {
    save_atomically(path, |writer| {
        serde_json::to_writer_pretty(writer, summary)?;
        Ok(())
    })
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

// 書き込み途中のファイルを完成品の名前で残さない
fn save_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let partial = partial_path(path);

    let result = (|| {
        let file = File::create(&partial)
            .with_context(|| format!("Failed to create {}", partial.display()))?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer
            .into_inner()
            .map_err(|e| e.into_error())
            .and_then(|file| file.sync_all())
            .with_context(|| format!("Failed to flush {}", partial.display()))?;
        fs::rename(&partial, path)
            .with_context(|| format!("Failed to move output into place: {}", path.display()))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }

    result.with_context(|| format!("Failed to write {}", path.display()))
}
