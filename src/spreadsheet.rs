//! Export of frequency tables as an Excel workbook.

use crate::counter::FrequencyVector;
use crate::errors::Result;
use crate::output::Output;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

fn write_header(
    sheet: &mut Worksheet,
    bold: &Format,
    keys: &[&str],
    subsamples: usize,
) -> Result<()> {
    for (col, key) in keys.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *key, bold)?;
    }
    for i in 0..subsamples {
        let col = (keys.len() + i) as u16;
        sheet.write_string_with_format(0, col, format!("subsample_{}", i + 1), bold)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_vector(
    sheet: &mut Worksheet,
    row: u32,
    first_col: usize,
    vector: &FrequencyVector,
    subsamples: usize,
) -> Result<()> {
    for (i, &x) in vector.slots().iter().take(subsamples).enumerate() {
        sheet.write_number(row, (first_col + i) as u16, x as f64)?;
    }
    Ok(())
}

/// Write wordform, lemma and part-of-speech tables to three worksheets.
///
/// Only the subsamples the corpus actually produced get a column.
pub fn write_xlsx(output: &Output, path: &Path) -> Result<()> {
    let bold = Format::new().set_bold();
    let n = output.subsamples;
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("wordforms")?;
    write_header(sheet, &bold, &["wordform", "total"], n)?;
    for (i, r) in output.wordforms.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &r.wordform)?;
        sheet.write_number(row, 1, r.total as f64)?;
        write_vector(sheet, row, 2, &r.vector, n)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("lemmas")?;
    write_header(sheet, &bold, &["lemma", "pos", "total"], n)?;
    for (i, r) in output.lemmas.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &r.lemma)?;
        sheet.write_string(row, 1, r.pos.label())?;
        sheet.write_number(row, 2, r.total as f64)?;
        write_vector(sheet, row, 3, &r.vector, n)?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("pos")?;
    write_header(sheet, &bold, &["pos", "total"], n)?;
    for (i, r) in output.pos.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, r.pos.label())?;
        sheet.write_number(row, 1, r.total as f64)?;
        write_vector(sheet, row, 2, &r.vector, n)?;
    }

    workbook.save(path)?;
    Ok(())
}
