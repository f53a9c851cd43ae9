//! Word-document rendering via `docx-rs`.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

use crate::{ClientRow, ExportError, HEADERS, TITLE};

fn cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
}

pub(crate) fn render(rows: &[ClientRow]) -> Result<Vec<u8>, ExportError> {
    let header_row = TableRow::new(HEADERS.iter().map(|h| cell(h)).collect());

    let mut table_rows = vec![header_row];
    for row in rows {
        table_rows.push(TableRow::new(row.cells().iter().map(|c| cell(c)).collect()));
    }

    let doc = Docx::new()
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(TITLE).bold().size(28)),
        )
        .add_table(Table::new(table_rows));

    let mut buffer = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(buffer.into_inner())
}
