//! Spreadsheet rendering via `rust_xlsxwriter`.

use rust_xlsxwriter::{Format, Workbook};

use crate::{ClientRow, ExportError, HEADERS};

pub(crate) fn render(rows: &[ClientRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Clients")
        .map_err(|e| ExportError::Xlsx(e.to_string()))?;

    let bold = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| ExportError::Xlsx(e.to_string()))?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate() {
            worksheet
                .write_string(r, col as u16, cell)
                .map_err(|e| ExportError::Xlsx(e.to_string()))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ExportError::Xlsx(e.to_string()))
}
