//! PDF rendering via `printpdf`.
//!
//! Layout is manual: a title line at a fixed top margin, then one text
//! line per client stepping down a fixed line height. When the cursor
//! passes the bottom margin a new page is started with a "continued"
//! title.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::{ClientRow, ExportError, TITLE};

const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const LEFT_MARGIN_MM: f64 = 10.0;
const TITLE_Y_MM: f64 = 282.0;
const FIRST_LINE_Y_MM: f64 = 272.0;
const LINE_STEP_MM: f64 = 7.0;
const BOTTOM_MARGIN_MM: f64 = 18.0;
const TITLE_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 10.0;

pub(crate) fn render(rows: &[ClientRow]) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let mut current = doc.get_page(page).get_layer(layer);
    current.use_text(TITLE, TITLE_SIZE, Mm(35.0), Mm(TITLE_Y_MM), &font);

    let mut y = FIRST_LINE_Y_MM;
    for row in rows {
        if y < BOTTOM_MARGIN_MM {
            let (next_page, next_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            current = doc.get_page(next_page).get_layer(next_layer);
            current.use_text(
                format!("{TITLE} (continued)"),
                TITLE_SIZE,
                Mm(35.0),
                Mm(TITLE_Y_MM),
                &font,
            );
            y = FIRST_LINE_Y_MM;
        }
        current.use_text(row.line(), BODY_SIZE, Mm(LEFT_MARGIN_MM), Mm(y), &font);
        y -= LINE_STEP_MM;
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn rows(n: usize) -> Vec<ClientRow> {
        (0..n)
            .map(|i| ClientRow {
                id: Uuid::new_v4(),
                surname: format!("Фамилия{i}"),
                name: "Имя".into(),
                email: format!("client{i}@example.com"),
                registered_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            })
            .collect()
    }

    /// Every page object carries its own /MediaBox.
    fn page_count(bytes: &[u8]) -> usize {
        String::from_utf8_lossy(bytes).matches("/MediaBox").count()
    }

    #[test]
    fn a_page_holds_thirty_seven_lines() {
        // y runs 272, 265, ... and breaks below 18: 37 lines per page.
        assert_eq!(page_count(&render(&rows(37)).unwrap()), 1);
        assert_eq!(page_count(&render(&rows(38)).unwrap()), 2);
    }

    #[test]
    fn long_list_paginates() {
        assert_eq!(page_count(&render(&rows(80)).unwrap()), 3);
    }
}
