//! Firmdesk Export — renders the client list as xlsx, docx or pdf
//! byte streams.
//!
//! Callers pass rows already filtered by the access policy; the
//! renderers only lay them out.

mod docx;
mod pdf;
mod xlsx;

use chrono::{DateTime, Utc};
use firmdesk_core::error::FirmError;
use firmdesk_core::models::client::Client;
use thiserror::Error;
use uuid::Uuid;

/// Column headers shared by all three renderers.
pub(crate) const HEADERS: [&str; 5] = ["ID", "Surname", "Name", "E-mail", "Registered"];

pub(crate) const TITLE: &str = "Client list";

/// Date format used in every export.
const DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("xlsx rendering failed: {0}")]
    Xlsx(String),

    #[error("docx rendering failed: {0}")]
    Docx(String),

    #[error("pdf rendering failed: {0}")]
    Pdf(String),
}

impl From<ExportError> for FirmError {
    fn from(err: ExportError) -> Self {
        FirmError::Export(err.to_string())
    }
}

/// Output format for a client-list export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Docx,
    Pdf,
}

impl ExportFormat {
    /// MIME type for the HTTP response.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.ms-excel",
            Self::Docx => "application/msword",
            Self::Pdf => "application/pdf",
        }
    }

    /// Download file name for the `Content-Disposition` header.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Xlsx => "clients.xlsx",
            Self::Docx => "clients.docx",
            Self::Pdf => "clients.pdf",
        }
    }
}

/// One export row, detached from the domain model so the renderers
/// stay independent of repository types.
#[derive(Debug, Clone)]
pub struct ClientRow {
    pub id: Uuid,
    pub surname: String,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            surname: client.surname.clone(),
            name: client.name.clone(),
            email: client.email.clone(),
            registered_at: client.registered_at,
        }
    }
}

impl ClientRow {
    pub(crate) fn registered(&self) -> String {
        self.registered_at.format(DATE_FORMAT).to_string()
    }

    /// Five cells in header order.
    pub(crate) fn cells(&self) -> [String; 5] {
        [
            self.id.to_string(),
            self.surname.clone(),
            self.name.clone(),
            self.email.clone(),
            self.registered(),
        ]
    }

    /// Single-line form used by the PDF renderer.
    pub(crate) fn line(&self) -> String {
        format!(
            "{} | {} {} | {} | {}",
            self.id,
            self.surname,
            self.name,
            self.email,
            self.registered()
        )
    }
}

/// Render `rows` in the requested format.
pub fn render(rows: &[ClientRow], format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Xlsx => xlsx::render(rows),
        ExportFormat::Docx => docx::render(rows),
        ExportFormat::Pdf => pdf::render(rows),
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;
    use chrono::TimeZone;

    fn row() -> ClientRow {
        ClientRow {
            id: Uuid::nil(),
            surname: "Иванов".into(),
            name: "Иван".into(),
            email: "ivanov@example.com".into(),
            registered_at: Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap(),
        }
    }

    fn rows(n: usize) -> Vec<ClientRow> {
        (0..n)
            .map(|i| ClientRow {
                id: Uuid::new_v4(),
                surname: format!("Фамилия{i}"),
                name: "Имя".into(),
                email: format!("client{i}@example.com"),
                registered_at: Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).unwrap(),
            })
            .collect()
    }

    /// Read one entry of an OOXML package back out as text.
    fn archive_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn date_uses_day_first_format() {
        assert_eq!(row().registered(), "07.03.2024 14:05");
    }

    #[test]
    fn line_joins_all_fields() {
        let line = row().line();
        assert!(line.contains("Иванов Иван"));
        assert!(line.contains("ivanov@example.com"));
        assert!(line.contains("07.03.2024 14:05"));
    }

    #[test]
    fn content_types_and_names() {
        assert_eq!(ExportFormat::Xlsx.content_type(), "application/vnd.ms-excel");
        assert_eq!(ExportFormat::Pdf.file_name(), "clients.pdf");
    }

    #[test]
    fn xlsx_output_is_a_zip() {
        let bytes = render(&[row()], ExportFormat::Xlsx).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn docx_output_is_a_zip() {
        let bytes = render(&[row()], ExportFormat::Docx).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn pdf_output_has_signature() {
        let bytes = render(&[row()], ExportFormat::Pdf).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    #[test]
    fn xlsx_has_one_sheet_row_per_client() {
        let bytes = render(&rows(6), ExportFormat::Xlsx).unwrap();
        let sheet = archive_entry(&bytes, "xl/worksheets/sheet1.xml");
        // header plus six data rows
        assert_eq!(sheet.matches("<row ").count(), 7);
    }

    #[test]
    fn docx_table_has_one_row_per_client() {
        let bytes = render(&rows(6), ExportFormat::Docx).unwrap();
        let document = archive_entry(&bytes, "word/document.xml");
        // header plus six data rows
        assert_eq!(document.matches("</w:tr>").count(), 7);
        assert_eq!(document.matches("@example.com").count(), 6);
    }

    #[test]
    fn empty_list_renders_in_every_format() {
        for format in [ExportFormat::Xlsx, ExportFormat::Docx, ExportFormat::Pdf] {
            let bytes = render(&[], format).unwrap();
            assert!(!bytes.is_empty());
        }
    }
}
