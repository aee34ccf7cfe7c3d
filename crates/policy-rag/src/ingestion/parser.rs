//! Multi-format text extraction

use crate::error::{Error, Result};
use crate::types::FileType;

/// Converts an uploaded file into plain text.
///
/// Implementations must fail with [`Error::UnsupportedFileType`] for
/// extensions they do not recognize.
pub trait TextExtractor: Send + Sync {
    /// Extract plain text from a raw file
    fn extract(&self, data: &[u8], filename: &str) -> Result<String>;
}

/// Signature of OLE compound files (Outlook `.msg`, legacy Office)
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Parsed document with extracted text
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// File type
    pub file_type: FileType,
    /// Extracted text content
    pub content: String,
}

impl ParsedDocument {
    fn new(file_type: FileType, content: String) -> Self {
        Self { file_type, content }
    }
}

/// File parser dispatching on the filename extension (PDF, DOCX, EML/MSG)
#[derive(Debug, Default, Clone, Copy)]
pub struct FileParser;

impl FileParser {
    /// Parse a file based on its extension
    pub fn parse(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let file_type = FileType::from_filename(filename);

        match file_type {
            FileType::Pdf => Self::parse_pdf(filename, data),
            FileType::Docx => Self::parse_docx(filename, data),
            FileType::Email => Self::parse_email(filename, data),
            FileType::Unknown => {
                let extension = std::path::Path::new(filename)
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_lowercase();
                Err(Error::UnsupportedFileType(if extension.is_empty() {
                    format!("'{}' has no extension", filename)
                } else {
                    format!(".{} ({})", extension, filename)
                }))
            }
        }
    }

    /// Parse PDF document
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let content = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        Ok(ParsedDocument::new(FileType::Pdf, content))
    }

    /// Parse DOCX document, one line per paragraph
    fn parse_docx(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let mut content = String::new();

        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                content.push_str(&t.text);
                            }
                        }
                    }
                }
                content.push('\n');
            }
        }

        Ok(ParsedDocument::new(FileType::Docx, content))
    }

    /// Parse a MIME mail message: subject line followed by every text body
    fn parse_email(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        if data.starts_with(&OLE_MAGIC) {
            return Err(Error::file_parse(
                filename,
                "Outlook OLE message containers are not supported; export as .eml",
            ));
        }

        let message = mail_parser::MessageParser::default()
            .parse(data)
            .ok_or_else(|| Error::file_parse(filename, "not a parseable mail message"))?;

        let mut content = String::new();

        if let Some(subject) = message.subject() {
            content.push_str(subject);
            content.push('\n');
        }

        let mut pos = 0;
        while let Some(body) = message.body_text(pos) {
            content.push_str(&body);
            content.push('\n');
            pos += 1;
        }

        if content.trim().is_empty() {
            return Err(Error::file_parse(
                filename,
                "mail message has no subject and no text body",
            ));
        }

        Ok(ParsedDocument::new(FileType::Email, content))
    }
}

impl TextExtractor for FileParser {
    fn extract(&self, data: &[u8], filename: &str) -> Result<String> {
        Self::parse(filename, data).map(|parsed| parsed.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let err = FileParser::parse("notes.txt", b"plain text").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));

        let err = FileParser.extract(b"data", "no_extension").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }

    #[test]
    fn test_parse_email() {
        let raw = b"From: claims@example.com\r\n\
To: desk@example.com\r\n\
Subject: Claim for knee surgery\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
Policy holder requests reimbursement of 5000 for knee surgery.\r\n";

        let parsed = FileParser::parse("claim.eml", raw).unwrap();
        assert_eq!(parsed.file_type, FileType::Email);
        assert!(parsed.content.starts_with("Claim for knee surgery\n"));
        assert!(parsed.content.contains("reimbursement of 5000"));
    }

    #[test]
    fn test_ole_msg_container_is_parse_error() {
        let mut raw = OLE_MAGIC.to_vec();
        raw.extend_from_slice(&[0u8; 504]);
        raw.extend_from_slice(b"__substg1.0_0037001F knee surgery");

        let err = FileParser::parse("claim.msg", &raw).unwrap_err();
        assert!(matches!(err, Error::FileParse { .. }));
    }

    #[test]
    fn test_mail_without_text_is_parse_error() {
        let raw = b"From: claims@example.com\r\n\
To: desk@example.com\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n";

        let err = FileParser.extract(raw, "empty.eml").unwrap_err();
        assert!(matches!(err, Error::FileParse { .. }));
    }

    #[test]
    fn test_corrupt_pdf_is_parse_error() {
        let err = FileParser::parse("policy.pdf", b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, Error::FileParse { .. }));
    }
}
