//! XML Encoding Detection and Conversion
//!
//! Handles detection of UTF-16 based on BOM or byte patterns.
//! Documents must reach the reader as `str`; UTF-16 input is converted,
//! UTF-8 input is borrowed as-is (a UTF-8 BOM stays part of the prolog).

use std::borrow::Cow;

/// Detect the encoding of XML input based on BOM or byte patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl XmlEncoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        if input.len() < 2 {
            return XmlEncoding::Utf8;
        }

        match (input[0], input[1]) {
            // UTF-16 LE BOM: 0xFF 0xFE
            (0xFF, 0xFE) => XmlEncoding::Utf16Le,
            // UTF-16 BE BOM: 0xFE 0xFF
            (0xFE, 0xFF) => XmlEncoding::Utf16Be,
            // No BOM - check for UTF-16 pattern (< followed by null or null followed by <)
            (0x00, b'<') => XmlEncoding::Utf16Be,
            (b'<', 0x00) => XmlEncoding::Utf16Le,
            _ => XmlEncoding::Utf8,
        }
    }
}

/// Decode document bytes into text for the reader
pub fn decode_document(input: &[u8]) -> Result<Cow<'_, str>, &'static str> {
    match XmlEncoding::detect(input) {
        XmlEncoding::Utf8 => std::str::from_utf8(input)
            .map(Cow::Borrowed)
            .map_err(|_| "Invalid UTF-8 input"),
        XmlEncoding::Utf16Le => decode_utf16(input, &[0xFF, 0xFE], u16::from_le_bytes)
            .ok_or("Invalid UTF-16 LE input")
            .map(Cow::Owned),
        XmlEncoding::Utf16Be => decode_utf16(input, &[0xFE, 0xFF], u16::from_be_bytes)
            .ok_or("Invalid UTF-16 BE input")
            .map(Cow::Owned),
    }
}

/// Decode UTF-16 code units, skipping the BOM if present
fn decode_utf16(input: &[u8], bom: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    let bytes = input.strip_prefix(bom).unwrap_or(input);

    // Ensure even number of bytes
    if bytes.len() % 2 != 0 {
        return None;
    }

    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| unit([chunk[0], chunk[1]]))
        .collect();

    String::from_utf16(&code_units).ok()
}
