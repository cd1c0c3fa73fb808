pub mod assignments;
pub mod browse;
pub mod catalog;
pub mod export;
pub mod search;

use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};

use crate::error::{ApiError, Result};

pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Spreadsheet download response.
pub(crate) fn xlsx_response(filename: &str, bytes: Vec<u8>) -> Result<Response> {
    let disposition = HeaderValue::from_str(&content_disposition(filename))
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback name and the UTF-8 name
/// percent-encoded (RFC 6266).
pub(crate) fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || "._-".contains(c) { c } else { '_' })
        .collect();
    let encoded: String = filename
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b"._-~".contains(&b) {
                (b as char).to_string()
            } else {
                format!("%{:02X}", b)
            }
        })
        .collect();
    format!("attachment; filename=\"{}\"; filename*=UTF-8''{}", fallback, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_ascii() {
        assert_eq!(
            content_disposition("standardy_Matematika_c3.xlsx"),
            "attachment; filename=\"standardy_Matematika_c3.xlsx\"; filename*=UTF-8''standardy_Matematika_c3.xlsx"
        );
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        let value = content_disposition("standardy_Človek a príroda_c3.xlsx");
        assert!(value.starts_with("attachment; filename=\"standardy__lovek_a_pr_roda_c3.xlsx\""));
        assert!(value.ends_with("filename*=UTF-8''standardy_%C4%8Clovek%20a%20pr%C3%ADroda_c3.xlsx"));
        assert!(HeaderValue::from_str(&value).is_ok());
    }
}
