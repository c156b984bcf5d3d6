use crate::utils::error::{HubError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: String) -> HubError {
    HubError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason,
    }
}

/// 後端位址只接受 http(s) 根網址，端點路徑由各個來源自己接上
pub fn validate_backend_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(invalid(
            field_name,
            url_str,
            "the scraper backend URL is required".to_string(),
        ));
    }

    let url = Url::parse(url_str).map_err(|e| {
        invalid(
            field_name,
            url_str,
            format!("not an absolute backend URL ({}), e.g. http://localhost:8000", e),
        )
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(
                field_name,
                url_str,
                format!("the backend is reached over HTTP, not `{}`", scheme),
            ))
        }
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            url_str,
            "endpoint query strings are appended per scraper; drop `?`/`#` parts".to_string(),
        ));
    }

    Ok(())
}

/// 後端端點對筆數參數的上下限
pub fn validate_endpoint_limit(
    field_name: &str,
    value: u32,
    (min, max): (u32, u32),
    endpoint: &str,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("{} accepts {}..={}", endpoint, min, max),
        ));
    }
    Ok(())
}

pub fn validate_output_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(
            field_name,
            path,
            "leave output.path unset to print to stdout".to_string(),
        ));
    }

    if path.contains('\0') {
        return Err(invalid(
            field_name,
            path.escape_default(),
            "output path contains a NUL byte".to_string(),
        ));
    }

    Ok(())
}

/// 欄寬太窄時截斷後只剩省略號
pub fn validate_cell_width(field_name: &str, width: usize, min_width: usize) -> Result<()> {
    if width < min_width {
        return Err(invalid(
            field_name,
            width,
            format!("long cells are cut with `…`; use at least {} columns", min_width),
        ));
    }
    Ok(())
}
