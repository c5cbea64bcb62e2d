use crate::utils::error::{Result, SeriesError};
use std::collections::HashSet;
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> SeriesError {
    SeriesError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 只接受 http / https 端點
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    match path {
        "" => Err(invalid(field_name, path, "Path cannot be empty")),
        p if p.contains('\0') => Err(invalid(field_name, path, "Path contains null bytes")),
        _ => Ok(()),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(field_name, value, format!("Value must be at least {}", min_value)));
    }
    Ok(())
}

/// 每個檔案的副檔名都必須在 allowed_extensions 之中
pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed: HashSet<&str> = allowed_extensions.iter().copied().collect();

    let bad_file = files.iter().find(|file| {
        Path::new(file.as_str())
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(true, |ext| !allowed.contains(ext))
    });

    match bad_file {
        Some(file) => Err(invalid(
            field_name,
            file,
            format!("Expected one of these extensions: {}", allowed_extensions.join(", ")),
        )),
        None => Ok(()),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(SeriesError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// 檢查字串不重複，例如各 list 的 url_slug
pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    match values.into_iter().find(|value| !seen.insert(*value)) {
        Some(duplicate) => Err(invalid(field_name, duplicate, "Value must be unique")),
        None => Ok(()),
    }
}
