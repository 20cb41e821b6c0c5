use warden_core::{AppError, AppResult, NonEmptyString};

/// Validates requested names and drops repeats, keeping first-seen order.
pub(super) fn requested_names(names: Vec<String>) -> AppResult<Vec<String>> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = String::from(NonEmptyString::new(name)?);
        if !unique.contains(&name) {
            unique.push(name);
        }
    }

    Ok(unique)
}

/// Fails with a not-found error unless every requested name was resolved.
pub(super) fn ensure_all_resolved<'a>(
    kind: &str,
    requested: &[String],
    resolved: impl IntoIterator<Item = &'a str>,
) -> AppResult<()> {
    let resolved: Vec<&str> = resolved.into_iter().collect();
    if resolved.len() == requested.len() {
        return Ok(());
    }

    let missing: Vec<&str> = requested
        .iter()
        .map(String::as_str)
        .filter(|name| !resolved.contains(name))
        .collect();

    Err(AppError::NotFound(format!(
        "{kind} [{}] not found (missing: {})",
        requested.join(", "),
        missing.join(", ")
    )))
}
