use url::Url;

use crate::{Error, Result};

/// Checks that `id` is an absolute URI and, if `https_required`, that its
/// scheme is `https`. Returns the identifier unchanged.
///
/// # Errors
/// - [`Error::InvalidIdentifier`] if either check fails.
///
/// # Example
/// ```
/// use noid_minter::check_id;
///
/// assert!(check_id("https://example.org/iiif/book1", true).is_ok());
/// assert!(check_id("http://example.org/iiif/book1", true).is_err());
/// assert!(check_id("book1", false).is_err());
/// ```
pub fn check_id(id: &str, https_required: bool) -> Result<String> {
    let url = Url::parse(id).map_err(|e| invalid(id, e.to_string()))?;

    if https_required && url.scheme() != "https" {
        return Err(invalid(id, format!("scheme `{}` is not https", url.scheme())));
    }

    Ok(id.to_owned())
}

#[cold]
#[inline(never)]
fn invalid(id: &str, reason: String) -> Error {
    Error::InvalidIdentifier {
        id: id.to_owned(),
        reason,
    }
}
