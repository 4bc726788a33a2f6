//! WebDAV collection creation (the `mkdir -p` of the protocol).

use once_cell::sync::Lazy;
use reqwest::Method;
use tracing::debug;

use crate::connection::Connection;
use crate::error::{WebdavError, WebdavResult};

static MKCOL: Lazy<Method> =
    Lazy::new(|| Method::from_bytes(b"MKCOL").expect("MKCOL is a valid method name"));

/// Issue MKCOL for every prefix of `relative_dir`, in order.
///
/// 2xx and 3xx responses continue the walk; servers differ in how they report
/// an existing collection and some answer with a redirect. Any other status
/// is fatal and aborts without issuing the remaining segments' requests.
pub async fn ensure_collection_path(
    connection: &Connection,
    relative_dir: &str,
) -> WebdavResult<()> {
    let mut prefix = String::new();
    for segment in relative_dir.split('/').filter(|s| !s.is_empty()) {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);

        let server_path = connection.endpoint().server_path(&prefix);
        debug!(path = %server_path, "MKCOL");
        let request = connection.request(MKCOL.clone(), &server_path)?;
        let response = connection.execute(request).await?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(WebdavError::CollectionCreate {
                path: prefix,
                status: status.as_u16(),
            });
        }
    }
    Ok(())
}
