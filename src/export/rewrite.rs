//! Rewriting of site-absolute URL prefixes into local file:// URLs.
//!
//! The deployed site serves pages under a URL prefix (e.g. `/me/`), so the
//! generated HTML references assets as `/me/assets/...`. Those paths only
//! resolve behind the live web server; before handing the document to the
//! renderer, every quoted occurrence of the prefix is rewritten to an
//! absolute `file://` URL under the base directory.

use std::path::Path;

/// Replace quoted occurrences of `prefix` with `file://<base>/`.
///
/// Both quote styles are handled and preserved so attribute values stay
/// intact; unquoted occurrences are left alone to avoid mangling text
/// content.
pub fn rewrite_url_prefix(html: &str, prefix: &str, base: &Path) -> String {
    let base = base.display();
    let html = html.replace(
        &format!("\"{prefix}"),
        &format!("\"file://{base}/"),
    );
    html.replace(&format!("'{prefix}"), &format!("'file://{base}/"))
}
