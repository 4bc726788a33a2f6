//! Path template interpolation.
//!
//! Templates name path segments with colon tokens, e.g. the default
//! `:attachment/:id/:style/:basename.:extension`. Interpolation is pure
//! string work and never touches the network.

use crate::model::{AttachmentInfo, Style};

/// Template applied when the configuration does not supply one.
pub const DEFAULT_PATH_TEMPLATE: &str = ":attachment/:id/:style/:basename.:extension";

/// A parsed-once path template.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    template: String,
}

impl PathTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Interpolate the template against an (attachment, style) pair.
    ///
    /// Known tokens: `:attachment`, `:id`, `:style`, `:basename`,
    /// `:extension`, `:filename`. Unknown tokens are left verbatim.
    /// A trailing dot left by an empty `:extension` is dropped.
    pub fn interpolate(&self, attachment: &AttachmentInfo, style: &Style) -> String {
        // Longest token names first so shared prefixes cannot mis-substitute.
        let path = self
            .template
            .replace(":attachment", &pluralize(&attachment.name.to_lowercase()))
            .replace(":extension", attachment.extension().unwrap_or(""))
            .replace(":basename", attachment.basename().unwrap_or(""))
            .replace(":filename", attachment.filename.as_deref().unwrap_or(""))
            .replace(":style", style.as_str())
            .replace(":id", &attachment.id.to_string());

        path.trim_end_matches('.').to_string()
    }
}

impl Default for PathTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_TEMPLATE)
    }
}

fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        name.to_string()
    } else {
        format!("{}s", name)
    }
}
