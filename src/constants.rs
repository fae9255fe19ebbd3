/// Provider name constants to ensure consistency across the codebase.
/// These match the provider prefix used in record ids (`provider:slug`).

pub const IMPROWIKI_PROVIDER: &str = "improwiki";
pub const ENCYCLOPEDIA_PROVIDER: &str = "encyclopedia";

// Content-root selectors for each provider's page layout. The scrape stage
// usually stores the content column directly, in which case the selector
// simply won't match and the fragment root is used instead.
pub const IMPROWIKI_CONTENT_ROOT: &str = "div.entry-content";
pub const ENCYCLOPEDIA_CONTENT_ROOT: &str = "div.main-content";
