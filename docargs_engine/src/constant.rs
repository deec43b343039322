pub(crate) const HELP_SHORT: &str = "-h";
pub(crate) const HELP_LONG: &str = "--help";
pub(crate) const VERSION_LONG: &str = "--version";

pub(crate) const USAGE_SECTION: &str = "usage:";
pub(crate) const OPTIONS_SECTION: &str = "options:";

// Usage grammar vocabulary.
pub(crate) const OPTIONS_SHORTCUT: &str = "options";
pub(crate) const END_OF_OPTIONS: &str = "--";
pub(crate) const ELLIPSIS: &str = "...";
pub(crate) const ALTERNATIVE: &str = "|";
pub(crate) const OPEN_REQUIRED: &str = "(";
pub(crate) const CLOSE_REQUIRED: &str = ")";
pub(crate) const OPEN_OPTIONAL: &str = "[";
pub(crate) const CLOSE_OPTIONAL: &str = "]";
