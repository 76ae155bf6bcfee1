use std::borrow::Cow;

/// Keeps multi-line error text (e.g. API bodies) on one line in the log file
pub fn make_single_line(s: &str) -> Cow<'_, str> {
    if s.contains('\n') {
        Cow::Owned(s.replace("\r\n", "↵").replace('\n', "↵"))
    } else {
        Cow::Borrowed(s)
    }
}
