/// Strip `label` from the start of `text`, returning the untrimmed remainder.
///
/// Case-insensitive comparison folds each char pair separately, so the
/// remainder always starts right after the label's last char in `text`.
pub(super) fn strip_label<'a>(text: &'a str, label: &str, case_sensitive: bool) -> Option<&'a str> {
    if case_sensitive {
        return text.strip_prefix(label);
    }
    let mut chars = text.char_indices();
    for expected in label.chars() {
        let (_, actual) = chars.next()?;
        if actual != expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    let end = chars.next().map(|(idx, _)| idx).unwrap_or(text.len());
    Some(&text[end..])
}

/// Value following `label` in the shortest text that starts with it.
///
/// Shortest wins so a leaf like `<li>Voltage: 7.4V</li>` beats every
/// ancestor whose text merely starts the same way; ties keep document order.
pub(super) fn shortest_match(texts: &[String], label: &str, case_sensitive: bool) -> Option<String> {
    texts
        .iter()
        .filter_map(|text| strip_label(text, label, case_sensitive).map(|rest| (text, rest)))
        .min_by_key(|(text, _)| text.chars().count())
        .map(|(_, rest)| rest.trim().to_string())
}
