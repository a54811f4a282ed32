/// Strip zero-width characters and collapse whitespace. Case is preserved so course codes
/// such as "DCODE" stay recognisable.
pub(crate) fn normalize_course_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
