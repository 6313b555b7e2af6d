/// Local validation applied before a mutation is issued.
pub trait RequiredFields {
    /// Labels of required fields that are empty or whitespace.
    fn missing_fields(&self) -> Vec<&'static str>;

    fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

pub(crate) fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn collect_missing(
    checks: &[(&'static str, bool)],
) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|(_, missing)| *missing)
        .map(|(label, _)| *label)
        .collect()
}
