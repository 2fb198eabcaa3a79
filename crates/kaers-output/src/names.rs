//! Worksheet name allocation.

use std::collections::BTreeSet;

/// XLSX worksheet names are capped at 31 characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Allocates unique worksheet names within one workbook.
///
/// Names are truncated to the format limit; a collision gets a numeric
/// suffix, truncating the base further so the suffixed name still fits.
#[derive(Debug, Default)]
pub struct SheetNamer {
    used: BTreeSet<String>,
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, raw: &str) -> String {
        let base = truncate(raw, MAX_SHEET_NAME_LEN);
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut counter = 1usize;
        loop {
            let suffix = format!("_{counter}");
            let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.len());
            let candidate = format!("{}{suffix}", truncate(raw, room));
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

fn truncate(name: &str, max_len: usize) -> String {
    name.chars().take(max_len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_pass_through() {
        let mut namer = SheetNamer::new();
        assert_eq!(namer.allocate("DEMO"), "DEMO");
        assert_eq!(namer.allocate("EVENT"), "EVENT");
    }

    #[test]
    fn long_names_truncate_to_limit() {
        let mut namer = SheetNamer::new();
        let long = "A".repeat(40);
        assert_eq!(namer.allocate(&long), "A".repeat(31));
    }

    #[test]
    fn collisions_get_numeric_suffixes() {
        let mut namer = SheetNamer::new();
        assert_eq!(namer.allocate("DEMO"), "DEMO");
        assert_eq!(namer.allocate("DEMO"), "DEMO_1");
        assert_eq!(namer.allocate("DEMO"), "DEMO_2");
    }

    #[test]
    fn suffixed_long_names_still_fit() {
        let mut namer = SheetNamer::new();
        let long = "B".repeat(40);
        assert_eq!(namer.allocate(&long).len(), 31);
        let second = namer.allocate(&long);
        assert_eq!(second.len(), 31);
        assert!(second.ends_with("_1"));
    }
}
