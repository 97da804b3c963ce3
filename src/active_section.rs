/// A page section as seen by the scroll tracker.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self {
            id: id.into(),
            top,
        }
    }
}

/// Index of the last section, in document order, whose `top - offset`
/// threshold the scroll position has reached.
pub fn current_section(scroll_y: f64, sections: &[SectionBounds], offset: f64) -> Option<usize> {
    sections
        .iter()
        .enumerate()
        .filter(|(_, section)| scroll_y >= section.top - offset)
        .map(|(index, _)| index)
        .last()
}

/// Whether a nav link's `href` points at the section with `id`.
pub fn link_targets_section(href: Option<&str>, id: &str) -> bool {
    href.and_then(|href| href.strip_prefix('#'))
        .is_some_and(|fragment| fragment == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSET: f64 = 120.0;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("about", 0.0),
            SectionBounds::new("projects", 800.0),
            SectionBounds::new("contact", 1600.0),
        ]
    }

    #[test]
    fn next_section_becomes_current_at_threshold() {
        let sections = page();
        assert_eq!(current_section(679.0, &sections, OFFSET), Some(0));
        assert_eq!(current_section(680.0, &sections, OFFSET), Some(1));
        assert_eq!(current_section(700.0, &sections, OFFSET), Some(1));
        assert_eq!(current_section(1479.0, &sections, OFFSET), Some(1));
        assert_eq!(current_section(5000.0, &sections, OFFSET), Some(2));
    }

    #[test]
    fn nothing_is_current_above_the_first_threshold() {
        let sections = vec![SectionBounds::new("intro", 400.0)];
        assert_eq!(current_section(0.0, &sections, OFFSET), None);
        assert_eq!(current_section(280.0, &sections, OFFSET), Some(0));
    }

    #[test]
    fn a_page_without_sections_highlights_nothing() {
        assert_eq!(current_section(300.0, &[], OFFSET), None);
    }

    #[test]
    fn later_section_wins_even_when_out_of_order() {
        let sections = vec![
            SectionBounds::new("low", 900.0),
            SectionBounds::new("high", 100.0),
        ];
        assert_eq!(current_section(1000.0, &sections, OFFSET), Some(1));
    }

    #[test]
    fn links_match_on_exact_fragment() {
        assert!(link_targets_section(Some("#about"), "about"));
        assert!(!link_targets_section(Some("#about-me"), "about"));
        assert!(!link_targets_section(Some("/about"), "about"));
        assert!(!link_targets_section(None, "about"));
    }
}
