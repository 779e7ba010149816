use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// What a section renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Charts,
    WaterQuality,
    Machines,
}

impl SectionKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "charts" => Some(SectionKind::Charts),
            "water-quality" => Some(SectionKind::WaterQuality),
            "machines" => Some(SectionKind::Machines),
            _ => None,
        }
    }

    fn for_builtin_id(id: &str) -> Option<Self> {
        match id {
            "dashboard" => Some(SectionKind::Charts),
            "water-quality" => Some(SectionKind::WaterQuality),
            "vending-machines" => Some(SectionKind::Machines),
            _ => None,
        }
    }

    /// Kinds whose markup carries fixed element ids and may appear only once.
    fn is_unique(self) -> bool {
        matches!(self, SectionKind::Charts | SectionKind::Machines)
    }
}

/// A configured section, written `id:kind` (`overview:charts`).
///
/// The built-in ids `dashboard`, `water-quality` and `vending-machines` may
/// omit the kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct SectionSpec {
    pub id: String,
    pub kind: SectionKind,
}

impl SectionSpec {
    pub fn new(id: impl Into<String>, kind: SectionKind) -> Self {
        SectionSpec {
            id: id.into(),
            kind,
        }
    }
}

impl FromStr for SectionSpec {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let (id, kind) = match raw.split_once(':') {
            Some((id, kind)) => {
                let kind = SectionKind::parse(kind.trim()).ok_or_else(|| {
                    format!("Unknown kind '{kind}' for section '{id}' (expected charts, water-quality or machines)")
                })?;
                (id.trim(), kind)
            }
            None => {
                let kind = SectionKind::for_builtin_id(raw)
                    .ok_or_else(|| format!("Section '{raw}' needs a kind, e.g. '{raw}:charts'"))?;
                (raw, kind)
            }
        };
        if id.is_empty() {
            return Err(format!("Section '{raw}' has an empty id"));
        }
        Ok(SectionSpec::new(id, kind))
    }
}

impl TryFrom<String> for SectionSpec {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

pub fn default_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec::new("dashboard", SectionKind::Charts),
        SectionSpec::new("water-quality", SectionKind::WaterQuality),
        SectionSpec::new("vending-machines", SectionKind::Machines),
    ]
}

/// Section ids must be unique, and the chart and machine sections may appear once each.
pub fn check_sections(sections: &[SectionSpec]) -> Result<(), String> {
    if sections.is_empty() {
        return Err("At least one section is required".to_string());
    }
    let mut ids = HashSet::new();
    let mut kinds = HashSet::new();
    for section in sections {
        if !ids.insert(section.id.as_str()) {
            return Err(format!("Duplicate section id '{}'", section.id));
        }
        if section.kind.is_unique() && !kinds.insert(section.kind) {
            return Err(format!(
                "Only one {:?} section is allowed ('{}' is a second one)",
                section.kind, section.id
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub id: String,
    pub kind: SectionKind,
    pub title: String,
    pub visible: bool,
}

/// Tracks the single visible content section of the page.
#[derive(Debug, Clone)]
pub struct SectionNavigator {
    sections: Vec<SectionSpec>,
    active: String,
}

impl SectionNavigator {
    pub fn new(sections: Vec<SectionSpec>) -> Self {
        let active = sections
            .first()
            .map(|section| section.id.clone())
            .unwrap_or_default();
        SectionNavigator { sections, active }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn is_visible(&self, section_id: &str) -> bool {
        self.active == section_id
    }

    /// Any id is accepted. An id that matches no section leaves every section hidden.
    pub fn navigate(&mut self, section_id: &str) -> String {
        if self.active != section_id {
            self.active = section_id.to_string();
        }
        header_title(&self.active)
    }

    pub fn header_title(&self) -> String {
        header_title(&self.active)
    }

    pub fn sections(&self) -> Vec<SectionView> {
        self.sections
            .iter()
            .map(|section| SectionView {
                id: section.id.clone(),
                kind: section.kind,
                title: header_title(&section.id),
                visible: self.is_visible(&section.id),
            })
            .collect()
    }
}

/// `vending-machines` becomes `Vending machines`.
pub fn header_title(section_id: &str) -> String {
    let spaced = section_id.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator() -> SectionNavigator {
        SectionNavigator::new(default_sections())
    }

    #[test]
    fn test_header_title() {
        assert_eq!(header_title("vending-machines"), "Vending machines");
        assert_eq!(header_title("water-quality-log"), "Water quality log");
        assert_eq!(header_title("dashboard"), "Dashboard");
        assert_eq!(header_title(""), "");
    }

    #[test]
    fn test_first_section_visible_initially() {
        let nav = navigator();
        assert_eq!(nav.active(), "dashboard");
        assert_eq!(nav.header_title(), "Dashboard");
    }

    #[test]
    fn test_navigate_shows_only_target() {
        let mut nav = navigator();
        let title = nav.navigate("water-quality");
        assert_eq!(title, "Water quality");

        let visible: Vec<String> = nav
            .sections()
            .into_iter()
            .filter(|s| s.visible)
            .map(|s| s.id)
            .collect();
        assert_eq!(visible, vec!["water-quality"]);
    }

    #[test]
    fn test_navigate_to_active_section_is_noop() {
        let mut nav = navigator();
        nav.navigate("dashboard");
        assert_eq!(nav.active(), "dashboard");
    }

    #[test]
    fn test_unknown_section_hides_everything() {
        let mut nav = navigator();
        assert_eq!(nav.navigate("reports"), "Reports");
        assert!(nav.sections().iter().all(|s| !s.visible));
    }

    #[test]
    fn test_section_spec_parsing() {
        assert_eq!(
            "overview:charts".parse::<SectionSpec>().unwrap(),
            SectionSpec::new("overview", SectionKind::Charts)
        );
        assert_eq!(
            " mesin : machines ".parse::<SectionSpec>().unwrap(),
            SectionSpec::new("mesin", SectionKind::Machines)
        );
        assert_eq!(
            "vending-machines".parse::<SectionSpec>().unwrap().kind,
            SectionKind::Machines
        );
        assert!("overview".parse::<SectionSpec>().is_err());
        assert!("overview:table".parse::<SectionSpec>().is_err());
        assert!(":charts".parse::<SectionSpec>().is_err());
    }

    #[test]
    fn test_check_sections_rejects_duplicates() {
        assert!(check_sections(&default_sections()).is_ok());
        assert!(check_sections(&[]).is_err());

        let twice_charts = vec![
            SectionSpec::new("a", SectionKind::Charts),
            SectionSpec::new("b", SectionKind::Charts),
        ];
        assert!(check_sections(&twice_charts).is_err());

        let same_id = vec![
            SectionSpec::new("a", SectionKind::WaterQuality),
            SectionSpec::new("a", SectionKind::Machines),
        ];
        assert!(check_sections(&same_id).unwrap_err().contains("Duplicate"));

        let two_notes = vec![
            SectionSpec::new("a", SectionKind::WaterQuality),
            SectionSpec::new("b", SectionKind::WaterQuality),
        ];
        assert!(check_sections(&two_notes).is_ok());
    }
}
