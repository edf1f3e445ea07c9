//! Built-in book layouts
//!
//! The two binders planbook was written for. Both expect their images under
//! `images/` relative to the asset root.

use crate::config::{BookConfig, PageSettings, PartConfig, SectionConfig};

const COVER: &str = "images/projectnotes_1.jpg";

/// A built-in book configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Tabletop campaign binder
    Campaign,
    /// One index of projects, each with notes, to-do and people pages
    ProjectNotes,
}

impl Preset {
    /// All presets
    pub const ALL: [Preset; 2] = [Preset::Campaign, Preset::ProjectNotes];

    /// Preset name as used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Preset::Campaign => "campaign",
            Preset::ProjectNotes => "project-notes",
        }
    }

    /// Look a preset up by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// The preset's configuration
    pub fn config(self) -> BookConfig {
        match self {
            Preset::Campaign => campaign(),
            Preset::ProjectNotes => project_notes(),
        }
    }
}

fn section(title: &str, icon: &str, pages: u32, background: &str, has_index: bool) -> SectionConfig {
    SectionConfig {
        title: title.to_string(),
        icon: format!("images/icons/{}", icon),
        pages,
        background: background.to_string(),
        has_index,
        items: None,
        parts: Vec::new(),
    }
}

fn part(title: &str, icon: &str, pages: u32, background: &str) -> PartConfig {
    PartConfig {
        title: title.to_string(),
        icon: format!("images/icons/{}", icon),
        pages,
        background: background.to_string(),
    }
}

fn campaign() -> BookConfig {
    BookConfig {
        title: "DND Campaign".to_string(),
        output: Some("DND Campaign.pdf".to_string()),
        cover: Some(COVER.to_string()),
        fonts: Vec::new(),
        page: PageSettings::default(),
        sections: vec![
            section("Story", "story.png", 3, "lined", false),
            section("Mechanics", "mechanics.png", 3, "lined", false),
            section("Maps", "maps.png", 5, "hex", true),
            section("Encounters", "encounters.png", 5, "lined", true),
            section("Friendly NPC's", "npcs.png", 15, "lined", true),
            section("Enemy NPC's", "enemies.png", 15, "lined", true),
            section(
                "Additional Sections",
                "additional_topics.png",
                10,
                "lined",
                true,
            ),
        ],
    }
}

fn project_notes() -> BookConfig {
    let page = PageSettings::default();
    let projects = page.rows_per_index_page();

    let mut notes = section("Project Notes", "home.png", 1, "lined", true);
    notes.items = Some(projects);
    notes.parts = vec![
        part("Notes", "journal-alt.png", 10, "lined"),
        part("To Do", "to-do.png", 10, "checkbox-lined"),
        part("People", "users-alt.png", 10, "lined"),
    ];

    BookConfig {
        title: "Project Notes".to_string(),
        output: Some("Project Notes Template.pdf".to_string()),
        cover: Some(COVER.to_string()),
        fonts: Vec::new(),
        page,
        sections: vec![notes],
    }
}
