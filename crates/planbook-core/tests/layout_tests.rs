//! Layout Tests
//!
//! Whole-book layout behaviour: index overflow, backgrounds per page and the
//! navigation graph as a reader would follow it.

use planbook_core::document::{Page, PageKind, Primitive};
use planbook_core::{build, BackgroundKind, BookConfig, Document, LayoutError, Preset};

fn layout(toml: &str) -> Document {
    let book = BookConfig::from_toml_str(toml)
        .expect("config parses")
        .validate()
        .expect("config validates");
    build(&book).expect("layout succeeds")
}

fn index_pages(doc: &Document) -> Vec<&Page> {
    doc.pages
        .iter()
        .filter(|p| matches!(p.kind, PageKind::Index { .. }))
        .collect()
}

fn content_pages(doc: &Document) -> Vec<&Page> {
    doc.pages
        .iter()
        .filter(|p| matches!(p.kind, PageKind::Content { .. }))
        .collect()
}

// =============================================================================
// Index overflow
// =============================================================================

mod index_tests {
    use super::*;

    const TWELVE_ITEMS: &str = r#"
[page]
rows_per_index_page = 5

[[sections]]
title = "Encounters"
icon = "icons/encounters.png"
pages = 12
has_index = true
"#;

    #[test]
    fn test_twelve_items_five_per_page_gives_three_index_pages() {
        let doc = layout(TWELVE_ITEMS);
        let index = index_pages(&doc);
        assert_eq!(index.len(), 3);

        // 5 + 5 + 2 rows, each row one linked icon, plus one toolbar icon
        let rows: Vec<usize> = index
            .iter()
            .map(|p| p.link_placements().count() - 1)
            .collect();
        assert_eq!(rows, vec![5, 5, 2]);
    }

    #[test]
    fn test_slot_counter_resets_on_each_index_page() {
        let doc = layout(TWELVE_ITEMS);
        for page in index_pages(&doc) {
            let first_row_y = page.primitives.iter().find_map(|p| match p {
                Primitive::Image { origin, link: Some(_), .. } if origin.y > 20.0 => {
                    Some(origin.y)
                }
                _ => None,
            });
            // margin_top + 1 * (15 + 5)
            assert_eq!(first_row_y, Some(30.0), "page {}", page.number);
        }
    }

    #[test]
    fn test_exact_fit_does_not_add_an_empty_page() {
        let doc = layout(
            r#"
[page]
rows_per_index_page = 4

[[sections]]
title = "Maps"
icon = "icons/maps.png"
pages = 8
background = "hex"
has_index = true
"#,
        );
        assert_eq!(index_pages(&doc).len(), 2);
        assert_eq!(content_pages(&doc).len(), 8);
    }

    #[test]
    fn test_index_precedes_content() {
        let doc = layout(TWELVE_ITEMS);
        let kinds: Vec<bool> = doc
            .pages
            .iter()
            .map(|p| matches!(p.kind, PageKind::Index { .. }))
            .collect();
        assert_eq!(kinds[..3], [true, true, true]);
        assert!(kinds[3..].iter().all(|is_index| !is_index));
    }
}

// =============================================================================
// Content pages
// =============================================================================

mod content_tests {
    use super::*;

    #[test]
    fn test_single_lined_section_end_to_end() {
        let doc = layout(
            r#"
cover = "images/cover.jpg"

[[sections]]
title = "Story"
icon = "icons/story.png"
pages = 2
background = "lined"
has_index = false
"#,
        );
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.pages[0].kind, PageKind::Cover);

        let content = content_pages(&doc);
        assert_eq!(content.len(), 2);
        for page in content {
            assert_eq!(page.background, Some(BackgroundKind::Lined));
            // floor((290 - 40) / 10) + 1
            assert_eq!(page.horizontal_lines(), 26);
            // toolbar: one icon for the only section
            assert_eq!(page.link_placements().count(), 1);
        }
    }

    #[test]
    fn test_each_part_uses_its_background() {
        let doc = layout(
            r#"
[[sections]]
title = "Projects"
icon = "icons/home.png"
items = 1

[[sections.parts]]
title = "Notes"
icon = "icons/notes.png"
background = "lined"

[[sections.parts]]
title = "To Do"
icon = "icons/todo.png"
background = "checkbox-lined"

[[sections.parts]]
title = "Map"
icon = "icons/map.png"
background = "hex"
"#,
        );
        let backgrounds: Vec<_> = doc.pages.iter().map(|p| p.background).collect();
        assert_eq!(
            backgrounds,
            vec![
                Some(BackgroundKind::Lined),
                Some(BackgroundKind::CheckboxLined),
                Some(BackgroundKind::Hex),
            ]
        );
    }

    #[test]
    fn test_unknown_background_fails_before_layout() {
        let config = BookConfig::from_toml_str(
            r#"
[[sections]]
title = "Story"
icon = "icons/story.png"

[[sections]]
title = "Maps"
icon = "icons/maps.png"
background = "hexagons"
"#,
        )
        .unwrap();
        let err: LayoutError = config.validate().unwrap_err().into();
        assert!(err.to_string().contains("hexagons"));
    }
}

// =============================================================================
// Navigation graph
// =============================================================================

mod navigation_tests {
    use super::*;

    /// Section a link was allocated for must own the page it resolves to
    fn assert_links_resolve(doc: &Document) {
        for page in &doc.pages {
            for (_, link) in page.link_placements() {
                let target = doc
                    .resolve(link)
                    .unwrap_or_else(|e| panic!("page {}: {}", page.number, e));
                assert!(target.number as usize <= doc.len());
                assert_ne!(target.kind, PageKind::Cover);
            }
        }
    }

    #[test]
    fn test_campaign_links_resolve_to_their_sections() {
        let book = Preset::Campaign.config().validate().unwrap();
        let doc = build(&book).unwrap();
        assert_links_resolve(&doc);

        for page in &doc.pages {
            // toolbar icons sit in the header band, in section order
            let toolbar: Vec<_> = page
                .primitives
                .iter()
                .filter_map(|p| match p {
                    Primitive::Image { link: Some(l), origin, .. } if origin.y < 20.0 => Some(*l),
                    _ => None,
                })
                .collect();
            if page.kind == PageKind::Cover {
                assert!(toolbar.is_empty());
                continue;
            }
            assert_eq!(toolbar.len(), book.sections.len());
            for (link, section) in toolbar.iter().zip(&book.sections) {
                let target = doc.resolve(*link).unwrap();
                assert_eq!(target.kind.section(), Some(section.title.as_str()));
                // first page of the section
                let first = doc.section_pages(&section.title).next().unwrap();
                assert_eq!(target.number, first.number);
            }
        }
    }

    #[test]
    fn test_campaign_index_rows_link_to_matching_items() {
        let doc = build(&Preset::Campaign.config().validate().unwrap()).unwrap();
        for index in index_pages(&doc) {
            let section = index.kind.section().unwrap();
            let rows = index
                .primitives
                .iter()
                .filter_map(|p| match p {
                    Primitive::Image { link: Some(l), origin, .. } if origin.y > 20.0 => Some(*l),
                    _ => None,
                });
            for link in rows {
                let target = doc.resolve(link).unwrap();
                assert!(matches!(
                    &target.kind,
                    PageKind::Content { section: s, item: Some(_), .. } if s == section
                ));
            }
        }
    }

    #[test]
    fn test_project_notes_lateral_links_stay_within_item() {
        let doc = build(&Preset::ProjectNotes.config().validate().unwrap()).unwrap();
        assert_links_resolve(&doc);

        // cover + 1 index page + 12 projects * 30 pages
        assert_eq!(doc.len(), 1 + 1 + 12 * 30);

        for page in content_pages(&doc) {
            let PageKind::Content { item, .. } = &page.kind else {
                unreachable!()
            };
            let placements: Vec<_> = page.link_placements().collect();
            // home + notes, to-do, people
            assert_eq!(placements.len(), 4);

            let home = doc.resolve(placements[0].1).unwrap();
            assert!(matches!(home.kind, PageKind::Index { .. }));

            let parts: Vec<_> = placements[1..]
                .iter()
                .map(|(_, link)| doc.resolve(*link).unwrap())
                .collect();
            for (target, expected) in parts.iter().zip(["Notes", "To Do", "People"]) {
                let PageKind::Content {
                    item: target_item,
                    part,
                    ..
                } = &target.kind
                else {
                    panic!("lateral link left the content pages");
                };
                assert_eq!(target_item, item);
                assert_eq!(part.as_deref(), Some(expected));
                assert_eq!(target.title, format!("{} - 1 / 10", expected));
            }
        }
    }

    #[test]
    fn test_every_allocated_link_is_bound() {
        for preset in Preset::ALL {
            let doc = build(&preset.config().validate().unwrap()).unwrap();
            assert_eq!(doc.links.unbound().count(), 0, "{}", preset.name());
        }
    }
}
