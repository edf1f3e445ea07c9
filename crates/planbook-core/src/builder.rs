//! Page-sequence builder
//!
//! Walks a validated [`Book`] once and emits every page in order: the cover,
//! then per section its index pages and content pages. Links are allocated
//! before anything points at them and bound when their target page is
//! created, so an index row can link to a content page that does not exist
//! yet.

use tracing::{debug, info};

use crate::background;
use crate::config::{Book, PageSettings, Section, SectionContent};
use crate::document::{Align, Document, Page, PageKind, Primitive, Rgb, Stroke};
use crate::error::{LinkError, Result};
use crate::geometry::Point;
use crate::links::{LinkId, LinkRegistry};

/// Header title font size, in points
const TITLE_SIZE: f64 = 10.0;
/// Footer font size, in points
const FOOTER_SIZE: f64 = 8.0;
/// Footer distance from the bottom edge
const FOOTER_OFFSET: f64 = 15.0;
/// Footer text box height
const FOOTER_HEIGHT: f64 = 10.0;

/// Lay out a book into a document
pub fn build(book: &Book) -> Result<Document> {
    PageSequenceBuilder::new(book).build()
}

/// Mutable state for one document build
#[derive(Debug, Default)]
struct BuildContext {
    pages: Vec<Page>,
    links: LinkRegistry,
}

impl BuildContext {
    /// Start the next page. Numbers are assigned in creation order.
    fn open_page(&self, title: impl Into<String>, kind: PageKind) -> Page {
        Page::new(self.pages.len() as u32 + 1, title, kind)
    }

    fn finish_page(&mut self, page: Page) {
        debug!(
            page = page.number,
            title = %page.title,
            primitives = page.primitives.len(),
            "page laid out"
        );
        self.pages.push(page);
    }
}

/// Link targets of one index item: one per part, or a single link for a
/// plain section
type ItemLinks = Vec<LinkId>;

/// Builds the page sequence for a single book
struct PageSequenceBuilder<'a> {
    book: &'a Book,
    settings: &'a PageSettings,
    ctx: BuildContext,
    /// Toolbar targets, one per top-level section
    section_links: Vec<LinkId>,
}

impl<'a> PageSequenceBuilder<'a> {
    fn new(book: &'a Book) -> Self {
        Self {
            book,
            settings: &book.page,
            ctx: BuildContext::default(),
            section_links: Vec::new(),
        }
    }

    fn build(mut self) -> Result<Document> {
        let book = self.book;
        if let Some(cover) = &book.cover {
            self.cover_page(cover);
        }

        let links = &mut self.ctx.links;
        self.section_links = book.sections.iter().map(|_| links.allocate()).collect();

        for (index, section) in book.sections.iter().enumerate() {
            self.emit_section(index, section)?;
        }

        if let Some(link) = self.ctx.links.unbound().next() {
            return Err(LinkError::Unbound { link }.into());
        }

        info!(
            title = %self.book.title,
            pages = self.ctx.pages.len(),
            links = self.ctx.links.len(),
            "layout complete"
        );

        Ok(Document {
            title: self.book.title.clone(),
            width: self.settings.width,
            height: self.settings.height,
            pages: self.ctx.pages,
            links: self.ctx.links,
        })
    }

    /// Full-page cover image without header, footer or toolbar
    fn cover_page(&mut self, cover: &str) {
        let mut page = self.ctx.open_page(self.book.title.as_str(), PageKind::Cover);
        page.push(Primitive::Image {
            asset: cover.to_string(),
            origin: Point::new(0.0, 0.0),
            width: self.settings.width,
            height: self.settings.height,
            link: None,
        });
        self.ctx.finish_page(page);
    }

    fn emit_section(&mut self, index: usize, section: &Section) -> Result<()> {
        let section_link = self.section_links[index];
        let items = self.allocate_items(section);
        debug!(
            section = %section.title,
            items = items.len(),
            indexed = section.has_index,
            "emitting section"
        );

        let mut section_bound = false;
        if section.has_index {
            self.emit_index(section, section_link, &items)?;
            section_bound = true;
        }

        match &section.content {
            SectionContent::Pages { count, background } => {
                for n in 0..*count as usize {
                    let item = section.has_index.then_some(n);
                    let mut page = self.ctx.open_page(
                        section.title.as_str(),
                        PageKind::Content {
                            section: section.title.clone(),
                            item,
                            part: None,
                        },
                    );
                    page.background = Some(*background);
                    if !section_bound {
                        self.ctx.links.bind(section_link, page.number)?;
                        section_bound = true;
                    }
                    if let Some(item) = item {
                        self.ctx.links.bind(items[item][0], page.number)?;
                    }

                    self.header(&mut page);
                    page.primitives
                        .extend(background::render(*background, self.settings));
                    self.toolbar(&mut page, &[]);
                    self.footer(&mut page);
                    self.ctx.finish_page(page);
                }
            }
            SectionContent::Items { parts, .. } => {
                for (item, links) in items.iter().enumerate() {
                    let lateral: Vec<(&str, LinkId)> = parts
                        .iter()
                        .zip(links)
                        .map(|(part, link)| (part.icon.as_str(), *link))
                        .collect();

                    for (part, link) in parts.iter().zip(links) {
                        for n in 0..part.pages {
                            let mut page = self.ctx.open_page(
                                format!("{} - {} / {}", part.title, n + 1, part.pages),
                                PageKind::Content {
                                    section: section.title.clone(),
                                    item: Some(item),
                                    part: Some(part.title.clone()),
                                },
                            );
                            page.background = Some(part.background);
                            if !section_bound {
                                self.ctx.links.bind(section_link, page.number)?;
                                section_bound = true;
                            }
                            if n == 0 {
                                self.ctx.links.bind(*link, page.number)?;
                            }

                            self.header(&mut page);
                            page.primitives
                                .extend(background::render(part.background, self.settings));
                            self.toolbar(&mut page, &lateral);
                            self.footer(&mut page);
                            self.ctx.finish_page(page);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Allocate the per-item links of a section.
    ///
    /// Plain sections only need item links when they have an index. Sections
    /// with parts always need them for the lateral toolbar.
    fn allocate_items(&mut self, section: &Section) -> Vec<ItemLinks> {
        match &section.content {
            SectionContent::Pages { count, .. } if section.has_index => (0..*count)
                .map(|_| vec![self.ctx.links.allocate()])
                .collect(),
            SectionContent::Pages { .. } => Vec::new(),
            SectionContent::Items { count, parts } => (0..*count)
                .map(|_| parts.iter().map(|_| self.ctx.links.allocate()).collect())
                .collect(),
        }
    }

    /// Emit index pages, one row per item.
    ///
    /// A new page starts only when the current one is full and another item
    /// remains, so `n` items take `ceil(n / rows_per_index_page)` pages. The
    /// slot counter restarts on every page.
    fn emit_index(
        &mut self,
        section: &Section,
        section_link: LinkId,
        items: &[ItemLinks],
    ) -> Result<()> {
        let per_page = self.settings.rows_per_index_page().max(1) as usize;
        let icons: Vec<&str> = match &section.content {
            SectionContent::Pages { .. } => vec![section.icon.as_str()],
            SectionContent::Items { parts, .. } => parts.iter().map(|p| p.icon.as_str()).collect(),
        };

        for (n, rows) in items.chunks(per_page).enumerate() {
            let mut page = self.ctx.open_page(
                section.title.as_str(),
                PageKind::Index {
                    section: section.title.clone(),
                },
            );
            if n == 0 {
                self.ctx.links.bind(section_link, page.number)?;
            }

            self.header(&mut page);
            for (slot, links) in rows.iter().enumerate() {
                self.index_row(&mut page, slot + 1, &icons, links);
            }
            self.toolbar(&mut page, &[]);
            self.footer(&mut page);
            self.ctx.finish_page(page);
        }
        Ok(())
    }

    /// A filled name box followed by one linked icon per target
    fn index_row(&self, page: &mut Page, slot: usize, icons: &[&str], links: &[LinkId]) {
        let s = self.settings;
        let y = s.margin_top + slot as f64 * s.index_row_pitch();
        page.push(Primitive::Rect {
            origin: Point::new(s.margin, y),
            width: s.index_box_width,
            height: s.index_box_height,
            stroke: Some(Stroke::hairline(Rgb::BLACK)),
            fill: Some(Rgb::INDEX_FILL),
        });

        let step = s.icon_size + s.toolbar_gap;
        let first = s.margin + s.index_box_width + s.toolbar_gap;
        for (k, (icon, link)) in icons.iter().zip(links).enumerate() {
            page.push(Primitive::Image {
                asset: icon.to_string(),
                origin: Point::new(first + k as f64 * step, y),
                width: s.icon_size,
                height: s.icon_size,
                link: Some(*link),
            });
        }
    }

    /// Right-aligned navigation icons: every top-level section, then the
    /// lateral links of the current item
    fn toolbar(&self, page: &mut Page, lateral: &[(&str, LinkId)]) {
        let s = self.settings;
        let entries: Vec<(&str, LinkId)> = self
            .book
            .sections
            .iter()
            .map(|section| section.icon.as_str())
            .zip(self.section_links.iter().copied())
            .chain(lateral.iter().copied())
            .collect();
        if entries.is_empty() {
            return;
        }

        let step = s.icon_size + s.toolbar_gap;
        let total = s.toolbar_width(entries.len());
        let start = s.width - s.margin - total;
        for (i, (icon, link)) in entries.into_iter().enumerate() {
            page.push(Primitive::Image {
                asset: icon.to_string(),
                origin: Point::new(start + i as f64 * step, s.toolbar_y),
                width: s.icon_size,
                height: s.icon_size,
                link: Some(link),
            });
        }
    }

    /// Colored band with the page title
    fn header(&self, page: &mut Page) {
        let s = self.settings;
        page.push(Primitive::Rect {
            origin: Point::new(0.0, 0.0),
            width: s.width,
            height: s.header_height,
            stroke: None,
            fill: Some(Rgb::HEADER_BLUE),
        });
        page.push(Primitive::Text {
            origin: Point::new(s.margin, 0.0),
            width: s.width - 2.0 * s.margin,
            height: s.header_height,
            content: page.title.clone(),
            size: TITLE_SIZE,
            italic: false,
            color: Rgb::BLACK,
            align: Align::Left,
        });
    }

    /// Centered page number
    fn footer(&self, page: &mut Page) {
        let s = self.settings;
        page.push(Primitive::Text {
            origin: Point::new(s.margin, s.height - FOOTER_OFFSET),
            width: s.width - 2.0 * s.margin,
            height: FOOTER_HEIGHT,
            content: format!("Page {}", page.number),
            size: FOOTER_SIZE,
            italic: true,
            color: Rgb::GRAY,
            align: Align::Center,
        });
    }
}
