use crate::analysis::analysis_model::{AnalysisResult, HeuristicMatch};
use crate::catalog::catalog_model::{HeuristicId, category_display_name};
use crate::error::ExportError;
use crate::export::export_model::{CHECKLIST_TITLE, ExportOptions};
use crate::export::pdf::fonts::{Font, PT_TO_MM, elide_to_width, text_width, wrap_text};

// ============================================================================
// Page geometry (millimetres, y grows downward from the page top)
// ============================================================================

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
pub const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - MARGIN;

const LINE_SPACING: f32 = 1.4;

const TITLE_SIZE: f32 = 20.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
const META_SIZE: f32 = 10.0;
const FOOTER_SIZE: f32 = 9.0;

const CHECKBOX_SIZE: f32 = 3.8;
const CHECKBOX_GAP: f32 = 3.0;
const ARROW_SIZE: f32 = 4.0;
const ARROW_GAP: f32 = 4.0;
const ITEM_SPACING: f32 = 2.0;
const SECTION_SPACING: f32 = 4.0;
const SEPARATOR_HEIGHT: f32 = 6.0;

/// Height reserved at the bottom of the last page for the footer.
pub const FOOTER_HEIGHT: f32 = 14.0;
pub const FOOTER_TOP: f32 = CONTENT_BOTTOM - FOOTER_HEIGHT;

const FOOTER_ATTRIBUTION: &str = "Generated by Accessibility Heuristics";

pub fn line_height(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * LINE_SPACING
}

/// Baseline offset of a line below its top edge.
fn baseline_offset(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * 1.05
}

// ============================================================================
// Layout output
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its baseline at `y`.
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        text: String,
    },
    /// Stroked rectangle with its top-left corner at (`x`, `y`).
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
    /// Right-pointing arrow glyph sitting on baseline `y`.
    Arrow { x: f32, y: f32, size: f32 },
    /// Clickable area with its top-left corner at (`x`, `y`).
    Link {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        url: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPage {
    pub ops: Vec<DrawOp>,
}

/// Where a checklist item landed. `top` is the checkbox row's top edge and
/// `first_line_bottom` the bottom of the first text line, both on `page`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPlacement {
    pub slug: HeuristicId,
    pub page: usize,
    pub top: f32,
    pub first_line_bottom: f32,
    pub checkbox_page: usize,
    pub first_line_page: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    pub pages: Vec<LayoutPage>,
    pub items: Vec<ItemPlacement>,
    /// Page index and top edge of the footer block.
    pub footer: (usize, f32),
}

// ============================================================================
// Vertical flow with explicit pagination
// ============================================================================

struct Flow {
    pages: Vec<LayoutPage>,
    cursor: f32,
}

impl Flow {
    fn new() -> Self {
        Self {
            pages: vec![LayoutPage::default()],
            cursor: MARGIN,
        }
    }

    fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn new_page(&mut self) {
        self.pages.push(LayoutPage::default());
        self.cursor = MARGIN;
    }

    /// Break the page if a block of `height` would cross the bottom margin.
    fn ensure_space(&mut self, height: f32) -> Result<(), ExportError> {
        if !height.is_finite() || height < 0.0 {
            return Err(ExportError::Layout(format!("invalid block height {}", height)));
        }
        if height > CONTENT_BOTTOM - MARGIN {
            return Err(ExportError::Layout(format!(
                "block of {:.1}mm does not fit on a page",
                height
            )));
        }
        if self.cursor + height > CONTENT_BOTTOM {
            self.new_page();
        }
        Ok(())
    }

    /// Wrapped paragraph; each line is placed individually.
    fn paragraph(&mut self, text: &str, font: Font, size: f32) -> Result<(), ExportError> {
        let lh = line_height(size);
        for line in wrap_text(text, font, size, CONTENT_WIDTH) {
            self.ensure_space(lh)?;
            let y = self.cursor + baseline_offset(size);
            self.push(DrawOp::Text {
                x: MARGIN,
                y,
                size,
                font,
                text: line,
            });
            self.cursor += lh;
        }
        Ok(())
    }

    fn gap(&mut self, height: f32) {
        self.cursor = (self.cursor + height).min(CONTENT_BOTTOM);
    }

    fn separator(&mut self) -> Result<(), ExportError> {
        self.ensure_space(SEPARATOR_HEIGHT)?;
        let y = self.cursor + SEPARATOR_HEIGHT / 2.0;
        self.push(DrawOp::Line {
            x1: MARGIN,
            y1: y,
            x2: PAGE_WIDTH - MARGIN,
            y2: y,
            width: 0.3,
        });
        self.cursor += SEPARATOR_HEIGHT;
        Ok(())
    }

    /// Category heading, kept on the same page as the first line of the
    /// item that follows it.
    fn heading(&mut self, text: &str, keep_with: f32) -> Result<(), ExportError> {
        let lh = line_height(HEADING_SIZE);
        self.ensure_space(lh + keep_with)?;
        let y = self.cursor + baseline_offset(HEADING_SIZE);
        self.push(DrawOp::Text {
            x: MARGIN,
            y,
            size: HEADING_SIZE,
            font: Font::Bold,
            text: elide_to_width(text, Font::Bold, HEADING_SIZE, CONTENT_WIDTH),
        });
        self.cursor += lh;
        Ok(())
    }

    /// Checkbox + wrapped title + arrow link. The checkbox and the first
    /// line are reserved together so they always share a page.
    fn checklist_item(&mut self, item: &HeuristicMatch, url: &str) -> Result<ItemPlacement, ExportError> {
        let lh = line_height(BODY_SIZE);
        let text_x = MARGIN + CHECKBOX_SIZE + CHECKBOX_GAP;
        let arrow_x = PAGE_WIDTH - MARGIN - ARROW_SIZE;
        let text_width_max = arrow_x - ARROW_GAP - text_x;

        let lines = wrap_text(&item.title, Font::Regular, BODY_SIZE, text_width_max);
        let first_row = lh.max(CHECKBOX_SIZE);

        self.ensure_space(first_row)?;

        let top = self.cursor;
        let page = self.page_index();

        self.push(DrawOp::Rect {
            x: MARGIN,
            y: top + (first_row - CHECKBOX_SIZE) / 2.0,
            w: CHECKBOX_SIZE,
            h: CHECKBOX_SIZE,
        });
        let checkbox_page = self.page_index();

        let mut first_line_page = page;
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                self.ensure_space(lh)?;
            } else {
                first_line_page = self.page_index();
            }
            let y = self.cursor + baseline_offset(BODY_SIZE);
            self.push(DrawOp::Text {
                x: text_x,
                y,
                size: BODY_SIZE,
                font: Font::Regular,
                text: line,
            });
            if i == 0 {
                self.push(DrawOp::Arrow {
                    x: arrow_x,
                    y,
                    size: ARROW_SIZE,
                });
                self.push(DrawOp::Link {
                    x: arrow_x - 1.0,
                    y: top,
                    w: ARROW_SIZE + 2.0,
                    h: first_row,
                    url: url.to_string(),
                });
                self.cursor += first_row;
            } else {
                self.cursor += lh;
            }
        }

        self.gap(ITEM_SPACING);

        Ok(ItemPlacement {
            slug: item.slug.clone(),
            page,
            top,
            first_line_bottom: top + first_row,
            checkbox_page,
            first_line_page,
        })
    }

    /// Footer at a fixed offset from the page bottom, on a new page when the
    /// content already reaches into the footer area.
    fn footer(&mut self, base_url: &str) -> (usize, f32) {
        if self.cursor > FOOTER_TOP {
            self.new_page();
        }

        let top = FOOTER_TOP;
        self.push(DrawOp::Line {
            x1: MARGIN,
            y1: top + 2.0,
            x2: PAGE_WIDTH - MARGIN,
            y2: top + 2.0,
            width: 0.2,
        });

        let lh = line_height(FOOTER_SIZE);
        let attribution_y = top + 4.0 + baseline_offset(FOOTER_SIZE);
        self.push(DrawOp::Text {
            x: MARGIN,
            y: attribution_y,
            size: FOOTER_SIZE,
            font: Font::Regular,
            text: FOOTER_ATTRIBUTION.to_string(),
        });

        let link_y = attribution_y + lh;
        let shown = elide_to_width(base_url, Font::Regular, FOOTER_SIZE, CONTENT_WIDTH);
        let link_width = text_width(&shown, Font::Regular, FOOTER_SIZE);
        self.push(DrawOp::Text {
            x: MARGIN,
            y: link_y,
            size: FOOTER_SIZE,
            font: Font::Regular,
            text: shown,
        });
        self.push(DrawOp::Link {
            x: MARGIN,
            y: link_y - baseline_offset(FOOTER_SIZE),
            w: link_width,
            h: lh,
            url: base_url.to_string(),
        });

        self.cursor = CONTENT_BOTTOM;
        (self.page_index(), top)
    }
}

/// Lay out the checklist document for an analysis result.
pub fn layout_checklist(result: &AnalysisResult, options: &ExportOptions) -> Result<LayoutDocument, ExportError> {
    let mut flow = Flow::new();

    flow.paragraph(CHECKLIST_TITLE, Font::Bold, TITLE_SIZE)?;
    flow.paragraph(
        &format!("Generated: {}", result.generated_on.format("%Y-%m-%d")),
        Font::Regular,
        META_SIZE,
    )?;
    flow.gap(SECTION_SPACING);

    flow.paragraph(&result.detected.summary, Font::Regular, BODY_SIZE)?;
    if let Some(confidence) = result.detected.confidence {
        flow.paragraph(
            &format!("Confidence: {:.0}%", confidence * 100.0),
            Font::Regular,
            META_SIZE,
        )?;
    }

    let elements = if result.detected.elements.is_empty() {
        "none".to_string()
    } else {
        result
            .detected
            .elements
            .iter()
            .map(|e| e.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    };
    flow.paragraph(
        &format!("Detected elements: {}", elements),
        Font::Regular,
        META_SIZE,
    )?;

    flow.separator()?;

    let first_row = line_height(BODY_SIZE).max(CHECKBOX_SIZE);
    let mut items = Vec::with_capacity(result.heuristics.len());

    for (category, group) in result.category_groups() {
        flow.gap(SECTION_SPACING);
        flow.heading(&category_display_name(category), first_row)?;

        for item in group {
            let url = options.guide_url(&item.slug);
            items.push(flow.checklist_item(item, &url)?);
        }
    }

    let footer = flow.footer(&options.base_url);

    let document = LayoutDocument {
        pages: flow.pages,
        items,
        footer,
    };
    validate(&document)?;
    Ok(document)
}

/// Slack for rounding when comparing measured text against the margin.
const WIDTH_TOLERANCE: f32 = 0.01;

/// Reject any op that falls outside the page or has non-finite geometry.
/// Text must also end inside the right margin.
fn validate(document: &LayoutDocument) -> Result<(), ExportError> {
    let in_page = |x: f32, y: f32| {
        x.is_finite() && y.is_finite() && (0.0..=PAGE_WIDTH).contains(&x) && (0.0..=PAGE_HEIGHT).contains(&y)
    };

    for (index, page) in document.pages.iter().enumerate() {
        for op in &page.ops {
            let ok = match op {
                DrawOp::Text { x, y, size, font, text } => {
                    in_page(*x, *y)
                        && x + text_width(text, *font, *size) <= PAGE_WIDTH - MARGIN + WIDTH_TOLERANCE
                }
                DrawOp::Arrow { x, y, size } => in_page(*x, *y) && in_page(x + size, *y),
                DrawOp::Rect { x, y, w, h } | DrawOp::Link { x, y, w, h, .. } => {
                    in_page(*x, *y) && in_page(x + w, y + h)
                }
                DrawOp::Line { x1, y1, x2, y2, .. } => in_page(*x1, *y1) && in_page(*x2, *y2),
            };
            if !ok {
                return Err(ExportError::Layout(format!(
                    "draw operation outside page {}: {:?}",
                    index + 1,
                    op
                )));
            }
        }
    }

    for item in &document.items {
        if item.checkbox_page != item.first_line_page || item.first_line_bottom > CONTENT_BOTTOM {
            return Err(ExportError::Layout(format!(
                "checklist item {} split across pages",
                item.slug
            )));
        }
    }

    Ok(())
}
