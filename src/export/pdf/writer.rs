use std::fmt::Write as _;

use sha1::{Digest, Sha1};

use crate::error::ExportError;
use crate::export::pdf::fonts::{Font, PT_TO_MM};
use crate::export::pdf::layout::{DrawOp, LayoutDocument, PAGE_HEIGHT, PAGE_WIDTH};

// ============================================================================
// PDF 1.4 serializer for laid-out documents
// ============================================================================

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_REGULAR_ID: usize = 3;
const FONT_BOLD_ID: usize = 4;
const INFO_ID: usize = 5;
const FIRST_PAGE_OBJECT_ID: usize = 6;

fn pt(mm: f32) -> f32 {
    mm / PT_TO_MM
}

/// Convert a top-down y coordinate in millimetres to PDF user space.
fn pdf_y(mm_from_top: f32) -> f32 {
    pt(PAGE_HEIGHT - mm_from_top)
}

fn num(value: f32) -> Result<String, ExportError> {
    if !value.is_finite() {
        return Err(ExportError::Layout(format!("non-finite coordinate {}", value)));
    }
    let rounded = (value * 100.0).round() / 100.0;
    Ok(format!("{}", if rounded == 0.0 { 0.0 } else { rounded }))
}

/// Encode text as a PDF literal string in WinAnsi, escaping delimiters.
/// Characters without a WinAnsi code become '?'.
pub fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for c in text.chars() {
        let byte: u8 = match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        };
        match byte {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\{:03o}", byte);
            }
        }
    }
    out.push(')');
    out
}

fn content_stream(ops: &[DrawOp]) -> Result<String, ExportError> {
    let mut s = String::new();

    for op in ops {
        match op {
            DrawOp::Text { x, y, size, font, text } => {
                s.push_str(&format!(
                    "BT /{} {} Tf {} {} Td {} Tj ET\n",
                    font.resource(),
                    num(*size)?,
                    num(pt(*x))?,
                    num(pdf_y(*y))?,
                    pdf_string(text)
                ));
            }
            DrawOp::Rect { x, y, w, h } => {
                s.push_str(&format!(
                    "0.6 w {} {} {} {} re S\n",
                    num(pt(*x))?,
                    num(pdf_y(y + h))?,
                    num(pt(*w))?,
                    num(pt(*h))?
                ));
            }
            DrawOp::Line { x1, y1, x2, y2, width } => {
                s.push_str(&format!(
                    "{} w {} {} m {} {} l S\n",
                    num(pt(*width))?,
                    num(pt(*x1))?,
                    num(pdf_y(*y1))?,
                    num(pt(*x2))?,
                    num(pdf_y(*y2))?
                ));
            }
            DrawOp::Arrow { x, y, size } => {
                let mid = y - size * 0.35;
                let head = x + size * 0.55;
                s.push_str(&format!(
                    "0.8 w {} {} m {} {} l S\n",
                    num(pt(*x))?,
                    num(pdf_y(mid))?,
                    num(pt(head))?,
                    num(pdf_y(mid))?
                ));
                s.push_str(&format!(
                    "{} {} m {} {} l {} {} l h f\n",
                    num(pt(head))?,
                    num(pdf_y(mid - size * 0.25))?,
                    num(pt(x + size))?,
                    num(pdf_y(mid))?,
                    num(pt(head))?,
                    num(pdf_y(mid + size * 0.25))?
                ));
            }
            // Emitted as annotations, not content
            DrawOp::Link { .. } => {}
        }
    }

    Ok(s)
}

fn link_annotation(x: f32, y: f32, w: f32, h: f32, url: &str) -> Result<String, ExportError> {
    Ok(format!(
        "<< /Type /Annot /Subtype /Link /Rect [{} {} {} {}] /Border [0 0 0] /A << /S /URI /URI {} >> >>",
        num(pt(x))?,
        num(pdf_y(y + h))?,
        num(pt(x + w))?,
        num(pdf_y(y))?,
        pdf_string(url)
    ))
}

struct PdfBuilder {
    buffer: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfBuilder {
    fn new() -> Self {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buffer,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &str) {
        self.offsets.push((id, self.buffer.len()));
        self.buffer
            .extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", id, body).as_bytes());
    }

    fn stream(&mut self, id: usize, content: &str) {
        self.object(
            id,
            &format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
        );
    }

    fn finish(mut self) -> Result<Vec<u8>, ExportError> {
        self.offsets.sort_by_key(|(id, _)| *id);
        for (expected, (id, _)) in (1..).zip(&self.offsets) {
            if expected != *id {
                return Err(ExportError::Layout(format!("missing PDF object {}", expected)));
            }
        }

        let digest = Sha1::digest(&self.buffer);
        let file_id: String = digest.iter().map(|b| format!("{:02x}", b)).collect();

        let xref_offset = self.buffer.len();
        let size = self.offsets.len() + 1;

        let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for (_, offset) in &self.offsets {
            let _ = write!(tail, "{:010} 00000 n \n", offset);
        }
        let _ = write!(
            tail,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R /ID [<{}> <{}>] >>\nstartxref\n{}\n%%EOF\n",
            size, CATALOG_ID, INFO_ID, file_id, file_id, xref_offset
        );

        self.buffer.extend_from_slice(tail.as_bytes());
        Ok(self.buffer)
    }
}

/// Serialize a laid-out document. `title` and `date` go into the info
/// dictionary; `date` must be `YYYYMMDD`.
pub fn write_pdf(document: &LayoutDocument, title: &str, date: &str) -> Result<Vec<u8>, ExportError> {
    if document.pages.is_empty() {
        return Err(ExportError::Layout("document has no pages".to_string()));
    }

    let mut builder = PdfBuilder::new();
    let mut next_id = FIRST_PAGE_OBJECT_ID;
    let mut page_ids = Vec::with_capacity(document.pages.len());

    let media_box = format!("[0 0 {} {}]", num(pt(PAGE_WIDTH))?, num(pt(PAGE_HEIGHT))?);

    for page in &document.pages {
        let page_id = next_id;
        let content_id = next_id + 1;
        next_id += 2;

        let mut annotation_ids = Vec::new();
        for op in &page.ops {
            if let DrawOp::Link { x, y, w, h, url } = op {
                let id = next_id;
                next_id += 1;
                builder.object(id, &link_annotation(*x, *y, *w, *h, url)?);
                annotation_ids.push(id);
            }
        }

        let annots = if annotation_ids.is_empty() {
            String::new()
        } else {
            format!(
                " /Annots [{}]",
                annotation_ids
                    .iter()
                    .map(|id| format!("{} 0 R", id))
                    .collect::<Vec<_>>()
                    .join(" ")
            )
        };

        builder.stream(content_id, &content_stream(&page.ops)?);
        builder.object(
            page_id,
            &format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox {} /Resources << /Font << /{} {} 0 R /{} {} 0 R >> >> /Contents {} 0 R{} >>",
                PAGES_ID,
                media_box,
                Font::Regular.resource(),
                FONT_REGULAR_ID,
                Font::Bold.resource(),
                FONT_BOLD_ID,
                content_id,
                annots
            ),
        );
        page_ids.push(page_id);
    }

    builder.object(
        CATALOG_ID,
        &format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID),
    );
    builder.object(
        PAGES_ID,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            page_ids
                .iter()
                .map(|id| format!("{} 0 R", id))
                .collect::<Vec<_>>()
                .join(" "),
            page_ids.len()
        ),
    );
    for (id, font) in [(FONT_REGULAR_ID, Font::Regular), (FONT_BOLD_ID, Font::Bold)] {
        builder.object(
            id,
            &format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_font()
            ),
        );
    }
    builder.object(
        INFO_ID,
        &format!(
            "<< /Title {} /Producer (a11y-heuristics) /CreationDate (D:{}) >>",
            pdf_string(title),
            date
        ),
    );

    builder.finish()
}
