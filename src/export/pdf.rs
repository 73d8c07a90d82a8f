// src/export/pdf.rs
//
// Paginated A4 rendering of a `Document` with the built-in Helvetica font.

use crate::export::document::{DocSection, Document};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

/// Helvetica averages about half an em per glyph; good enough for column
/// sizing and right alignment.
const GLYPH_EM: f32 = 0.5;

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Page being filled: its content stream and the vertical cursor.
struct PageCursor {
    content: Content,
    content_id: Ref,
    y: f32,
    number: usize,
}

/// Base letter for Central European characters the built-in fonts lack.
fn transliterate(c: char) -> Option<u8> {
    let base = match c {
        'ą' | 'ă' => 'a',
        'Ą' | 'Ă' => 'A',
        'ć' | 'č' => 'c',
        'Ć' | 'Č' => 'C',
        'ď' => 'd',
        'Ď' => 'D',
        'ę' | 'ě' => 'e',
        'Ę' | 'Ě' => 'E',
        'ł' | 'ľ' | 'ĺ' => 'l',
        'Ł' | 'Ľ' | 'Ĺ' => 'L',
        'ń' | 'ň' => 'n',
        'Ń' | 'Ň' => 'N',
        'ő' => 'o',
        'Ő' => 'O',
        'ř' | 'ŕ' => 'r',
        'Ř' | 'Ŕ' => 'R',
        'ś' | 'ş' => 's',
        'Ś' | 'Ş' => 'S',
        'ť' | 'ţ' => 't',
        'Ť' | 'Ţ' => 'T',
        'ů' | 'ű' => 'u',
        'Ů' | 'Ű' => 'U',
        'ź' | 'ż' => 'z',
        'Ź' | 'Ż' => 'Z',
        _ => return None,
    };
    Some(base as u8)
}

/// Map text to WinAnsi bytes. Latin-1 maps one to one; a few extra glyphs
/// live in 0x80..0x9F; Central European letters drop their accent; the rest
/// becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            'Š' => 0x8A,
            'Ž' => 0x8E,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            'š' => 0x9A,
            'ž' => 0x9E,
            '→' => b'>',
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            c => transliterate(c).unwrap_or(b'?'),
        })
        .collect()
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_EM
}

/// Cut `text` so it fits in `width` points, marking the cut with `.`.
fn fit(text: &str, width: f32, size: f32) -> String {
    let max_chars = ((width - 6.0) / (size * GLYPH_EM)).floor().max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut s: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    s.push('.');
    s
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let next_id = 4;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),

            page_w: 595.0,
            page_h: 842.0,
            margin: 40.0,
            row_h: 16.0,

            next_id,
            font_id,

            font_size: 8.0,
            header_font_size: 8.5,
            title_font_size: 16.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self, number: usize) -> PageCursor {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);
        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        PageCursor {
            content: Content::new(),
            content_id,
            y: self.page_h - self.margin,
            number,
        }
    }

    fn finalize_page(&mut self, mut page: PageCursor, footer: &str) {
        let pg = format!("Page {}", page.number);
        self.draw_text(&mut page.content, self.margin, self.margin - 20.0, self.font_size, footer);
        self.draw_text(
            &mut page.content,
            self.page_w - self.margin - text_width(&pg, self.font_size),
            self.margin - 20.0,
            self.font_size,
            &pg,
        );
        self.pdf.stream(page.content_id, &page.content.finish());
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let bytes = win_ansi(text);
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn fill_band(&self, content: &mut Content, y: f32, w: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray);
        content.rect(self.margin, y, w, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.75, 0.75, 0.75);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        numeric: &[bool],
        row: &[String],
        font_size: f32,
    ) {
        let mut x = self.margin;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths.get(i).copied().unwrap_or(0.0);
            let shown = fit(text, w, font_size);
            let tx = if numeric.get(i).copied().unwrap_or(false) {
                x + w - 3.0 - text_width(&shown, font_size)
            } else {
                x + 3.0
            };
            self.draw_text(content, tx, y + 4.5, font_size, &shown);
            self.draw_cell_borders(content, x, y, w, self.row_h);
            x += w;
        }
    }

    /// Column widths from headers and content, scaled to the printable width.
    fn compute_col_widths(&self, section: &DocSection) -> Vec<f32> {
        let mut widths: Vec<f32> = section
            .headers
            .iter()
            .map(|h| text_width(h, self.header_font_size) + 8.0)
            .collect();

        for row in section.rows.iter().chain(section.totals.iter()) {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = w.max(text_width(cell, self.font_size) + 8.0);
                }
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;
        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }
        widths
    }

    /// Start a new page when fewer than `needed` points are left.
    fn ensure_space(&mut self, page: PageCursor, needed: f32, footer: &str) -> PageCursor {
        if page.y - needed >= self.margin {
            return page;
        }
        let next = page.number + 1;
        self.finalize_page(page, footer);
        self.new_page(next)
    }

    fn draw_table_header(&self, page: &mut PageCursor, section: &DocSection, widths: &[f32]) {
        page.y -= self.row_h;
        let table_w: f32 = widths.iter().sum();
        self.fill_band(&mut page.content, page.y, table_w, 0.85);
        self.draw_row(
            &mut page.content,
            page.y,
            widths,
            &section.numeric,
            &section.headers,
            self.header_font_size,
        );
    }

    fn write_section(&mut self, mut page: PageCursor, section: &DocSection, footer: &str) -> PageCursor {
        let widths = self.compute_col_widths(section);
        let table_w: f32 = widths.iter().sum();

        // title, header and at least one row stay together
        page = self.ensure_space(page, 24.0 + 2.0 * self.row_h, footer);
        page.y -= 24.0;
        self.draw_text(&mut page.content, self.margin, page.y + 6.0, 11.0, &section.title);
        self.draw_table_header(&mut page, section, &widths);

        for (i, row) in section.rows.iter().enumerate() {
            let before = page.number;
            page = self.ensure_space(page, self.row_h, footer);
            if page.number != before {
                self.draw_table_header(&mut page, section, &widths);
            }
            page.y -= self.row_h;
            if i % 2 == 1 {
                self.fill_band(&mut page.content, page.y, table_w, 0.96);
            }
            self.draw_row(
                &mut page.content,
                page.y,
                &widths,
                &section.numeric,
                row,
                self.font_size,
            );
        }

        for row in &section.totals {
            let before = page.number;
            page = self.ensure_space(page, self.row_h, footer);
            if page.number != before {
                self.draw_table_header(&mut page, section, &widths);
            }
            page.y -= self.row_h;
            self.fill_band(&mut page.content, page.y, table_w, 0.88);
            self.draw_row(
                &mut page.content,
                page.y,
                &widths,
                &section.numeric,
                row,
                self.header_font_size,
            );
        }

        page
    }

    /// Lay out the whole document.
    pub fn write_document(&mut self, doc: &Document) {
        let footer = format!("Generated {}", doc.generated_at);
        let mut page = self.new_page(1);

        page.y -= self.title_font_size;
        self.draw_text(&mut page.content, self.margin, page.y, self.title_font_size, &doc.title);
        page.y -= 8.0;

        for (label, value) in &doc.header {
            page.y -= 13.0;
            self.draw_text(
                &mut page.content,
                self.margin,
                page.y,
                10.0,
                &format!("{}: {}", label, value),
            );
        }

        if doc.sections.is_empty() {
            page.y -= 30.0;
            self.draw_text(
                &mut page.content,
                self.margin,
                page.y,
                10.0,
                "No data for the selected period.",
            );
        }

        for section in &doc.sections {
            page = self.write_section(page, section, &footer);
        }

        self.finalize_page(page, &footer);
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();
        self.pdf.finish()
    }
}

/// Render `doc` to PDF bytes.
pub fn document_to_pdf(doc: &Document) -> Vec<u8> {
    let mut pdf = PdfManager::new();
    pdf.write_document(doc);
    pdf.finish()
}
