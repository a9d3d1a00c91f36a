//! PDF writer for the application package.
//!
//! Layout per package (a "page-group"):
//!   centered bold heading "Job Opportunity #N"
//!   "Job Listing:" + listing text
//!   "Cover Letter:" + cover letter text
//!   "Interview Preparation:" + interview prep text
//!
//! Every package after the first starts on a fresh page. A group that runs past
//! the bottom margin continues on the next page without repeating the heading.
//! The document is assembled in memory and returned as bytes.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;

use crate::export::font_metrics::{
    get_metrics, win_ansi_code, FontFace, FIRST_CHAR, LAST_CHAR,
};
use crate::export::ExportLayout;
use crate::generation::packaging::JobPackage;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("there are no job packages to export")]
    NoPackages,

    #[error("failed to write PDF: {0}")]
    Write(String),
}

/// Renders the packages into a complete PDF document.
pub fn render_packages(
    packages: &[JobPackage],
    layout: &ExportLayout,
) -> Result<Vec<u8>, ExportError> {
    if packages.is_empty() {
        return Err(ExportError::NoPackages);
    }

    let mut canvas = Canvas::new(layout);

    for (idx, package) in packages.iter().enumerate() {
        if idx > 0 {
            canvas.break_page();
        }
        canvas.heading(&format!("Job Opportunity #{}", idx + 1));

        for (label, body) in [
            ("Job Listing:", &package.listing),
            ("Cover Letter:", &package.cover_letter),
            ("Interview Preparation:", &package.interview_prep),
        ] {
            canvas.label(label);
            canvas.body(body);
            canvas.skip_line();
        }
    }

    write_document(canvas.finish(), layout)
}

// ────────────────────────────────────────────────────────────────────────────
// Canvas: turns lines into per-page content operations
// ────────────────────────────────────────────────────────────────────────────

struct Canvas<'a> {
    layout: &'a ExportLayout,
    finished: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    /// Top of the next line, in PDF user space (origin bottom-left).
    cursor_y: f32,
}

impl<'a> Canvas<'a> {
    fn new(layout: &'a ExportLayout) -> Self {
        Self {
            layout,
            finished: Vec::new(),
            current: Vec::new(),
            cursor_y: layout.page_height_pt - layout.margin_pt,
        }
    }

    /// Starts a fresh page. An empty current page is reused, never emitted blank.
    fn break_page(&mut self) {
        if !self.current.is_empty() {
            self.finished.push(std::mem::take(&mut self.current));
        }
        self.cursor_y = self.layout.page_height_pt - self.layout.margin_pt;
    }

    fn heading(&mut self, text: &str) {
        let size = self.layout.heading_font_size_pt;
        let width = get_metrics(FontFace::HelveticaBold).measure_str(text) * size;
        let x = ((self.layout.page_width_pt - width) / 2.0).max(self.layout.margin_pt);
        self.line(FontFace::HelveticaBold, size, size * 2.0, x, text);
    }

    fn label(&mut self, text: &str) {
        let size = self.layout.body_font_size_pt;
        self.line(
            FontFace::HelveticaBold,
            size,
            self.layout.line_height_pt,
            self.layout.margin_pt,
            text,
        );
    }

    fn body(&mut self, text: &str) {
        let size = self.layout.body_font_size_pt;
        let max_width_em = self.layout.text_width_pt() / size;
        for line in get_metrics(FontFace::Helvetica).wrap_text(text, max_width_em) {
            self.line(
                FontFace::Helvetica,
                size,
                self.layout.line_height_pt,
                self.layout.margin_pt,
                &line,
            );
        }
    }

    fn skip_line(&mut self) {
        self.line(
            FontFace::Helvetica,
            self.layout.body_font_size_pt,
            self.layout.line_height_pt,
            self.layout.margin_pt,
            "",
        );
    }

    fn line(&mut self, face: FontFace, size: f32, line_height: f32, x: f32, text: &str) {
        if self.cursor_y - line_height < self.layout.margin_pt {
            if text.is_empty() {
                return;
            }
            self.break_page();
        }
        // Baseline sits a little above the bottom of the line box to leave room for descenders.
        let baseline = self.cursor_y - line_height + (line_height - size) / 2.0 + size * 0.2;
        self.cursor_y -= line_height;

        if text.is_empty() {
            return;
        }

        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![face.resource_name().into(), size.into()]),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.finished.is_empty() {
            self.finished.push(self.current);
        }
        self.finished
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

fn write_document(
    pages: Vec<Vec<Operation>>,
    layout: &ExportLayout,
) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(FontFace::Helvetica));
    let bold_id = doc.add_object(font_dictionary(FontFace::HelveticaBold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::Helvetica.resource_name() => regular_id,
            FontFace::HelveticaBold.resource_name() => bold_id,
        },
    });
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        layout.page_width_pt.into(),
        layout.page_height_pt.into(),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let encoded = Content { operations }
            .encode()
            .map_err(|e| ExportError::Write(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box.clone(),
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Job Application Package"),
        "Producer" => Object::string_literal(concat!("jobgenie-api ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ExportError::Write(e.to_string()))?;
    Ok(buffer)
}

fn font_dictionary(face: FontFace) -> lopdf::Dictionary {
    let widths: Vec<Object> = get_metrics(face)
        .pdf_widths()
        .into_iter()
        .map(Object::Integer)
        .collect();

    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
        "FirstChar" => Object::Integer(FIRST_CHAR.into()),
        "LastChar" => Object::Integer(LAST_CHAR.into()),
        "Widths" => widths,
    }
}

/// Encodes text for a WinAnsiEncoding simple font.
///
/// Latin-1 maps directly; CP1252 punctuation maps to its slot; anything else
/// becomes `?`. Control characters other than tab are dropped.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().filter_map(win_ansi_code).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
