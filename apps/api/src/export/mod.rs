// Document export: job packages → paginated PDF, built in memory.
// Rendering is CPU-bound; handlers run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod handlers;
pub mod pdf;

pub use pdf::{render_packages, ExportError};

/// File name offered to the browser for the download.
pub const EXPORT_FILE_NAME: &str = "job_application_package.pdf";

/// Page geometry and type sizes for the export, in PDF points.
#[derive(Debug, Clone)]
pub struct ExportLayout {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// Same margin on all four sides.
    pub margin_pt: f32,
    pub body_font_size_pt: f32,
    pub heading_font_size_pt: f32,
    pub line_height_pt: f32,
}

impl ExportLayout {
    pub fn text_width_pt(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }
}

impl Default for ExportLayout {
    /// A4 portrait, 1 cm margins, 12pt Helvetica.
    fn default() -> Self {
        Self {
            page_width_pt: 595.28,
            page_height_pt: 841.89,
            margin_pt: 28.35,
            body_font_size_pt: 12.0,
            heading_font_size_pt: 14.0,
            line_height_pt: 15.0,
        }
    }
}
