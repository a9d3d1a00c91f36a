// Resume intake: multipart upload parsing and PDF text extraction.

pub mod extractor;
pub mod handlers;
