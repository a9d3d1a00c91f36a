//! Packaging: orchestrates one generation run end to end.
//!
//! Flow: extract_keywords → generate_listings → split_listings →
//!       per listing (in order): generate_cover_letter, generate_interview_prep.
//!
//! Calls are strictly sequential. Any failure aborts the run and no packages are
//! returned; there is no partial result and no retry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::generation::listings::split_listings;
use crate::generation::pipeline::{
    extract_keywords, generate_cover_letter, generate_interview_prep, generate_listings,
};
use crate::llm_client::{LlmError, TextGenerator};

/// Number of listings the listing prompt asks for. Only used to flag mismatches.
pub const REQUESTED_LISTINGS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One listing with the texts generated for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPackage {
    pub listing: String,
    pub cover_letter: String,
    pub interview_prep: String,
}

/// Everything one run produced. Nothing is kept server-side after the response.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRun {
    pub run_id: Uuid,
    pub job_title: String,
    pub resume_text: String,
    pub keywords: String,
    pub packages: Vec<JobPackage>,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full pipeline for one resume and target title.
pub async fn run_generation(
    llm: &dyn TextGenerator,
    resume_text: String,
    job_title: String,
) -> Result<GenerationRun, LlmError> {
    let run_id = Uuid::new_v4();

    // Step 1: Keywords
    info!(%run_id, "Extracting keywords");
    let keywords = extract_keywords(llm, &resume_text, &job_title).await?;

    // Step 2: Listings, from the keyword text only
    info!(%run_id, "Generating listings");
    let listings_response = generate_listings(llm, &keywords).await?;
    let listings = split_listings(&listings_response);

    if listings.len() != REQUESTED_LISTINGS {
        warn!(
            %run_id,
            "Listing response split into {} blocks (requested {}); packaging what was returned",
            listings.len(),
            REQUESTED_LISTINGS
        );
    }

    // Step 3: Per-listing texts
    let packages = build_packages(llm, &resume_text, listings).await?;

    info!(%run_id, packages = packages.len(), "Generation run complete");

    Ok(GenerationRun {
        run_id,
        job_title,
        resume_text,
        keywords,
        packages,
        generated_at: Utc::now(),
    })
}

/// Generates the cover letter, then the interview prep, for each listing in order.
pub async fn build_packages(
    llm: &dyn TextGenerator,
    resume_text: &str,
    listings: Vec<String>,
) -> Result<Vec<JobPackage>, LlmError> {
    let total = listings.len();
    let mut packages = Vec::with_capacity(total);

    for (idx, listing) in listings.into_iter().enumerate() {
        info!("Packaging listing {}/{}", idx + 1, total);
        let cover_letter = generate_cover_letter(llm, resume_text, &listing).await?;
        let interview_prep = generate_interview_prep(llm, resume_text, &listing).await?;
        packages.push(JobPackage {
            listing,
            cover_letter,
            interview_prep,
        });
    }

    Ok(packages)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
