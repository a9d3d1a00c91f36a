//! The four prompt operations. Each fills a fixed template, makes exactly one
//! generation call with fixed sampling, and returns the response text untouched.

use crate::generation::prompts::{
    fill_template, COVER_LETTER_PROMPT_TEMPLATE, INTERVIEW_PREP_PROMPT_TEMPLATE,
    KEYWORDS_PROMPT_TEMPLATE, LISTINGS_PROMPT_TEMPLATE,
};
use crate::llm_client::{LlmError, Sampling, TextGenerator};

pub const KEYWORDS_SAMPLING: Sampling = Sampling {
    model: "gpt-4o-mini",
    temperature: 0.3,
};

pub const LISTINGS_SAMPLING: Sampling = Sampling {
    model: "gpt-4",
    temperature: 0.5,
};

pub const COVER_LETTER_SAMPLING: Sampling = Sampling {
    model: "gpt-4",
    temperature: 0.4,
};

pub const INTERVIEW_PREP_SAMPLING: Sampling = Sampling {
    model: "gpt-4",
    temperature: 0.4,
};

/// Free-text list of search keywords for the resume and target title.
pub async fn extract_keywords(
    llm: &dyn TextGenerator,
    resume: &str,
    job_title: &str,
) -> Result<String, LlmError> {
    let prompt = fill_template(
        KEYWORDS_PROMPT_TEMPLATE,
        &[("{job_title}", job_title), ("{resume}", resume)],
    );
    llm.complete(&prompt, KEYWORDS_SAMPLING).await
}

/// Free text that should hold three blank-line-separated fictional listings.
pub async fn generate_listings(llm: &dyn TextGenerator, keywords: &str) -> Result<String, LlmError> {
    let prompt = fill_template(LISTINGS_PROMPT_TEMPLATE, &[("{keywords}", keywords)]);
    llm.complete(&prompt, LISTINGS_SAMPLING).await
}

pub async fn generate_cover_letter(
    llm: &dyn TextGenerator,
    resume: &str,
    listing: &str,
) -> Result<String, LlmError> {
    llm.complete(
        &fill_listing_template(COVER_LETTER_PROMPT_TEMPLATE, resume, listing),
        COVER_LETTER_SAMPLING,
    )
    .await
}

/// Questions and suggested answers under `### Questions:` / `### Suggested Answers:`.
pub async fn generate_interview_prep(
    llm: &dyn TextGenerator,
    resume: &str,
    listing: &str,
) -> Result<String, LlmError> {
    llm.complete(
        &fill_listing_template(INTERVIEW_PREP_PROMPT_TEMPLATE, resume, listing),
        INTERVIEW_PREP_SAMPLING,
    )
    .await
}

fn fill_listing_template(template: &str, resume: &str, listing: &str) -> String {
    fill_template(template, &[("{listing}", listing), ("{resume}", resume)])
}
