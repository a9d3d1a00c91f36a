// All LLM prompt templates for the generation pipeline.
// Placeholders are replaced verbatim; nothing is escaped or truncated.

/// Keyword extraction. Replace `{job_title}` and `{resume}` before sending.
pub const KEYWORDS_PROMPT_TEMPLATE: &str = "\
You are a helpful assistant. Based on the following resume and the target job title: '{job_title}',
generate a list of 5 to 10 relevant job search keywords.

Resume:
{resume}";

/// Fictional listing generation. Replace `{keywords}` before sending.
///
/// The blank-line rule is what `split_listings` relies on to separate listings.
pub const LISTINGS_PROMPT_TEMPLATE: &str = "\
Create 3 fictional job listings suitable for someone with the following skills/keywords:
{keywords}

Each job listing should include:
- Job Title
- Company Name
- Location
- Job Description (4-5 lines)

Separate consecutive job listings with exactly one blank line.
Do NOT use blank lines inside a single job listing.";

/// Cover letter for one listing. Replace `{listing}` and `{resume}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = "\
Write a professional cover letter for this job listing using the candidate's resume.
The cover letter should:
- Be 3-4 paragraphs
- Highlight relevant skills from the resume
- Match the tone of the job listing
- Not include any fictional details

Job Listing:
{listing}

Resume:
{resume}";

/// Interview questions and answers for one listing.
/// Replace `{listing}` and `{resume}` before sending.
pub const INTERVIEW_PREP_PROMPT_TEMPLATE: &str = "\
Based on this job listing and resume, generate:
1. 5 likely interview questions
2. Suggested answers using the resume content

Format as:
### Questions:
1. Question 1
2. Question 2
...

### Suggested Answers:
1. Answer 1 (using resume details)
2. Answer 2 (using resume details)
...

Job Listing:
{listing}

Resume:
{resume}";

/// Substitutes `{placeholder}` keys in one pass over the template.
///
/// Inserted values are never rescanned, so user text that happens to contain
/// `{resume}` or `{listing}` stays literal.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match values.iter().find(|(key, _)| candidate.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &candidate[key.len()..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
