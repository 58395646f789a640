// All LLM prompt constants for the default collaborators.

/// System prompt for job-posting parsing. Enforces JSON-only output.
pub const JOB_PARSE_SYSTEM: &str =
    "You are an expert job description analyst. \
    Extract the discrete requirements a candidate would be evaluated against. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Job parsing prompt template. Replace `{job_text}` before sending.
pub const JOB_PARSE_TEMPLATE: &str = r#"Extract every meaningful requirement element from the following job posting.

Return a JSON ARRAY with this EXACT schema per element (no extra fields):
[
  {
    "text": "Rust",
    "category": "skill",
    "tags": ["language", "systems"],
    "context": "5+ years of Rust required for our core services team."
  }
]

Rules for extraction:

CATEGORY (pick exactly one per element):
- "keyword": a literal term the posting repeats or emphasizes
- "skill": a technology, language, tool, or technique
- "attribute": a soft quality ("ownership", "communication", "mentoring")
- "experience": a demand about track record ("5+ years", "led a team", "shipped to production")
- "concept": a domain or methodology ("distributed systems", "agile", "fintech")

CONTEXT: the full sentence the element appears in, verbatim from the posting.
TAGS: 1-3 short lowercase labels of your choice.

Extract ALL meaningful elements. Split compound requirements into one element each.
Do NOT invent elements that are not in the posting.

JOB POSTING:
{job_text}"#;

/// System prompt for resume parsing. Enforces JSON-only output.
pub const RESUME_PARSE_SYSTEM: &str =
    "You are an expert resume analyst. \
    Extract the skills, achievements, and experience claims a resume makes. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume parsing prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_TEMPLATE: &str = r#"Extract every meaningful element from the following resume.

Return a JSON ARRAY with this EXACT schema per element (no extra fields):
[
  {
    "text": "Rust",
    "tags": ["language"],
    "context": "Built high-throughput ingestion services in Rust and Tokio."
  }
]

Rules for extraction:
- One element per distinct skill, tool, achievement, or experience claim.
- CONTEXT is the sentence or bullet the element appears in, verbatim.
- TAGS: 1-3 short lowercase labels of your choice.
- Do NOT invent elements that are not in the resume.

RESUME:
{resume_text}"#;

/// System prompt for semantic matching. Enforces JSON-only output.
pub const MATCH_SYSTEM: &str =
    "You are an expert at judging whether a resume demonstrates a job requirement. \
    Compare resume elements against job elements and report every plausible pairing. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Matching prompt template.
/// Replace `{resume_elements_json}` and `{job_elements_json}` before sending.
pub const MATCH_TEMPLATE: &str = r#"Match resume elements against job elements.

Return a JSON ARRAY with this EXACT schema per match (no extra fields):
[
  {
    "resume_element": "Rust",
    "job_element": "rust",
    "match_type": "exact",
    "confidence": 1.0
  }
]

MATCH TYPES (pick exactly one per match):
- "exact": same term, case or formatting aside ("Rust" vs "rust")
- "synonym": interchangeable terms ("k8s" vs "Kubernetes", "Postgres" vs "PostgreSQL")
- "related": adjacent skills where one implies working ability in the other ("Tokio" vs "async Rust")
- "semantic": the resume demonstrates the requirement without naming it ("led a team of 5" vs "leadership")

CONFIDENCE: 0.0-1.0, how sure you are the resume element evidences the job element.

`job_element` MUST be the job element's normalized_text exactly as given.
Report every plausible pairing; a job element may appear in several matches.
Omit pairings with confidence below 0.3. Do NOT pad with weak matches.

RESUME ELEMENTS:
{resume_elements_json}

JOB ELEMENTS:
{job_elements_json}"#;
