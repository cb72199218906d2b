use tracing::debug;

/// Applicant-tracking hosts searched by default.
pub const DEFAULT_DOMAINS: &[&str] = &[
    "boards.greenhouse.io",
    "jobs.lever.co",
    "hire.lever.co",
    "jobs.ashbyhq.com",
    "apply.workable.com",
    "ats.rippling.com",
    "app.welcometothejungle.com",
];

/// Exact-phrase role keywords searched by default. Each is already quoted.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "\"business operations\"",
    "\"strategy associate\"",
    "\"chief of staff\"",
    "\"strategy & operations\"",
    "\"strategy and operations\"",
    "\"strategy analyst\"",
    "\"senior strategy analyst\"",
];

/// Builds `site:d1 OR site:d2 ... (kw1 OR kw2 ...)`.
///
/// Inputs are used verbatim. Empty lists produce a malformed clause such as
/// `" ()"`; callers are expected to pass non-empty lists.
pub fn build_query<D, K>(domains: &[D], keywords: &[K]) -> String
where
    D: AsRef<str>,
    K: AsRef<str>,
{
    let domain_query = domains
        .iter()
        .map(|d| format!("site:{}", d.as_ref()))
        .collect::<Vec<_>>()
        .join(" OR ");
    let keyword_query = keywords
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" OR ");

    let query = format!("{domain_query} ({keyword_query})");
    debug!(%query, "Built search query");
    query
}
