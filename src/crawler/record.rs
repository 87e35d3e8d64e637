//! Records produced by the crawl

/// One quotation scraped from a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    /// The quotation text, whitespace-trimmed
    pub text: String,

    /// The author's display name
    pub author: String,

    /// Site-relative path to the author's bio page (not validated)
    pub bio_link: String,
}

/// Biographical facts for one author
///
/// Both fields are set together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorDetails {
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
}

impl AuthorDetails {
    /// Details for an author whose page yielded both facts
    pub fn new(birth_date: String, birth_place: String) -> Self {
        Self {
            birth_date: Some(birth_date),
            birth_place: Some(birth_place),
        }
    }

    /// The absent/absent pair
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_absent(&self) -> bool {
        self.birth_date.is_none() && self.birth_place.is_none()
    }
}

/// A quote together with its author's details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedQuote {
    pub quote: QuoteRecord,
    pub author: AuthorDetails,
}
