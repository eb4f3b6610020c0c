// src/extractors/section.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// Start marker of the journal-article section. It repeats in long CVs, so every
// occurrence opens a span.
pub static ARTICLES_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Artigos completos publicados em periódicos")
        .expect("Failed to compile ARTICLES_SECTION_RE")
});

// Inside an articles span only the chronological listing is read.
static CHRONOLOGICAL_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Ordem\s+Cronológica\s*\r?\n").expect("Failed to compile CHRONOLOGICAL_LABEL_RE")
});

// Headings that close the articles listing
const CLOSING_HEADINGS: &[&str] = &[
    "Resumos publicados",
    "Resumos expandidos",
    "Apresentações de Trabalho",
    "Livros publicados",
    "Capítulos de livros",
    "Textos em jornais",
    "Demais tipos de produção",
    "Produção técnica",
    "Trabalhos em eventos",
    "Outras produções",
    "Organização de eventos",
    "Inovação",
    "Eventos",
    "Orientações",
];

static CLOSING_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives = CLOSING_HEADINGS
        .iter()
        .map(|heading| regex::escape(heading))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?im)^\s*(?:{})", alternatives)).expect("Failed to compile CLOSING_HEADING_RE")
});

/// Returns one span per occurrence of `marker`: from the match start up to the
/// next occurrence, the last one running to the end of the document.
pub fn locate_spans<'a>(text: &'a str, marker: &Regex) -> Vec<&'a str> {
    let starts: Vec<usize> = marker.find_iter(text).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

/// Text after the first `start` match, cut at the earliest `end` match (or the
/// end of the document). `None` when the start label is absent.
pub fn bounded_section<'a>(text: &'a str, start: &Regex, end: &Regex) -> Option<&'a str> {
    let label = start.find(text)?;
    let rest = &text[label.end()..];
    let cut = end.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    Some(&rest[..cut])
}

/// The chronological article listings of a document, in document order.
/// Spans without the chronological label contribute nothing.
pub fn publication_blocks(text: &str) -> Vec<&str> {
    let spans = locate_spans(text, &ARTICLES_SECTION_RE);
    tracing::debug!("Found {} article section spans", spans.len());

    spans
        .into_iter()
        .filter_map(|span| {
            let Some(label) = CHRONOLOGICAL_LABEL_RE.find(span) else {
                tracing::trace!("Skipping article span without chronological listing");
                return None;
            };
            let block = &span[label.end()..];
            let block = match CLOSING_HEADING_RE.find(block) {
                Some(closing) => &block[..closing.start()],
                None => block,
            };
            let block = block.trim();
            (!block.is_empty()).then_some(block)
        })
        .collect()
}
