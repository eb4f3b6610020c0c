// src/extractors/fields.rs
//! Document-level field extractors.
//!
//! Every extractor is total: a missing label or section yields the neutral
//! value (`NOT_INFORMED`, an empty list, zero counts) and never affects the
//! other fields of the profile.

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::entries::count_entries;
use crate::extractors::section::bounded_section;
use crate::profile::{
    push_unique, AreasOfActivity, CommitteeCounts, Degree, DegreeType, NAME_NOT_FOUND, NOT_INFORMED,
};

// --- Constants ---
// How far before a "<year> - Atual" marker the institution name is looked for.
const INSTITUTION_LOOKBACK_CHARS: usize = 500;
const MIN_INSTITUTION_LINE_CHARS: usize = 5;

const KNOWN_LANGUAGES: &[&str] = &[
    "Português", "Inglês", "Espanhol", "Francês", "Alemão", "Italiano", "Japonês", "Chinês",
    "Mandarim", "Coreano", "Russo", "Árabe", "Hebraico", "Latim", "Libras",
];

const UPPERCASE_START: &str = "A-ZÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖ×ØÙÚÛÜÝÞß";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("Failed to compile field pattern {}: {}", pattern, e))
}

// --- Name & Nationality ---
static NAME_LABEL_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Identificação\s+Nome\s+([^\n]+)"));
static NAME_TRAILER_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Dados cadastrais.*$"));
static NAME_FALLBACK_RE: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"(?m)^([{u}][a-zà-ú]+(?:\s+[{u}][a-zà-ú]+)+)",
        u = UPPERCASE_START
    ))
});
static NATIONALITY_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)Pa[íi]s de Nacionalidade\s*\n\s*([^\n]+)"));

/// Researcher name from the identification block, else the first line starting
/// with two or more capitalized words.
pub fn extract_name(text: &str) -> String {
    if let Some(caps) = NAME_LABEL_RE.captures(text) {
        let name = NAME_TRAILER_RE.replace(caps[1].trim(), "").trim().to_string();
        if !name.is_empty() {
            return name;
        }
    }

    NAME_FALLBACK_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| NAME_NOT_FOUND.to_string())
}

pub fn extract_nationality(text: &str) -> String {
    NATIONALITY_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| NOT_INFORMED.to_string())
}

// --- Current Institution ---
static PROFESSIONAL_START_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Atuação Profissional"));
static PROFESSIONAL_END_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)Projetos de pesquisa|Projetos de extensão|Áreas de atuação|Idiomas")
});
static PRESENT_MARKER_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)\d{4}\s*-\s*Atual"));
static BOILERPLATE_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^(?:Vínculo|Enquadramento|Regime|Carga horária)"));
static YEAR_RANGE_LINE_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\d{4}\s*-"));
static BRAZIL_LOCATION_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i),\s*[A-Z]+,\s*Brasil"));
static BRAZIL_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i),\s*[A-Z]+,\s*Brasil\.?$"));
static CAPITALIZED_LINE_RE: Lazy<Regex> = Lazy::new(|| compile(&format!(r"^[{}]", UPPERCASE_START)));
static LOCATION_TAIL_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i),\s*[A-Z]+,.*$"));

/// Institution of the first "<year> - Atual" (present) appointment that has a
/// recognizable institution line within the 500 characters before it.
///
/// Only the professional-activity section is scanned when the CV has one.
pub fn extract_current_institution(text: &str) -> String {
    let scope = bounded_section(text, &PROFESSIONAL_START_RE, &PROFESSIONAL_END_RE).unwrap_or(text);

    for marker in PRESENT_MARKER_RE.find_iter(scope) {
        let before = &scope[..marker.start()];
        let window_start = before
            .char_indices()
            .rev()
            .nth(INSTITUTION_LOOKBACK_CHARS - 1)
            .map(|(i, _)| i)
            .unwrap_or(0);
        let window = &before[window_start..];

        tracing::trace!("Scanning for institution before present marker '{}'", marker.as_str());
        if let Some(institution) = institution_in_window(window) {
            tracing::debug!("Current institution resolved: {}", institution);
            return institution;
        }
    }

    NOT_INFORMED.to_string()
}

// Nearest line first.
fn institution_in_window(window: &str) -> Option<String> {
    for line in window.split('\n').rev() {
        let line = line.trim();

        if line.chars().count() < MIN_INSTITUTION_LINE_CHARS
            || BOILERPLATE_RE.is_match(line)
            || YEAR_RANGE_LINE_RE.is_match(line)
        {
            continue;
        }

        if BRAZIL_LOCATION_RE.is_match(line) {
            let name = BRAZIL_SUFFIX_RE.replace(line, "").trim().to_string();
            if name.chars().count() > MIN_INSTITUTION_LINE_CHARS {
                return Some(name);
            }
        }

        if CAPITALIZED_LINE_RE.is_match(line) {
            let name = LOCATION_TAIL_RE.replace(line, "").trim().to_string();
            let starts_with_digit = name.chars().next().map_or(false, |c| c.is_ascii_digit());
            if name.chars().count() > MIN_INSTITUTION_LINE_CHARS && !starts_with_digit {
                return Some(name);
            }
        }
    }
    None
}

// --- Academic Degrees ---
static DEGREES_START_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Formação acadêmica/titulação"));
static DEGREES_END_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)Formação Complementar|Atuação Profissional"));

// Evaluated in this order; each pattern contributes all of its matches.
static DEGREE_PATTERNS: Lazy<Vec<(DegreeType, Regex)>> = Lazy::new(|| {
    vec![
        (DegreeType::Doctorate, compile(r"(?i)Doutorado(?:\s+em\s+andamento)?\s+em\s+([^\n.]+)")),
        (DegreeType::Masters, compile(r"(?i)Mestrado(?:\s+em\s+andamento)?\s+em\s+([^\n.]+)")),
        (DegreeType::Specialization, compile(r"(?i)Especialização\s+em\s+([^\n.]+)")),
        (DegreeType::Bachelors, compile(r"(?i)Graduação(?:\s+em\s+andamento)?\s+em\s+([^\n.]+)")),
        (DegreeType::Postdoc, compile(r"(?i)Pós-Doutorado")),
        (DegreeType::Habilitation, compile(r"(?i)Livre-Docência")),
    ]
});

pub fn extract_academic_degrees(text: &str) -> Vec<Degree> {
    let Some(section) = bounded_section(text, &DEGREES_START_RE, &DEGREES_END_RE) else {
        return Vec::new();
    };

    let mut degrees = Vec::new();
    for (degree_type, pattern) in DEGREE_PATTERNS.iter() {
        for caps in pattern.captures_iter(section) {
            let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            degrees.push(Degree {
                degree_type: *degree_type,
                area: caps.get(1).map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
                in_progress: matched.to_lowercase().contains("andamento"),
            });
        }
    }
    degrees
}

// --- Areas of Activity ---
static AREAS_START_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Áreas de atuação"));
static AREAS_END_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Idiomas|Prêmios|Produções"));
static BROAD_AREA_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Grande [áa]rea:\s*([^/\n]+)"));
// "Área:" only as its own field, never the tail of "Grande área:" or "Subárea:".
static AREA_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)(?:^|/)\s*[Áá]rea:\s*([^/\n]+)"));
static SUB_AREA_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Sub[áa]rea:\s*([^/\n.]+)"));

pub fn extract_areas_of_activity(text: &str) -> AreasOfActivity {
    let mut areas = AreasOfActivity::default();
    let Some(section) = bounded_section(text, &AREAS_START_RE, &AREAS_END_RE) else {
        return areas;
    };

    for line in section.lines() {
        let tiers: [(&Regex, &mut Vec<String>); 3] = [
            (&*BROAD_AREA_RE, &mut areas.broad),
            (&*AREA_RE, &mut areas.area),
            (&*SUB_AREA_RE, &mut areas.sub),
        ];
        for (pattern, values) in tiers {
            if let Some(caps) = pattern.captures(line) {
                let value = caps[1].trim();
                if !value.is_empty() {
                    push_unique(values, value);
                }
            }
        }
    }
    areas
}

// --- Languages ---
static LANGUAGES_START_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Idiomas"));
static LANGUAGES_END_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)Prêmios|Produções|Áreas de atuação|Atuação Profissional"));

pub fn extract_languages(text: &str) -> Vec<String> {
    let mut languages = Vec::new();
    let Some(section) = bounded_section(text, &LANGUAGES_START_RE, &LANGUAGES_END_RE) else {
        return languages;
    };

    for line in section.lines() {
        let line = line.trim();
        for language in KNOWN_LANGUAGES {
            let listed = line == *language
                || line
                    .strip_prefix(language)
                    .map_or(false, |rest| rest.starts_with(' '));
            if listed {
                push_unique(&mut languages, language);
            }
        }
    }
    languages
}

// --- Committees ---
static COMMITTEES_START_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Bancas"));
static COMMITTEES_END_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)Eventos|Orientações|Página gerada"));

static UNDERGRAD_RE: Lazy<(Regex, Regex)> = Lazy::new(|| {
    (
        compile(r"(?i)Trabalhos de conclusão de curso de graduação"),
        compile(r"(?i)Dissertações de mestrado|Teses de doutorado|Qualificações|Exames de qualificação|\n\n\n"),
    )
});
static MASTERS_RE: Lazy<(Regex, Regex)> = Lazy::new(|| {
    (
        compile(r"(?i)Dissertações de mestrado"),
        compile(r"(?i)Teses de doutorado|Qualificações|Exames de qualificação|Trabalhos de conclusão|\n\n\n"),
    )
});
static DOCTORATE_RE: Lazy<(Regex, Regex)> = Lazy::new(|| {
    (
        compile(r"(?i)Teses de doutorado"),
        compile(r"(?i)Qualificações|Exames de qualificação|Trabalhos de conclusão|Dissertações|\n\n\n"),
    )
});
static QUALIFICATION_RE: Lazy<(Regex, Regex)> = Lazy::new(|| {
    (
        compile(r"(?i)Qualificações|Exames de qualificação"),
        compile(r"(?i)Trabalhos de conclusão|Dissertações|Teses|\n\n\n"),
    )
});

pub fn extract_committee_counts(text: &str) -> CommitteeCounts {
    let Some(section) = bounded_section(text, &COMMITTEES_START_RE, &COMMITTEES_END_RE) else {
        return CommitteeCounts::default();
    };

    let count = |bounds: &(Regex, Regex)| {
        bounded_section(section, &bounds.0, &bounds.1)
            .map(count_entries)
            .unwrap_or(0)
    };

    let undergrad = count(&*UNDERGRAD_RE);
    let masters = count(&*MASTERS_RE);
    let doctorate = count(&*DOCTORATE_RE);
    let qualification = count(&*QUALIFICATION_RE);

    CommitteeCounts {
        total: undergrad + masters + doctorate + qualification,
        undergrad,
        masters,
        doctorate,
        qualification,
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_name_from_identification_label() {
        let text = "Identificação\nNome\nMaria Aparecida Souza Dados cadastrais\nNome em citações";
        assert_eq!(extract_name(text), "Maria Aparecida Souza");
    }

    #[test]
    fn test_extract_name_falls_back_to_capitalized_line() {
        let text = "curriculum\nJoão Pedro Almeida\nbolsista de produtividade";
        assert_eq!(extract_name(text), "João Pedro Almeida");
        assert_eq!(extract_name("nothing useful here"), NAME_NOT_FOUND);
    }

    #[test]
    fn test_extract_nationality() {
        assert_eq!(extract_nationality("País de Nacionalidade\n  Brasil\n"), "Brasil");
        assert_eq!(extract_nationality("Pais de nacionalidade \nPortugal"), "Portugal");
        assert_eq!(extract_nationality("no label"), NOT_INFORMED);
    }

    #[test]
    fn test_current_institution_with_region_suffix() {
        let text = "Atuação Profissional\n\
                    Universidade Federal de Minas Gerais, UFMG, Brasil.\n\
                    Vínculo institucional\n\
                    2015 - Atual\n\
                    Vínculo: Servidor Público, Enquadramento Funcional: Professor\n\
                    Idiomas\n";
        assert_eq!(extract_current_institution(text), "Universidade Federal de Minas Gerais");
    }

    #[test]
    fn test_current_institution_with_capitalized_line() {
        let text = "Atuação Profissional\n\
                    Instituto Tecnológico de Aeronáutica, ITA, São José dos Campos\n\
                    2010 - 2014\n\
                    Regime: Dedicação exclusiva\n\
                    2019 - Atual\n";
        assert_eq!(extract_current_institution(text), "Instituto Tecnológico de Aeronáutica");
    }

    #[test]
    fn test_current_institution_beyond_lookback_is_not_informed() {
        let filler = "x".repeat(600);
        let text = format!("Universidade Estadual de Campinas, UNICAMP, Brasil.\n{}\n2018 - Atual", filler);
        assert_eq!(extract_current_institution(&text), NOT_INFORMED);
        assert_eq!(extract_current_institution("no present marker"), NOT_INFORMED);
    }

    #[test]
    fn test_first_marker_with_institution_wins() {
        let text = "Atuação Profissional\n\
                    Universidade de São Paulo, USP, Brasil.\n2012 - Atual\n\
                    Universidade Federal do Rio de Janeiro, UFRJ, Brasil.\n2016 - Atual\n";
        assert_eq!(extract_current_institution(text), "Universidade de São Paulo");
    }

    #[test]
    fn test_extract_academic_degrees() {
        let text = "Formação acadêmica/titulação\n\
                    2018\nDoutorado em andamento em Ciência da Computação.\n\
                    2014 - 2016\nMestrado em Engenharia Elétrica.\n\
                    2008 - 2012\nGraduação em Física.\n\
                    Pós-Doutorado.\n\
                    Formação Complementar\nMestrado em Outra Coisa.\n";
        let degrees = extract_academic_degrees(text);
        assert_eq!(degrees.len(), 4, "Degrees after 'Formação Complementar' must be ignored");
        assert_eq!(degrees[0].degree_type, DegreeType::Doctorate);
        assert_eq!(degrees[0].area, "Ciência da Computação");
        assert!(degrees[0].in_progress);
        assert_eq!(degrees[1].degree_type, DegreeType::Masters);
        assert!(!degrees[1].in_progress);
        assert_eq!(degrees[2].degree_type, DegreeType::Bachelors);
        assert_eq!(degrees[2].area, "Física");
        assert_eq!(degrees[3].degree_type, DegreeType::Postdoc);
        assert_eq!(degrees[3].area, "");
        assert!(extract_academic_degrees("no section").is_empty());
    }

    #[test]
    fn test_extract_areas_of_activity() {
        let text = "Áreas de atuação\n\
                    1.\nGrande área: Ciências Exatas e da Terra / Área: Ciência da Computação / Subárea: Sistemas de Computação.\n\
                    2.\nGrande área: Ciências Exatas e da Terra / Área: Matemática / Subárea: Matemática Aplicada.\n\
                    Idiomas\nGrande área: Ignored\n";
        let areas = extract_areas_of_activity(text);
        assert_eq!(areas.broad, vec!["Ciências Exatas e da Terra"]);
        assert_eq!(areas.area, vec!["Ciência da Computação", "Matemática"]);
        assert_eq!(areas.sub, vec!["Sistemas de Computação", "Matemática Aplicada"]);
    }

    #[test]
    fn test_extract_languages_uses_vocabulary_and_dedups() {
        let text = "Idiomas\nInglês\nCompreende Bem, Fala Bem\nEspanhol Compreende Razoavelmente\nInglês\nKlingon\nPortuguêsa\nPrêmios e títulos\nFrancês";
        assert_eq!(extract_languages(text), vec!["Inglês", "Espanhol"]);
        assert!(extract_languages("nothing").is_empty());
    }

    #[test]
    fn test_extract_committee_counts() {
        let text = "Bancas\n\
                    Participação em bancas de trabalhos de conclusão\n\
                    Dissertações de mestrado\n1.\nBanca A\n2.\nBanca B\n\
                    Teses de doutorado\n1.\nBanca C\n\
                    Qualificações de Doutorado\n1.\nBanca D\n2.\nBanca E\n3.\nBanca F\n\
                    Trabalhos de conclusão de curso de graduação\n1.\nBanca G\n\
                    Eventos\n1.\nNot a committee\n";
        let counts = extract_committee_counts(text);
        assert_eq!(counts.masters, 2);
        assert_eq!(counts.doctorate, 1);
        assert_eq!(counts.qualification, 3);
        assert_eq!(counts.undergrad, 1);
        assert_eq!(counts.total, 7);
        assert_eq!(extract_committee_counts("no committees"), CommitteeCounts::default());
    }
}
