// src/extractors/mod.rs
pub mod entries;
pub mod entry;
pub mod fields;
pub mod normalize;
pub mod section;
pub mod title;

// Re-export key extraction functions for convenience
#[allow(unused_imports)]
pub use entries::{count_entries, split_entries};
pub use entry::{extract_authors, extract_year};
pub use fields::{
    extract_academic_degrees, extract_areas_of_activity, extract_committee_counts,
    extract_current_institution, extract_languages, extract_name, extract_nationality,
};
pub use normalize::fold_key;
pub use section::publication_blocks;
#[allow(unused_imports)]
pub use title::{extract_title, TitleCascade, TitleMatch, TitleStrategy};
