//! Fixed vocabularies: genre ids, genre synonyms, languages, certifications.

use catalog::GenreId;

/// Provider genre ids by lowercase name
pub const GENRE_WORDS: &[(&str, GenreId)] = &[
    ("action", 28),
    ("adventure", 12),
    ("animation", 16),
    ("comedy", 35),
    ("crime", 80),
    ("documentary", 99),
    ("drama", 18),
    ("family", 10751),
    ("fantasy", 14),
    ("history", 36),
    ("horror", 27),
    ("music", 10402),
    ("mystery", 9648),
    ("romance", 10749),
    ("science fiction", 878),
    ("thriller", 53),
    ("war", 10752),
    ("western", 37),
    ("tv movie", 10770),
];

/// Informal names and the genres they stand for
pub const GENRE_SYNONYMS: &[(&str, &[&str])] = &[
    ("sci fi", &["science fiction"]),
    ("scifi", &["science fiction"]),
    ("science-fiction", &["science fiction"]),
    ("romcom", &["romance", "comedy"]),
    ("rom-com", &["romance", "comedy"]),
    ("slasher", &["horror"]),
    ("monster", &["horror"]),
    ("superhero", &["action"]),
    ("comic book", &["action"]),
    ("spy", &["action"]),
    ("detective", &["mystery"]),
    ("whodunit", &["mystery"]),
    ("noir", &["crime"]),
    ("biopic", &["history"]),
    ("period piece", &["history"]),
    ("stoner", &["comedy"]),
    ("raunchy", &["comedy"]),
    ("buddy", &["comedy"]),
    ("coming of age", &["drama"]),
    ("tearjerker", &["drama"]),
    ("anime", &["animation"]),
    ("kids", &["family"]),
    ("family friendly", &["family"]),
    ("feel good", &["comedy"]),
];

/// Language names and their ISO 639-1 codes
pub const LANG_SYNONYMS: &[(&str, &str)] = &[
    ("english", "en"),
    ("spanish", "es"),
    ("french", "fr"),
    ("german", "de"),
    ("italian", "it"),
    ("japanese", "ja"),
    ("korean", "ko"),
    ("hindi", "hi"),
    ("chinese", "zh"),
    ("mandarin", "zh"),
    ("cantonese", "zh"),
    ("portuguese", "pt"),
    ("russian", "ru"),
    ("arabic", "ar"),
];

/// US certification phrases, checked in this order
pub const CERT_SYNONYMS: &[(&str, &str)] = &[
    ("g", "G"),
    ("pg", "PG"),
    ("pg-13", "PG-13"),
    ("pg13", "PG-13"),
    ("rated pg-13", "PG-13"),
    ("r", "R"),
    ("rated r", "R"),
    ("nc-17", "NC-17"),
    ("nc17", "NC-17"),
    ("family friendly", "PG"),
    ("kids", "PG"),
];

/// Certifications that count as made for younger audiences
pub const KID_CERTIFICATIONS: &[&str] = &["G", "PG", "PG-13"];

/// Certifications that mark an adult seed
pub const MATURE_CERTIFICATIONS: &[&str] = &["R", "NC-17"];

pub fn genre_id(name: &str) -> Option<GenreId> {
    GENRE_WORDS
        .iter()
        .find(|(word, _)| *word == name)
        .map(|(_, id)| *id)
}

/// A genre typed by a user: any case, surrounding spaces ignored.
///
/// Accepts a genre name ("Science Fiction") or a known numeric id ("878").
pub fn genre_from_user(input: &str) -> Option<GenreId> {
    let input = input.trim();
    if let Ok(id) = input.parse::<GenreId>() {
        return genre_name(id).map(|_| id);
    }
    genre_id(&input.to_lowercase())
}

pub fn genre_name(id: GenreId) -> Option<&'static str> {
    GENRE_WORDS
        .iter()
        .find(|(_, gid)| *gid == id)
        .map(|(word, _)| *word)
}
