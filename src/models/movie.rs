use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// External-catalog identifier convention: case-insensitive `tt` followed
/// by digits. Compiled once, used for every record.
static IMDB_ID_PATTERN: OnceLock<Regex> = OnceLock::new();

fn imdb_id_pattern() -> &'static Regex {
    IMDB_ID_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^tt\d+$").expect("imdb id regex must compile")
    })
}

/// Returns true when the trimmed candidate follows the IMDb id convention.
///
/// The source datasets mix IMDb ids with provider-numeric ids, so this is
/// the gate that decides whether a poster lookup can go by id at all.
pub fn looks_like_imdb_id(candidate: &str) -> bool {
    imdb_id_pattern().is_match(candidate.trim())
}

/// One entry of the movie catalog.
///
/// `title` is the lookup key into the similarity index. Uniqueness is not
/// required; lookups take the first match in catalog order. The catalog
/// loader rejects empty titles, but the type itself allows them so the
/// recommender can build an empty record when an index lookup fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Opaque identifier from the source dataset. Often a plain number,
    /// sometimes an IMDb id; only the latter is usable for id lookups.
    #[serde(
        rename = "movie_id",
        default,
        deserialize_with = "deserialize_movie_id"
    )]
    pub id: Option<String>,

    #[serde(default)]
    pub title: String,
}

impl MovieRecord {
    /// The trimmed id, when it follows the IMDb convention.
    pub fn imdb_id(&self) -> Option<&str> {
        let id = self.id.as_deref()?.trim();
        looks_like_imdb_id(id).then_some(id)
    }
}

/// Dataset ids come through as strings or bare integers depending on how
/// the artifact was exported; both coerce to the string form.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMovieId {
    Text(String),
    Number(i64),
}

fn deserialize_movie_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawMovieId>::deserialize(deserializer)?;
    Ok(raw.map(|id| match id {
        RawMovieId::Text(text) => text,
        RawMovieId::Number(number) => number.to_string(),
    }))
}

/// One ranked entry of a recommendation response: the display title and a
/// poster URL that is always safe to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub poster_url: String,
}
