// The dictionary of flagged phrases.

use spamscan_core::character::is_delimiter;

use crate::DetectError;

/// The shipped dictionary. Matching is case-sensitive.
pub const DEFAULT_PHRASES: &[&str] = &[
    "win",
    "winners",
    "winnings",
    "free access",
    "free software",
    "free trials",
    "free vacation",
];

/// An ordered, duplicate-free list of flagged phrases.
///
/// A phrase counts only as a whole token: it must be preceded and followed
/// by a delimiter (space or double quote), or start right at the beginning
/// of the record body. Phrases may contain interior delimiters
/// (`free access`) but may not start or end with one, and may not contain
/// `<`, which is reserved for the closing marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    phrases: Vec<Vec<u8>>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| p.as_bytes().to_vec()).collect(),
        }
    }
}

impl Dictionary {
    /// Build a dictionary from custom phrases. Duplicates are dropped.
    pub fn new<I, P>(phrases: I) -> Result<Self, DetectError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut list: Vec<Vec<u8>> = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref();
            validate(phrase)?;
            if !list.iter().any(|p| p == phrase) {
                list.push(phrase.to_vec());
            }
        }
        if list.is_empty() {
            return Err(DetectError::EmptyDictionary);
        }
        Ok(Self { phrases: list })
    }

    pub fn phrases(&self) -> impl Iterator<Item = &[u8]> {
        self.phrases.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn contains(&self, phrase: &[u8]) -> bool {
        self.phrases.iter().any(|p| p == phrase)
    }
}

fn validate(phrase: &[u8]) -> Result<(), DetectError> {
    let invalid = |reason| DetectError::InvalidPhrase {
        phrase: String::from_utf8_lossy(phrase).into_owned(),
        reason,
    };
    let (Some(&first), Some(&last)) = (phrase.first(), phrase.last()) else {
        return Err(invalid("phrase is empty"));
    };
    if is_delimiter(first) || is_delimiter(last) {
        return Err(invalid("phrase starts or ends with a delimiter"));
    }
    if phrase.contains(&b'<') {
        return Err(invalid("phrase contains '<'"));
    }
    Ok(())
}
