//! Part-of-speech tagset and display labels.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

/// Parts of speech known to the analyzer tagset, plus a fallback for everything else.
///
/// Serialized as the Ukrainian label, the same text the database and the spreadsheet
/// export hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pos {
    Noun,
    FullAdjective,
    ShortAdjective,
    Comparative,
    Verb,
    Infinitive,
    FullParticiple,
    ShortParticiple,
    Gerund,
    Numeral,
    Adverb,
    Pronoun,
    Predicative,
    Preposition,
    Conjunction,
    Particle,
    Interjection,
    Undetermined,
}

impl Pos {
    pub const ALL: [Pos; 18] = [
        Pos::Noun,
        Pos::FullAdjective,
        Pos::ShortAdjective,
        Pos::Comparative,
        Pos::Verb,
        Pos::Infinitive,
        Pos::FullParticiple,
        Pos::ShortParticiple,
        Pos::Gerund,
        Pos::Numeral,
        Pos::Adverb,
        Pos::Pronoun,
        Pos::Predicative,
        Pos::Preposition,
        Pos::Conjunction,
        Pos::Particle,
        Pos::Interjection,
        Pos::Undetermined,
    ];

    /// Translate an analyzer tag. Only the leading grammeme matters: `"NOUN,anim masc"` is a noun.
    pub fn from_tag(tag: &str) -> Pos {
        let head = tag
            .split(|c: char| c == ',' || c.is_whitespace())
            .next()
            .unwrap_or("");
        match head {
            "NOUN" => Pos::Noun,
            "ADJF" => Pos::FullAdjective,
            "ADJS" => Pos::ShortAdjective,
            "COMP" => Pos::Comparative,
            "VERB" => Pos::Verb,
            "INFN" => Pos::Infinitive,
            "PRTF" => Pos::FullParticiple,
            "PRTS" => Pos::ShortParticiple,
            "GRND" => Pos::Gerund,
            "NUMR" => Pos::Numeral,
            "ADVB" => Pos::Adverb,
            "NPRO" => Pos::Pronoun,
            "PRED" => Pos::Predicative,
            "PREP" => Pos::Preposition,
            "CONJ" => Pos::Conjunction,
            "PRCL" => Pos::Particle,
            "INTJ" => Pos::Interjection,
            _ => Pos::Undetermined,
        }
    }

    /// Ukrainian label as stored in the database.
    pub fn label(self) -> &'static str {
        match self {
            Pos::Noun => "іменник",
            Pos::FullAdjective => "прикметник (повний)",
            Pos::ShortAdjective => "прикметник (короткий)",
            Pos::Comparative => "компаратив",
            Pos::Verb => "дієслово (особова форма)",
            Pos::Infinitive => "дієслово (інфінітив)",
            Pos::FullParticiple => "дієприкметник (повний)",
            Pos::ShortParticiple => "дієприкметник (короткий)",
            Pos::Gerund => "дієприслівник",
            Pos::Numeral => "числівник",
            Pos::Adverb => "прислівник",
            Pos::Pronoun => "займенник",
            Pos::Predicative => "предикатив",
            Pos::Preposition => "прийменник",
            Pos::Conjunction => "сполучник",
            Pos::Particle => "частка",
            Pos::Interjection => "вигук",
            Pos::Undetermined => "невизначено",
        }
    }

    pub fn from_label(label: &str) -> Option<Pos> {
        Pos::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl Serialize for Pos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Pos {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Pos, D::Error> {
        let label = String::deserialize(deserializer)?;
        Pos::from_label(&label)
            .ok_or_else(|| de::Error::custom(format!("unknown part of speech '{label}'")))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn from_tag_basic() {
        assert_eq!(Pos::from_tag("NOUN"), Pos::Noun);
        assert_eq!(Pos::from_tag("INFN"), Pos::Infinitive);
        assert_eq!(Pos::from_tag("PRTS"), Pos::ShortParticiple);
    }

    #[test]
    fn from_tag_full_tag() {
        assert_eq!(Pos::from_tag("NOUN,anim masc sing,nomn"), Pos::Noun);
        assert_eq!(Pos::from_tag("VERB perf,tran sing,3per"), Pos::Verb);
    }

    #[test]
    fn from_tag_fallback() {
        assert_eq!(Pos::from_tag(""), Pos::Undetermined);
        assert_eq!(Pos::from_tag("LATN"), Pos::Undetermined);
        assert_eq!(Pos::from_tag("noun"), Pos::Undetermined);
    }

    #[test]
    fn labels_distinct() {
        let labels = Pos::ALL.iter().map(|p| p.label()).unique().collect_vec();
        assert_eq!(labels.len(), Pos::ALL.len());
        assert_eq!(Pos::Noun.to_string(), "іменник");
    }

    #[test]
    fn serialized_as_label() {
        assert_eq!(
            serde_json::to_string(&Pos::FullAdjective).unwrap(),
            r#""прикметник (повний)""#
        );
        let back: Pos = serde_json::from_str(r#""вигук""#).unwrap();
        assert_eq!(back, Pos::Interjection);
        assert!(serde_json::from_str::<Pos>(r#""Noun""#).is_err());
        for p in Pos::ALL {
            assert_eq!(Pos::from_label(p.label()), Some(p));
        }
    }

    #[test]
    fn all_sorted() {
        assert!(Pos::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}
