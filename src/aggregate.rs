//! From wordform counts to lemma and part-of-speech counts.
//!
//! Every distinct wordform is resolved exactly once ([resolve_all]); the lemma table,
//! the part-of-speech table and the intermediate join all use that one resolution, so
//! they agree on the part of speech of each wordform.

use crate::counter::{FrequencyVector, WordformFrequency};
use crate::errors::{self, Result};
use crate::morphology::Analyzer;
use crate::output::{IntermediateRecord, LemmaRecord, PosRecord, WordformRecord};
use crate::pos::Pos;
use crate::samples::Subsample;
use itertools::Itertools;
use std::collections::hash_map::Entry::{Occupied, Vacant};
use std::collections::{BTreeMap, HashMap};

/// Lemma and part of speech of one wordform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub lemma: String,
    pub pos: Pos,
}

pub type Resolutions<'a> = HashMap<&'a str, Resolution>;

fn resolution<'r>(resolutions: &'r Resolutions, wordform: &str) -> Result<&'r Resolution> {
    resolutions
        .get(wordform)
        .ok_or_else(|| errors::invalid_input(format!("wordform '{wordform}' was not resolved")))
}

/// Resolve a wordform with the best parse of the analyzer.
///
/// A wordform without a parse is its own lemma; its part of speech is undetermined.
pub fn resolve(analyzer: &dyn Analyzer, wordform: &str) -> Resolution {
    match analyzer.parse(wordform) {
        None => Resolution {
            lemma: wordform.to_owned(),
            pos: Pos::Undetermined,
        },
        Some(parse) => Resolution {
            lemma: if parse.normal_form.is_empty() {
                wordform.to_owned()
            } else {
                parse.normal_form
            },
            pos: Pos::from_tag(&parse.tag),
        },
    }
}

pub fn resolve_all<'a>(
    analyzer: &dyn Analyzer,
    wordforms: &[WordformFrequency<'a>],
) -> Resolutions<'a> {
    wordforms
        .iter()
        .map(|w| (w.wordform, resolve(analyzer, w.wordform)))
        .collect()
}

pub fn wordform_records(wordforms: &[WordformFrequency]) -> Vec<WordformRecord> {
    wordforms
        .iter()
        .map(|w| WordformRecord {
            wordform: w.wordform.to_owned(),
            total: w.vector.total(),
            vector: w.vector.clone(),
        })
        .collect_vec()
}

/// Sum the vectors of all wordforms that share a lemma.
///
/// Lemmas are listed in order of their first wordform. The part of speech of a lemma is
/// the one of its first wordform; later wordforms never overwrite it.
pub fn lemma_frequencies(
    wordforms: &[WordformFrequency],
    resolutions: &Resolutions,
) -> Result<Vec<LemmaRecord>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut lemmas: Vec<LemmaRecord> = vec![];
    for w in wordforms {
        let r = resolution(resolutions, w.wordform)?;
        match index.entry(r.lemma.as_str()) {
            Occupied(e) => {
                let lemma = &mut lemmas[*e.get()];
                lemma.vector.add(&w.vector);
            }
            Vacant(e) => {
                e.insert(lemmas.len());
                lemmas.push(LemmaRecord {
                    lemma: r.lemma.clone(),
                    pos: r.pos,
                    total: 0,
                    vector: w.vector.clone(),
                });
            }
        }
    }
    for lemma in lemmas.iter_mut() {
        lemma.total = lemma.vector.total();
    }
    Ok(lemmas)
}

/// Tag every token occurrence and count tags per subsample.
pub fn pos_frequencies(
    subsamples: &[Subsample],
    resolutions: &Resolutions,
    width: usize,
) -> Result<Vec<PosRecord>> {
    if subsamples.len() > width {
        return Err(errors::invalid_input(format!(
            "{} subsamples do not fit in vectors of width {}",
            subsamples.len(),
            width
        )));
    }
    let mut vectors: BTreeMap<Pos, FrequencyVector> = BTreeMap::new();
    for (i, subsample) in subsamples.iter().enumerate() {
        for &token in subsample.iter() {
            let pos = resolution(resolutions, token)?.pos;
            vectors
                .entry(pos)
                .or_insert_with(|| FrequencyVector::new(width))
                .increment(i);
        }
    }
    Ok(vectors
        .into_iter()
        .map(|(pos, vector)| PosRecord {
            pos,
            total: vector.total(),
            vector,
        })
        .collect_vec())
}

pub fn intermediate_records(
    wordforms: &[WordformFrequency],
    resolutions: &Resolutions,
) -> Result<Vec<IntermediateRecord>> {
    wordforms
        .iter()
        .map(|w| -> Result<IntermediateRecord> {
            let r = resolution(resolutions, w.wordform)?;
            Ok(IntermediateRecord {
                wordform: w.wordform.to_owned(),
                lemma: r.lemma.clone(),
                pos: r.pos,
                total: w.vector.total(),
                vector: w.vector.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::counter;
    use crate::morphology::{Lexicon, Parse};
    use crate::samples;
    use std::cell::RefCell;

    fn fv(slots: &[u64]) -> FrequencyVector {
        FrequencyVector::from(slots.to_vec())
    }

    fn lexicon(entries: &[(&str, &str, &str)]) -> Lexicon {
        let mut lexicon = Lexicon::new();
        for &(w, l, t) in entries {
            lexicon.insert(w, l, t);
        }
        lexicon
    }

    struct CountingAnalyzer {
        calls: RefCell<Vec<String>>,
    }

    impl Analyzer for CountingAnalyzer {
        fn parse(&self, wordform: &str) -> Option<Parse> {
            self.calls.borrow_mut().push(wordform.to_owned());
            Some(Parse {
                normal_form: wordform.to_owned(),
                tag: "NOUN".to_owned(),
            })
        }
    }

    #[test]
    fn resolve_known() {
        let lex = lexicon(&[("кота", "кіт", "NOUN,anim masc sing,gent")]);
        let r = resolve(&lex, "кота");
        assert_eq!(r.lemma, "кіт");
        assert_eq!(r.pos, Pos::Noun);
    }

    #[test]
    fn resolve_unknown() {
        let lex = lexicon(&[]);
        let r = resolve(&lex, "ґаджет");
        assert_eq!(r.lemma, "ґаджет");
        assert_eq!(r.pos, Pos::Undetermined);
    }

    #[test]
    fn resolve_empty_tag_and_lemma() {
        let lex = lexicon(&[("ой", "", ""), ("гм", "гм", "XYZ")]);
        let r = resolve(&lex, "ой");
        assert_eq!(r.lemma, "ой");
        assert_eq!(r.pos, Pos::Undetermined);
        assert_eq!(resolve(&lex, "гм").pos, Pos::Undetermined);
    }

    #[test]
    fn resolve_all_once_per_wordform() {
        let tokens = vec!["а", "б", "а", "а", "б"];
        let s = samples::subsamples(&tokens, 100, 2).unwrap();
        let counts = counter::count_wordforms(&s, 3).unwrap();
        let analyzer = CountingAnalyzer {
            calls: RefCell::new(vec![]),
        };
        let resolutions = resolve_all(&analyzer, &counts);
        let pos = pos_frequencies(&s, &resolutions, 3).unwrap();
        assert_eq!(*analyzer.calls.borrow(), vec!["а", "б"]);
        assert_eq!(pos.len(), 1);
        assert_eq!(pos[0].vector, fv(&[2, 2, 1]));
    }

    #[test]
    fn cat_sleeps_cat_eats() {
        let tokens = samples::tokenize("кіт спить кіт їсть");
        let s = samples::subsamples(&tokens, 20000, 2).unwrap();
        let counts = counter::count_wordforms(&s, 2).unwrap();
        let lex = lexicon(&[
            ("кіт", "кіт", "NOUN"),
            ("спить", "спати", "VERB"),
            ("їсть", "їсти", "VERB"),
        ]);
        let resolutions = resolve_all(&lex, &counts);

        let wordforms = wordform_records(&counts);
        assert_eq!(wordforms[0].wordform, "кіт");
        assert_eq!(wordforms[0].total, 2);
        assert_eq!(wordforms[0].vector, fv(&[1, 1]));

        let lemmas = lemma_frequencies(&counts, &resolutions).unwrap();
        assert_eq!(lemmas.len(), 3);
        assert_eq!(lemmas[0].lemma, "кіт");
        assert_eq!(lemmas[0].total, 2);
        assert_eq!(lemmas[0].vector, fv(&[1, 1]));
        assert_eq!(lemmas[1].lemma, "спати");
        assert_eq!(lemmas[1].vector, fv(&[1, 0]));
        assert_eq!(lemmas[2].lemma, "їсти");
        assert_eq!(lemmas[2].vector, fv(&[0, 1]));

        let pos = pos_frequencies(&s, &resolutions, 2).unwrap();
        assert_eq!(pos.len(), 2);
        assert_eq!(pos[0].pos, Pos::Noun);
        assert_eq!(pos[0].vector, fv(&[1, 1]));
        assert_eq!(pos[1].pos, Pos::Verb);
        assert_eq!(pos[1].vector, fv(&[1, 1]));
    }

    #[test]
    fn lemma_merges_spellings() {
        let tokens = samples::tokenize("кіт кота котові пес кота");
        let s = samples::subsamples(&tokens, 100, 2).unwrap();
        let counts = counter::count_wordforms(&s, 3).unwrap();
        let lex = lexicon(&[
            ("кіт", "кіт", "NOUN"),
            ("кота", "кіт", "NOUN"),
            ("котові", "кіт", "ADJF"),
            ("пес", "пес", "NOUN"),
        ]);
        let resolutions = resolve_all(&lex, &counts);
        let lemmas = lemma_frequencies(&counts, &resolutions).unwrap();
        assert_eq!(lemmas.len(), 2);
        assert_eq!(lemmas[0].lemma, "кіт");
        assert_eq!(lemmas[0].pos, Pos::Noun);
        assert_eq!(lemmas[0].vector, fv(&[2, 1, 1]));
        assert_eq!(lemmas[0].total, 4);
        assert_eq!(lemmas[1].lemma, "пес");
        assert_eq!(lemmas[1].vector, fv(&[0, 1, 0]));
    }

    #[test]
    fn first_pos_wins() {
        let tokens = samples::tokenize("мати мати мама");
        let s = samples::subsamples(&tokens, 100, 10).unwrap();
        let counts = counter::count_wordforms(&s, 1).unwrap();
        let lex = lexicon(&[("мати", "мати", "INFN"), ("мама", "мати", "NOUN")]);
        let resolutions = resolve_all(&lex, &counts);
        let lemmas = lemma_frequencies(&counts, &resolutions).unwrap();
        assert_eq!(lemmas.len(), 1);
        assert_eq!(lemmas[0].pos, Pos::Infinitive);
        assert_eq!(lemmas[0].total, 3);
        let pos = pos_frequencies(&s, &resolutions, 1).unwrap();
        assert_eq!(pos.len(), 2);
        assert_eq!(pos[0].pos, Pos::Noun);
        assert_eq!(pos[0].total, 1);
        assert_eq!(pos[1].pos, Pos::Infinitive);
        assert_eq!(pos[1].total, 2);
    }

    #[test]
    fn conservation() {
        let text = "я бачу кота кіт бачить мене ми бачимо котів а вони ні хто що де";
        let tokens = samples::tokenize(text);
        let s = samples::subsamples(&tokens, 12, 5).unwrap();
        let counts = counter::count_wordforms(&s, 3).unwrap();
        let lex = lexicon(&[
            ("бачу", "бачити", "VERB"),
            ("бачить", "бачити", "VERB"),
            ("бачимо", "бачити", "VERB"),
            ("кота", "кіт", "NOUN"),
            ("кіт", "кіт", "NOUN"),
            ("котів", "кіт", "NOUN"),
            ("я", "я", "NPRO"),
            ("мене", "я", "NPRO"),
        ]);
        let resolutions = resolve_all(&lex, &counts);
        let wordform_total: u64 = wordform_records(&counts).iter().map(|w| w.total).sum();
        let lemma_total: u64 = lemma_frequencies(&counts, &resolutions)
            .unwrap()
            .iter()
            .map(|l| l.total)
            .sum();
        let pos_total: u64 = pos_frequencies(&s, &resolutions, 3)
            .unwrap()
            .iter()
            .map(|p| p.total)
            .sum();
        assert_eq!(wordform_total, 12);
        assert_eq!(lemma_total, 12);
        assert_eq!(pos_total, 12);
    }

    #[test]
    fn intermediate_join() {
        let tokens = samples::tokenize("кота кіт невідоме");
        let s = samples::subsamples(&tokens, 100, 2).unwrap();
        let counts = counter::count_wordforms(&s, 2).unwrap();
        let lex = lexicon(&[("кота", "кіт", "NOUN"), ("кіт", "кіт", "NOUN")]);
        let resolutions = resolve_all(&lex, &counts);
        let rows = intermediate_records(&counts, &resolutions).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].wordform, "кота");
        assert_eq!(rows[0].lemma, "кіт");
        assert_eq!(rows[0].pos, Pos::Noun);
        assert_eq!(rows[0].total, 1);
        assert_eq!(rows[2].wordform, "невідоме");
        assert_eq!(rows[2].lemma, "невідоме");
        assert_eq!(rows[2].pos, Pos::Undetermined);
        assert_eq!(rows[2].vector, fv(&[0, 1]));
    }

    #[test]
    fn pos_too_many_subsamples() {
        let tokens = vec!["а", "б", "в"];
        let s = samples::subsamples(&tokens, 100, 1).unwrap();
        let counts = counter::count_wordforms(&s, 3).unwrap();
        let resolutions = resolve_all(&lexicon(&[]), &counts);
        assert!(pos_frequencies(&s, &resolutions, 2).is_err());
        assert_eq!(pos_frequencies(&s, &resolutions, 3).unwrap()[0].total, 3);
    }

    #[test]
    fn unresolved_wordform() {
        let tokens = vec!["а", "б"];
        let s = samples::subsamples(&tokens, 100, 1).unwrap();
        let counts = counter::count_wordforms(&s, 2).unwrap();
        let mut resolutions = resolve_all(&lexicon(&[]), &counts);
        resolutions.remove("б");
        assert!(lemma_frequencies(&counts, &resolutions).is_err());
        assert!(pos_frequencies(&s, &resolutions, 2).is_err());
        let e = intermediate_records(&counts, &resolutions).err().unwrap();
        assert_eq!(e.to_string(), "invalid input: wordform 'б' was not resolved");
    }
}
