use crate::output::{self, Output};
use itertools::Itertools;
use log::{debug, info};

fn explain_pos(o: &Output) -> String {
    o.pos
        .iter()
        .map(|p| format!("{} = {}", p.pos, p.total))
        .join("; ")
}

pub fn statistics(o: &Output) {
    info!(target: "ukrfreq", "tokens: {}", o.tokens);
    info!(target: "ukrfreq", "counted tokens: {}", o.counted_tokens);
    info!(
        target: "ukrfreq",
        "subsamples: {} of {} tokens, capacity {}",
        o.subsamples,
        o.subsample_size,
        o.capacity
    );
    info!(target: "ukrfreq", "distinct wordforms: {}", o.wordforms.len());
    info!(target: "ukrfreq", "distinct lemmas: {}", o.lemmas.len());
    info!(target: "ukrfreq", "parts of speech: {}", explain_pos(o));
    if let Some(top) = o.lemmas.iter().max_by_key(|l| l.total) {
        debug!(
            target: "ukrfreq",
            "most frequent lemma: {} ({}) {}",
            top.lemma,
            top.pos,
            output::pretty_vector(&top.vector, o.subsamples)
        );
    }
}
