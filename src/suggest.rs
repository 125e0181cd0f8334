// Did-you-mean lookup for names typed on the command line.
//
// Suggest only when Jaro-Winkler similarity is at least 60%; that catches
// prefixes like "dow" -> "down" without proposing unrelated names.
const MIN_SIMILARITY: f64 = 0.6;

pub(crate) fn closest_match(input: &str, candidates: &[&'static str]) -> Option<&'static str> {
    let input = input.to_lowercase();
    let mut best: Option<(&'static str, f64)> = None;

    for &candidate in candidates {
        let similarity = strsim::jaro_winkler(&input, candidate);
        if best.map_or(true, |(_, score)| similarity > score) {
            best = Some((candidate, similarity));
        }
    }

    best.filter(|&(_, score)| score >= MIN_SIMILARITY)
        .map(|(candidate, _)| candidate)
}
