//! The greedy page-splitting algorithm.

use serde::Serialize;

use crate::probe::SurfaceProbe;

/// One display page of the ticker.
///
/// `index` is 1-based; `total` is fixed once the card sequence for an
/// event is complete and does not change until the event is re-selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Group label, e.g. an intensity label or a tsunami grade.
    pub heading: String,
    /// Display strings on this page, in given order.
    pub items: Vec<String>,
    pub index: usize,
    pub total: usize,
}

/// Split `items` into ordered chunks that each fit the probe's two-line
/// budget when joined with `separator`.
///
/// Greedy accumulation: each item is tentatively appended to the current
/// buffer and measured; on reject the buffer closes as a page and the
/// rejected item starts the next one. A single item that does not fit on
/// its own still gets a page to itself - the algorithm never splits an
/// item and never loops on an oversized one. Input order is preserved
/// exactly; an empty input produces zero chunks.
pub fn paginate<P>(items: &[String], separator: &str, probe: &P) -> Vec<Vec<String>>
where
    P: SurfaceProbe + ?Sized,
{
    let mut chunks: Vec<Vec<String>> = Vec::new();
    let mut buffer: Vec<String> = Vec::new();

    for item in items {
        let candidate = join_candidate(&buffer, item, separator);
        if probe.fits(&candidate) {
            buffer.push(item.clone());
        } else if buffer.is_empty() {
            // An oversized item gets its own page rather than stalling.
            chunks.push(vec![item.clone()]);
        } else {
            chunks.push(std::mem::take(&mut buffer));
            buffer.push(item.clone());
        }
    }

    if !buffer.is_empty() {
        chunks.push(buffer);
    }

    chunks
}

fn join_candidate(buffer: &[String], next: &str, separator: &str) -> String {
    if buffer.is_empty() {
        return next.to_string();
    }
    let mut candidate = buffer.join(separator);
    candidate.push_str(separator);
    candidate.push_str(next);
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ColumnProbe;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input_zero_pages() {
        let probe = ColumnProbe::new(10);
        assert!(paginate(&[], " ", &probe).is_empty());
    }

    #[test]
    fn test_everything_fits_one_page() {
        let probe = |c: &str| c.len() <= 20;
        let chunks = paginate(&items(&["aa", "bb", "cc"]), " ", &probe);
        assert_eq!(chunks, vec![items(&["aa", "bb", "cc"])]);
    }

    #[test]
    fn test_split_preserves_order_and_items() {
        let input = items(&["alpha", "beta", "gamma", "delta", "epsilon"]);
        let probe = |c: &str| c.len() <= 12;
        let chunks = paginate(&input, " ", &probe);

        // No item is ever split, and concatenating the chunks in order
        // reproduces the input exactly.
        let rejoined: Vec<String> = chunks.iter().flatten().cloned().collect();
        assert_eq!(rejoined, input);
        assert!(chunks.len() > 1);
    }

    #[test]
    fn test_every_page_fits() {
        let input = items(&["alpha", "beta", "gamma", "delta", "epsilon"]);
        let probe = |c: &str| c.len() <= 12;
        for chunk in paginate(&input, " ", &probe) {
            assert!(probe.fits(&chunk.join(" ")));
        }
    }

    #[test]
    fn test_oversized_item_gets_own_page() {
        let input = items(&["short", "absurdly-long-station-name", "tail"]);
        let probe = |c: &str| c.len() <= 10;
        let chunks = paginate(&input, " ", &probe);

        assert_eq!(
            chunks,
            vec![
                items(&["short"]),
                items(&["absurdly-long-station-name"]),
                items(&["tail"]),
            ]
        );
    }

    #[test]
    fn test_oversized_only_item() {
        let input = items(&["absurdly-long-station-name"]);
        let probe = |c: &str| c.len() <= 5;
        let chunks = paginate(&input, " ", &probe);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], input);
    }

    #[test]
    fn test_separator_counts_against_budget() {
        // Two four-char items fit alone but not joined with the two-char
        // separator.
        let probe = |c: &str| c.len() <= 10;
        let chunks = paginate(&items(&["aaaa", "bbbb"]), ", ", &probe);
        assert_eq!(chunks.len(), 1);

        let probe = |c: &str| c.len() <= 9;
        let chunks = paginate(&items(&["aaaa", "bbbb"]), ", ", &probe);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn test_never_fitting_probe_isolates_each_item() {
        // A probe that always refuses (e.g. measurement backend down)
        // degrades to one item per page instead of dropping anything.
        let input = items(&["a", "b", "c"]);
        let probe = |_: &str| false;
        let chunks = paginate(&input, " ", &probe);
        assert_eq!(chunks.len(), 3);
        let rejoined: Vec<String> = chunks.iter().flatten().cloned().collect();
        assert_eq!(rejoined, input);
    }
}
