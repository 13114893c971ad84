//! Municipality resolution from raw observation addresses.
//!
//! Turns `(rawAddress, prefecture)` into the canonical
//! `"{prefecture}_{municipality}"` grouping key. The heuristics run in a
//! fixed order, first match wins, and the order is load-bearing: the
//! known-key scan resolves legacy sub-prefectural names that the later
//! stripping rules would mangle, and the city+ward / county+town patterns
//! keep compound names attached before the generic suffix match can
//! truncate them. Each rule is a standalone function so administrative
//! naming edge cases can be regression-tested one rule at a time.

use crate::dict::KanaDict;

/// Prefectures whose names do not end in the generic 県 suffix.
const IRREGULAR_PREFECTURES: [&str; 4] = ["北海道", "東京都", "大阪府", "京都府"];

/// Resolve a raw observation address to its municipality key.
///
/// Never fails: an address no rule understands passes through unchanged as
/// `"{prefecture}_{rawAddress}"`.
pub fn resolve(address: &str, prefecture: &str, dict: &KanaDict) -> String {
    if let Some(key) = match_known_key(address, dict) {
        return format!("{}_{}", prefecture, key);
    }

    let rest = strip_prefecture(address, prefecture);

    if let Some(city_ward) = match_city_ward(rest) {
        return format!("{}_{}", prefecture, city_ward);
    }
    if let Some(county_town) = match_county_town(rest) {
        return format!("{}_{}", prefecture, county_town);
    }
    if let Some(known) = match_dict_prefix(rest, dict) {
        return format!("{}_{}", prefecture, known);
    }
    if let Some(generic) = match_generic_suffix(rest) {
        return format!("{}_{}", prefecture, generic);
    }

    format!("{}_{}", prefecture, address)
}

/// Rule 1: a dictionary key contained in the address as a whole trailing
/// token, or followed by a space. Keys are scanned longest-first so the
/// most specific known name wins.
pub fn match_known_key<'a>(address: &str, dict: &'a KanaDict) -> Option<&'a str> {
    for key in dict.keys_by_length() {
        for (pos, _) in address.match_indices(key.as_str()) {
            let rest = &address[pos + key.len()..];
            if rest.is_empty() || rest.starts_with(' ') || rest.starts_with('　') {
                return Some(key);
            }
        }
    }
    None
}

/// Rule 2: strip the prefecture from the front of the address.
///
/// Tries the supplied name first, then the four prefectures whose names do
/// not end in 県, then strips through the first 県 found anywhere.
pub fn strip_prefecture<'a>(address: &'a str, prefecture: &str) -> &'a str {
    if !prefecture.is_empty() {
        if let Some(rest) = address.strip_prefix(prefecture) {
            return rest;
        }
    }
    for name in IRREGULAR_PREFECTURES {
        if let Some(rest) = address.strip_prefix(name) {
            return rest;
        }
    }
    if let Some(pos) = address.find('県') {
        return &address[pos + '県'.len_utf8()..];
    }
    address
}

/// Rule 3: the longest prefix of the form `…市…区`.
///
/// A designated-city ward must stay attached to its parent city, so the
/// prefix runs through the last 区 that follows a 市.
pub fn match_city_ward(text: &str) -> Option<&str> {
    let city = text.find('市')?;
    let ward = text.rfind('区')?;
    if ward < city {
        return None;
    }
    Some(&text[..ward + '区'.len_utf8()])
}

/// Rule 4: a prefix of the form `…郡…町` or `…郡…村`.
///
/// County-level towns and villages keep their county prefix, since town
/// names repeat across counties. The match ends at the first 町/村 after
/// the 郡.
pub fn match_county_town(text: &str) -> Option<&str> {
    let county_end = text.find('郡')? + '郡'.len_utf8();
    let tail = &text[county_end..];
    let (rel, town) = tail.char_indices().find(|(_, c)| *c == '町' || *c == '村')?;
    Some(&text[..county_end + rel + town.len_utf8()])
}

/// Rule 5: the longest dictionary key the text starts with.
///
/// Known municipality names absorb trailing sub-municipal detail, so a
/// ward neighborhood resolves to its municipality instead of fragmenting.
pub fn match_dict_prefix<'a>(text: &str, dict: &'a KanaDict) -> Option<&'a str> {
    dict.keys_by_length()
        .iter()
        .map(String::as_str)
        .find(|key| !key.is_empty() && text.starts_with(key))
}

/// Rule 6: the shortest prefix ending in 市, 区, 町 or 村, with at least
/// one character before the suffix.
pub fn match_generic_suffix(text: &str) -> Option<&str> {
    for (pos, c) in text.char_indices() {
        if matches!(c, '市' | '区' | '町' | '村') && pos > 0 {
            return Some(&text[..pos + c.len_utf8()]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_core::{NameTiers, NamedPlace};

    fn dict_with(names: &[&str]) -> KanaDict {
        let tiers = NameTiers {
            prefectures: Vec::new(),
            cities: names
                .iter()
                .map(|name| NamedPlace {
                    name: name.to_string(),
                    reading: String::new(),
                })
                .collect(),
            wards: Vec::new(),
        };
        KanaDict::from_tiers(&tiers)
    }

    #[test]
    fn test_resolve_direct_match() {
        let dict = dict_with(&["釧路市"]);
        assert_eq!(resolve("北海道釧路市", "北海道", &dict), "北海道_釧路市");
    }

    #[test]
    fn test_resolve_city_ward() {
        // Prefecture not present as a literal prefix, so the address falls
        // through to the city+ward pattern intact.
        let dict = KanaDict::new();
        assert_eq!(
            resolve("仙台市宮城野区", "宮城県", &dict),
            "宮城県_仙台市宮城野区"
        );
    }

    #[test]
    fn test_resolve_county_town() {
        let dict = KanaDict::new();
        assert_eq!(
            resolve("北海道空知郡南幌町", "北海道", &dict),
            "北海道_空知郡南幌町"
        );
    }

    #[test]
    fn test_resolve_dict_prefix() {
        let dict = dict_with(&["栃木市"]);
        assert_eq!(resolve("栃木市入舟町", "栃木県", &dict), "栃木県_栃木市");
    }

    #[test]
    fn test_resolve_generic_suffix() {
        let dict = KanaDict::new();
        assert_eq!(resolve("青森県八戸市湊町", "青森県", &dict), "青森県_八戸市");
    }

    #[test]
    fn test_resolve_passthrough() {
        let dict = KanaDict::new();
        assert_eq!(resolve("奥尻島", "北海道", &dict), "北海道_奥尻島");
    }

    #[test]
    fn test_known_key_requires_trailing_token() {
        let dict = dict_with(&["栃木市"]);
        // Key present but followed by more address text: no rule-1 match.
        assert_eq!(match_known_key("栃木市入舟町", &dict), None);
        assert_eq!(match_known_key("栃木県栃木市", &dict), Some("栃木市"));
        assert_eq!(match_known_key("栃木市 入舟町", &dict), Some("栃木市"));
    }

    #[test]
    fn test_known_key_prefers_longest() {
        let dict = dict_with(&["川内市", "薩摩川内市"]);
        assert_eq!(match_known_key("鹿児島県薩摩川内市", &dict), Some("薩摩川内市"));
    }

    #[test]
    fn test_strip_prefecture_exact() {
        assert_eq!(strip_prefecture("宮城県仙台市", "宮城県"), "仙台市");
    }

    #[test]
    fn test_strip_prefecture_irregular() {
        // Supplied prefecture does not literally prefix the address, but an
        // irregular-suffix prefecture does.
        assert_eq!(strip_prefecture("東京都千代田区", "宮城県"), "千代田区");
        assert_eq!(strip_prefecture("北海道札幌市中央区", ""), "札幌市中央区");
    }

    #[test]
    fn test_strip_prefecture_through_ken() {
        assert_eq!(strip_prefecture("青森県八戸市", "岩手県"), "八戸市");
    }

    #[test]
    fn test_strip_prefecture_no_marker() {
        assert_eq!(strip_prefecture("仙台市宮城野区", "宮城県"), "仙台市宮城野区");
    }

    #[test]
    fn test_city_ward_takes_last_ward() {
        // The prefix runs through the last 区 so compound ward names stay
        // whole.
        assert_eq!(match_city_ward("堺市北区百舌鳥"), Some("堺市北区"));
        assert_eq!(match_city_ward("仙台市宮城野区"), Some("仙台市宮城野区"));
    }

    #[test]
    fn test_city_ward_requires_city_before_ward() {
        assert_eq!(match_city_ward("千代田区"), None);
        assert_eq!(match_city_ward("八戸市湊町"), None);
    }

    #[test]
    fn test_county_town_stops_at_first_town() {
        assert_eq!(match_county_town("空知郡南幌町"), Some("空知郡南幌町"));
        assert_eq!(match_county_town("空知郡南幌町元町"), Some("空知郡南幌町"));
        assert_eq!(match_county_town("南幌町"), None);
    }

    #[test]
    fn test_dict_prefix_longest_wins() {
        let dict = dict_with(&["横浜市", "横浜市鶴見区"]);
        assert_eq!(match_dict_prefix("横浜市鶴見区末広町", &dict), Some("横浜市鶴見区"));
    }

    #[test]
    fn test_generic_suffix_shortest() {
        assert_eq!(match_generic_suffix("八戸市湊町"), Some("八戸市"));
        assert_eq!(match_generic_suffix("千代田区"), Some("千代田区"));
        assert_eq!(match_generic_suffix("奥尻島"), None);
    }

    #[test]
    fn test_generic_suffix_needs_leading_text() {
        // A bare suffix character alone is not a municipality name.
        assert_eq!(match_generic_suffix("市"), None);
    }
}
