//! Shared field extractors
//!
//! Every field that can be found in more than one way is resolved by an
//! ordered list of strategies; the first one that yields a value wins.
//! Digits and word boundaries are ASCII only.

use regex::Regex;
use std::sync::LazyLock;

/// Compile a pattern that is fixed at build time.
pub(crate) fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

static VLAN_TOKEN: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)vlan-([0-9]+)"));
static EPG_VLAN_TAG: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)VLAN([0-9]+)"));
static THREE_DIGITS: LazyLock<Regex> = LazyLock::new(|| pattern(r"([0-9]{3})"));
static ANY_DIGITS: LazyLock<Regex> = LazyLock::new(|| pattern(r"([0-9]+)"));
static IPV4_WORD: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?-u:\b)([0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})(?-u:\b)")
});
static IPV4_LOOSE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)"));

fn first_group(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// `vlan-<digits>` anywhere in the text
pub fn vlan_token(text: &str) -> Option<String> {
    first_group(&VLAN_TOKEN, text)
}

/// `VLAN<digits>` tag, case-insensitive
pub fn epg_vlan_tag(text: &str) -> Option<String> {
    first_group(&EPG_VLAN_TAG, text)
}

/// First run of three digits
pub fn three_digits(text: &str) -> Option<String> {
    first_group(&THREE_DIGITS, text)
}

/// First run of digits of any length
pub fn any_digits(text: &str) -> Option<String> {
    first_group(&ANY_DIGITS, text)
}

/// First IPv4-looking token bounded by word boundaries
pub fn ipv4_word(text: &str) -> Option<String> {
    first_group(&IPV4_WORD, text)
}

/// First dotted quad of digit runs, without boundary checks
pub fn ipv4_loose(text: &str) -> Option<String> {
    first_group(&IPV4_LOOSE, text)
}

/// Where a VLAN number for a DN line was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlanSource {
    /// `vlan-<digits>` on the line itself
    EncapToken,
    /// `VLAN<digits>` inside the EPG name
    EpgVlanTag,
    /// First three-digit run inside the EPG name
    EpgThreeDigits,
}

impl VlanSource {
    /// Resolution order for path-attachment lines
    pub const DN_ORDER: [VlanSource; 3] = [
        VlanSource::EncapToken,
        VlanSource::EpgVlanTag,
        VlanSource::EpgThreeDigits,
    ];

    pub fn extract(self, line: &str, epg: &str) -> Option<String> {
        match self {
            VlanSource::EncapToken => vlan_token(line),
            VlanSource::EpgVlanTag => epg_vlan_tag(epg),
            VlanSource::EpgThreeDigits => three_digits(epg),
        }
    }
}

/// Resolve the VLAN of a path-attachment line carrying `epg`
pub fn resolve_vlan(line: &str, epg: &str) -> Option<String> {
    VlanSource::DN_ORDER
        .iter()
        .find_map(|source| source.extract(line, epg))
}
