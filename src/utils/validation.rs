use once_cell::sync::Lazy;
use regex::Regex;

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap());

/// Checks that `address` is `0x` followed by exactly 40 hex digits.
///
/// Mixed case is accepted as-is, there is no EIP-55 checksum check. Callers are
/// expected to trim the input first.
#[inline(always)]
pub fn is_well_formed_address(address: &str) -> bool {
    ADDRESS_RE.is_match(address)
}
