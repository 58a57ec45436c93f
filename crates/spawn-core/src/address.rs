//! Address-prefix rewriting.
//!
//! A plain substring replace of a short prefix such as `wasm` would corrupt
//! identifiers like `wasmkeeper`. Only literals with the shape of a bech32
//! address are touched: the prefix at a word boundary, the `1` separator, and
//! a lowercase alphanumeric body of at least [`BECH32_BODY_MIN`] characters.

use regex::{Captures, Regex};

use crate::error::Result;

/// Shortest data part (payload plus checksum) of a 20-byte account address.
pub const BECH32_BODY_MIN: usize = 38;

/// Build the matcher for address literals starting with `prefix`.
pub fn address_pattern(prefix: &str) -> Result<Regex> {
    let prefix = prefix.strip_suffix('1').unwrap_or(prefix);
    let pattern = format!(
        r"\b{}(1[0-9a-z]{{{},}})",
        regex::escape(prefix),
        BECH32_BODY_MIN
    );
    Ok(Regex::new(&pattern)?)
}

/// Replace the prefix of every address literal, keeping the body.
pub fn replace_address_prefix(contents: &str, old_prefix: &str, new_prefix: &str) -> Result<String> {
    let re = address_pattern(old_prefix)?;
    let new_prefix = new_prefix.strip_suffix('1').unwrap_or(new_prefix);
    let replaced = re.replace_all(contents, |caps: &Captures<'_>| format!("{new_prefix}{}", &caps[1]));
    Ok(replaced.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "wasm1hj5fveer5cjtn4wd6wstzugjfdxzl0xpvsr89g";

    #[test]
    fn test_identifier_is_preserved() {
        let src = format!("{ADDR} and wasm_keeper");
        let out = replace_address_prefix(&src, "wasm", "cosmos").unwrap();
        assert_eq!(out, "cosmos1hj5fveer5cjtn4wd6wstzugjfdxzl0xpvsr89g and wasm_keeper");
    }

    #[test]
    fn test_short_bodies_are_untouched() {
        let src = "wasm1abc wasmkeeper /go/bin/wasmd wasm10d07y";
        let out = replace_address_prefix(src, "wasm", "cosmos").unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_contract_addresses_and_quotes() {
        let src = r#"admins: ["wasm10d07y265gmmuvt4z0w9aw880jnsr700js7zslc"] c=wasm1qsrercqegvs4ye0yqg93knv73ye5dc3prqwd6jcdcuj8ggp6w0usrfxlpt"#;
        let out = replace_address_prefix(src, "wasm", "rollup").unwrap();
        assert!(out.contains(r#""rollup10d07y265gmmuvt4z0w9aw880jnsr700js7zslc""#));
        assert!(out.contains("c=rollup1qsrercqegvs4ye0yqg93knv73ye5dc3prqwd6jcdcuj8ggp6w0usrfxlpt"));
        assert!(!out.contains("wasm1"));
    }

    #[test]
    fn test_prefix_must_start_a_word() {
        let src = format!("cosm{ADDR}");
        assert_eq!(replace_address_prefix(&src, "wasm", "x").unwrap(), src);
    }

    #[test]
    fn test_trailing_separator_is_trimmed() {
        let out = replace_address_prefix(ADDR, "wasm1", "cosmos1").unwrap();
        assert_eq!(out, "cosmos1hj5fveer5cjtn4wd6wstzugjfdxzl0xpvsr89g");
    }

    #[test]
    fn test_no_literal_of_old_shape_remains() {
        let src = format!("{ADDR}\n\"{ADDR}\"\n# {ADDR} - note");
        let out = replace_address_prefix(&src, "wasm", "osmo").unwrap();
        let re = address_pattern("wasm").unwrap();
        assert!(!re.is_match(&out));
    }
}
