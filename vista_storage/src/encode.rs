// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key encoding compatible with `encodeURIComponent`.

/// Percent-encode `input` the way `encodeURIComponent` does.
///
/// ASCII alphanumerics and `-_.!~*'()` pass through; every other UTF-8 byte becomes `%XX` with
/// upper-case hex digits.
///
/// ```
/// use vista_storage::encode_uri_component;
///
/// assert_eq!(encode_uri_component("albums?q=cat dog"), "albums%3Fq%3Dcat%20dog");
/// assert_eq!(encode_uri_component("größe"), "gr%C3%B6%C3%9Fe");
/// ```
pub fn encode_uri_component(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        if b.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&b) {
            out.push(char::from(b));
        } else {
            out.push('%');
            out.push(char::from(HEX[usize::from(b >> 4)]));
            out.push(char::from(HEX[usize::from(b & 0x0f)]));
        }
    }
    out
}
