/// Byte-pattern scan over the host's executable code.
pub trait SignatureScanner {
    /// Address of the first match, or `None` when the pattern does not occur
    fn scan_text(&self, pattern: &[Option<u8>]) -> Option<u64>;
}

impl<T: SignatureScanner + ?Sized> SignatureScanner for &T {
    fn scan_text(&self, pattern: &[Option<u8>]) -> Option<u64> {
        (**self).scan_text(pattern)
    }
}

/// Find the first offset of a wildcard pattern in `buffer`.
///
/// Candidates are located with `memchr` on the first concrete byte of the
/// pattern, then verified in full. A pattern made only of wildcards matches
/// at offset 0.
pub fn find_pattern(buffer: &[u8], pattern: &[Option<u8>]) -> Option<usize> {
    if pattern.is_empty() || buffer.len() < pattern.len() {
        return None;
    }

    let last = buffer.len() - pattern.len();
    let Some((anchor_idx, anchor)) = pattern
        .iter()
        .enumerate()
        .find_map(|(i, b)| b.map(|value| (i, value)))
    else {
        return Some(0);
    };

    let mut start = anchor_idx;
    while start <= last + anchor_idx {
        let found = memchr::memchr(anchor, &buffer[start..=last + anchor_idx])?;
        let candidate = start + found - anchor_idx;
        if matches_at(buffer, candidate, pattern) {
            return Some(candidate);
        }
        start += found + 1;
    }

    None
}

fn matches_at(buffer: &[u8], pos: usize, pattern: &[Option<u8>]) -> bool {
    pattern
        .iter()
        .enumerate()
        .all(|(j, byte)| byte.is_none_or(|value| buffer[pos + j] == value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pattern_exact() {
        let buffer = [0x90, 0x48, 0x8B, 0x3D, 0x10, 0x20];
        let pattern = [Some(0x48), Some(0x8B), Some(0x3D)];
        assert_eq!(find_pattern(&buffer, &pattern), Some(1));
    }

    #[test]
    fn test_find_pattern_with_wildcards() {
        let buffer = [0x48, 0x00, 0x48, 0x8B, 0xFF, 0x3D];
        let pattern = [Some(0x48), Some(0x8B), None, Some(0x3D)];
        assert_eq!(find_pattern(&buffer, &pattern), Some(2));
    }

    #[test]
    fn test_find_pattern_leading_wildcard() {
        let buffer = [0x01, 0x02, 0x03, 0x04];
        let pattern = [None, Some(0x03)];
        assert_eq!(find_pattern(&buffer, &pattern), Some(1));
    }

    #[test]
    fn test_find_pattern_missing() {
        let buffer = [0x48, 0x8B, 0x47];
        assert_eq!(find_pattern(&buffer, &[Some(0x48), Some(0x8D)]), None);
        assert_eq!(find_pattern(&buffer, &[Some(0x48); 4]), None);
        assert_eq!(find_pattern(&buffer, &[]), None);
    }

    #[test]
    fn test_find_pattern_at_end() {
        let buffer = [0x00, 0x00, 0x15, 0x16];
        assert_eq!(find_pattern(&buffer, &[Some(0x15), Some(0x16)]), Some(2));
    }
}
