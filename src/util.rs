/// Splits a key into the path leading to its final character and that
/// character.
///
/// Returns `None` for an empty key.
pub fn split_last_char(key: &str) -> Option<(&str, char)> {
    let last = key.chars().next_back()?;
    Some((&key[..key.len() - last.len_utf8()], last))
}
