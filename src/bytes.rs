/// Decode ISO-8859-1 bytes. Every byte maps to the code point with the same
/// value, so this never fails.
pub fn latin1_to_utf8(input: &[u8]) -> String {
    input.iter().map(|&b| char::from(b)).collect()
}
