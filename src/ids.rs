use rand::Rng;

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const ID_LENGTH: usize = 10;

/// Random lowercase alphanumeric identifier. Nothing checks it against
/// existing records; 36^10 makes a clash unlikely, not impossible.
pub fn generate_id() -> String {
    let mut rng = rand::rng();

    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
