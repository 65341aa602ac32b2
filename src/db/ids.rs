// src/db/ids.rs
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Length of generated document ids (same shape as Firestore auto-ids).
pub const DOCUMENT_ID_LEN: usize = 20;

/// Generate a document id using the OS RNG.
pub fn generate_document_id_default() -> String {
    let mut rng = OsRng;
    generate_document_id(&mut rng, DOCUMENT_ID_LEN)
}

/// Generate an alphanumeric id of `len` characters.
pub fn generate_document_id<R: Rng>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
